use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    Io { path: PathBuf, source: io::Error },
    Parse(parser::error::ParseError),
    Codegen(codegen::CodegenError),
    Assemble(assembler::error::AssembleError),
    Load(vm::LoadError),
    Runtime(vm::RuntimeError),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Error {
        Error::Io { path: path.into(), source }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Error::Parse(e) => write!(f, "{}", e),
            Error::Codegen(e) => write!(f, "{}", e),
            Error::Assemble(e) => write!(f, "{}", e),
            Error::Load(e) => write!(f, "{}", e),
            Error::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl StdError for Error {}

impl From<parser::error::ParseError> for Error {
    fn from(e: parser::error::ParseError) -> Error {
        Error::Parse(e)
    }
}

impl From<codegen::CodegenError> for Error {
    fn from(e: codegen::CodegenError) -> Error {
        Error::Codegen(e)
    }
}

impl From<assembler::error::AssembleError> for Error {
    fn from(e: assembler::error::AssembleError) -> Error {
        Error::Assemble(e)
    }
}

impl From<vm::LoadError> for Error {
    fn from(e: vm::LoadError) -> Error {
        Error::Load(e)
    }
}

impl From<vm::RuntimeError> for Error {
    fn from(e: vm::RuntimeError) -> Error {
        Error::Runtime(e)
    }
}
