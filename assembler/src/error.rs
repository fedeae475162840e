use std::error::Error as StdError;
use std::fmt;
use util::ParseEnumError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssembleError {
    UnknownMnemonic { line: usize, word: String },
    UnknownRegister { line: usize, word: String, source: ParseEnumError },
    BadImmediate { line: usize, word: String },
    MissingOperand { line: usize, mnemonic: String },
    UndefinedLabel { line: usize, name: String },
    DuplicateLabel { line: usize, name: String },
    ProgramTooLarge,
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AssembleError::UnknownMnemonic { line, word } => {
                write!(f, "line {}: unknown mnemonic `{}`", line, word)
            }
            AssembleError::UnknownRegister { line, word, source } => {
                write!(f, "line {}: `{}` is not a register: {}", line, word, source)
            }
            AssembleError::BadImmediate { line, word } => {
                write!(f, "line {}: `{}` is not a valid immediate", line, word)
            }
            AssembleError::MissingOperand { line, mnemonic } => {
                write!(f, "line {}: `{}` is missing an operand", line, mnemonic)
            }
            AssembleError::UndefinedLabel { line, name } => {
                write!(f, "line {}: undefined label `{}`", line, name)
            }
            AssembleError::DuplicateLabel { line, name } => {
                write!(f, "line {}: label `{}` is already defined", line, name)
            }
            AssembleError::ProgramTooLarge => write!(f, "program exceeds the 65536 instruction address space"),
        }
    }
}

impl StdError for AssembleError {}
