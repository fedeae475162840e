//! Stack-based virtual machine for the valang bytecode standard.

pub mod cpu;
pub mod error;
pub mod instruction;
pub mod loader;
pub mod opcode;
pub mod register;

use std::io::{BufRead, Write};

pub use cpu::Cpu;
pub use error::{LoadError, RuntimeError};

#[derive(Debug)]
pub enum ExecutionError {
    Load(LoadError),
    Runtime(RuntimeError),
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::Load(e) => write!(f, "{}", e),
            ExecutionError::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ExecutionError {}

impl From<LoadError> for ExecutionError {
    fn from(e: LoadError) -> ExecutionError {
        ExecutionError::Load(e)
    }
}

impl From<RuntimeError> for ExecutionError {
    fn from(e: RuntimeError) -> ExecutionError {
        ExecutionError::Runtime(e)
    }
}

/// Loads a bytecode stream and runs it to completion against the given I/O.
pub fn execute<R: std::io::Read, IN: BufRead, OUT: Write>(
    bytecode: &mut R,
    stdin: &mut IN,
    stdout: &mut OUT,
) -> Result<(), ExecutionError> {
    let program = loader::load(bytecode)?;
    let mut cpu = Cpu::new(program);
    cpu.run(stdin, stdout)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    #[test]
    fn executes_a_minimal_program_end_to_end() {
        let mut bytes = vec![loader::MAGIC, loader::STANDARD];
        bytes.push(opcode::OpCode::Beg as u8);
        bytes.push(opcode::OpCode::End as u8);
        let mut stdin = BufReader::new(Cursor::new(Vec::<u8>::new()));
        let mut stdout = Vec::new();
        execute(&mut Cursor::new(bytes), &mut stdin, &mut stdout).unwrap();
        assert_eq!(String::from_utf8(stdout).unwrap(), "0.000\n");
    }
}
