//! Bytecode header check and full-program decoding (§4.7, §6.2).

use crate::error::LoadError;
use crate::instruction::Instruction;
use std::io::Read;

pub const MAGIC: u8 = 0xBA;
pub const STANDARD: u8 = 0x02;

pub struct LoadedProgram {
    pub code: Vec<Instruction>,
    /// Index of the first instruction to execute: immediately after the
    /// first `BEG`, or 0 if the program has no `BEG` at all.
    pub entry: usize,
}

pub fn load<R: Read>(r: &mut R) -> Result<LoadedProgram, LoadError> {
    let mut header = [0u8; 2];
    r.read_exact(&mut header).map_err(|_| LoadError::TruncatedFile)?;
    if header[0] != MAGIC {
        return Err(LoadError::BadMagic(header[0]));
    }
    if header[1] != STANDARD {
        return Err(LoadError::UnsupportedStandard(header[1]));
    }

    let mut code = Vec::new();
    while let Some(instr) = Instruction::decode(r)? {
        code.push(instr);
    }

    let entry = code
        .iter()
        .position(|i| matches!(i, Instruction::Beg))
        .map(|idx| idx + 1)
        .unwrap_or(0);

    Ok(LoadedProgram { code, entry })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::OpCode;
    use byteorder::WriteBytesExt;
    use std::io::Cursor;

    fn program_bytes(ops: &[OpCode]) -> Vec<u8> {
        let mut buf = vec![MAGIC, STANDARD];
        for op in ops {
            buf.write_u8(*op as u8).unwrap();
        }
        buf
    }

    #[test]
    fn entry_point_is_index_after_first_beg() {
        let bytes = program_bytes(&[OpCode::Beg, OpCode::Pop, OpCode::End]);
        let loaded = load(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(loaded.entry, 1);
        assert_eq!(loaded.code.len(), 3);
    }

    #[test]
    fn no_beg_starts_at_zero() {
        let bytes = program_bytes(&[OpCode::Pop, OpCode::End]);
        let loaded = load(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(loaded.entry, 0);
    }

    #[test]
    fn bad_magic_is_rejected() {
        let bytes = vec![0x00u8, STANDARD];
        assert!(matches!(load(&mut Cursor::new(bytes)), Err(LoadError::BadMagic(0x00))));
    }

    #[test]
    fn unsupported_standard_is_rejected() {
        let bytes = vec![MAGIC, 0x01u8];
        assert!(matches!(
            load(&mut Cursor::new(bytes)),
            Err(LoadError::UnsupportedStandard(0x01))
        ));
    }
}
