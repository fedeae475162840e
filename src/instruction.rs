//! Decoded instruction records (§4.7 loading, §6.2 byte layout).

use crate::error::LoadError;
use crate::opcode::OpCode;
use crate::register::RegisterId;
use byteorder::{LittleEndian, ReadBytesExt};
use num_traits::FromPrimitive;
use std::io::Read;

#[derive(Clone, Copy, Debug)]
pub enum Instruction {
    Beg,
    End,
    Push(f64),
    PushR(RegisterId),
    Pop,
    PopR(RegisterId),
    Add,
    Sub,
    Mul,
    Div,
    Sqrt,
    Out,
    In,
    Jmp(u16),
    Je(u16),
    Jne(u16),
    Ja(u16),
    Jae(u16),
    Jb(u16),
    Jbe(u16),
    Call(u16),
    Ret,
    Dump,
    Print,
    IsL,
    IsLe,
    IsM,
    IsMe,
    IsE,
    IsNe,
    And,
    Or,
    PushM(i16),
    PopM(i16),
}

impl Instruction {
    pub fn opcode(self) -> OpCode {
        match self {
            Instruction::Beg => OpCode::Beg,
            Instruction::End => OpCode::End,
            Instruction::Push(_) => OpCode::Push,
            Instruction::PushR(_) => OpCode::PushR,
            Instruction::Pop => OpCode::Pop,
            Instruction::PopR(_) => OpCode::PopR,
            Instruction::Add => OpCode::Add,
            Instruction::Sub => OpCode::Sub,
            Instruction::Mul => OpCode::Mul,
            Instruction::Div => OpCode::Div,
            Instruction::Sqrt => OpCode::Sqrt,
            Instruction::Out => OpCode::Out,
            Instruction::In => OpCode::In,
            Instruction::Jmp(_) => OpCode::Jmp,
            Instruction::Je(_) => OpCode::Je,
            Instruction::Jne(_) => OpCode::Jne,
            Instruction::Ja(_) => OpCode::Ja,
            Instruction::Jae(_) => OpCode::Jae,
            Instruction::Jb(_) => OpCode::Jb,
            Instruction::Jbe(_) => OpCode::Jbe,
            Instruction::Call(_) => OpCode::Call,
            Instruction::Ret => OpCode::Ret,
            Instruction::Dump => OpCode::Dump,
            Instruction::Print => OpCode::Print,
            Instruction::IsL => OpCode::IsL,
            Instruction::IsLe => OpCode::IsLe,
            Instruction::IsM => OpCode::IsM,
            Instruction::IsMe => OpCode::IsMe,
            Instruction::IsE => OpCode::IsE,
            Instruction::IsNe => OpCode::IsNe,
            Instruction::And => OpCode::And,
            Instruction::Or => OpCode::Or,
            Instruction::PushM(_) => OpCode::PushM,
            Instruction::PopM(_) => OpCode::PopM,
        }
    }

    /// Reads one opcode byte and its operands from `r`. Returns `Ok(None)` at
    /// a clean end of stream (no opcode byte left to read at all).
    pub fn decode<R: Read>(r: &mut R) -> Result<Option<Instruction>, LoadError> {
        let opcode_byte = match read_u8_opt(r)? {
            Some(b) => b,
            None => return Ok(None),
        };
        let opcode = OpCode::from_u8(opcode_byte).ok_or(LoadError::TruncatedFile)?;

        let instr = match opcode {
            OpCode::Beg => Instruction::Beg,
            OpCode::End => Instruction::End,
            OpCode::Push => Instruction::Push(read_value(r)?),
            OpCode::PushR => Instruction::PushR(read_register(r)?),
            OpCode::Pop => Instruction::Pop,
            OpCode::PopR => Instruction::PopR(read_register(r)?),
            OpCode::Add => Instruction::Add,
            OpCode::Sub => Instruction::Sub,
            OpCode::Mul => Instruction::Mul,
            OpCode::Div => Instruction::Div,
            OpCode::Sqrt => Instruction::Sqrt,
            OpCode::Out => Instruction::Out,
            OpCode::In => Instruction::In,
            OpCode::Jmp => Instruction::Jmp(read_nametag(r)?),
            OpCode::Je => Instruction::Je(read_nametag(r)?),
            OpCode::Jne => Instruction::Jne(read_nametag(r)?),
            OpCode::Ja => Instruction::Ja(read_nametag(r)?),
            OpCode::Jae => Instruction::Jae(read_nametag(r)?),
            OpCode::Jb => Instruction::Jb(read_nametag(r)?),
            OpCode::Jbe => Instruction::Jbe(read_nametag(r)?),
            OpCode::Call => Instruction::Call(read_nametag(r)?),
            OpCode::Ret => Instruction::Ret,
            OpCode::Dump => Instruction::Dump,
            OpCode::Print => Instruction::Print,
            OpCode::IsL => Instruction::IsL,
            OpCode::IsLe => Instruction::IsLe,
            OpCode::IsM => Instruction::IsM,
            OpCode::IsMe => Instruction::IsMe,
            OpCode::IsE => Instruction::IsE,
            OpCode::IsNe => Instruction::IsNe,
            OpCode::And => Instruction::And,
            OpCode::Or => Instruction::Or,
            OpCode::PushM => Instruction::PushM(read_memory_offset(r)?),
            OpCode::PopM => Instruction::PopM(read_memory_offset(r)?),
        };
        Ok(Some(instr))
    }
}

fn read_u8_opt<R: Read>(r: &mut R) -> Result<Option<u8>, LoadError> {
    let mut buf = [0u8; 1];
    match r.read(&mut buf) {
        Ok(0) => Ok(None),
        Ok(_) => Ok(Some(buf[0])),
        Err(e) => Err(LoadError::Io(e)),
    }
}

fn read_register<R: Read>(r: &mut R) -> Result<RegisterId, LoadError> {
    let byte = r.read_u8().map_err(|_| LoadError::TruncatedFile)?;
    num_traits::FromPrimitive::from_u8(byte).ok_or(LoadError::TruncatedFile)
}

fn read_value<R: Read>(r: &mut R) -> Result<f64, LoadError> {
    r.read_f64::<LittleEndian>().map_err(|_| LoadError::TruncatedFile)
}

fn read_nametag<R: Read>(r: &mut R) -> Result<u16, LoadError> {
    r.read_u16::<LittleEndian>().map_err(|_| LoadError::TruncatedFile)
}

fn read_memory_offset<R: Read>(r: &mut R) -> Result<i16, LoadError> {
    r.read_i16::<LittleEndian>().map_err(|_| LoadError::TruncatedFile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::WriteBytesExt;
    use std::io::Cursor;

    #[test]
    fn decodes_push_with_little_endian_immediate() {
        let mut buf = Vec::new();
        buf.write_u8(OpCode::Push as u8).unwrap();
        buf.write_f64::<LittleEndian>(3.5).unwrap();
        let mut cursor = Cursor::new(buf);
        let instr = Instruction::decode(&mut cursor).unwrap().unwrap();
        assert!(matches!(instr, Instruction::Push(v) if v == 3.5));
    }

    #[test]
    fn decodes_jmp_nametag() {
        let mut buf = Vec::new();
        buf.write_u8(OpCode::Jmp as u8).unwrap();
        buf.write_u16::<LittleEndian>(7).unwrap();
        let mut cursor = Cursor::new(buf);
        let instr = Instruction::decode(&mut cursor).unwrap().unwrap();
        assert!(matches!(instr, Instruction::Jmp(7)));
    }

    #[test]
    fn end_of_stream_returns_none() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(Instruction::decode(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn unknown_opcode_byte_is_an_error() {
        let mut cursor = Cursor::new(vec![0xFFu8]);
        assert!(matches!(
            Instruction::decode(&mut cursor),
            Err(LoadError::TruncatedFile)
        ));
    }
}
