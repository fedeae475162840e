//! The 34 bytecode opcodes, assigned by position in the command table (§6.3).

use num_derive::{FromPrimitive, ToPrimitive};

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, FromPrimitive, ToPrimitive)]
pub enum OpCode {
    Beg = 0,
    End = 1,
    Push = 2,
    PushR = 3,
    Pop = 4,
    PopR = 5,
    Add = 6,
    Sub = 7,
    Mul = 8,
    Div = 9,
    Sqrt = 10,
    Out = 11,
    In = 12,
    Jmp = 13,
    Je = 14,
    Jne = 15,
    Ja = 16,
    Jae = 17,
    Jb = 18,
    Jbe = 19,
    Call = 20,
    Ret = 21,
    Dump = 22,
    Print = 23,
    IsL = 24,
    IsLe = 25,
    IsM = 26,
    IsMe = 27,
    IsE = 28,
    IsNe = 29,
    And = 30,
    Or = 31,
    PushM = 32,
    PopM = 33,
}

impl OpCode {
    /// The mnemonic as it appears in assembly source, matched
    /// case-insensitively by the assembler (§4.6).
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Beg => "beg",
            OpCode::End => "end",
            OpCode::Push => "push",
            OpCode::PushR => "pushr",
            OpCode::Pop => "pop",
            OpCode::PopR => "popr",
            OpCode::Add => "add",
            OpCode::Sub => "sub",
            OpCode::Mul => "mul",
            OpCode::Div => "div",
            OpCode::Sqrt => "sqrt",
            OpCode::Out => "out",
            OpCode::In => "in",
            OpCode::Jmp => "jmp",
            OpCode::Je => "je",
            OpCode::Jne => "jne",
            OpCode::Ja => "ja",
            OpCode::Jae => "jae",
            OpCode::Jb => "jb",
            OpCode::Jbe => "jbe",
            OpCode::Call => "call",
            OpCode::Ret => "ret",
            OpCode::Dump => "@",
            OpCode::Print => "print",
            OpCode::IsL => "is_l",
            OpCode::IsLe => "is_le",
            OpCode::IsM => "is_m",
            OpCode::IsMe => "is_me",
            OpCode::IsE => "is_e",
            OpCode::IsNe => "is_ne",
            OpCode::And => "and",
            OpCode::Or => "or",
            OpCode::PushM => "pushm",
            OpCode::PopM => "popm",
        }
    }

    pub fn from_mnemonic(word: &str) -> Option<OpCode> {
        let lower = word.to_ascii_lowercase();
        if lower == "dump" {
            return Some(OpCode::Dump);
        }
        ALL.iter().copied().find(|op| op.mnemonic() == lower)
    }
}

pub const ALL: [OpCode; 34] = [
    OpCode::Beg,
    OpCode::End,
    OpCode::Push,
    OpCode::PushR,
    OpCode::Pop,
    OpCode::PopR,
    OpCode::Add,
    OpCode::Sub,
    OpCode::Mul,
    OpCode::Div,
    OpCode::Sqrt,
    OpCode::Out,
    OpCode::In,
    OpCode::Jmp,
    OpCode::Je,
    OpCode::Jne,
    OpCode::Ja,
    OpCode::Jae,
    OpCode::Jb,
    OpCode::Jbe,
    OpCode::Call,
    OpCode::Ret,
    OpCode::Dump,
    OpCode::Print,
    OpCode::IsL,
    OpCode::IsLe,
    OpCode::IsM,
    OpCode::IsMe,
    OpCode::IsE,
    OpCode::IsNe,
    OpCode::And,
    OpCode::Or,
    OpCode::PushM,
    OpCode::PopM,
];

#[test]
fn dump_mnemonic_is_at_sign() {
    assert_eq!(OpCode::Dump.mnemonic(), "@");
    assert_eq!(OpCode::from_mnemonic("@"), Some(OpCode::Dump));
    assert_eq!(OpCode::from_mnemonic("dump"), Some(OpCode::Dump));
    assert_eq!(OpCode::from_mnemonic("DUMP"), Some(OpCode::Dump));
}

#[test]
fn mnemonic_lookup_is_case_insensitive() {
    assert_eq!(OpCode::from_mnemonic("PUSH"), Some(OpCode::Push));
    assert_eq!(OpCode::from_mnemonic("Is_Le"), Some(OpCode::IsLe));
    assert_eq!(OpCode::from_mnemonic("bogus"), None);
}
