//! The seven named registers (§3), indexed 0..6 in `Cpu::regs`.

use num_derive::{FromPrimitive, ToPrimitive};
use util::{EnumFromStr, ParseEnumError};

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash, FromPrimitive, ToPrimitive)]
pub enum RegisterId {
    Ax = 0,
    Bx = 1,
    Cx = 2,
    Dx = 3,
    Rt = 4,
    Bp = 5,
    Sp = 6,
}

pub const REGISTER_COUNT: usize = 7;

impl EnumFromStr for RegisterId {
    fn from_str(s: &str) -> Result<RegisterId, ParseEnumError> {
        match s.to_ascii_uppercase().as_str() {
            "AX" => Ok(RegisterId::Ax),
            "BX" => Ok(RegisterId::Bx),
            "CX" => Ok(RegisterId::Cx),
            "DX" => Ok(RegisterId::Dx),
            "RT" => Ok(RegisterId::Rt),
            "BP" => Ok(RegisterId::Bp),
            "SP" => Ok(RegisterId::Sp),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                enum_name: "RegisterId",
            }),
        }
    }
}

impl RegisterId {
    pub fn name(self) -> &'static str {
        match self {
            RegisterId::Ax => "AX",
            RegisterId::Bx => "BX",
            RegisterId::Cx => "CX",
            RegisterId::Dx => "DX",
            RegisterId::Rt => "RT",
            RegisterId::Bp => "BP",
            RegisterId::Sp => "SP",
        }
    }
}

#[test]
fn round_trips_through_name_and_from_str() {
    for reg in [
        RegisterId::Ax,
        RegisterId::Bx,
        RegisterId::Cx,
        RegisterId::Dx,
        RegisterId::Rt,
        RegisterId::Bp,
        RegisterId::Sp,
    ] {
        assert_eq!(RegisterId::from_str(reg.name()).unwrap(), reg);
    }
    assert_eq!(RegisterId::from_str("sp").unwrap(), RegisterId::Sp);
    assert!(RegisterId::from_str("ZZ").is_err());
}
