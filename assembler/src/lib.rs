//! Two-pass assembler turning valang assembly text into the bytecode format
//! `vm::loader` reads back.
//!
//! Comments start with `//` and run to the end of the line. A line may open
//! with a `label:` prefix before its mnemonic. Mnemonics and register names
//! are matched case-insensitively. An implicit terminal `end` is appended if
//! the source doesn't already end with one.

pub mod error;
pub mod source_map;

use byteorder::{LittleEndian, WriteBytesExt};
use error::AssembleError;
use source_map::{SourceMap, SourceMapItem};
use std::collections::HashMap;
use util::EnumFromStr;
use vm::loader::{MAGIC, STANDARD};
use vm::opcode::OpCode;
use vm::register::RegisterId;

#[derive(Debug)]
pub struct Assembled {
    pub bytes: Vec<u8>,
    pub source_map: SourceMap,
}

enum Operand<'a> {
    Register(RegisterId),
    Immediate(f64),
    /// Unresolved until pass 2: either a numeric instruction index written
    /// directly in source, or a label to look up in the label table.
    Target(JumpTarget<'a>),
    MemoryOffset(i16),
}

enum JumpTarget<'a> {
    Index(u16),
    Label(&'a str),
}

struct ParsedLine<'a> {
    line: usize,
    mnemonic: OpCode,
    mnemonic_word: &'a str,
    operand: Option<Operand<'a>>,
}

/// Assembles `source` (attributed to `file` only for error messages) into a
/// loadable bytecode image plus a per-instruction source line map.
pub fn assemble(file: &str, source: &str) -> Result<Assembled, AssembleError> {
    let _ = file;
    let (parsed, labels, source_map) = pass_one(source)?;
    let bytes = pass_two(&parsed, &labels)?;
    Ok(Assembled { bytes, source_map })
}

fn pass_one<'a>(
    source: &'a str,
) -> Result<(Vec<ParsedLine<'a>>, HashMap<&'a str, u16>, SourceMap), AssembleError> {
    let mut parsed = Vec::new();
    let mut labels = HashMap::new();
    let mut source_map = Vec::new();

    for (line_idx, raw_line) in source.lines().enumerate() {
        let line = line_idx + 1;
        let without_comment = match raw_line.find("//") {
            Some(i) => &raw_line[..i],
            None => raw_line,
        };
        let mut words: Vec<&str> = without_comment.split_whitespace().collect();
        if words.is_empty() {
            continue;
        }

        if let Some(label) = words[0].strip_suffix(':') {
            if labels.insert(label, parsed.len() as u16).is_some() {
                return Err(AssembleError::DuplicateLabel {
                    line,
                    name: label.to_string(),
                });
            }
            words.remove(0);
            if words.is_empty() {
                continue;
            }
        }

        let mnemonic_word = words[0];
        let mnemonic = OpCode::from_mnemonic(mnemonic_word).ok_or_else(|| AssembleError::UnknownMnemonic {
            line,
            word: mnemonic_word.to_string(),
        })?;

        let operand = parse_operand(mnemonic, mnemonic_word, &words[1..], line)?;

        if parsed.len() >= u16::max_value() as usize {
            return Err(AssembleError::ProgramTooLarge);
        }

        source_map.push(SourceMapItem { line });
        parsed.push(ParsedLine {
            line,
            mnemonic,
            mnemonic_word,
            operand,
        });
    }

    if !matches!(parsed.last().map(|p| p.mnemonic), Some(OpCode::End)) {
        let eof_line = source.lines().count() + 1;
        source_map.push(SourceMapItem { line: eof_line });
        parsed.push(ParsedLine {
            line: eof_line,
            mnemonic: OpCode::End,
            mnemonic_word: "end",
            operand: None,
        });
    }

    Ok((parsed, labels, source_map))
}

fn parse_operand<'a>(
    mnemonic: OpCode,
    mnemonic_word: &str,
    rest: &[&'a str],
    line: usize,
) -> Result<Option<Operand<'a>>, AssembleError> {
    let missing = || AssembleError::MissingOperand {
        line,
        mnemonic: mnemonic_word.to_string(),
    };

    use OpCode::*;
    let operand = match mnemonic {
        Push => Some(Operand::Immediate(parse_immediate(rest.first().copied().ok_or_else(missing)?, line)?)),
        PushR | PopR => Some(Operand::Register(parse_register(rest.first().copied().ok_or_else(missing)?, line)?)),
        Jmp | Je | Jne | Ja | Jae | Jb | Jbe | Call => {
            Some(Operand::Target(parse_target(rest.first().copied().ok_or_else(missing)?)))
        }
        PushM | PopM => Some(Operand::MemoryOffset(parse_memory_offset(
            rest.first().copied().ok_or_else(missing)?,
            line,
        )?)),
        _ => None,
    };
    Ok(operand)
}

fn parse_register(word: &str, line: usize) -> Result<RegisterId, AssembleError> {
    RegisterId::from_str(word).map_err(|source| AssembleError::UnknownRegister {
        line,
        word: word.to_string(),
        source,
    })
}

fn parse_immediate(word: &str, line: usize) -> Result<f64, AssembleError> {
    word.parse::<f64>().map_err(|_| AssembleError::BadImmediate {
        line,
        word: word.to_string(),
    })
}

fn parse_memory_offset(word: &str, line: usize) -> Result<i16, AssembleError> {
    word.parse::<i16>().map_err(|_| AssembleError::BadImmediate {
        line,
        word: word.to_string(),
    })
}

fn parse_target(word: &str) -> JumpTarget {
    match word.parse::<u16>() {
        Ok(n) => JumpTarget::Index(n),
        Err(_) => JumpTarget::Label(word),
    }
}

fn pass_two(parsed: &[ParsedLine], labels: &HashMap<&str, u16>) -> Result<Vec<u8>, AssembleError> {
    let mut bytes = vec![MAGIC, STANDARD];

    for line in parsed {
        bytes.push(line.mnemonic as u8);
        match &line.operand {
            None => {}
            Some(Operand::Register(r)) => bytes.push(*r as u8),
            Some(Operand::Immediate(v)) => {
                bytes.write_f64::<LittleEndian>(*v).expect("write to Vec never fails");
            }
            Some(Operand::MemoryOffset(off)) => {
                bytes.write_i16::<LittleEndian>(*off).expect("write to Vec never fails");
            }
            Some(Operand::Target(target)) => {
                let resolved = match target {
                    JumpTarget::Index(n) => *n,
                    JumpTarget::Label(name) => *labels.get(name).ok_or_else(|| AssembleError::UndefinedLabel {
                        line: line.line,
                        name: name.to_string(),
                    })?,
                };
                bytes
                    .write_u16::<LittleEndian>(resolved)
                    .expect("write to Vec never fails");
            }
        }
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_a_minimal_program() {
        let asm = assemble("t.vasm", "beg\npush 1\nend\n").unwrap();
        assert_eq!(asm.bytes[0], MAGIC);
        assert_eq!(asm.bytes[1], STANDARD);
        assert_eq!(asm.source_map.len(), 3);
    }

    #[test]
    fn implicit_end_is_appended_when_missing() {
        let asm = assemble("t.vasm", "beg\npush 1\n").unwrap();
        assert_eq!(*asm.bytes.last().unwrap(), OpCode::End as u8);
    }

    #[test]
    fn forward_label_reference_resolves() {
        let asm = assemble("t.vasm", "jmp skip\npush 1\nskip: end\n").unwrap();
        // jmp(1) + target(2), push(1) + immediate(8), end(1)
        assert_eq!(asm.bytes.len() - 2, (1 + 2) + (1 + 8) + 1);
    }

    #[test]
    fn undefined_label_is_an_error() {
        let err = assemble("t.vasm", "jmp nowhere\nend\n").unwrap_err();
        assert!(matches!(err, AssembleError::UndefinedLabel { .. }));
    }

    #[test]
    fn duplicate_label_is_an_error() {
        let err = assemble("t.vasm", "a: end\na: end\n").unwrap_err();
        assert!(matches!(err, AssembleError::DuplicateLabel { .. }));
    }

    #[test]
    fn unknown_mnemonic_is_an_error() {
        let err = assemble("t.vasm", "frobnicate\n").unwrap_err();
        assert!(matches!(err, AssembleError::UnknownMnemonic { .. }));
    }

    #[test]
    fn dump_alias_is_accepted() {
        let asm = assemble("t.vasm", "dump\nend\n").unwrap();
        assert_eq!(asm.bytes[2], OpCode::Dump as u8);
    }

    #[test]
    fn mnemonics_are_case_insensitive() {
        let asm = assemble("t.vasm", "BEG\nPUSH 2\nEND\n").unwrap();
        assert_eq!(asm.bytes[2], OpCode::Beg as u8);
    }

    #[test]
    fn double_slash_comments_are_stripped() {
        let asm = assemble("t.vasm", "beg // entry point\nend // done\n").unwrap();
        assert_eq!(asm.bytes[2], OpCode::Beg as u8);
        assert_eq!(asm.bytes[3], OpCode::End as u8);
    }
}
