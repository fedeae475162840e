//! AST → textual assembly lowering (§4.5).
//!
//! Each [`ast::NodeKind`] variant has a fixed lowering contract; this module
//! walks the tree once, pre-order, emitting one assembly mnemonic line at a
//! time into an internal buffer.

mod symtab;

use ast::{Node, NodeKind};
use common::Pos;
use std::error::Error;
use std::fmt;
use symtab::SymbolTable;

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CodegenError {
    UndefinedSymbol { name: String, pos: Pos },
    DuplicateSymbol { name: String, pos: Pos },
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodegenError::UndefinedSymbol { name, pos } => {
                write!(f, "{}: undefined variable `{}`", pos, name)
            }
            CodegenError::DuplicateSymbol { name, pos } => {
                write!(f, "{}: `{}` is already declared in this scope", pos, name)
            }
        }
    }
}

impl Error for CodegenError {}

/// Maps a namespaced operator name (e.g. `binl_+`) to the mnemonic sequence
/// emitted for it (§4.5's operator table). Panics on an operator the fixed
/// precedence table (§4.3) could never produce — this is an internal
/// invariant, not a user-triggerable error.
fn mnemonic_for(namespaced: &str) -> &'static str {
    match namespaced {
        "unpr_+" => "",
        "unpr_-" => "push -1\nmul",
        "binl_*" => "mul",
        "binl_/" => "div",
        "binl_+" => "add",
        "binl_-" => "sub",
        "binf_<" => "is_l",
        "binf_<=" => "is_le",
        "binf_>" => "is_m",
        "binf_>=" => "is_me",
        "binf_==" => "is_e",
        "binf_!=" => "is_ne",
        "binl_&&" => "and",
        "binl_||" => "or",
        other => panic!("no mnemonic registered for operator `{}`", other),
    }
}

pub struct CodeGenerator {
    symtab: SymbolTable,
    label_counter: u32,
    cur_func: Option<String>,
    out: String,
}

impl Default for CodeGenerator {
    fn default() -> CodeGenerator {
        CodeGenerator {
            symtab: SymbolTable::new(),
            label_counter: 0,
            cur_func: None,
            out: String::new(),
        }
    }
}

impl CodeGenerator {
    pub fn new() -> CodeGenerator {
        Default::default()
    }

    /// Lowers a whole program tree to textual assembly.
    pub fn generate(mut self, program: &Node) -> Result<String, CodegenError> {
        self.lower(program)?;
        Ok(self.out)
    }

    fn emit(&mut self, line: impl AsRef<str>) {
        self.out.push_str(line.as_ref());
        self.out.push('\n');
    }

    /// Deterministic label minting (redesign, §9): `$` cannot start or occur
    /// inside `IDENTIFIER_LOWER`/`IDENTIFIER_UPPER`/`OPERATOR`, so it is
    /// unavailable to user syntax; a monotonically increasing counter makes
    /// output reproducible across runs, unlike the original's random prefix.
    fn mint_label(&mut self) -> String {
        let label = format!("$lbl{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    fn lower(&mut self, node: &Node) -> Result<(), CodegenError> {
        match &node.kind {
            NodeKind::Number(value) => {
                self.emit(format!("push {}", value));
                Ok(())
            }
            NodeKind::Variable(name) => {
                let slot = self.symtab.get_address(name, &node.pos)?;
                self.emit(format!("pushm {}", slot));
                Ok(())
            }
            NodeKind::Operation { op, args } => {
                for arg in args {
                    self.lower(arg)?;
                }
                let mnemonic = mnemonic_for(&op.namespaced_name());
                if !mnemonic.is_empty() {
                    self.emit(mnemonic);
                }
                Ok(())
            }
            NodeKind::Call { name, args } => {
                self.emit("pushr BP");
                self.emit("pushr SP");
                self.emit("popr BP");
                for arg in args {
                    self.lower(arg)?;
                }
                self.emit(format!("call {}", name));
                Ok(())
            }
            NodeKind::Assign { name, value } => {
                self.lower(value)?;
                let slot = self.symtab.get_address(name, &node.pos)?;
                self.emit(format!("popm {}", slot));
                Ok(())
            }
            NodeKind::VarDef { name, value } => {
                self.lower(value)?;
                let slot = self.symtab.add_var(name, &node.pos)?;
                self.emit(format!("popm {}", slot));
                Ok(())
            }
            NodeKind::If { cond, then_branch, else_branch } => {
                self.lower(cond)?;
                self.emit("push 0");
                let then_label = self.mint_label();
                let else_label = self.mint_label();
                self.emit(format!("ja {}", then_label));
                self.emit(format!("jmp {}", else_label));
                self.symtab.new_scope();
                self.emit(format!("{}:", then_label));
                self.lower(then_branch)?;
                self.symtab.clear_scope();
                self.symtab.new_scope();
                self.emit(format!("{}:", else_label));
                if let Some(else_branch) = else_branch {
                    self.lower(else_branch)?;
                }
                self.symtab.clear_scope();
                Ok(())
            }
            NodeKind::While { cond, body } => {
                let cond_label = self.mint_label();
                let end_label = self.mint_label();
                self.emit(format!("{}:", cond_label));
                self.lower(cond)?;
                self.emit("push 0");
                self.emit(format!("jb {}", end_label));
                self.symtab.new_scope();
                self.lower(body)?;
                self.symtab.clear_scope();
                self.emit(format!("jmp {}", cond_label));
                self.emit(format!("{}:", end_label));
                Ok(())
            }
            NodeKind::Print(value) => {
                self.lower(value)?;
                self.emit("print");
                Ok(())
            }
            NodeKind::Return(value) => {
                self.lower(value)?;
                self.emit("popr RT");
                if self.cur_func.as_deref() == Some("main") {
                    self.emit("end");
                    return Ok(());
                }
                let cycle_label = self.mint_label();
                let leave_label = self.mint_label();
                self.emit(format!("{}:", cycle_label));
                self.emit("pushr SP");
                self.emit("pushr BP");
                self.emit(format!("jbe {}", leave_label));
                self.emit("pop");
                self.emit(format!("jmp {}", cycle_label));
                self.emit(format!("{}:", leave_label));
                self.emit("popr BP");
                self.emit("pushr RT");
                self.emit("ret");
                Ok(())
            }
            NodeKind::FuncDef { name, params, body } => {
                self.symtab.new_scope();
                self.cur_func = Some(name.clone());
                if name == "main" {
                    self.emit("beg");
                }
                self.emit(format!("{}:", name));
                for param in params {
                    self.symtab.add_var(param, &node.pos)?;
                }
                self.lower(body)?;
                self.symtab.clear_scope();
                self.cur_func = None;
                Ok(())
            }
            NodeKind::StSeq(statements) => {
                for stmt in statements {
                    self.lower(stmt)?;
                }
                Ok(())
            }
            NodeKind::Program(funcs) => {
                for func in funcs {
                    self.lower(func)?;
                }
                Ok(())
            }
        }
    }
}

/// Convenience wrapper for the common case of lowering a whole program.
pub fn generate(program: &Node) -> Result<String, CodegenError> {
    CodeGenerator::new().generate(program)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_literal_from_main_emits_beg_and_end() {
        let program = parser::parse("t.va", "def main() { return 42; }").unwrap();
        let asm = generate(&program).unwrap();
        assert!(asm.contains("beg"));
        assert!(asm.contains("push 42"));
        assert!(asm.contains("popr RT"));
        assert!(asm.contains("end"));
    }

    #[test]
    fn non_main_return_unwinds_with_jbe_loop() {
        let src = "def f(n) { return n; } def main() { return f(1); }";
        let program = parser::parse("t.va", src).unwrap();
        let asm = generate(&program).unwrap();
        assert!(asm.contains("jbe"));
        assert!(asm.contains("ret"));
    }

    #[test]
    fn duplicate_var_def_is_an_error() {
        let src = "def main() { var x = 1; var x = 2; return x; }";
        let program = parser::parse("t.va", src).unwrap();
        let err = generate(&program).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateSymbol { .. }));
    }

    #[test]
    fn undefined_variable_is_an_error() {
        let src = "def main() { return y; }";
        let program = parser::parse("t.va", src).unwrap();
        let err = generate(&program).unwrap_err();
        assert!(matches!(err, CodegenError::UndefinedSymbol { .. }));
    }

    #[test]
    fn labels_are_deterministic_across_runs() {
        let src = "def main() { if (1 < 2) { return 1; } return 0; }";
        let program = parser::parse("t.va", src).unwrap();
        let first = generate(&program).unwrap();
        let second = generate(&program).unwrap();
        assert_eq!(first, second);
    }
}
