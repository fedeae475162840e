//! Turns tokenized valang source into an [`ast::Node`] program tree.
//!
//! [`parse`] is the entry point most callers want; [`grammar`] and
//! [`precedence`] are exposed for tests and for tools that want to reuse the
//! expression engine with a different precedence table.

pub mod error;
pub mod grammar;
pub mod precedence;

pub use error::ParseError;

use ast::Node;
use lexer::{tokenize, TokenCursor};

/// Lexes `source` (errors reported against `file`) and parses it as a full
/// program (§4.4).
pub fn parse(file: &str, source: &str) -> Result<Node, ParseError> {
    let tokens = tokenize(file, source)
        .map_err(|e| ParseError::new(e.pos, "unrecognized character in source"))?;
    let mut cursor = TokenCursor::new(&tokens);
    grammar::parse_program(&mut cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ast::{NodeKind, OpClass};

    fn single_func_body(program: &Node) -> &Node {
        match &program.kind {
            NodeKind::Program(funcs) => {
                assert_eq!(funcs.len(), 1);
                match &funcs[0].kind {
                    NodeKind::FuncDef { body, .. } => body,
                    _ => panic!("expected a function definition"),
                }
            }
            _ => panic!("expected a program"),
        }
    }

    #[test]
    fn parses_return_literal() {
        let program = parse("t.va", "def main() { return 42; }").unwrap();
        let body = single_func_body(&program);
        match &body.kind {
            NodeKind::StSeq(stmts) => {
                assert_eq!(stmts.len(), 1);
                match &stmts[0].kind {
                    NodeKind::Return(v) => assert!(matches!(v.kind, NodeKind::Number(n) if n == 42.0)),
                    _ => panic!("expected return"),
                }
            }
            _ => panic!("expected block"),
        }
    }

    #[test]
    fn left_associative_subtraction_nests_left() {
        let program = parse("t.va", "def main() { return a - b - c; }").unwrap();
        let body = single_func_body(&program);
        let ret = match &body.kind {
            NodeKind::StSeq(stmts) => match &stmts[0].kind {
                NodeKind::Return(v) => v.as_ref().clone(),
                _ => panic!(),
            },
            _ => panic!(),
        };
        match ret.kind {
            NodeKind::Operation { op, args } => {
                assert_eq!(op.class, OpClass::BinaryInfixLeft);
                assert_eq!(op.symbol, "-");
                // left child should itself be `a - b`, i.e. the outer node's
                // left argument is also a binl_- operation.
                assert!(matches!(&args[0].kind, NodeKind::Operation { op, .. } if op.symbol == "-"));
                assert!(matches!(&args[1].kind, NodeKind::Variable(name) if name == "c"));
            }
            _ => panic!("expected operation"),
        }
    }

    #[test]
    fn call_distinguished_from_variable_by_lookahead() {
        let program = parse("t.va", "def main() { return f(1, 2); }").unwrap();
        let body = single_func_body(&program);
        match &body.kind {
            NodeKind::StSeq(stmts) => match &stmts[0].kind {
                NodeKind::Return(v) => match &v.kind {
                    NodeKind::Call { name, args } => {
                        assert_eq!(name, "f");
                        assert_eq!(args.len(), 2);
                    }
                    _ => panic!("expected call"),
                },
                _ => panic!(),
            },
            _ => panic!(),
        }
    }

    #[test]
    fn if_else_and_while_parse() {
        let src = "def main() { if (a < b) { return a; } else { return b; } while (a < b) { a = a + 1; } return 0; }";
        parse("t.va", src).unwrap();
    }

    #[test]
    fn comment_is_ignored() {
        let program = parse("t.va", "# a comment\ndef main() { return 1; }").unwrap();
        single_func_body(&program);
    }

    #[test]
    fn missing_semicolon_is_a_parse_error() {
        let err = parse("t.va", "def main() { return 1 }").unwrap_err();
        assert_eq!(err.pos.line, 1);
    }
}
