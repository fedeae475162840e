//! Exercises the full source → assembly → bytecode → execution pipeline.

use std::io::{BufReader, Cursor};

fn run_source(src: &str) -> Result<String, String> {
    let program = parser::parse("t.va", src).map_err(|e| e.to_string())?;
    let asm = codegen::generate(&program).map_err(|e| e.to_string())?;
    let assembled = assembler::assemble("t.vasm", &asm).map_err(|e| e.to_string())?;

    let mut stdin = BufReader::new(Cursor::new(Vec::<u8>::new()));
    let mut stdout = Vec::new();
    vm::execute(&mut Cursor::new(assembled.bytes), &mut stdin, &mut stdout).map_err(|e| e.to_string())?;
    Ok(String::from_utf8(stdout).unwrap())
}

#[test]
fn prints_an_arithmetic_expression_then_returns() {
    let out = run_source("def main() { print 1 + 2; return 0; }").unwrap();
    assert_eq!(out, "3.000\n0.000\n");
}

#[test]
fn if_else_picks_the_matching_branch() {
    let src = "def main() { if (1 < 2) { print 10; } else { print 20; } return 0; }";
    let out = run_source(src).unwrap();
    assert_eq!(out, "10.000\n0.000\n");
}

#[test]
fn while_loop_accumulates() {
    let src = "def main() { var i = 0; var sum = 0; while (i < 5) { sum = sum + i; i = i + 1; } print sum; return 0; }";
    let out = run_source(src).unwrap();
    assert_eq!(out, "10.000\n0.000\n");
}

#[test]
fn function_call_returns_into_caller() {
    let src = "def square(n) { return n * n; } def main() { print square(4); return 0; }";
    let out = run_source(src).unwrap();
    assert_eq!(out, "16.000\n0.000\n");
}

#[test]
fn recursive_call_unwinds_correctly() {
    let src = "def fact(n) { if (n < 2) { return 1; } return n * fact(n - 1); } def main() { print fact(5); return 0; }";
    let out = run_source(src).unwrap();
    assert_eq!(out, "120.000\n0.000\n");
}

#[test]
fn division_by_zero_is_reported_as_a_runtime_error() {
    let src = "def main() { print 1 / 0; return 0; }";
    let err = run_source(src).unwrap_err();
    assert!(err.contains("division by zero"));
}

#[test]
fn negative_sqrt_is_reported_as_a_runtime_error() {
    let asm = "beg\npush -1\nsqrt\nend\n";
    let assembled = assembler::assemble("t.vasm", asm).unwrap();
    let mut stdin = BufReader::new(Cursor::new(Vec::<u8>::new()));
    let mut stdout = Vec::new();
    let err = vm::execute(&mut Cursor::new(assembled.bytes), &mut stdin, &mut stdout).unwrap_err();
    assert!(err.to_string().contains("negative"));
}

#[test]
fn program_without_beg_runs_from_the_first_instruction() {
    let asm = "push 7\npopr rt\nend\n";
    let assembled = assembler::assemble("t.vasm", asm).unwrap();
    let mut stdin = BufReader::new(Cursor::new(Vec::<u8>::new()));
    let mut stdout = Vec::new();
    vm::execute(&mut Cursor::new(assembled.bytes), &mut stdin, &mut stdout).unwrap();
    assert_eq!(String::from_utf8(stdout).unwrap(), "7.000\n");
}
