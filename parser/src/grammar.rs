//! Recursive-descent statement and program grammar (§4.4).

use crate::error::ParseError;
use crate::precedence::{default_precedence_table, Layer, PrecedenceParser};
use ast::{Node, NodeKind};
use common::Pos;
use lexer::{Token, TokenCursor, TokenKind};

const KEYWORDS: &[&str] = &["def", "var", "if", "else", "while", "print", "return"];

fn is_keyword(text: &str, kw: &str) -> bool {
    text == kw
}

fn ident_lower<'t>(tok: Option<&'t Token>) -> Option<&'t Token> {
    tok.filter(|t| t.kind == TokenKind::IdentifierLower)
}

fn peek_pos(cursor: &TokenCursor, fallback: &Pos) -> Pos {
    cursor.peek().map(|t| t.pos.clone()).unwrap_or_else(|| fallback.clone())
}

fn expect_keyword(cursor: &mut TokenCursor, kw: &str) -> Result<Pos, ParseError> {
    match ident_lower(cursor.peek()) {
        Some(tok) if is_keyword(&tok.text, kw) => {
            let pos = tok.pos.clone();
            cursor.advance();
            Ok(pos)
        }
        _ => Err(ParseError::unexpected(
            cursor.peek(),
            &format!("keyword `{}`", kw),
            &Pos::synthetic(),
        )),
    }
}

fn expect_ident(cursor: &mut TokenCursor) -> Result<Token, ParseError> {
    match ident_lower(cursor.peek()) {
        Some(tok) if !KEYWORDS.contains(&tok.text.as_str()) => {
            let tok = tok.clone();
            cursor.advance();
            Ok(tok)
        }
        _ => Err(ParseError::unexpected(cursor.peek(), "an identifier", &Pos::synthetic())),
    }
}

fn expect_operator(cursor: &mut TokenCursor, sym: &str) -> Result<Pos, ParseError> {
    match cursor.peek() {
        Some(tok) if tok.kind == TokenKind::Operator && tok.text == sym => {
            let pos = tok.pos.clone();
            cursor.advance();
            Ok(pos)
        }
        _ => Err(ParseError::unexpected(cursor.peek(), &format!("`{}`", sym), &Pos::synthetic())),
    }
}

fn expect_bracket(cursor: &mut TokenCursor, sym: &str) -> Result<Pos, ParseError> {
    match cursor.peek() {
        Some(tok) if tok.kind == TokenKind::Bracket && tok.text == sym => {
            let pos = tok.pos.clone();
            cursor.advance();
            Ok(pos)
        }
        _ => Err(ParseError::unexpected(cursor.peek(), &format!("`{}`", sym), &Pos::synthetic())),
    }
}

fn expect_comma(cursor: &mut TokenCursor) -> Result<(), ParseError> {
    match cursor.peek() {
        Some(tok) if tok.kind == TokenKind::Comma => {
            cursor.advance();
            Ok(())
        }
        _ => Err(ParseError::unexpected(cursor.peek(), "`,`", &Pos::synthetic())),
    }
}

fn expect_semicolon(cursor: &mut TokenCursor) -> Result<(), ParseError> {
    match cursor.peek() {
        Some(tok) if tok.kind == TokenKind::Semicolon => {
            cursor.advance();
            Ok(())
        }
        _ => Err(ParseError::unexpected(cursor.peek(), "`;`", &Pos::synthetic())),
    }
}

fn peeks_keyword(cursor: &TokenCursor, kw: &str) -> bool {
    ident_lower(cursor.peek()).map_or(false, |t| is_keyword(&t.text, kw))
}

fn peeks_bracket(cursor: &TokenCursor, sym: &str) -> bool {
    matches!(cursor.peek(), Some(t) if t.kind == TokenKind::Bracket && t.text == sym)
}

/// Number literal or variable reference, with a lookahead for `(` to
/// distinguish a variable reference from a call expression.
fn parse_atom(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    match cursor.peek() {
        Some(tok) if tok.kind == TokenKind::Number => {
            let pos = tok.pos.clone();
            let value: f64 = tok.text.parse().map_err(|_| {
                ParseError::new(pos.clone(), format!("malformed number literal `{}`", tok.text))
            })?;
            cursor.advance();
            Ok(Node::new(pos, NodeKind::Number(value)))
        }
        Some(tok) if tok.kind == TokenKind::IdentifierLower && !KEYWORDS.contains(&tok.text.as_str()) => {
            let name = tok.text.clone();
            let pos = tok.pos.clone();
            cursor.advance();
            if peeks_bracket(cursor, "(") {
                let args = parse_call_args(cursor)?;
                Ok(Node::new(pos, NodeKind::Call { name, args }))
            } else {
                Ok(Node::new(pos, NodeKind::Variable(name)))
            }
        }
        _ => Err(ParseError::unexpected(cursor.peek(), "a number or identifier", &Pos::synthetic())),
    }
}

fn parse_call_args(cursor: &mut TokenCursor) -> Result<Vec<Node>, ParseError> {
    expect_bracket(cursor, "(")?;
    let mut args = Vec::new();
    if !peeks_bracket(cursor, ")") {
        args.push(parse_expr(cursor)?);
        while matches!(cursor.peek(), Some(t) if t.kind == TokenKind::Comma) {
            expect_comma(cursor)?;
            args.push(parse_expr(cursor)?);
        }
    }
    expect_bracket(cursor, ")")?;
    Ok(args)
}

fn precedence_parser(layers: &[Layer]) -> PrecedenceParser {
    PrecedenceParser::new(layers, Some(("(", ")")))
}

pub fn parse_expr(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let layers = default_precedence_table();
    let engine = precedence_parser(&layers);
    engine.parse(cursor, &parse_atom)
}

fn parse_var_def(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let pos = expect_keyword(cursor, "var")?;
    let name = expect_ident(cursor)?.text;
    expect_operator(cursor, "=")?;
    let value = parse_expr(cursor)?;
    expect_semicolon(cursor)?;
    Ok(Node::new(pos, NodeKind::VarDef { name, value: Box::new(value) }))
}

fn parse_assign(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let ident = expect_ident(cursor)?;
    expect_operator(cursor, "=")?;
    let value = parse_expr(cursor)?;
    expect_semicolon(cursor)?;
    Ok(Node::new(ident.pos, NodeKind::Assign { name: ident.text, value: Box::new(value) }))
}

fn parse_if(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let pos = expect_keyword(cursor, "if")?;
    expect_bracket(cursor, "(")?;
    let cond = parse_expr(cursor)?;
    expect_bracket(cursor, ")")?;
    let then_branch = parse_block(cursor)?;
    let else_branch = if peeks_keyword(cursor, "else") {
        cursor.advance();
        Some(Box::new(parse_block(cursor)?))
    } else {
        None
    };
    Ok(Node::new(
        pos,
        NodeKind::If { cond: Box::new(cond), then_branch: Box::new(then_branch), else_branch },
    ))
}

fn parse_while(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let pos = expect_keyword(cursor, "while")?;
    expect_bracket(cursor, "(")?;
    let cond = parse_expr(cursor)?;
    expect_bracket(cursor, ")")?;
    let body = parse_block(cursor)?;
    Ok(Node::new(pos, NodeKind::While { cond: Box::new(cond), body: Box::new(body) }))
}

fn parse_print(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let pos = expect_keyword(cursor, "print")?;
    expect_bracket(cursor, "(")?;
    let value = parse_expr(cursor)?;
    expect_bracket(cursor, ")")?;
    expect_semicolon(cursor)?;
    Ok(Node::new(pos, NodeKind::Print(Box::new(value))))
}

fn parse_return(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let pos = expect_keyword(cursor, "return")?;
    let value = parse_expr(cursor)?;
    expect_semicolon(cursor)?;
    Ok(Node::new(pos, NodeKind::Return(Box::new(value))))
}

fn parse_statement(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    if peeks_keyword(cursor, "var") {
        return parse_var_def(cursor);
    }
    if peeks_keyword(cursor, "if") {
        return parse_if(cursor);
    }
    if peeks_keyword(cursor, "while") {
        return parse_while(cursor);
    }
    if peeks_keyword(cursor, "print") {
        return parse_print(cursor);
    }
    if peeks_keyword(cursor, "return") {
        return parse_return(cursor);
    }
    parse_assign(cursor)
}

fn parse_block(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    if peeks_bracket(cursor, "{") {
        let pos = expect_bracket(cursor, "{")?;
        let mut statements = Vec::new();
        while !peeks_bracket(cursor, "}") {
            statements.push(parse_statement(cursor)?);
        }
        expect_bracket(cursor, "}")?;
        Ok(Node::new(pos, NodeKind::StSeq(statements)))
    } else {
        let stmt = parse_statement(cursor)?;
        let pos = stmt.pos.clone();
        Ok(Node::new(pos, NodeKind::StSeq(vec![stmt])))
    }
}

fn parse_def_func(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let pos = expect_keyword(cursor, "def")?;
    let name = expect_ident(cursor)?.text;
    expect_bracket(cursor, "(")?;
    let mut params = Vec::new();
    if !peeks_bracket(cursor, ")") {
        params.push(expect_ident(cursor)?.text);
        while matches!(cursor.peek(), Some(t) if t.kind == TokenKind::Comma) {
            expect_comma(cursor)?;
            params.push(expect_ident(cursor)?.text);
        }
    }
    expect_bracket(cursor, ")")?;
    let body = parse_block(cursor)?;
    Ok(Node::new(pos, NodeKind::FuncDef { name, params, body: Box::new(body) }))
}

/// Top-level entry point: a program is a sequence of function definitions.
pub fn parse_program(cursor: &mut TokenCursor) -> Result<Node, ParseError> {
    let pos = peek_pos(cursor, &Pos::synthetic());
    let mut funcs = Vec::new();
    while !cursor.finished() {
        funcs.push(parse_def_func(cursor)?);
    }
    Ok(Node::new(pos, NodeKind::Program(funcs)))
}
