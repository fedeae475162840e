//! Layered operator parser (§4.3): parameterized by an ordered list of
//! precedence layers and a fallback atom parser, it walks the layers from
//! lowest to highest precedence, dispatching by each layer's associativity
//! class.

use crate::error::ParseError;
use ast::{Node, NodeKind, OpClass, Operator};
use lexer::{Token, TokenCursor, TokenKind};

/// One row of the precedence table: the set of symbols active at this layer
/// and how they associate.
#[derive(Clone, Debug)]
pub struct Layer {
    pub symbols: Vec<String>,
    pub class: OpClass,
}

impl Layer {
    pub fn new(class: OpClass, symbols: &[&str]) -> Layer {
        Layer {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
            class,
        }
    }
}

pub type AtomParser<'a> = dyn Fn(&mut TokenCursor) -> Result<Node, ParseError> + 'a;

pub struct PrecedenceParser<'a> {
    layers: &'a [Layer],
    brackets: Option<(&'a str, &'a str)>,
}

impl<'a> PrecedenceParser<'a> {
    pub fn new(layers: &'a [Layer], brackets: Option<(&'a str, &'a str)>) -> PrecedenceParser<'a> {
        PrecedenceParser { layers, brackets }
    }

    pub fn parse(
        &self,
        cursor: &mut TokenCursor,
        atom: &AtomParser,
    ) -> Result<Node, ParseError> {
        self.parse_at(cursor, 0, atom)
    }

    fn parse_at(
        &self,
        cursor: &mut TokenCursor,
        layer: usize,
        atom: &AtomParser,
    ) -> Result<Node, ParseError> {
        if layer == self.layers.len() {
            if let Some((l, r)) = self.brackets {
                if bracket_matches(cursor.peek(), l) {
                    cursor.advance();
                    let inner = self.parse_at(cursor, 0, atom)?;
                    expect_bracket(cursor, r)?;
                    return Ok(inner);
                }
            }
            return atom(cursor);
        }

        match self.layers[layer].class {
            OpClass::UnaryPrefix => self.parse_unary_prefix(cursor, layer, atom),
            OpClass::UnaryPostfix => self.parse_unary_postfix(cursor, layer, atom),
            OpClass::BinaryInfix => self.parse_binary_infix(cursor, layer, atom),
            OpClass::BinaryInfixLeft => self.parse_binary_infix_left(cursor, layer, atom),
            OpClass::BinaryInfixRight => self.parse_binary_infix_right(cursor, layer, atom),
        }
    }

    fn parse_unary_prefix(
        &self,
        cursor: &mut TokenCursor,
        layer: usize,
        atom: &AtomParser,
    ) -> Result<Node, ParseError> {
        if let Some(symbol) = operator_match(cursor.peek(), &self.layers[layer].symbols) {
            let pos = cursor.advance().unwrap().pos.clone();
            let operand = self.parse_at(cursor, layer + 1, atom)?;
            let op = Operator::new(OpClass::UnaryPrefix, symbol);
            return Ok(Node::new(pos, NodeKind::Operation { op, args: vec![operand] }));
        }
        self.parse_at(cursor, layer + 1, atom)
    }

    fn parse_unary_postfix(
        &self,
        cursor: &mut TokenCursor,
        layer: usize,
        atom: &AtomParser,
    ) -> Result<Node, ParseError> {
        let operand = self.parse_at(cursor, layer + 1, atom)?;
        if let Some(symbol) = operator_match(cursor.peek(), &self.layers[layer].symbols) {
            cursor.advance();
            let op = Operator::new(OpClass::UnaryPostfix, symbol);
            let pos = operand.pos.clone();
            return Ok(Node::new(pos, NodeKind::Operation { op, args: vec![operand] }));
        }
        Ok(operand)
    }

    fn parse_binary_infix(
        &self,
        cursor: &mut TokenCursor,
        layer: usize,
        atom: &AtomParser,
    ) -> Result<Node, ParseError> {
        let left = self.parse_at(cursor, layer + 1, atom)?;
        if let Some(symbol) = operator_match(cursor.peek(), &self.layers[layer].symbols) {
            cursor.advance();
            let right = self.parse_at(cursor, layer + 1, atom)?;
            let op = Operator::new(OpClass::BinaryInfix, symbol);
            let pos = left.pos.clone();
            return Ok(Node::new(pos, NodeKind::Operation { op, args: vec![left, right] }));
        }
        Ok(left)
    }

    fn parse_binary_infix_left(
        &self,
        cursor: &mut TokenCursor,
        layer: usize,
        atom: &AtomParser,
    ) -> Result<Node, ParseError> {
        let mut left = self.parse_at(cursor, layer + 1, atom)?;
        while let Some(symbol) = operator_match(cursor.peek(), &self.layers[layer].symbols) {
            cursor.advance();
            let right = self.parse_at(cursor, layer + 1, atom)?;
            let op = Operator::new(OpClass::BinaryInfixLeft, symbol);
            let pos = left.pos.clone();
            left = Node::new(pos, NodeKind::Operation { op, args: vec![left, right] });
        }
        Ok(left)
    }

    fn parse_binary_infix_right(
        &self,
        cursor: &mut TokenCursor,
        layer: usize,
        atom: &AtomParser,
    ) -> Result<Node, ParseError> {
        let left = self.parse_at(cursor, layer + 1, atom)?;
        if let Some(symbol) = operator_match(cursor.peek(), &self.layers[layer].symbols) {
            cursor.advance();
            // Recursing into the same layer (rather than layer + 1) is what
            // grows the tree down the right child: a + (b + (c + d)).
            let right = self.parse_binary_infix_right(cursor, layer, atom)?;
            let op = Operator::new(OpClass::BinaryInfixRight, symbol);
            let pos = left.pos.clone();
            return Ok(Node::new(pos, NodeKind::Operation { op, args: vec![left, right] }));
        }
        Ok(left)
    }
}

fn operator_match(tok: Option<&Token>, symbols: &[String]) -> Option<String> {
    let tok = tok?;
    if tok.kind != TokenKind::Operator {
        return None;
    }
    symbols.iter().find(|s| *s == &tok.text).cloned()
}

fn bracket_matches(tok: Option<&Token>, text: &str) -> bool {
    matches!(tok, Some(t) if t.kind == TokenKind::Bracket && t.text == text)
}

fn expect_bracket(cursor: &mut TokenCursor, text: &str) -> Result<(), ParseError> {
    if bracket_matches(cursor.peek(), text) {
        cursor.advance();
        Ok(())
    } else {
        Err(ParseError::unexpected(
            cursor.peek(),
            &format!("`{}`", text),
            &common::Pos::synthetic(),
        ))
    }
}

/// The default table from §4.3, lowest precedence first.
pub fn default_precedence_table() -> Vec<Layer> {
    vec![
        Layer::new(OpClass::BinaryInfixLeft, &["||"]),
        Layer::new(OpClass::BinaryInfixLeft, &["&&"]),
        Layer::new(OpClass::BinaryInfix, &["==", "!="]),
        Layer::new(OpClass::BinaryInfix, &["<", ">", "<=", ">="]),
        Layer::new(OpClass::BinaryInfixLeft, &["+", "-"]),
        Layer::new(OpClass::BinaryInfixLeft, &["*", "/"]),
        Layer::new(OpClass::UnaryPrefix, &["+", "-"]),
    ]
}
