use crate::{Token, TokenKind};

/// Parser-facing view over a token slice: skips `SPACE` tokens and any token
/// sharing a line with the most recently seen `PREPROCESSOR_CMD` token (single
/// line comment semantics). The filtering happens once, up front, rather than
/// lazily on every `advance` — same observable sequence, simpler to reason about
/// than re-scanning forward on each call.
pub struct TokenCursor<'t> {
    tokens: Vec<&'t Token>,
    idx: usize,
}

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Token]) -> TokenCursor<'t> {
        let mut out = Vec::with_capacity(tokens.len());
        let mut comment_line = None;
        for tok in tokens {
            match tok.kind {
                TokenKind::Space => continue,
                TokenKind::PreprocessorCmd => {
                    comment_line = Some(tok.pos.line);
                    continue;
                }
                _ => {
                    if comment_line == Some(tok.pos.line) {
                        continue;
                    }
                    out.push(tok);
                }
            }
        }
        TokenCursor { tokens: out, idx: 0 }
    }

    pub fn finished(&self) -> bool {
        self.idx >= self.tokens.len()
    }

    /// The single lookahead token, or `None` at end of input.
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.idx).copied()
    }

    /// Returns the current lookahead token and moves the cursor past it.
    pub fn advance(&mut self) -> Option<&'t Token> {
        let tok = self.tokens.get(self.idx).copied();
        if tok.is_some() {
            self.idx += 1;
        }
        tok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    #[test]
    fn skips_space_and_single_line_comment() {
        let tokens = tokenize("t.va", "x #ignored rest\ny").unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        assert_eq!(cursor.advance().unwrap().text, "x");
        assert_eq!(cursor.advance().unwrap().text, "y");
        assert!(cursor.finished());
    }

    #[test]
    fn comment_does_not_affect_following_lines() {
        let tokens = tokenize("t.va", "#c\na b").unwrap();
        let mut cursor = TokenCursor::new(&tokens);
        assert_eq!(cursor.advance().unwrap().text, "a");
        assert_eq!(cursor.advance().unwrap().text, "b");
        assert!(cursor.finished());
    }
}
