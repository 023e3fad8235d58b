//! Lexer for others-expressions
//!
//! Positions are character indices into the input, not byte offsets.

use crate::error::{ExprError, ExprResult};

/// Kinds of tokens produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// A bare or quoted name (quotes stripped).
    Name(String),
    LeftParen,
    RightParen,
    Not,
    And,
    Or,
}

/// A token with the position of its first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) position: usize,
}

/// Characters allowed in an unquoted name.
#[inline]
pub(crate) fn is_bare_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '$' | '_' | '@' | '~' | '.' | '-')
}

/// Scans a bare name starting at `start`, returning the end index (exclusive).
///
/// Besides the bare character set this accepts `\.` anywhere and a leading `/.`.
fn scan_bare(chars: &[char], start: usize) -> usize {
    let mut index = start;
    if chars.get(index) == Some(&'/') && chars.get(index + 1) == Some(&'.') {
        index += 2;
    }
    while let Some(&ch) = chars.get(index) {
        if is_bare_char(ch) {
            index += 1;
        } else if ch == '\\' && chars.get(index + 1) == Some(&'.') {
            index += 2;
        } else {
            break;
        }
    }
    index
}

/// Returns true when `raw` can be printed without quotes and lexes back unchanged.
#[must_use]
pub fn is_bare_name(raw: &str) -> bool {
    let chars: Vec<char> = raw.chars().collect();
    !chars.is_empty() && scan_bare(&chars, 0) == chars.len()
}

/// Splits an expression into tokens.
pub(crate) fn tokenize(input: &str) -> ExprResult<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::with_capacity((chars.len() / 3).max(4));
    let mut index = 0;

    while let Some(&ch) = chars.get(index) {
        let position = index;
        let kind = match ch {
            c if c.is_whitespace() => {
                index += 1;
                continue;
            }
            '(' => {
                index += 1;
                TokenKind::LeftParen
            }
            ')' => {
                index += 1;
                TokenKind::RightParen
            }
            '!' => {
                index += 1;
                TokenKind::Not
            }
            '&' | '|' => {
                if chars.get(index + 1) != Some(&ch) {
                    return Err(ExprError::UnexpectedChar { ch, position });
                }
                index += 2;
                if ch == '&' {
                    TokenKind::And
                } else {
                    TokenKind::Or
                }
            }
            '\'' | '"' => {
                let close = chars[index + 1..]
                    .iter()
                    .position(|c| *c == ch)
                    .ok_or(ExprError::UnclosedQuote { position })?;
                let name: String = chars[index + 1..index + 1 + close].iter().collect();
                index += close + 2;
                TokenKind::Name(name)
            }
            _ => {
                let end = scan_bare(&chars, index);
                if end == index {
                    return Err(ExprError::UnexpectedChar { ch, position });
                }
                let name: String = chars[index..end].iter().collect();
                index = end;
                TokenKind::Name(name)
            }
        };
        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}
