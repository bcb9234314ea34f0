//! Tokenizer for command text.

use std::fmt;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Ident(String),
    /// Integer literal, kept as text until the parser picks a width
    Integer(String),
    Decimal(String),
    Str(String),
    /// `#cluster:position`, without the `#`
    Rid(String),
    Named(String),
    Variable(String),
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Dot,
    Eq,
    Question,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Ident(s) => write!(f, "'{}'", s),
            TokenKind::Integer(s) | TokenKind::Decimal(s) => write!(f, "number {}", s),
            TokenKind::Str(s) => write!(f, "string '{}'", s),
            TokenKind::Rid(s) => write!(f, "#{}", s),
            TokenKind::Named(s) => write!(f, ":{}", s),
            TokenKind::Variable(s) => write!(f, "${}", s),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character
    pub pos: usize,
}

pub(crate) fn tokenize(text: &str) -> Result<Vec<Token>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let kind = match c {
            b'[' => single(&mut i, TokenKind::LBracket),
            b']' => single(&mut i, TokenKind::RBracket),
            b'(' => single(&mut i, TokenKind::LParen),
            b')' => single(&mut i, TokenKind::RParen),
            b',' => single(&mut i, TokenKind::Comma),
            b'.' => single(&mut i, TokenKind::Dot),
            b'=' => single(&mut i, TokenKind::Eq),
            b'?' => single(&mut i, TokenKind::Question),
            b'\'' | b'"' => {
                let (s, end) = quoted(text, i)?;
                i = end;
                TokenKind::Str(s)
            }
            b'#' => {
                i += 1;
                let end = scan_rid(bytes, i).ok_or_else(|| Error::syntax("malformed record id", start))?;
                let rid = text[i..end].to_string();
                i = end;
                TokenKind::Rid(rid)
            }
            b':' | b'$' => {
                i += 1;
                let end = scan_word(bytes, i);
                if end == i {
                    return Err(Error::syntax("expected a name", i));
                }
                let name = text[i..end].to_string();
                i = end;
                if c == b':' {
                    TokenKind::Named(name)
                } else {
                    TokenKind::Variable(name)
                }
            }
            b'-' | b'0'..=b'9' => {
                let (kind, end) = number(text, i)?;
                i = end;
                kind
            }
            c if c.is_ascii_alphabetic() || c == b'_' || c == b'@' => {
                let end = scan_word(bytes, i + 1);
                let word = text[i..end].to_string();
                i = end;
                TokenKind::Ident(word)
            }
            _ => {
                let ch = text[i..].chars().next().unwrap_or('?');
                return Err(Error::syntax(format!("unexpected character '{}'", ch), i));
            }
        };
        tokens.push(Token { kind, pos: start });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        pos: text.len(),
    });
    Ok(tokens)
}

fn single(i: &mut usize, kind: TokenKind) -> TokenKind {
    *i += 1;
    kind
}

fn scan_word(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
        i += 1;
    }
    i
}

fn scan_digits(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    i
}

/// `-?digits:-?digits`, returning the end offset
fn scan_rid(bytes: &[u8], i: usize) -> Option<usize> {
    let signed = |at: usize| {
        let from = if bytes.get(at) == Some(&b'-') { at + 1 } else { at };
        let end = scan_digits(bytes, from);
        (end > from).then_some(end)
    };
    let colon = signed(i)?;
    if bytes.get(colon) != Some(&b':') {
        return None;
    }
    signed(colon + 1)
}

fn number(text: &str, start: usize) -> Result<(TokenKind, usize)> {
    let bytes = text.as_bytes();
    let digits_from = if bytes[start] == b'-' { start + 1 } else { start };
    let int_end = scan_digits(bytes, digits_from);
    if int_end == digits_from {
        return Err(Error::syntax("expected a digit after '-'", start));
    }
    // A '.' followed by a digit continues the number; otherwise it is a method suffix.
    if bytes.get(int_end) == Some(&b'.') && bytes.get(int_end + 1).is_some_and(u8::is_ascii_digit) {
        let end = scan_digits(bytes, int_end + 1);
        return Ok((TokenKind::Decimal(text[start..end].to_string()), end));
    }
    Ok((TokenKind::Integer(text[start..int_end].to_string()), int_end))
}

fn quoted(text: &str, start: usize) -> Result<(String, usize)> {
    let mut chars = text[start..].char_indices();
    let quote = match chars.next() {
        Some((_, q)) => q,
        None => return Err(Error::syntax("expected a string", start)),
    };
    let mut out = String::new();
    let mut escaped = false;
    for (offset, ch) in chars {
        if escaped {
            out.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Ok((out, start + offset + ch.len_utf8()));
        } else {
            out.push(ch);
        }
    }
    Err(Error::syntax("unterminated string", start))
}
