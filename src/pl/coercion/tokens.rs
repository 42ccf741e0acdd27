//! Token definitions for the literal sub-language
//!
//! Right-hand sides of assignments are evaluated as literals: numbers, quoted strings,
//! `True`/`False`/`None`, lists, tuples and mappings. This module tokenizes that text with
//! logos; [`literal`](super::literal) builds values from the token stream.
use logos::{Lexer, Logos};

/// All possible tokens of a literal expression
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"([ \t\r\n\f]+|#[^\n]*)")]
pub enum LiteralToken {
    #[token("[")]
    OpenBracket,
    #[token("]")]
    CloseBracket,
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("-")]
    Minus,
    #[token("+")]
    Plus,

    /// Unsigned decimal digits; the sign and range are settled by the parser
    #[regex(r"[0-9][0-9_]*", |lex| parse_decimal(lex.slice()))]
    #[regex(r"0[xX][0-9a-fA-F_]+", |lex| parse_radix(lex.slice(), 16))]
    #[regex(r"0[oO][0-7_]+", |lex| parse_radix(lex.slice(), 8))]
    #[regex(r"0[bB][01_]+", |lex| parse_radix(lex.slice(), 2))]
    Integer(String),

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?", |lex| parse_float(lex.slice()))]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", |lex| parse_float(lex.slice()))]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+", |lex| parse_float(lex.slice()))]
    Float(f64),

    #[regex(r#"[rRuU]?"([^"\\\n]|\\.)*""#, |lex| quoted(lex.slice()))]
    #[regex(r#"[rRuU]?'([^'\\\n]|\\.)*'"#, |lex| quoted(lex.slice()))]
    #[regex(r#"[rRuU]?""""#, triple_quoted)]
    #[regex(r#"[rRuU]?'''"#, triple_quoted)]
    String(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Name(String),
}

/// Decimal integers. Leading zeros are only allowed for zero itself (`00` but not `017`).
fn parse_decimal(slice: &str) -> Option<String> {
    let digits: String = slice.chars().filter(|c| *c != '_').collect();
    if digits.len() > 1 && digits.starts_with('0') && digits.chars().any(|c| c != '0') {
        return None;
    }
    Some(digits)
}

fn parse_radix(slice: &str, radix: u32) -> Option<String> {
    let digits: String = slice[2..].chars().filter(|c| *c != '_').collect();
    u128::from_str_radix(&digits, radix)
        .ok()
        .map(|value| value.to_string())
}

fn parse_float(slice: &str) -> Option<f64> {
    let digits: String = slice.chars().filter(|c| *c != '_').collect();
    digits.parse().ok()
}

/// Split an optional `r`/`u` prefix from a string literal
fn split_prefix(slice: &str) -> (bool, &str) {
    match slice.chars().next() {
        Some('r') | Some('R') => (true, &slice[1..]),
        Some('u') | Some('U') => (false, &slice[1..]),
        _ => (false, slice),
    }
}

fn quoted(slice: &str) -> String {
    let (raw, body) = split_prefix(slice);
    let body = &body[1..body.len() - 1];
    if raw {
        body.to_string()
    } else {
        unescape(body)
    }
}

/// The opening `"""` was matched; consume up to and including the closing one.
fn triple_quoted(lex: &mut Lexer<LiteralToken>) -> Option<String> {
    let (raw, opener) = split_prefix(lex.slice());
    let quote = opener.to_string();
    let remainder = lex.remainder();

    let mut end = None;
    let mut chars = remainder.char_indices();
    while let Some((idx, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if remainder[idx..].starts_with(&quote) {
            end = Some(idx);
            break;
        }
    }

    let end = end?;
    let body = &remainder[..end];
    let value = if raw { body.to_string() } else { unescape(body) };
    lex.bump(end + quote.len());
    Some(value)
}

/// Resolve backslash escapes. Unknown escapes are kept verbatim, backslash included.
pub(crate) fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => out.push('\\'),
            Some('\n') => {}
            Some('\\') => out.push('\\'),
            Some('\'') => out.push('\''),
            Some('"') => out.push('"'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('v') => out.push('\u{0B}'),
            Some(d @ '0'..='7') => {
                let mut code = d.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(next) => {
                            code = code * 8 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.extend(char::from_u32(code));
            }
            Some(kind @ ('x' | 'u' | 'U')) => {
                let width = match kind {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let hex: String = chars.by_ref().take(width).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(ch) if hex.len() == width => out.push(ch),
                    _ => {
                        out.push('\\');
                        out.push(kind);
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}
