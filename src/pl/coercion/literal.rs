//! Recursive descent over literal tokens
//!
//! Grammar:
//!     literal  := sign? number | string+ | name | list | tuple | mapping
//!     list     := "[" (literal ("," literal)* ","?)? "]"
//!     tuple    := "(" (literal ("," literal)* ","?)? ")"
//!     mapping  := "{" (scalar ":" literal ("," scalar ":" literal)* ","?)? "}"
//!
//! `name` is only `True`, `False` or `None`. A parenthesized single literal without a
//! trailing comma is the literal itself; everything else in parentheses is a tuple, which
//! is stored as a list.
//!
//! Containers nest at most [`MAX_NESTING`] deep. Deeper text is not a literal. Decimal
//! integers outside the `i64` range become floats.

use super::tokens::LiteralToken;
use crate::pl::value::{Mapping, Value};
use logos::Logos;

/// Deepest container nesting accepted in a literal
pub(crate) const MAX_NESTING: usize = 200;

/// Parse `text` as exactly one literal. `None` when any part of it is not a literal.
pub(crate) fn parse_literal(text: &str) -> Option<Value> {
    let tokens = LiteralToken::lexer(text)
        .collect::<Result<Vec<_>, _>>()
        .ok()?;
    let mut parser = LiteralParser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.literal()?;
    if parser.pos == parser.tokens.len() {
        Some(value)
    } else {
        None
    }
}

struct LiteralParser {
    tokens: Vec<LiteralToken>,
    pos: usize,
    depth: usize,
}

impl LiteralParser {
    fn peek(&self) -> Option<&LiteralToken> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<LiteralToken> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, expected: &LiteralToken) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn literal(&mut self) -> Option<Value> {
        match self.next()? {
            LiteralToken::Integer(digits) => integer(&digits),
            LiteralToken::Float(f) => Some(Value::Float(f)),
            LiteralToken::Minus => match self.next()? {
                LiteralToken::Integer(digits) => integer(&format!("-{digits}")),
                LiteralToken::Float(f) => Some(Value::Float(-f)),
                _ => None,
            },
            LiteralToken::Plus => match self.next()? {
                LiteralToken::Integer(digits) => integer(&digits),
                LiteralToken::Float(f) => Some(Value::Float(f)),
                _ => None,
            },
            LiteralToken::String(mut s) => {
                // Adjacent string literals concatenate
                while let Some(LiteralToken::String(next)) = self.peek() {
                    s.push_str(next);
                    self.pos += 1;
                }
                Some(Value::String(s))
            }
            LiteralToken::Name(name) => match name.as_str() {
                "True" => Some(Value::Bool(true)),
                "False" => Some(Value::Bool(false)),
                "None" => Some(Value::Null),
                _ => None,
            },
            open @ (LiteralToken::OpenBracket
            | LiteralToken::OpenParen
            | LiteralToken::OpenBrace) => {
                if self.depth == MAX_NESTING {
                    return None;
                }
                self.depth += 1;
                let value = self.container(&open);
                self.depth -= 1;
                value
            }
            _ => None,
        }
    }

    fn container(&mut self, open: &LiteralToken) -> Option<Value> {
        match open {
            LiteralToken::OpenBracket => self
                .sequence(&LiteralToken::CloseBracket)
                .map(|(items, _)| Value::List(items)),
            LiteralToken::OpenParen => {
                let (mut items, trailing_comma) = self.sequence(&LiteralToken::CloseParen)?;
                if items.len() == 1 && !trailing_comma {
                    items.pop()
                } else {
                    Some(Value::List(items))
                }
            }
            _ => self.mapping(),
        }
    }

    /// Comma separated literals up to `close`. Also reports whether the last item was
    /// followed by a comma, which distinguishes `(1,)` from `(1)`.
    fn sequence(&mut self, close: &LiteralToken) -> Option<(Vec<Value>, bool)> {
        let mut items = Vec::new();
        let mut trailing_comma = false;
        loop {
            if self.eat(close) {
                return Some((items, trailing_comma));
            }
            items.push(self.literal()?);
            trailing_comma = self.eat(&LiteralToken::Comma);
            if !trailing_comma && self.peek() != Some(close) {
                return None;
            }
        }
    }

    fn mapping(&mut self) -> Option<Value> {
        let mut mapping = Mapping::new();
        loop {
            if self.eat(&LiteralToken::CloseBrace) {
                return Some(Value::Mapping(mapping));
            }
            let key = mapping_key(self.literal()?)?;
            if !self.eat(&LiteralToken::Colon) {
                return None;
            }
            let value = self.literal()?;
            mapping.insert(key, value);
            if !self.eat(&LiteralToken::Comma) && self.peek() != Some(&LiteralToken::CloseBrace) {
                return None;
            }
        }
    }
}

/// Signed decimal digits as an integer, or a float when they overflow `i64`
fn integer(digits: &str) -> Option<Value> {
    match digits.parse::<i64>() {
        Ok(i) => Some(Value::Integer(i)),
        Err(_) => digits.parse::<f64>().ok().map(Value::Float),
    }
}

/// Mapping keys must be scalars; they are stored in their printed form.
fn mapping_key(key: Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(format!("{f:.1}")),
        Value::Float(f) => Some(f.to_string()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::Null => Some("None".to_string()),
        Value::List(_) | Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(parse_literal("3"), Some(Value::Integer(3)));
        assert_eq!(parse_literal("-3"), Some(Value::Integer(-3)));
        assert_eq!(parse_literal("+2.5"), Some(Value::Float(2.5)));
        assert_eq!(parse_literal("True"), Some(Value::Bool(true)));
        assert_eq!(parse_literal("None"), Some(Value::Null));
        assert_eq!(parse_literal("'a' \"b\""), Some(Value::from("ab")));
    }

    #[test]
    fn test_rejects_non_literals() {
        assert_eq!(parse_literal("true"), None);
        assert_eq!(parse_literal("hello world"), None);
        assert_eq!(parse_literal("1 + 2"), None);
        assert_eq!(parse_literal("--1"), None);
        assert_eq!(parse_literal("[1, 2"), None);
        assert_eq!(parse_literal("[1 2]"), None);
        assert_eq!(parse_literal("{1, 2}"), None);
        assert_eq!(parse_literal(""), None);
    }

    #[test]
    fn test_tuples() {
        assert_eq!(parse_literal("(1)"), Some(Value::Integer(1)));
        assert_eq!(
            parse_literal("(1,)"),
            Some(Value::List(vec![Value::Integer(1)]))
        );
        assert_eq!(parse_literal("()"), Some(Value::List(vec![])));
    }

    #[test]
    fn test_nested_containers() {
        let value = parse_literal("{'a': [1, 2,], 'b': {'c': 3}, 4: None}").unwrap();
        assert_eq!(
            value.get_path("a"),
            Some(&Value::List(vec![Value::Integer(1), Value::Integer(2)]))
        );
        assert_eq!(value.get_path("b.c"), Some(&Value::Integer(3)));
        assert_eq!(value.get_path("4"), Some(&Value::Null));
    }

    #[test]
    fn test_nesting_limit() {
        assert_eq!(parse_literal(&"[".repeat(100_000)), None);

        let deep = format!("{}{}", "[".repeat(100_000), "]".repeat(100_000));
        assert_eq!(parse_literal(&deep), None);

        let limit = format!("{}{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse_literal(&limit), Some(Value::List(vec![])));
        let over = format!("{{'a': {}}}", limit);
        assert_eq!(parse_literal(&over), None);
    }

    #[test]
    fn test_integers_beyond_i64() {
        assert_eq!(
            parse_literal("-9223372036854775808"),
            Some(Value::Integer(i64::MIN))
        );
        assert_eq!(
            parse_literal("9223372036854775807"),
            Some(Value::Integer(i64::MAX))
        );
        assert_eq!(
            parse_literal("99999999999999999999"),
            Some(Value::Float(1e20))
        );
        assert_eq!(
            parse_literal("-99_999_999_999_999_999"),
            Some(Value::Float(-1e20))
        );
    }

    #[test]
    fn test_multiline_literal_with_comments() {
        let source = "{\n    'a': 1,  # first\n    'b': 2,\n}";
        let value = parse_literal(source).unwrap();
        assert_eq!(value.get_path("b"), Some(&Value::Integer(2)));
    }
}
