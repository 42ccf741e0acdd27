//! Value coercion
//!
//! Turns the raw text captured by the grammar into a [`Value`]:
//! - [`evaluate_literal`] tries the literal grammar and falls back to the text itself,
//! - [`decode_json`] is a strict JSON decode whose failure the parser reports as a
//!   syntax error.

mod literal;
pub mod tokens;

use crate::pl::value::Value;

/// Evaluate `text` as a literal (`3`, `"quoted"`, `[1, 2]`, `{'a': None}` ...).
///
/// Anything that is not exactly one literal is kept verbatim as a string, so this never fails.
pub fn evaluate_literal(text: &str) -> Value {
    literal::parse_literal(text).unwrap_or_else(|| Value::String(text.to_string()))
}

/// Strict JSON decode.
pub fn decode_json(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str::<serde_json::Value>(text).map(Value::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_literal_falls_back_to_text() {
        assert_eq!(evaluate_literal("hello world"), Value::from("hello world"));
        assert_eq!(evaluate_literal("  keep spacing\n"), Value::from("  keep spacing\n"));
        assert_eq!(evaluate_literal("\"unterminated"), Value::from("\"unterminated"));
    }

    #[test]
    fn test_evaluate_literal_structures() {
        assert_eq!(evaluate_literal("\"X\""), Value::from("X"));
        assert_eq!(
            evaluate_literal("[1, 'two', 3.0]"),
            Value::List(vec![Value::Integer(1), Value::from("two"), Value::Float(3.0)])
        );
    }

    #[test]
    fn test_decode_json() {
        let value = decode_json(r#"{"k": 1}"#).unwrap();
        assert_eq!(value.get_path("k"), Some(&Value::Integer(1)));
        assert!(decode_json("not-json").is_err());
        assert!(decode_json("{'k': 1}").is_err());
    }
}
