//! Line Classification
//!
//! Determines the kind of every source line and extracts its fields. The patterns live in
//! [grammar](crate::pl::grammar); this module fixes the order in which they are tried.
//!
//! Patterns are tried in this order, first match wins:
//! 1. Multiline terminator (only while a block is open)
//! 2. Multiline content (anything else while a block is open)
//! 3. One-line operation: `key = value`, `key % json`, `key + value`, `key - value`
//! 4. Multiline start: `key ==`, `key +=`, `key -=`, `key %=`
//! 5. Inheritance: `extends = file`, `template = file`
//! 6. From-file operation: `key =@ file`, `key +=@ file`, `key -=@ file`, `key %=@ file`
//! 7. URL import: `key =$ url`
//! 8. Component: `key =: Name`
//! 9. Dependency: `@ file [alias]`
//! 10. Comment
//! 11. Blank line
//!
//! The one-line pattern alone would also accept `extends = file` and `key =$ x` /
//! `key =: x` (reading `$ x` or `: x` as a value). For the `=` operator it therefore
//! refuses the reserved inheritance keys, and an `=` glued to `$` or `:`, so rules 5, 7
//! and 8 stay reachable. `extends + x` and the other operators are plain one-line
//! operations.

use crate::pl::grammar::{
    COMMENT_LINE, COMPONENT_LINE, DEPENDENCY_LINE, EMPTY_LINE, END_MULTI_LINE, EXTENDS_LINE,
    FROM_FILE_LINE, MULTI_LINE, ONE_LINE, RESERVED_KEYS, URL_LINE,
};
use regex::Captures;

/// What an operator does to its target key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `=`, `==`, `=@`
    Assign,
    /// `%`, `%=`, `%=@`
    JsonAssign,
    /// `+`, `+=`, `+=@`
    Append,
    /// `-`, `-=`, `-=@`
    Prepend,
}

impl Operation {
    /// Map an operator spelling from any of the three line families to its operation
    pub fn from_operator(operator: &str) -> Option<Self> {
        match operator {
            "=" | "==" | "=@" => Some(Operation::Assign),
            "%" | "%=" | "%=@" => Some(Operation::JsonAssign),
            "+" | "+=" | "+=@" => Some(Operation::Append),
            "-" | "-=" | "-=@" => Some(Operation::Prepend),
            _ => None,
        }
    }

    /// Whether the target key must already hold a value
    pub fn requires_existing(&self) -> bool {
        matches!(self, Operation::Append | Operation::Prepend)
    }
}

/// A classified line with its captured fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    MultilineEnd,
    MultilineContent,
    OneLine {
        key: &'a str,
        operation: Operation,
        value: &'a str,
    },
    MultilineStart {
        key: &'a str,
        operation: Operation,
    },
    Extends {
        file: &'a str,
    },
    FromFile {
        key: &'a str,
        operation: Operation,
        file: &'a str,
    },
    Url {
        key: &'a str,
        file: &'a str,
    },
    Component {
        key: &'a str,
        component: &'a str,
    },
    Dependency {
        file: &'a str,
        alias: Option<&'a str>,
    },
    Comment {
        text: &'a str,
    },
    Blank,
}

/// Classify one line (terminator removed). `None` when the line matches no pattern.
pub fn classify_line(line: &str, multiline_active: bool) -> Option<LineKind<'_>> {
    if multiline_active {
        if END_MULTI_LINE.is_match(line) {
            return Some(LineKind::MultilineEnd);
        }
        return Some(LineKind::MultilineContent);
    }

    if let Some(caps) = ONE_LINE.captures(line) {
        if is_one_line(line, &caps) {
            return Some(LineKind::OneLine {
                key: group(&caps, "key"),
                operation: operation(&caps)?,
                value: group(&caps, "value"),
            });
        }
    }

    if let Some(caps) = MULTI_LINE.captures(line) {
        return Some(LineKind::MultilineStart {
            key: group(&caps, "key"),
            operation: operation(&caps)?,
        });
    }

    if let Some(caps) = EXTENDS_LINE.captures(line) {
        return Some(LineKind::Extends {
            file: group(&caps, "file"),
        });
    }

    if let Some(caps) = FROM_FILE_LINE.captures(line) {
        return Some(LineKind::FromFile {
            key: group(&caps, "key"),
            operation: operation(&caps)?,
            file: group(&caps, "file"),
        });
    }

    if let Some(caps) = URL_LINE.captures(line) {
        return Some(LineKind::Url {
            key: group(&caps, "key"),
            file: group(&caps, "file"),
        });
    }

    if let Some(caps) = COMPONENT_LINE.captures(line) {
        return Some(LineKind::Component {
            key: group(&caps, "key"),
            component: group(&caps, "component"),
        });
    }

    if let Some(caps) = DEPENDENCY_LINE.captures(line) {
        return Some(LineKind::Dependency {
            file: group(&caps, "file"),
            alias: caps.name("alias").map(|m| m.as_str()),
        });
    }

    if let Some(caps) = COMMENT_LINE.captures(line) {
        return Some(LineKind::Comment {
            text: group(&caps, "comment"),
        });
    }

    if EMPTY_LINE.is_match(line) {
        return Some(LineKind::Blank);
    }

    None
}

/// Reject one-line matches that belong to the inheritance, URL or component rules
fn is_one_line(line: &str, caps: &Captures<'_>) -> bool {
    match caps.name("operator") {
        Some(op) if op.as_str() == "=" => {
            !RESERVED_KEYS.contains(&group(caps, "key"))
                && !matches!(line[op.end()..].chars().next(), Some('$') | Some(':'))
        }
        _ => true,
    }
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn operation(caps: &Captures<'_>) -> Option<Operation> {
    Operation::from_operator(group(caps, "operator"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("title = Hello", LineKind::OneLine { key: "title", operation: Operation::Assign, value: "Hello" })]
    #[case("a.b % {\"k\": 1}", LineKind::OneLine { key: "a.b", operation: Operation::JsonAssign, value: "{\"k\": 1}" })]
    #[case("title + more", LineKind::OneLine { key: "title", operation: Operation::Append, value: "more" })]
    #[case("title - \"pre\"", LineKind::OneLine { key: "title", operation: Operation::Prepend, value: "\"pre\"" })]
    #[case("extends + more", LineKind::OneLine { key: "extends", operation: Operation::Append, value: "more" })]
    #[case("template % {\"a\": 1}", LineKind::OneLine { key: "template", operation: Operation::JsonAssign, value: "{\"a\": 1}" })]
    #[case("text ==", LineKind::MultilineStart { key: "text", operation: Operation::Assign })]
    #[case("text += # more", LineKind::MultilineStart { key: "text", operation: Operation::Append })]
    #[case("text -=", LineKind::MultilineStart { key: "text", operation: Operation::Prepend })]
    #[case("data %=", LineKind::MultilineStart { key: "data", operation: Operation::JsonAssign })]
    #[case("extends = base.pl", LineKind::Extends { file: "base.pl" })]
    #[case("template=/lib/base.pl # parent", LineKind::Extends { file: "/lib/base.pl" })]
    #[case("code =@ code.py", LineKind::FromFile { key: "code", operation: Operation::Assign, file: "code.py" })]
    #[case("code +=@ more.py", LineKind::FromFile { key: "code", operation: Operation::Append, file: "more.py" })]
    #[case("code -=@ head.py", LineKind::FromFile { key: "code", operation: Operation::Prepend, file: "head.py" })]
    #[case("cfg %=@ cfg.json", LineKind::FromFile { key: "cfg", operation: Operation::JsonAssign, file: "cfg.json" })]
    #[case("img =$ http:/x.org/a.png", LineKind::Url { key: "img", file: "http:/x.org/a.png" })]
    #[case("form =: CheckboxGroup", LineKind::Component { key: "form", component: "CheckboxGroup" })]
    #[case("@ lib/grader.py [grader]", LineKind::Dependency { file: "lib/grader.py", alias: Some("grader") })]
    #[case("@ lib/grader.py", LineKind::Dependency { file: "lib/grader.py", alias: None })]
    #[case("  # note", LineKind::Comment { text: "# note" })]
    #[case("   ", LineKind::Blank)]
    #[case("", LineKind::Blank)]
    fn test_classify(#[case] line: &str, #[case] expected: LineKind<'static>) {
        assert_eq!(classify_line(line, false), Some(expected));
    }

    #[rstest]
    #[case("this is not pl")]
    #[case("title = ")]
    #[case("extends = two words.pl")]
    #[case("1abc = 3")]
    #[case("@ a;b")]
    fn test_unmatched(#[case] line: &str) {
        assert_eq!(classify_line(line, false), None);
    }

    #[test]
    fn test_multiline_active() {
        assert_eq!(classify_line(" == ", true), Some(LineKind::MultilineEnd));
        assert_eq!(
            classify_line("title = not an assignment", true),
            Some(LineKind::MultilineContent)
        );
        assert_eq!(classify_line("", true), Some(LineKind::MultilineContent));
    }
}
