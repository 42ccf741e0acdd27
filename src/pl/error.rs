//! Error types for PL parsing
//!
//! Every failure aborts the parse of the current file. The error records which file, which
//! line (text and 1-based number) and what went wrong. For multiline blocks and from-file
//! operations the line is the one that opened the operation, not the one being read when
//! it failed.

use std::fmt;

/// The category of a parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Line matches no grammar rule, malformed JSON operand, or an unterminated multiline block
    Syntax,
    /// Append/prepend on a missing key, or a dotted path crossing a non-mapping value
    Semantic,
    /// A construct the format reserves but does not support (URL imports)
    NotImplemented,
    /// A referenced file could not be resolved or read
    FileNotFound,
    /// A component reference names no known component
    ComponentNotFound,
    /// `extends`/`template` revisits a file already being resolved, or nests too deep
    InheritanceLoop,
    /// A key required in a complete document is absent
    MissingKey,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax error",
            ErrorKind::Semantic => "semantic error",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::FileNotFound => "file not found",
            ErrorKind::ComponentNotFound => "component not found",
            ErrorKind::InheritanceLoop => "inheritance loop",
            ErrorKind::MissingKey => "missing key",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fatal error raised while parsing a PL file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ErrorKind,
    /// Path of the file being parsed
    pub path: String,
    /// Offending line, without its terminator
    pub line: String,
    /// 1-based; 0 when the error concerns the document as a whole
    pub line_number: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(
        kind: ErrorKind,
        path: impl Into<String>,
        line: impl Into<String>,
        line_number: usize,
        message: impl Into<String>,
    ) -> Self {
        ParseError {
            kind,
            path: path.into(),
            line: line.into(),
            line_number,
            message: message.into(),
        }
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (line {}): {} in \"{}\"",
            self.path, self.line_number, self.message, self.line
        )
    }
}

impl std::error::Error for ParseError {}

/// Type alias for parse results
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ParseError::new(
            ErrorKind::Syntax,
            "exo/main.pl",
            "title ? oops",
            3,
            "Line does not correspond to any defined pattern",
        );
        insta::assert_snapshot!(
            err.to_string(),
            @r#"exo/main.pl (line 3): Line does not correspond to any defined pattern in "title ? oops""#
        );
        assert!(err.is(ErrorKind::Syntax));
        assert_eq!(err.kind.to_string(), "syntax error");
    }
}
