//! Multiline blocks
//!
//! ```text
//! statement ==
//! First line of the value
//! second line
//! ==
//! ```
//!
//! Between the opening line and the `==` terminator every line is taken verbatim. When the
//! block closes, the collected text goes through the same operation as the opening operator
//! would apply on a single line. Errors at that point are reported against the opening line.

use crate::pl::classification::Operation;

/// A block that has been opened and not yet terminated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBlock {
    pub key: String,
    pub operation: Operation,
    /// Collected lines joined with `\n`
    pub buffer: String,
    pub line_count: usize,
    pub start_line: String,
    pub start_line_number: usize,
}

/// An attempt to open a block while another one is still open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockAlreadyOpen {
    pub start_line_number: usize,
}

/// Multiline accumulator state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Multiline {
    #[default]
    Idle,
    Accumulating(OpenBlock),
}

impl Multiline {
    pub fn is_active(&self) -> bool {
        matches!(self, Multiline::Accumulating(_))
    }

    /// Idle -> Accumulating
    pub fn open(
        &mut self,
        key: &str,
        operation: Operation,
        start_line: &str,
        start_line_number: usize,
    ) -> Result<(), BlockAlreadyOpen> {
        if let Multiline::Accumulating(block) = self {
            return Err(BlockAlreadyOpen {
                start_line_number: block.start_line_number,
            });
        }
        *self = Multiline::Accumulating(OpenBlock {
            key: key.to_string(),
            operation,
            buffer: String::new(),
            line_count: 0,
            start_line: start_line.to_string(),
            start_line_number,
        });
        Ok(())
    }

    /// Append one content line. Ignored while idle.
    pub fn push_line(&mut self, line: &str) {
        if let Multiline::Accumulating(block) = self {
            if block.line_count > 0 {
                block.buffer.push('\n');
            }
            block.buffer.push_str(line);
            block.line_count += 1;
        }
    }

    /// Accumulating -> Idle, handing back the finished block
    pub fn close(&mut self) -> Option<OpenBlock> {
        match std::mem::take(self) {
            Multiline::Accumulating(block) => Some(block),
            Multiline::Idle => None,
        }
    }

    /// The block still open, if any
    pub fn pending(&self) -> Option<&OpenBlock> {
        match self {
            Multiline::Accumulating(block) => Some(block),
            Multiline::Idle => None,
        }
    }
}
