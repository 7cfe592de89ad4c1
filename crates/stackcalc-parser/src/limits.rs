//! Input limits checked before parsing
//!
//! The parser, the code generator and the tree's destructor all recurse over
//! the nesting structure of the input. Bounding length and parenthesis depth
//! up front keeps that recursion within a predictable stack budget.

use crate::error::ParseError;

/// Default maximum input length in bytes
pub const DEFAULT_MAX_LENGTH: usize = 4096;

/// Default maximum parenthesis nesting depth
pub const DEFAULT_MAX_NESTING: usize = 64;

/// Limits applied to source text before it reaches the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    pub max_length: usize,
    pub max_nesting: usize,
}

impl ParseLimits {
    pub fn new(max_length: usize, max_nesting: usize) -> Self {
        Self {
            max_length,
            max_nesting,
        }
    }

    /// Reject input that exceeds either limit
    pub fn check(&self, source: &str) -> Result<(), ParseError> {
        if source.len() > self.max_length {
            return Err(ParseError::InputTooLong {
                length: source.len(),
                limit: self.max_length,
            });
        }

        let mut depth = 0usize;
        for (position, byte) in source.bytes().enumerate() {
            match byte {
                b'(' => {
                    depth += 1;
                    if depth > self.max_nesting {
                        return Err(ParseError::NestingTooDeep {
                            position,
                            limit: self.max_nesting,
                        });
                    }
                }
                // Unbalanced closers are reported by the grammar
                b')' => depth = depth.saturating_sub(1),
                _ => {}
            }
        }

        Ok(())
    }
}

/// Deepest parenthesis nesting in `text`
pub fn nesting_depth(text: &str) -> usize {
    let mut depth = 0usize;
    let mut max = 0usize;
    for byte in text.bytes() {
        match byte {
            b'(' => {
                depth += 1;
                max = max.max(depth);
            }
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    max
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH, DEFAULT_MAX_NESTING)
    }
}
