//! Diagnostics for expressions that fail to parse or compile.
//!
//! Each diagnostic renders its message with a caret under the offending
//! position.

use serde::Serialize;
use stackcalc_parser::ParseError;
use stackcalc_vm::CompileError;
use std::fmt::Write;

#[derive(Debug, Serialize)]
pub struct Diagnostic {
    /// Byte offset into the expression, when the error has one
    pub position: Option<usize>,
    /// 1-based character column matching `position`
    pub column: Option<usize>,
    pub message: String,
    pub severity: String,
}

impl Diagnostic {
    pub fn from_compile_error(source: &str, err: &CompileError) -> Self {
        Self::new(source, err.position(), err.to_string())
    }

    pub fn from_parse_error(source: &str, err: &ParseError) -> Self {
        // The bracketed form is never shown, so there is nothing to point at
        let position = match err {
            ParseError::BracketedTooLarge { .. } => None,
            _ => Some(err.position()),
        };
        Self::new(source, position, err.to_string())
    }

    fn new(source: &str, position: Option<usize>, message: String) -> Self {
        Diagnostic {
            position,
            column: position.map(|pos| column_of(source, pos)),
            message,
            severity: "error".to_string(),
        }
    }

    /// Render as a multi-line report against the source text
    pub fn render(&self, source: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", self.severity, self.message);

        if let Some(column) = self.column {
            let _ = writeln!(out, "  |");
            let _ = writeln!(out, "  | {}", source);
            let _ = write!(out, "  | {}^", " ".repeat(column - 1));
        }

        out.trim_end().to_string()
    }
}

/// Character column for a byte offset, clamped to one past the end
fn column_of(source: &str, position: usize) -> usize {
    let mut end = position.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    source[..end].chars().count() + 1
}
