//! Parse errors

use crate::pest_parser::Rule;
use pest::error::{ErrorVariant, InputLocation};
use thiserror::Error;

/// Errors produced while turning source text into an expression tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No tokens at all
    #[error("empty expression")]
    Empty,

    /// Unexpected character, unbalanced parentheses, or missing operand
    #[error("syntax error at {position}: {message}")]
    Syntax { position: usize, message: String },

    /// Digits-only operand that does not fit in an i64
    #[error("integer constant '{token}' at {position} is out of range")]
    InvalidConstant { token: String, position: usize },

    /// Input longer than the configured limit
    #[error("expression is {length} bytes long (limit {limit})")]
    InputTooLong { length: usize, limit: usize },

    /// Parentheses nested deeper than the configured limit
    #[error("parentheses nested deeper than {limit} at {position}")]
    NestingTooDeep { position: usize, limit: usize },

    /// Input fits the limits but its bracketed form does not
    #[error(
        "bracketed form is {length} bytes with nesting {nesting} \
         (limits {max_length} bytes, nesting {max_nesting})"
    )]
    BracketedTooLarge {
        length: usize,
        nesting: usize,
        max_length: usize,
        max_nesting: usize,
    },
}

impl ParseError {
    /// Byte offset the error refers to
    pub fn position(&self) -> usize {
        match self {
            ParseError::Empty | ParseError::BracketedTooLarge { .. } => 0,
            ParseError::Syntax { position, .. }
            | ParseError::InvalidConstant { position, .. }
            | ParseError::NestingTooDeep { position, .. } => *position,
            ParseError::InputTooLong { limit, .. } => *limit,
        }
    }
}

impl From<pest::error::Error<Rule>> for ParseError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        let position = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };

        let message = match &err.variant {
            ErrorVariant::ParsingError { positives, .. } if !positives.is_empty() => {
                let mut expected: Vec<&str> = Vec::new();
                for name in positives.iter().map(|rule| describe(*rule)) {
                    if !expected.contains(&name) {
                        expected.push(name);
                    }
                }
                format!("expected {}", expected.join(" or "))
            }
            variant => variant.message().into_owned(),
        };

        ParseError::Syntax { position, message }
    }
}

fn describe(rule: Rule) -> &'static str {
    match rule {
        Rule::operand => "operand",
        Rule::group => "'('",
        Rule::expr => "expression",
        Rule::add | Rule::subtract | Rule::multiply | Rule::divide => "operator",
        Rule::EOI => "end of input",
        _ => "token",
    }
}
