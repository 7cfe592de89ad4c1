//! Error types for the VM and compiler

use stackcalc_parser::ParseError;
use thiserror::Error;

/// VM runtime errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    /// Argument count does not match the unit's parameter list
    #[error("expected {expected} arguments, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    /// Named execution without a value for a declared parameter
    #[error("no value bound for parameter '{0}'")]
    UnboundParameter(String),

    /// Unit declares more parameters than there are slot indices
    #[error("unit declares {0} parameters (max {max})", max = crate::bytecode::MAX_PARAMETERS)]
    TooManyParameters(usize),

    /// Push beyond the unit's declared stack capacity
    #[error("stack overflow (capacity {capacity})")]
    StackOverflow { capacity: usize },

    /// Pop from empty stack
    #[error("stack underflow at instruction {index}")]
    StackUnderflow { index: usize },

    /// Load from a slot outside the local frame
    #[error("invalid slot {slot} (frame has {locals} locals)")]
    InvalidSlot { slot: u16, locals: usize },

    /// Integer division by zero
    #[error("division by zero at instruction {index}")]
    DivisionByZero { index: usize },

    /// Instruction sequence ended without RETURN
    #[error("instruction sequence has no RETURN")]
    MissingReturn,

    /// Instruction sequence rejected before execution
    #[error("invalid instruction sequence at {index}: {message}")]
    InvalidStack { index: usize, message: String },
}

/// Compiler errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Operand is neither numeric nor a declared parameter
    #[error("variable '{name}' at {position} is not declared")]
    UndeclaredVariable { name: String, position: usize },

    /// Source text could not be parsed
    #[error("malformed expression: {cause}")]
    MalformedExpression {
        position: usize,
        #[source]
        cause: ParseError,
    },

    /// Same name declared twice in the parameter list
    #[error("parameter '{0}' declared more than once")]
    DuplicateParameter(String),

    /// More parameters than slot indices
    #[error("too many parameters ({0}, max {max})", max = crate::bytecode::MAX_PARAMETERS)]
    TooManyParameters(usize),
}

impl CompileError {
    /// Source position for diagnostics, if the error has one
    pub fn position(&self) -> Option<usize> {
        match self {
            CompileError::UndeclaredVariable { position, .. }
            | CompileError::MalformedExpression { position, .. } => Some(*position),
            CompileError::DuplicateParameter(_) | CompileError::TooManyParameters(_) => None,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(cause: ParseError) -> Self {
        CompileError::MalformedExpression {
            position: cause.position(),
            cause,
        }
    }
}
