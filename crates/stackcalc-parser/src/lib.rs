pub mod ast;
pub mod error;
pub mod limits;
pub mod normalize;
pub mod parser;
pub mod pest_parser;

// Re-export commonly used items
pub use ast::{BinaryOp, Expr};
pub use error::ParseError;
pub use limits::ParseLimits;
pub use normalize::{normalize, normalize_with_limits, to_bracketed};
pub use pest_parser::{parse, parse_with_limits};
