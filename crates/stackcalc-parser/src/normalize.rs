//! Precedence normalizer
//!
//! Renders an expression so that every precedence boundary is an explicit
//! parenthesis group and a plain left-to-right scan with no operator
//! priorities evaluates it correctly:
//!
//! ```text
//! x+3*y+20*2-5*3   =>   x+(3*y)+(20*2)-(5*3)
//! ```
//!
//! Left-associative chains of equal priority stay flat. A left operand of a
//! different priority is wrapped in one pair per level of priority gap. A
//! right operand that is itself an application is always wrapped, because
//! without the group a flat scan would fold it into the chain on its left.
//!
//! The bracketed form is usually longer and deeper than its source. It is
//! held to the same [`ParseLimits`] as the input, so any output of
//! [`normalize_with_limits`] is accepted by it again under those limits.

use crate::ast::Expr;
use crate::error::ParseError;
use crate::limits::{nesting_depth, ParseLimits};
use crate::pest_parser::parse_with_limits;

/// Parse `source` and return its fully-bracketed form
pub fn normalize(source: &str) -> Result<String, ParseError> {
    normalize_with_limits(source, &ParseLimits::default())
}

pub fn normalize_with_limits(source: &str, limits: &ParseLimits) -> Result<String, ParseError> {
    let expr = parse_with_limits(source, limits)?;
    let bracketed = to_bracketed(&expr);

    let nesting = nesting_depth(&bracketed);
    if bracketed.len() > limits.max_length || nesting > limits.max_nesting {
        return Err(ParseError::BracketedTooLarge {
            length: bracketed.len(),
            nesting,
            max_length: limits.max_length,
            max_nesting: limits.max_nesting,
        });
    }

    Ok(bracketed)
}

/// Render a tree in fully-bracketed form
pub fn to_bracketed(expr: &Expr) -> String {
    let mut out = String::new();
    write_expr(expr, &mut out);
    out
}

fn write_expr(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Const(value) => out.push_str(&value.to_string()),
        Expr::Var { name, .. } => out.push_str(name),
        Expr::Binary { op, left, right } => {
            let priority = op.priority();

            match left.as_ref() {
                Expr::Binary { .. } if left.priority() != priority => {
                    let levels = priority.abs_diff(left.priority()) as usize;
                    write_wrapped(left, levels, out);
                }
                _ => write_expr(left, out),
            }

            out.push(op.symbol());

            match right.as_ref() {
                Expr::Binary { .. } => {
                    let levels = priority.abs_diff(right.priority()).max(1) as usize;
                    write_wrapped(right, levels, out);
                }
                _ => write_expr(right, out),
            }
        }
    }
}

fn write_wrapped(expr: &Expr, levels: usize, out: &mut String) {
    for _ in 0..levels {
        out.push('(');
    }
    write_expr(expr, out);
    for _ in 0..levels {
        out.push(')');
    }
}
