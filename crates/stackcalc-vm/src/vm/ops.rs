//! Integer operation helpers

use crate::error::VmError;
use stackcalc_parser::BinaryOp;

/// Apply a binary operator with two's-complement wrapping and truncating
/// division. `index` is the instruction position, for error reporting.
pub(crate) fn apply_binary(
    op: BinaryOp,
    left: i64,
    right: i64,
    index: usize,
) -> Result<i64, VmError> {
    match op {
        BinaryOp::Add => Ok(left.wrapping_add(right)),
        BinaryOp::Subtract => Ok(left.wrapping_sub(right)),
        BinaryOp::Multiply => Ok(left.wrapping_mul(right)),
        BinaryOp::Divide => {
            if right == 0 {
                return Err(VmError::DivisionByZero { index });
            }
            // i64::MIN / -1 wraps to i64::MIN
            Ok(left.wrapping_div(right))
        }
    }
}
