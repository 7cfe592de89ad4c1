//! Tree building from pest pairs
//!
//! The grammar keeps every `expr` as a flat run of `term (op term)*`; binding
//! strength is resolved here by precedence climbing over that run.

use crate::ast::{BinaryOp, Expr};
use crate::error::ParseError;
use crate::pest_parser::Rule;
use once_cell::sync::Lazy;
use pest::iterators::Pair;
use pest::pratt_parser::{Assoc, Op, PrattParser};

mod primary;

/// Operator table, loosest binding first
static PRATT_PARSER: Lazy<PrattParser<Rule>> = Lazy::new(|| {
    PrattParser::new()
        .op(Op::infix(Rule::add, Assoc::Left) | Op::infix(Rule::subtract, Assoc::Left))
        .op(Op::infix(Rule::multiply, Assoc::Left) | Op::infix(Rule::divide, Assoc::Left))
});

/// Builds [`Expr`] trees from parse pairs
#[derive(Debug, Default)]
pub struct AstParser;

impl AstParser {
    pub fn new() -> Self {
        Self
    }

    /// Build an expression from an `expr` pair
    pub fn build_expr(&mut self, pair: Pair<Rule>) -> Result<Expr, ParseError> {
        if pair.as_rule() != Rule::expr {
            return Err(ParseError::Syntax {
                position: pair.as_span().start(),
                message: format!("expected expression, found {:?}", pair.as_rule()),
            });
        }

        PRATT_PARSER
            .map_primary(|primary| self.build_primary(primary))
            .map_infix(|left, op, right| {
                let op = binary_op(&op)?;
                Ok(Expr::binary(op, left?, right?))
            })
            .parse(pair.into_inner())
    }
}

fn binary_op(pair: &Pair<Rule>) -> Result<BinaryOp, ParseError> {
    match pair.as_rule() {
        Rule::add => Ok(BinaryOp::Add),
        Rule::subtract => Ok(BinaryOp::Subtract),
        Rule::multiply => Ok(BinaryOp::Multiply),
        Rule::divide => Ok(BinaryOp::Divide),
        rule => Err(ParseError::Syntax {
            position: pair.as_span().start(),
            message: format!("unexpected operator rule {:?}", rule),
        }),
    }
}
