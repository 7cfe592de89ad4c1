//! Pest grammar binding and parse entry points

use crate::ast::Expr;
use crate::error::ParseError;
use crate::limits::ParseLimits;
use crate::parser::AstParser;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"]
pub struct ExpressionParser;

/// Parse an expression with the default limits
pub fn parse(source: &str) -> Result<Expr, ParseError> {
    parse_with_limits(source, &ParseLimits::default())
}

/// Parse an expression after validating it against `limits`
pub fn parse_with_limits(source: &str, limits: &ParseLimits) -> Result<Expr, ParseError> {
    limits.check(source)?;

    if source.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut pairs = ExpressionParser::parse(Rule::expression, source)?;
    let expression = pairs.next().ok_or(ParseError::Empty)?;

    // expression = { SOI ~ expr ~ EOI }
    let expr = expression
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::expr)
        .ok_or(ParseError::Empty)?;

    AstParser::new().build_expr(expr)
}
