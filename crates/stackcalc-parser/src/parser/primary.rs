use crate::ast::Expr;
use crate::error::ParseError;
use crate::parser::AstParser;
use crate::pest_parser::Rule;
use pest::iterators::Pair;

impl AstParser {
    pub(super) fn build_primary(&mut self, pair: Pair<Rule>) -> Result<Expr, ParseError> {
        match pair.as_rule() {
            Rule::operand => self.build_operand(pair),
            Rule::group => {
                // group = { "(" ~ expr ~ ")" }; parentheses reset precedence
                let position = pair.as_span().start();
                let inner = pair.into_inner().next().ok_or(ParseError::Syntax {
                    position,
                    message: "empty parentheses".to_string(),
                })?;
                self.build_expr(inner)
            }
            rule => Err(ParseError::Syntax {
                position: pair.as_span().start(),
                message: format!("unexpected primary rule: {:?}", rule),
            }),
        }
    }

    /// Digits-only tokens are constants; every other run is a variable name,
    /// including mixed tokens such as `a1` or `1a`.
    fn build_operand(&mut self, pair: Pair<Rule>) -> Result<Expr, ParseError> {
        let token = pair.as_str();
        let position = pair.as_span().start();

        if token.bytes().all(|b| b.is_ascii_digit()) {
            let value = token
                .parse::<i64>()
                .map_err(|_| ParseError::InvalidConstant {
                    token: token.to_string(),
                    position,
                })?;
            Ok(Expr::Const(value))
        } else {
            Ok(Expr::var(token, position))
        }
    }
}
