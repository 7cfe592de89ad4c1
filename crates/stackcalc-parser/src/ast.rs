//! Abstract syntax tree for arithmetic expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    /// Map an operator character to its operator, if it is one
    pub fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Subtract),
            '*' => Some(BinaryOp::Multiply),
            '/' => Some(BinaryOp::Divide),
            _ => None,
        }
    }

    /// Source symbol of the operator
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Subtract => '-',
            BinaryOp::Multiply => '*',
            BinaryOp::Divide => '/',
        }
    }

    /// Priority level: 1 for `+`/`-`, 2 for `*`/`/`.
    ///
    /// Level 0 is reserved for "no operator seen yet" and never returned.
    pub fn priority(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Subtract => 1,
            BinaryOp::Multiply | BinaryOp::Divide => 2,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer constant
    Const(i64),

    /// Variable reference; `position` is the byte offset of the token
    Var { name: String, position: usize },

    /// Binary application `left op right`
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Create a variable reference
    pub fn var(name: impl Into<String>, position: usize) -> Self {
        Expr::Var {
            name: name.into(),
            position,
        }
    }

    /// Create a binary node
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Priority of the root operator, 0 for leaves
    pub fn priority(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.priority(),
            _ => 0,
        }
    }

    /// Names of every variable referenced, in source order (duplicates kept)
    pub fn variables(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_variables(&mut names);
        names
    }

    fn collect_variables<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var { name, .. } => names.push(name.as_str()),
            Expr::Binary { left, right, .. } => {
                left.collect_variables(names);
                right.collect_variables(names);
            }
        }
    }

    /// Structural equality ignoring variable positions
    pub fn same_shape(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Const(a), Expr::Const(b)) => a == b,
            (Expr::Var { name: a, .. }, Expr::Var { name: b, .. }) => a == b,
            (
                Expr::Binary {
                    op: op_a,
                    left: left_a,
                    right: right_a,
                },
                Expr::Binary {
                    op: op_b,
                    left: left_b,
                    right: right_b,
                },
            ) => op_a == op_b && left_a.same_shape(left_b) && right_a.same_shape(right_b),
            _ => false,
        }
    }
}
