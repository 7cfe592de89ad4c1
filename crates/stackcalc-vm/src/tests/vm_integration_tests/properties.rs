//! Property-based tests for the compile/execute pipeline using `proptest`.

use super::helpers::evaluate;
use crate::bytecode::simulate_stack_depth;
use crate::compiler::compile;
use crate::error::VmError;
use crate::opcode::Instruction;
use crate::vm::VM;
use proptest::prelude::*;
use stackcalc_parser::{normalize, parse, to_bracketed, BinaryOp, Expr};

const PARAMS: [&str; 3] = ["a", "b", "c"];

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_op() -> impl Strategy<Value = BinaryOp> {
    prop_oneof![
        Just(BinaryOp::Add),
        Just(BinaryOp::Subtract),
        Just(BinaryOp::Multiply),
        Just(BinaryOp::Divide),
    ]
}

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = prop_oneof![
        (0i64..100).prop_map(Expr::Const),
        prop::sample::select(PARAMS.to_vec()).prop_map(|name| Expr::var(name, 0)),
    ];
    leaf.prop_recursive(5, 32, 2, |inner| {
        (arb_op(), inner.clone(), inner).prop_map(|(op, left, right)| Expr::binary(op, left, right))
    })
}

/// Render with minimal parentheses, so precedence has to be resolved
fn minimal_source(expr: &Expr) -> String {
    match expr {
        Expr::Const(value) => value.to_string(),
        Expr::Var { name, .. } => name.clone(),
        Expr::Binary { op, left, right } => {
            let left_text = if left.priority() != 0 && left.priority() < op.priority() {
                format!("({})", minimal_source(left))
            } else {
                minimal_source(left)
            };
            let right_text = if right.priority() != 0 && right.priority() <= op.priority() {
                format!("({})", minimal_source(right))
            } else {
                minimal_source(right)
            };
            format!("{}{}{}", left_text, op, right_text)
        }
    }
}

fn max_depth_by_tree(expr: &Expr) -> usize {
    match expr {
        Expr::Const(_) | Expr::Var { .. } => 1,
        Expr::Binary { left, right, .. } => max_depth_by_tree(left).max(1 + max_depth_by_tree(right)),
    }
}

proptest! {
    #[test]
    fn prop_vm_matches_tree_evaluation(
        expr in arb_expr(),
        a in -1000i64..1000,
        b in -1000i64..1000,
        c in -1000i64..1000,
    ) {
        let source = minimal_source(&expr);
        let unit = compile(&source, &PARAMS, "Prop").unwrap();
        let bindings = [("a", a), ("b", b), ("c", c)];

        let expected = evaluate(&parse(&source).unwrap(), &bindings);
        let actual = VM::new().execute(&unit, &[a, b, c]);

        match expected {
            Some(value) => {
                prop_assert_eq!(actual, Ok(value), "{}", source);
            }
            None => {
                prop_assert!(matches!(actual, Err(VmError::DivisionByZero { .. })), "{}", source);
            }
        }
    }

    #[test]
    fn prop_minimal_source_parses_to_generated_tree(expr in arb_expr()) {
        let source = minimal_source(&expr);
        prop_assert!(parse(&source).unwrap().same_shape(&expr), "{}", source);
    }

    #[test]
    fn prop_normalized_source_compiles_to_same_code(expr in arb_expr()) {
        let source = minimal_source(&expr);
        let normalized = normalize(&source).unwrap();
        prop_assert_eq!(&normalized, &to_bracketed(&expr));

        let original = compile(&source, &PARAMS, "Prop").unwrap();
        let rewritten = compile(&normalized, &PARAMS, "Prop").unwrap();
        prop_assert_eq!(original.code(), rewritten.code());
    }

    #[test]
    fn prop_stack_depth_is_exact(expr in arb_expr()) {
        let unit = compile(&minimal_source(&expr), &PARAMS, "Prop").unwrap();

        prop_assert_eq!(simulate_stack_depth(unit.code()), Ok(unit.max_stack_depth()));
        prop_assert_eq!(unit.max_stack_depth(), max_depth_by_tree(&expr));

        // One push per leaf, one fold per operator, one return
        let pushes = unit.code().iter().filter(|i| i.depth_delta() == 1).count();
        let folds = unit.code().iter().filter(|i| matches!(i, Instruction::BinaryOp(_))).count();
        prop_assert_eq!(pushes, folds + 1);
    }
}
