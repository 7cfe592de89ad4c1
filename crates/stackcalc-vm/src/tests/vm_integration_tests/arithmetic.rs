use super::helpers::execute;

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_mul_binds_tighter_than_add() {
    assert_eq!(execute("2+3*4", &[]).unwrap(), 14);
    assert_eq!(execute("2*3+4", &[]).unwrap(), 10);
}

#[test]
fn test_div_binds_tighter_than_sub() {
    assert_eq!(execute("20-12/4", &[]).unwrap(), 17);
}

#[test]
fn test_left_associative_subtraction() {
    assert_eq!(execute("10-3-2", &[]).unwrap(), 5);
}

#[test]
fn test_left_associative_division() {
    assert_eq!(execute("100/10/5", &[]).unwrap(), 2);
}

#[test]
fn test_explicit_right_grouping() {
    assert_eq!(execute("10-(3-2)", &[]).unwrap(), 9);
    assert_eq!(execute("100/(10/5)", &[]).unwrap(), 50);
}

#[test]
fn test_nested_groups() {
    assert_eq!(execute("((1+2)*(3+4))-(5*(6-4))", &[]).unwrap(), 11);
}

// ============================================================================
// Variables
// ============================================================================

#[test]
fn test_reference_expression_by_name() {
    let result = execute("x+3*y+20*2-5*3", &[("x", 50), ("y", 30)]).unwrap();
    assert_eq!(result, 165);
}

#[test]
fn test_repeated_variable() {
    assert_eq!(execute("n*n+n", &[("n", 7)]).unwrap(), 56);
}

#[test]
fn test_unused_parameter_is_allowed() {
    assert_eq!(execute("a+1", &[("a", 1), ("b", 99)]).unwrap(), 2);
}

#[test]
fn test_multi_letter_names() {
    let result = execute("width*height", &[("width", 6), ("height", 7)]).unwrap();
    assert_eq!(result, 42);
}

#[test]
fn test_mixed_token_resolved_as_name() {
    assert_eq!(execute("a1+1", &[("a1", 4)]).unwrap(), 5);
}

#[test]
fn test_whitespace_between_tokens() {
    assert_eq!(execute(" ( a + b ) * 2 ", &[("a", 1), ("b", 2)]).unwrap(), 6);
}

// ============================================================================
// Integer semantics
// ============================================================================

#[test]
fn test_truncating_division_with_negative_operand() {
    assert_eq!(execute("a/2", &[("a", -7)]).unwrap(), -3);
}

#[test]
fn test_negative_results() {
    assert_eq!(execute("3-10", &[]).unwrap(), -7);
}

#[test]
fn test_wrapping_overflow() {
    assert_eq!(
        execute("9223372036854775807+1", &[]).unwrap(),
        i64::MIN
    );
}
