use super::helpers::unit;
use crate::bytecode::simulate_stack_depth;
use crate::error::VmError;
use crate::opcode::Instruction;
use crate::vm::VM;

#[test]
fn test_single_operand_needs_one_slot() {
    assert_eq!(unit("7", &[]).max_stack_depth(), 1);
    assert_eq!(unit("x", &["x"]).max_stack_depth(), 1);
}

#[test]
fn test_left_chain_is_shallow() {
    // Each operand is folded as soon as it is pushed
    assert_eq!(unit("1+2+3+4+5+6", &[]).max_stack_depth(), 2);
}

#[test]
fn test_right_nesting_grows_the_stack() {
    assert_eq!(unit("1+(2+(3+(4+5)))", &[]).max_stack_depth(), 5);
}

#[test]
fn test_precedence_groups_add_one_level() {
    assert_eq!(unit("a+b*c", &["a", "b", "c"]).max_stack_depth(), 3);
    assert_eq!(unit("a*b+c", &["a", "b", "c"]).max_stack_depth(), 2);
}

#[test]
fn test_reported_depth_matches_simulation() {
    for source in [
        "x+3*y+20*2-5*3",
        "(x+y)*(x-y)",
        "x/(y/(x/(y/2)))",
        "((((x))))",
        "x*y*x*y+x",
    ] {
        let unit = unit(source, &["x", "y"]);
        assert_eq!(
            simulate_stack_depth(unit.code()),
            Ok(unit.max_stack_depth()),
            "{}",
            source
        );
    }
}

#[test]
fn test_every_unit_ends_in_single_return() {
    let unit = unit("(a+b)*(a-b)", &["a", "b"]);
    let returns = unit
        .code()
        .iter()
        .filter(|instruction| **instruction == Instruction::Return)
        .count();
    assert_eq!(returns, 1);
    assert_eq!(unit.code().last(), Some(&Instruction::Return));
}

#[test]
fn test_vm_rejects_understated_depth() {
    let unit = unit("1+(2+3)", &[]);
    let mut tampered = serde_json::to_value(&unit).unwrap();
    tampered["max_stack_depth"] = serde_json::json!(2);
    let tampered: crate::bytecode::CompiledUnit = serde_json::from_value(tampered).unwrap();

    let mut vm = VM::new();
    assert!(matches!(
        vm.execute(&tampered, &[]),
        Err(VmError::InvalidStack { .. })
    ));
}
