use super::helpers::unit;
use crate::bytecode::CompiledUnit;
use crate::vm::VM;

#[test]
fn test_unit_json_shape() {
    let unit = unit("a*2", &["a"]);
    let json = serde_json::to_value(&unit).unwrap();

    assert_eq!(json["name"], "<test>");
    assert_eq!(json["params"], serde_json::json!(["a"]));
    assert_eq!(json["max_stack_depth"], 2);
    assert_eq!(
        json["code"],
        serde_json::json!([
            { "LoadSlot": 1 },
            { "PushConstant": 2 },
            { "BinaryOp": "Multiply" },
            "Return"
        ])
    );
}

#[test]
fn test_deserialized_unit_executes() {
    let original = unit("(a+b)*(a-b)", &["a", "b"]);
    let text = serde_json::to_string(&original).unwrap();
    let restored: CompiledUnit = serde_json::from_str(&text).unwrap();

    let mut vm = VM::new();
    assert_eq!(vm.execute(&restored, &[5, 3]), Ok(16));
}
