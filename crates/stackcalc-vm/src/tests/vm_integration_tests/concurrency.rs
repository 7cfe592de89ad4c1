use crate::bytecode::CompiledUnit;
use crate::compiler::compile;
use crate::vm::VM;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_compiled_unit_is_send_and_sync() {
    assert_send_sync::<CompiledUnit>();
}

#[test]
fn test_parallel_compilations_are_independent() {
    let handles: Vec<_> = (0..8i64)
        .map(|k| {
            thread::spawn(move || {
                let source = format!("x*{}+{}", k, k);
                let unit = compile(&source, &["x"], "Par").unwrap();
                let mut vm = VM::new();
                vm.execute(&unit, &[10]).unwrap()
            })
        })
        .collect();

    for (k, handle) in handles.into_iter().enumerate() {
        let k = k as i64;
        assert_eq!(handle.join().unwrap(), 10 * k + k);
    }
}
