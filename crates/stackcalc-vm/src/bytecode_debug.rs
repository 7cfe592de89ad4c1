//! Bytecode debugging utilities

use crate::bytecode::CompiledUnit;
use crate::opcode::Instruction;
use std::fmt::Write;

/// Render a detailed disassembly of a unit
pub fn disassemble(unit: &CompiledUnit) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "========== Unit: {} ==========", unit.name());
    let _ = writeln!(out, "Parameters: {}", unit.param_count());
    for (idx, param) in unit.params().iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", idx + 1, param);
    }
    let _ = writeln!(out, "Max stack: {}", unit.max_stack_depth());
    let _ = writeln!(out, "Locals: {}", unit.local_count());

    let _ = writeln!(out, "\nBytecode:");
    for (i, instruction) in unit.code().iter().enumerate() {
        let _ = writeln!(out, "{:04}  {}", i, disassemble_instruction(instruction, unit));
    }

    out
}

/// Print a disassembly to stdout
pub fn print_disassembly(unit: &CompiledUnit) {
    print!("{}", disassemble(unit));
}

/// Disassemble a single instruction
fn disassemble_instruction(instruction: &Instruction, unit: &CompiledUnit) -> String {
    match instruction {
        Instruction::LoadSlot(slot) => {
            let name = unit.param_at(*slot).unwrap_or("???");
            format!("{}  ; {}", instruction, name)
        }
        _ => instruction.to_string(),
    }
}
