//! stackcalc Virtual Machine
//!
//! This crate turns an infix arithmetic expression into a [`CompiledUnit`]
//! for a stack-based virtual machine, and ships a reference machine that
//! executes it.
//!
//! # Architecture
//!
//! - Expressions are parsed by `stackcalc-parser` into an explicit tree
//! - The code generator walks the tree post-order, emitting one push per
//!   operand and one binary instruction per operator
//! - Live stack depth changes by exactly one per instruction, and the
//!   running maximum becomes the unit's `max_stack_depth`
//! - Parameter `i` of the declared list is loaded from slot `i + 1`; slot 0
//!   is the execution context
//!
//! # Modules
//!
//! - `opcode`: Instruction set definitions
//! - `bytecode`: Compiled unit and stack verification
//! - `compiler`: Expression tree to instruction sequence
//! - `vm`: Reference execution engine
//! - `bytecode_debug`: Disassembly listings
//! - `error`: Error types for VM and compiler

pub mod bytecode;
pub mod bytecode_debug;
pub mod compiler;
pub mod error;
pub mod opcode;
pub mod vm;

// Re-export main types
pub use bytecode::{simulate_stack_depth, CompiledUnit};
pub use bytecode_debug::disassemble;
pub use compiler::{compile, compile_with_limits, Compiler};
pub use error::{CompileError, VmError};
pub use opcode::{Instruction, OpCode};
pub use vm::VM;
