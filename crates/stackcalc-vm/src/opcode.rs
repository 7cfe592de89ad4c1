//! Instruction set for the stackcalc stack machine
//!
//! Every instruction either pushes one value, folds the top two values into
//! one, or pops the final result:
//!
//! | opcode       | operand    | stack effect  |
//! |--------------|------------|---------------|
//! | `PUSH_CONST` | `i64`      | `-- v`        |
//! | `LOAD_SLOT`  | slot index | `-- v`        |
//! | `ADD` .. `DIV` | -        | `a b -- a∘b`  |
//! | `RETURN`     | -          | `v --`        |

use serde::{Deserialize, Serialize};
use stackcalc_parser::BinaryOp;
use std::fmt;

/// Opcode tag of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OpCode {
    // ===== Loads =====
    /// Push constant: push(K)
    PushConst = 0,
    /// Load argument slot: push(locals[A])
    LoadSlot = 1,

    // ===== Arithmetic =====
    /// Addition: push(pop2 + pop1)
    Add = 10,
    /// Subtraction: push(pop2 - pop1)
    Sub = 11,
    /// Multiplication: push(pop2 * pop1)
    Mul = 12,
    /// Truncating division: push(pop2 / pop1)
    Div = 13,

    // ===== Functions =====
    /// Return: return pop1
    Return = 54,
}

impl OpCode {
    /// Get opcode from byte value
    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(OpCode::PushConst),
            1 => Some(OpCode::LoadSlot),
            10 => Some(OpCode::Add),
            11 => Some(OpCode::Sub),
            12 => Some(OpCode::Mul),
            13 => Some(OpCode::Div),
            54 => Some(OpCode::Return),
            _ => None,
        }
    }

    /// Convert opcode to byte value
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get human-readable name
    pub fn name(self) -> &'static str {
        match self {
            OpCode::PushConst => "PUSH_CONST",
            OpCode::LoadSlot => "LOAD_SLOT",
            OpCode::Add => "ADD",
            OpCode::Sub => "SUB",
            OpCode::Mul => "MUL",
            OpCode::Div => "DIV",
            OpCode::Return => "RETURN",
        }
    }

    /// Values popped and pushed: `(pops, pushes)`
    pub fn stack_effect(self) -> (usize, usize) {
        match self {
            OpCode::PushConst | OpCode::LoadSlot => (0, 1),
            OpCode::Add | OpCode::Sub | OpCode::Mul | OpCode::Div => (2, 1),
            OpCode::Return => (1, 0),
        }
    }

    /// Opcode implementing a binary operator
    pub fn for_operator(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add => OpCode::Add,
            BinaryOp::Subtract => OpCode::Sub,
            BinaryOp::Multiply => OpCode::Mul,
            BinaryOp::Divide => OpCode::Div,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single stack-machine instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    PushConstant(i64),
    LoadSlot(u16),
    BinaryOp(BinaryOp),
    Return,
}

impl Instruction {
    pub fn opcode(&self) -> OpCode {
        match self {
            Instruction::PushConstant(_) => OpCode::PushConst,
            Instruction::LoadSlot(_) => OpCode::LoadSlot,
            Instruction::BinaryOp(op) => OpCode::for_operator(*op),
            Instruction::Return => OpCode::Return,
        }
    }

    /// Net change in live stack depth
    pub fn depth_delta(&self) -> isize {
        let (pops, pushes) = self.opcode().stack_effect();
        pushes as isize - pops as isize
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::PushConstant(value) => write!(f, "{:<12}{}", self.opcode().name(), value),
            Instruction::LoadSlot(slot) => write!(f, "{:<12}{}", self.opcode().name(), slot),
            Instruction::BinaryOp(_) | Instruction::Return => write!(f, "{}", self.opcode().name()),
        }
    }
}
