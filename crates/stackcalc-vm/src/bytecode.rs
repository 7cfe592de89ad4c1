//! Compiled unit format and stack verification

use crate::error::VmError;
use crate::opcode::Instruction;
use serde::{Deserialize, Serialize};

/// Highest number of parameters; slot 0 is the execution context
pub const MAX_PARAMETERS: usize = u16::MAX as usize - 1;

/// Slot reserved for the implicit execution context
pub const CONTEXT_SLOT: u16 = 0;

/// Compiled expression: a callable unit for a stack machine
///
/// Created once by the compiler and never modified. Parameter `i` (0-based)
/// is available at run time in slot `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledUnit {
    /// Unit name (for debugging)
    name: String,

    /// Declared parameters, in slot order
    params: Vec<String>,

    /// Instruction sequence, ending in RETURN
    code: Vec<Instruction>,

    /// Stack capacity needed to run `code`
    max_stack_depth: usize,
}

impl CompiledUnit {
    pub(crate) fn new(
        name: String,
        params: Vec<String>,
        code: Vec<Instruction>,
        max_stack_depth: usize,
    ) -> Self {
        Self {
            name,
            params,
            code,
            max_stack_depth,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn code(&self) -> &[Instruction] {
        &self.code
    }

    pub fn max_stack_depth(&self) -> usize {
        self.max_stack_depth
    }

    /// Number of parameters (arity of the unit)
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Local slots needed: the parameters plus the context slot
    pub fn local_count(&self) -> usize {
        self.params.len() + 1
    }

    /// Slot index of a declared parameter
    pub fn slot_of(&self, name: &str) -> Option<u16> {
        self.params
            .iter()
            .position(|param| param == name)
            .and_then(|idx| u16::try_from(idx + 1).ok())
    }

    /// Parameter name held in `slot`, if any
    pub fn param_at(&self, slot: u16) -> Option<&str> {
        if slot == CONTEXT_SLOT {
            return None;
        }
        self.params.get(slot as usize - 1).map(|s| s.as_str())
    }
}

/// Replay the stack effect of `code` and return the deepest stack observed.
///
/// The sequence must never pop from an empty stack, must end in a single
/// RETURN, and must hold exactly one value when RETURN executes.
pub fn simulate_stack_depth(code: &[Instruction]) -> Result<usize, VmError> {
    let mut depth = 0usize;
    let mut max_depth = 0usize;

    for (index, instruction) in code.iter().enumerate() {
        let (pops, pushes) = instruction.opcode().stack_effect();

        if depth < pops {
            return Err(VmError::StackUnderflow { index });
        }

        if let Instruction::Return = instruction {
            if depth != 1 {
                return Err(VmError::InvalidStack {
                    index,
                    message: format!("RETURN with {} values on the stack", depth),
                });
            }
            if index + 1 != code.len() {
                return Err(VmError::InvalidStack {
                    index: index + 1,
                    message: "instruction after RETURN".to_string(),
                });
            }
            return Ok(max_depth);
        }

        depth = depth - pops + pushes;
        max_depth = max_depth.max(depth);
    }

    Err(VmError::MissingReturn)
}
