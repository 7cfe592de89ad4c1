//! Operand stack depth tracking

use crate::opcode::Instruction;

/// Live and maximum operand stack depth of the unit being compiled
#[derive(Debug, Default)]
pub(crate) struct StackTracker {
    /// Values currently on the stack
    live: usize,

    /// Deepest stack observed so far
    max: usize,
}

impl StackTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Account for one emitted instruction
    pub(crate) fn apply(&mut self, instruction: &Instruction) {
        let (pops, pushes) = instruction.opcode().stack_effect();
        // Post-order emission always has both operands in place
        debug_assert!(
            self.live >= pops,
            "{} needs {} values, stack holds {}",
            instruction,
            pops,
            self.live
        );
        self.live = self.live - pops + pushes;
        self.max = self.max.max(self.live);
    }

    pub(crate) fn live(&self) -> usize {
        self.live
    }

    pub(crate) fn max_used(&self) -> usize {
        self.max
    }
}
