//! Reference stack machine
//!
//! Executes a [`CompiledUnit`] directly: one operand stack sized to the
//! unit's `max_stack_depth` and a frame of `param_count + 1` local slots,
//! slot 0 holding the execution context.

use crate::bytecode::{simulate_stack_depth, CompiledUnit, MAX_PARAMETERS};
use crate::error::VmError;
use crate::opcode::Instruction;
use tracing::{debug, trace};

// Module structure
mod ops;

use ops::apply_binary;

/// Value stored in the context slot
pub const CONTEXT_VALUE: i64 = 0;

/// Virtual Machine
#[derive(Debug, Default)]
pub struct VM {
    /// Operand stack
    stack: Vec<i64>,

    /// Local slots of the running unit
    locals: Vec<i64>,
}

impl VM {
    /// Create a new VM
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute a unit with positional arguments bound to slots 1..=N
    pub fn execute(&mut self, unit: &CompiledUnit, args: &[i64]) -> Result<i64, VmError> {
        // Units can be deserialized, so neither the parameter list nor the
        // declared depth is trusted
        if unit.param_count() > MAX_PARAMETERS {
            return Err(VmError::TooManyParameters(unit.param_count()));
        }

        if args.len() != unit.param_count() {
            return Err(VmError::ArityMismatch {
                expected: unit.param_count(),
                got: args.len(),
            });
        }

        let required = simulate_stack_depth(unit.code())?;
        if required > unit.max_stack_depth() {
            return Err(VmError::InvalidStack {
                index: 0,
                message: format!(
                    "declared stack depth {} is below the required {}",
                    unit.max_stack_depth(),
                    required
                ),
            });
        }

        self.locals.clear();
        self.locals.reserve(unit.local_count());
        self.locals.push(CONTEXT_VALUE);
        self.locals.extend_from_slice(args);

        self.stack.clear();
        self.stack.reserve(unit.max_stack_depth());

        debug!(unit = unit.name(), args = args.len(), "execute");
        self.run(unit)
    }

    /// Execute a unit with arguments bound by parameter name
    pub fn execute_named(
        &mut self,
        unit: &CompiledUnit,
        bindings: &[(&str, i64)],
    ) -> Result<i64, VmError> {
        let mut args = Vec::with_capacity(unit.param_count());
        for param in unit.params() {
            let value = bindings
                .iter()
                .find(|(name, _)| name == param)
                .map(|(_, value)| *value)
                .ok_or_else(|| VmError::UnboundParameter(param.clone()))?;
            args.push(value);
        }
        self.execute(unit, &args)
    }

    /// Main execution loop
    fn run(&mut self, unit: &CompiledUnit) -> Result<i64, VmError> {
        let capacity = unit.max_stack_depth();

        for (index, instruction) in unit.code().iter().enumerate() {
            trace!(index, %instruction, depth = self.stack.len(), "step");

            match *instruction {
                Instruction::PushConstant(value) => self.push(value, capacity)?,
                Instruction::LoadSlot(slot) => {
                    let value = *self.locals.get(slot as usize).ok_or(VmError::InvalidSlot {
                        slot,
                        locals: self.locals.len(),
                    })?;
                    self.push(value, capacity)?;
                }
                Instruction::BinaryOp(op) => {
                    let right = self.pop(index)?;
                    let left = self.pop(index)?;
                    let result = apply_binary(op, left, right, index)?;
                    self.push(result, capacity)?;
                }
                Instruction::Return => return self.pop(index),
            }
        }

        Err(VmError::MissingReturn)
    }

    fn push(&mut self, value: i64, capacity: usize) -> Result<(), VmError> {
        if self.stack.len() >= capacity {
            return Err(VmError::StackOverflow { capacity });
        }
        self.stack.push(value);
        Ok(())
    }

    fn pop(&mut self, index: usize) -> Result<i64, VmError> {
        self.stack.pop().ok_or(VmError::StackUnderflow { index })
    }
}
