//! Parameter name to slot bindings

use crate::bytecode::MAX_PARAMETERS;
use crate::error::CompileError;
use std::collections::HashMap;

/// Symbol table for the declared parameters of one unit
#[derive(Debug)]
pub(crate) struct SymbolTable {
    /// Parameter name → slot index (1-based)
    slots: HashMap<String, u16>,
}

impl SymbolTable {
    /// Bind each parameter to its slot, rejecting duplicates
    pub(crate) fn from_params(params: &[String]) -> Result<Self, CompileError> {
        if params.len() > MAX_PARAMETERS {
            return Err(CompileError::TooManyParameters(params.len()));
        }

        let mut slots = HashMap::with_capacity(params.len());
        for (idx, name) in params.iter().enumerate() {
            if slots.insert(name.clone(), idx as u16 + 1).is_some() {
                return Err(CompileError::DuplicateParameter(name.clone()));
            }
        }

        Ok(Self { slots })
    }

    /// Get slot for a variable referenced at `position`
    pub(crate) fn resolve(&self, name: &str, position: usize) -> Result<u16, CompileError> {
        self.slots
            .get(name)
            .copied()
            .ok_or_else(|| CompileError::UndeclaredVariable {
                name: name.to_string(),
                position,
            })
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
