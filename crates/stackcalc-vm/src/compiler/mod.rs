//! Stack code generator (expression tree to instruction sequence)

use crate::bytecode::CompiledUnit;
use crate::error::CompileError;
use crate::opcode::Instruction;
use stackcalc_parser::{Expr, ParseLimits};
use tracing::debug;

// Module structure
mod expressions;
mod stack;
pub(crate) mod symbols;

// Internal imports
use stack::StackTracker;
use symbols::SymbolTable;

/// Compile `expression` against an ordered parameter list into a unit named
/// `unit_name`, using the default input limits.
pub fn compile<S: AsRef<str>>(
    expression: &str,
    parameters: &[S],
    unit_name: &str,
) -> Result<CompiledUnit, CompileError> {
    compile_with_limits(expression, parameters, unit_name, &ParseLimits::default())
}

pub fn compile_with_limits<S: AsRef<str>>(
    expression: &str,
    parameters: &[S],
    unit_name: &str,
    limits: &ParseLimits,
) -> Result<CompiledUnit, CompileError> {
    Compiler::new(unit_name, parameters)?
        .with_limits(*limits)
        .compile(expression)
}

/// Bytecode compiler for a single unit
///
/// Each compiler owns its output buffer and depth counters, so separate
/// compilations never share state.
pub struct Compiler {
    /// Unit name
    name: String,

    /// Declared parameters, in slot order
    params: Vec<String>,

    /// Parameter slots
    pub(crate) symbols: SymbolTable,

    /// Emitted instructions
    pub(crate) code: Vec<Instruction>,

    /// Operand stack depth
    pub(crate) stack: StackTracker,

    /// Limits applied to source text
    limits: ParseLimits,
}

impl Compiler {
    /// Create a compiler for a unit with the given parameter list
    pub fn new<S: AsRef<str>>(name: &str, params: &[S]) -> Result<Self, CompileError> {
        let params: Vec<String> = params.iter().map(|p| p.as_ref().to_string()).collect();
        let symbols = SymbolTable::from_params(&params)?;

        Ok(Self {
            name: name.to_string(),
            params,
            symbols,
            code: Vec::new(),
            stack: StackTracker::new(),
            limits: ParseLimits::default(),
        })
    }

    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse and compile source text
    pub fn compile(self, source: &str) -> Result<CompiledUnit, CompileError> {
        let expr = stackcalc_parser::parse_with_limits(source, &self.limits)?;
        self.compile_ast(&expr)
    }

    /// Compile an already-parsed expression
    pub fn compile_ast(mut self, expr: &Expr) -> Result<CompiledUnit, CompileError> {
        self.compile_expr(expr)?;
        Ok(self.finish())
    }

    // ===== Helper methods =====

    /// Emit instruction
    pub(crate) fn emit(&mut self, instruction: Instruction) -> usize {
        self.stack.apply(&instruction);
        self.code.push(instruction);
        self.code.len() - 1
    }

    /// Emit RETURN and seal the unit
    fn finish(mut self) -> CompiledUnit {
        self.emit(Instruction::Return);

        debug!(
            unit = %self.name,
            params = self.symbols.len(),
            instructions = self.code.len(),
            max_stack = self.stack.max_used(),
            "unit compiled"
        );

        CompiledUnit::new(self.name, self.params, self.code, self.stack.max_used())
    }
}
