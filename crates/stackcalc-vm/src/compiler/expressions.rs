//! Expression compilation

use crate::compiler::Compiler;
use crate::error::CompileError;
use crate::opcode::Instruction;
use stackcalc_parser::{BinaryOp, Expr};

impl Compiler {
    /// Compile an expression (post-order: operands first, then operator).
    /// Leaves exactly one value on the stack.
    pub(crate) fn compile_expr(&mut self, expr: &Expr) -> Result<(), CompileError> {
        match expr {
            Expr::Const(value) => {
                self.emit(Instruction::PushConstant(*value));
                Ok(())
            }
            Expr::Var { name, position } => {
                let slot = self.symbols.resolve(name, *position)?;
                self.emit(Instruction::LoadSlot(slot));
                Ok(())
            }
            Expr::Binary { op, left, right } => self.compile_binary_op(*op, left, right),
        }
    }

    /// Compile binary operation
    fn compile_binary_op(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<(), CompileError> {
        self.compile_expr(left)?;
        self.compile_expr(right)?;
        self.emit(Instruction::BinaryOp(op));
        Ok(())
    }
}
