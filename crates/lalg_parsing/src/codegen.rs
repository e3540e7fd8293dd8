//! Emits the quadruples of the analyzed program

use crate::symbols::VarType;
use lalg_quads::{
    IntermediateProgram, Operand, Operator, PatchError, PendingJump, ProgramBuilder, Quadruple,
    Temp, UnpatchedJumps,
};
use tracing::debug;

/// The result of an expression, with the type it was resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pub operand: Operand,
    pub ty: VarType,
}

impl Value {
    pub fn new(operand: Operand, ty: VarType) -> Self {
        Self { operand, ty }
    }
}

/// The temporary holding the result of a comparison
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Condition(Temp);

/// Owns the program being built and the temporary counter of one analysis
#[derive(Debug, Default)]
pub struct CodeGenerator {
    builder: ProgramBuilder,
    temps: u32,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_temp(&mut self) -> Temp {
        self.temps += 1;
        Temp::new(self.temps)
    }

    /// `alloc; 0; ; x`
    pub fn allocate(&mut self, name: &str, ty: VarType) -> usize {
        self.builder.emit(
            Quadruple::new(Operator::Alloc)
                .with_arg1(Operand::constant(ty.zero_value()))
                .with_result(Operand::var(name)),
        )
    }

    /// `read; ; ; x`
    pub fn read(&mut self, name: &str) -> usize {
        self.builder
            .emit(Quadruple::new(Operator::Read).with_result(Operand::var(name)))
    }

    /// `write; x; ;`
    pub fn write(&mut self, name: &str) -> usize {
        self.builder
            .emit(Quadruple::new(Operator::Write).with_arg1(Operand::var(name)))
    }

    /// `:=; value; ; x`
    pub fn store(&mut self, name: &str, value: Value) -> usize {
        self.builder.emit(
            Quadruple::new(Operator::Store)
                .with_arg1(value.operand)
                .with_result(Operand::var(name)),
        )
    }

    /// Applies an arithmetic operator, storing the result into a fresh temporary
    pub fn binary(&mut self, op: Operator, left: Value, right: Value) -> Value {
        let ty = left.ty.widen(right.ty);
        let temp = self.fresh_temp();
        self.builder.emit(
            Quadruple::new(op)
                .with_arg1(left.operand)
                .with_arg2(right.operand)
                .with_result(temp),
        );
        Value::new(temp.into(), ty)
    }

    /// `minus; f; ; Tn`
    pub fn negate(&mut self, value: Value) -> Value {
        let temp = self.fresh_temp();
        self.builder.emit(
            Quadruple::new(Operator::Negate)
                .with_arg1(value.operand)
                .with_result(temp),
        );
        Value::new(temp.into(), value.ty)
    }

    /// Compares two values, storing the truth value into a fresh temporary
    pub fn compare(&mut self, op: Operator, left: Value, right: Value) -> Condition {
        debug_assert!(op.is_comparison(), "{op} is not a comparison");
        let temp = self.fresh_temp();
        self.builder.emit(
            Quadruple::new(op)
                .with_arg1(left.operand)
                .with_arg2(right.operand)
                .with_result(temp),
        );
        Condition(temp)
    }

    /// `jf; Tn; ; ?`
    pub fn jump_if_false(&mut self, condition: &Condition) -> PendingJump {
        self.builder
            .emit_jump(Operator::JumpIfFalse, Some(condition.0.into()))
    }

    /// `goto; ; ; ?`
    pub fn jump(&mut self) -> PendingJump {
        self.builder.emit_jump(Operator::Jump, None)
    }

    /// `goto; ; ; target`, for jumps to already emitted instructions
    pub fn jump_to(&mut self, target: usize) -> usize {
        self.builder.emit_jump_to(Operator::Jump, None, target)
    }

    /// Resolves a pending jump to the next instruction to be emitted
    pub fn patch_here(&mut self, jump: PendingJump) -> Result<(), PatchError> {
        let target = self.builder.next_index();
        debug!("patching jump at {:04} to {target:04}", jump.index());
        self.builder.patch(jump, target)
    }

    /// The index of the next instruction to be emitted
    pub fn next_index(&self) -> usize {
        self.builder.next_index()
    }

    /// `halt; ; ;`
    pub fn halt(&mut self) -> usize {
        self.builder.emit(Quadruple::new(Operator::Halt))
    }

    /// The instructions emitted so far
    pub fn quadruples(&self) -> &[Quadruple] {
        self.builder.quadruples()
    }

    pub fn finish(self) -> Result<IntermediateProgram, UnpatchedJumps> {
        self.builder.finish()
    }
}
