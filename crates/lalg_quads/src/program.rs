//! The ordered sequence of emitted quadruples

use crate::{Operand, Operator, Quadruple, Target};
use itertools::Itertools as _;
use std::fmt::{Display, Formatter};
use std::ops::Index;
use std::slice;
use tracing::{debug, trace};

/// A jump whose target was not known when it was emitted.
///
/// Can only be obtained from [ProgramBuilder::emit_jump] and is consumed by
/// [ProgramBuilder::patch], so every pending jump is patched at most once.
#[derive(Debug)]
#[must_use = "a pending jump must be patched before the program is finished"]
pub struct PendingJump {
    index: usize,
    hole: usize,
}

impl PendingJump {
    /// The index of the jump instruction
    pub fn index(&self) -> usize {
        self.index
    }
}

/// An error occurred while patching a jump
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatchError {
    #[error("no instruction at index {0}")]
    NoSuchInstruction(usize),
    #[error("instruction {0} has no pending jump target")]
    NotPending(usize),
    #[error("jump target {target} is past the end of the program ({len} instructions)")]
    TargetOutOfRange { target: usize, len: usize },
}

/// Jumps that were still pending when the program was finished
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("jumps at instructions {} were never patched", .0.iter().join(", "))]
pub struct UnpatchedJumps(pub Vec<usize>);

/// Append-only builder for an [IntermediateProgram].
///
/// The only mutation of an already emitted instruction is the patching of a pending jump target.
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    quads: Vec<Quadruple>,
    pending: usize,
    next_hole: usize,
}

impl ProgramBuilder {
    /// Creates a new empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a quadruple, returning its index
    pub fn emit(&mut self, quad: Quadruple) -> usize {
        let index = self.quads.len();
        debug!("{index:04} {quad}");
        self.quads.push(quad);
        index
    }

    /// Appends a jump whose target is not known yet
    pub fn emit_jump(&mut self, op: Operator, condition: Option<Operand>) -> PendingJump {
        debug_assert!(op.is_jump(), "{op} is not a jump");
        let hole = self.next_hole;
        self.next_hole += 1;
        self.pending += 1;
        let index = self.emit(jump(op, condition, Target::Pending(hole)));
        PendingJump { index, hole }
    }

    /// Appends a jump to an already known instruction index
    pub fn emit_jump_to(&mut self, op: Operator, condition: Option<Operand>, target: usize) -> usize {
        debug_assert!(op.is_jump(), "{op} is not a jump");
        self.emit(jump(op, condition, Target::Line(target)))
    }

    /// Resolves a pending jump to the given instruction index
    pub fn patch(&mut self, jump: PendingJump, target: usize) -> Result<(), PatchError> {
        let len = self.quads.len();
        if target > len {
            return Err(PatchError::TargetOutOfRange { target, len });
        }
        let quad = self
            .quads
            .get_mut(jump.index)
            .ok_or(PatchError::NoSuchInstruction(jump.index))?;
        match quad.result_mut() {
            Some(slot) if *slot == Operand::Target(Target::Pending(jump.hole)) => {
                *slot = Operand::line(target);
            }
            _ => return Err(PatchError::NotPending(jump.index)),
        }
        self.pending -= 1;
        trace!("patched jump at {:04} -> {target}", jump.index);
        Ok(())
    }

    /// The index the next emitted instruction will have
    pub fn next_index(&self) -> usize {
        self.quads.len()
    }

    /// Number of jumps still waiting for a target
    pub fn pending_jumps(&self) -> usize {
        self.pending
    }

    /// The instructions emitted so far
    pub fn quadruples(&self) -> &[Quadruple] {
        &self.quads
    }

    /// Finishes the program, failing if any jump was never patched
    pub fn finish(self) -> Result<IntermediateProgram, UnpatchedJumps> {
        if self.pending > 0 {
            let unpatched = self
                .quads
                .iter()
                .positions(|quad| quad.result().is_some_and(Operand::is_pending))
                .collect();
            return Err(UnpatchedJumps(unpatched));
        }
        Ok(IntermediateProgram { quads: self.quads })
    }
}

fn jump(op: Operator, condition: Option<Operand>, target: Target) -> Quadruple {
    let quad = Quadruple::new(op).with_result(Operand::Target(target));
    match condition {
        Some(condition) => quad.with_arg1(condition),
        None => quad,
    }
}

/// A finished program, every jump target resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntermediateProgram {
    quads: Vec<Quadruple>,
}

impl IntermediateProgram {
    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Quadruple> {
        self.quads.get(index)
    }

    pub fn last(&self) -> Option<&Quadruple> {
        self.quads.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, Quadruple> {
        self.quads.iter()
    }

    pub fn quadruples(&self) -> &[Quadruple] {
        &self.quads
    }
}

impl Index<usize> for IntermediateProgram {
    type Output = Quadruple;

    fn index(&self, index: usize) -> &Self::Output {
        &self.quads[index]
    }
}

impl<'a> IntoIterator for &'a IntermediateProgram {
    type Item = &'a Quadruple;
    type IntoIter = slice::Iter<'a, Quadruple>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for IntermediateProgram {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for quad in &self.quads {
            writeln!(f, "{quad}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Temp;
    use test_log::test;

    #[test]
    fn test_emit_returns_indices() {
        let mut builder = ProgramBuilder::new();
        assert_eq!(builder.emit(Quadruple::new(Operator::Read).with_result(Operand::var("x"))), 0);
        assert_eq!(builder.emit(Quadruple::new(Operator::Write).with_arg1(Operand::var("x"))), 1);
        assert_eq!(builder.next_index(), 2);
    }

    #[test]
    fn test_forward_jump_patched() {
        let mut builder = ProgramBuilder::new();
        let jf = builder.emit_jump(Operator::JumpIfFalse, Some(Temp::new(1).into()));
        builder.emit(Quadruple::new(Operator::Write).with_arg1(Operand::var("a")));
        assert_eq!(builder.pending_jumps(), 1);
        let target = builder.next_index();
        builder.patch(jf, target).expect("could not patch");
        assert_eq!(builder.pending_jumps(), 0);
        builder.emit(Quadruple::new(Operator::Halt));

        let program = builder.finish().expect("all jumps are patched");
        assert_eq!(program[0].target(), Some(2));
        assert_eq!(program[0].to_string(), "jf; T1; ; 2");
        assert_eq!(program.len(), 3);
    }

    #[test]
    fn test_backward_jump() {
        let mut builder = ProgramBuilder::new();
        builder.emit(Quadruple::new(Operator::Read).with_result(Operand::var("x")));
        let index = builder.emit_jump_to(Operator::Jump, None, 0);
        assert_eq!(builder.quadruples()[index].to_string(), "goto; ; ; 0");
    }

    #[test]
    fn test_unpatched_jump_fails_finish() {
        let mut builder = ProgramBuilder::new();
        builder.emit(Quadruple::new(Operator::Read).with_result(Operand::var("x")));
        let _jump = builder.emit_jump(Operator::Jump, None);
        builder.emit(Quadruple::new(Operator::Halt));
        let err = builder.finish().unwrap_err();
        assert_eq!(err, UnpatchedJumps(vec![1]));
        assert_eq!(err.to_string(), "jumps at instructions 1 were never patched");
    }

    #[test]
    fn test_patch_out_of_range() {
        let mut builder = ProgramBuilder::new();
        let jump = builder.emit_jump(Operator::Jump, None);
        let err = builder.patch(jump, 5).unwrap_err();
        assert_eq!(err, PatchError::TargetOutOfRange { target: 5, len: 1 });
    }
}
