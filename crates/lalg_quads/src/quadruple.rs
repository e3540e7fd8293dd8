//! A single three-address instruction and its operands

use crate::Operator;
use std::fmt::{Display, Formatter};

/// A temporary value, named `T1`, `T2`, ...
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Temp(u32);

impl Temp {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl Display for Temp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Where a jump goes
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Target {
    /// An instruction index
    Line(usize),
    /// Not yet known, waiting to be patched
    Pending(usize),
}

/// An operand of a quadruple
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum Operand {
    /// A declared variable
    Var(String),
    /// A numeric literal, kept as written
    Const(String),
    Temp(Temp),
    Target(Target),
}

impl Operand {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    pub fn constant(text: impl Into<String>) -> Self {
        Self::Const(text.into())
    }

    pub fn line(index: usize) -> Self {
        Self::Target(Target::Line(index))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Operand::Target(Target::Pending(_)))
    }
}

impl From<Temp> for Operand {
    fn from(value: Temp) -> Self {
        Self::Temp(value)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Var(name) => write!(f, "{name}"),
            Operand::Const(text) => write!(f, "{text}"),
            Operand::Temp(temp) => write!(f, "{temp}"),
            Operand::Target(Target::Line(line)) => write!(f, "{line}"),
            Operand::Target(Target::Pending(hole)) => write!(f, "<pending {hole}>"),
        }
    }
}

/// One intermediate instruction: an operator with up to three operand slots
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Quadruple {
    op: Operator,
    arg1: Option<Operand>,
    arg2: Option<Operand>,
    result: Option<Operand>,
}

impl Quadruple {
    /// Creates a quadruple with all slots empty
    pub fn new(op: Operator) -> Self {
        Self {
            op,
            arg1: None,
            arg2: None,
            result: None,
        }
    }

    pub fn with_arg1(mut self, operand: impl Into<Operand>) -> Self {
        self.arg1 = Some(operand.into());
        self
    }

    pub fn with_arg2(mut self, operand: impl Into<Operand>) -> Self {
        self.arg2 = Some(operand.into());
        self
    }

    pub fn with_result(mut self, operand: impl Into<Operand>) -> Self {
        self.result = Some(operand.into());
        self
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn arg1(&self) -> Option<&Operand> {
        self.arg1.as_ref()
    }

    pub fn arg2(&self) -> Option<&Operand> {
        self.arg2.as_ref()
    }

    pub fn result(&self) -> Option<&Operand> {
        self.result.as_ref()
    }

    pub(crate) fn result_mut(&mut self) -> Option<&mut Operand> {
        self.result.as_mut()
    }

    /// Gets the resolved jump target of this instruction, if it's a patched jump
    pub fn target(&self) -> Option<usize> {
        match self.result {
            Some(Operand::Target(Target::Line(line))) if self.op.is_jump() => Some(line),
            _ => None,
        }
    }
}

impl Display for Quadruple {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let slot = |operand: &Option<Operand>| {
            operand
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default()
        };
        let line = format!(
            "{}; {}; {}; {}",
            self.op,
            slot(&self.arg1),
            slot(&self.arg2),
            slot(&self.result)
        );
        write!(f, "{}", line.trim_end())
    }
}
