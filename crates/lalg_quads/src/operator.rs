use std::fmt::{Display, Formatter};
use strum::{AsRefStr, EnumIter};

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// The operator of a quadruple
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy, AsRefStr, EnumIter)]
pub enum Operator {
    /// Allocates a variable, with its zero value as the first argument
    #[strum(serialize = "alloc")]
    Alloc,
    #[strum(serialize = "read")]
    Read,
    #[strum(serialize = "write")]
    Write,
    #[strum(serialize = ":=")]
    Store,

    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Mult,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "minus")]
    Negate,

    #[strum(serialize = "=")]
    Eq,
    #[strum(serialize = "<>")]
    Neq,
    #[strum(serialize = ">=")]
    Gte,
    #[strum(serialize = "<=")]
    Lte,
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<")]
    Lt,

    /// Jump on false
    #[strum(serialize = "jf")]
    JumpIfFalse,
    /// Unconditional jump
    #[strum(serialize = "goto")]
    Jump,

    #[strum(serialize = "halt")]
    Halt,
}

impl Operator {
    /// Gets the binary arithmetic operator for a symbol
    pub fn arithmetic(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "*" => Some(Operator::Mult),
            "/" => Some(Operator::Divide),
            _ => None,
        }
    }

    /// Gets the comparison operator for a relational symbol
    pub fn relational(symbol: &str) -> Option<Self> {
        match symbol {
            "=" => Some(Operator::Eq),
            "<>" => Some(Operator::Neq),
            ">=" => Some(Operator::Gte),
            "<=" => Some(Operator::Lte),
            ">" => Some(Operator::Gt),
            "<" => Some(Operator::Lt),
            _ => None,
        }
    }

    /// Whether this operator transfers control, carrying a target in its result slot
    pub fn is_jump(&self) -> bool {
        matches!(self, Operator::JumpIfFalse | Operator::Jump)
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Neq | Operator::Gte | Operator::Lte | Operator::Gt | Operator::Lt
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn test_symbols_map_back_to_operators() {
        for op in Operator::iter() {
            let symbol = op.to_string();
            if op.is_comparison() {
                assert_eq!(Operator::relational(&symbol), Some(op));
            } else if let Some(arith) = Operator::arithmetic(&symbol) {
                assert_eq!(arith, op);
            }
        }
        assert_eq!(Operator::arithmetic("minus"), None);
        assert_eq!(Operator::relational("=="), None);
    }

    #[test]
    fn test_jumps() {
        assert!(Operator::Jump.is_jump());
        assert!(Operator::JumpIfFalse.is_jump());
        assert!(!Operator::Halt.is_jump());
    }
}
