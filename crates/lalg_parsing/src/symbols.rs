//! The symbol table, mapping declared variables to their types

use crate::parser::SemanticError;
use indexmap::map::Entry;
use indexmap::IndexMap;
use lalg_tokens::token::Keyword;
use std::fmt::{Display, Formatter};
use tracing::debug;

/// The type of a declared variable
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VarType {
    Integer,
    Float,
}

impl VarType {
    /// Gets the type named by a type keyword
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Integer => Some(VarType::Integer),
            Keyword::Real => Some(VarType::Float),
            _ => None,
        }
    }

    /// The initial value of a freshly allocated variable of this type
    pub fn zero_value(&self) -> &'static str {
        match self {
            VarType::Integer => "0",
            VarType::Float => "0.0",
        }
    }

    /// The type of an arithmetic operation between two values
    pub fn widen(self, other: VarType) -> VarType {
        if self == VarType::Float || other == VarType::Float {
            VarType::Float
        } else {
            VarType::Integer
        }
    }
}

impl Display for VarType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VarType::Integer => write!(f, "integer"),
            VarType::Float => write!(f, "real"),
        }
    }
}

/// An entry in the symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    ty: VarType,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> VarType {
        self.ty
    }
}

/// The declared variables of a program, in declaration order.
///
/// Entries are never removed or redefined.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: IndexMap<String, Symbol>,
}

impl SymbolTable {
    /// Creates an empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new variable, failing if a variable of the same name already exists
    pub fn declare(&mut self, name: &str, ty: VarType) -> Result<(), SemanticError> {
        match self.symbols.entry(name.to_string()) {
            Entry::Occupied(_) => Err(SemanticError::AlreadyDeclared(name.to_string())),
            Entry::Vacant(vacant) => {
                debug!("declared {name}: {ty}");
                vacant.insert(Symbol {
                    name: name.to_string(),
                    ty,
                });
                Ok(())
            }
        }
    }

    /// Gets the declared type of a variable
    pub fn lookup(&self, name: &str) -> Option<VarType> {
        self.symbols.get(name).map(Symbol::ty)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_declare_and_lookup() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Float).unwrap();
        table.declare("i", VarType::Integer).unwrap();
        assert_eq!(table.lookup("x"), Some(VarType::Float));
        assert_eq!(table.lookup("i"), Some(VarType::Integer));
        assert_eq!(table.lookup("y"), None);
        assert_eq!(
            table.iter().map(Symbol::name).collect::<Vec<_>>(),
            vec!["x", "i"]
        );
    }

    #[test]
    fn test_redeclaration_is_rejected() {
        let mut table = SymbolTable::new();
        table.declare("x", VarType::Float).unwrap();
        assert_eq!(
            table.declare("x", VarType::Float),
            Err(SemanticError::AlreadyDeclared("x".to_string()))
        );
        assert_eq!(
            table.declare("x", VarType::Integer),
            Err(SemanticError::AlreadyDeclared("x".to_string()))
        );
        assert_eq!(table.lookup("x"), Some(VarType::Float));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_type_rules() {
        assert_eq!(VarType::Integer.widen(VarType::Integer), VarType::Integer);
        assert_eq!(VarType::Integer.widen(VarType::Float), VarType::Float);
        assert_eq!(VarType::Float.zero_value(), "0.0");
        assert_eq!(VarType::Integer.zero_value(), "0");
    }
}
