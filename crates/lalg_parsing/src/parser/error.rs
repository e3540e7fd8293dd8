use crate::lexer::LexingError;
use itertools::Itertools as _;
use lalg_quads::{PatchError, UnpatchedJumps};
use lalg_tokens::token::Token;
use lalg_tokens::{Location, SpannedError};
use std::fmt::{Display, Formatter};

/// Represents an error occurring during analysis
#[derive(Debug, thiserror::Error)]
pub struct AnalysisError {
    pub kind: SpannedError<ErrorKind>,
    pub non_terminal_stack: Vec<&'static str>,
}

impl AnalysisError {
    /// Creates a new error
    pub fn new(
        kind: ErrorKind,
        location: impl Into<Option<Location>>,
        non_terminals: impl Into<Vec<&'static str>>,
    ) -> Self {
        Self {
            kind: SpannedError::new(kind, location),
            non_terminal_stack: non_terminals.into(),
        }
    }

    /// Gets the kind of error
    pub fn kind(&self) -> &ErrorKind {
        self.kind.error()
    }

    /// Gets where in the source this error occurred, if known
    pub fn location(&self) -> Option<&Location> {
        self.kind.location()
    }
}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.non_terminal_stack.is_empty() {
            writeln!(f, "non terminal stack:")?;
            for (idx, non_terminal) in self.non_terminal_stack.iter().enumerate() {
                writeln!(f, "  {}: {}", idx, non_terminal)?;
            }
        }

        Ok(())
    }
}

impl<E> From<E> for AnalysisError
where
    E: Into<ErrorKind>,
{
    fn from(value: E) -> Self {
        Self::new(value.into(), None, vec![])
    }
}

/// [AnalysisError] kind
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexingError),
    #[error("syntax error: expected {expected}, found {}", found_text(.found))]
    Syntax {
        expected: String,
        found: Option<Token>,
    },
    #[error("semantic error: {0}")]
    Semantic(#[from] SemanticError),
    #[error("internal error: {0}")]
    Internal(#[from] InternalError),
}

fn found_text(found: &Option<Token>) -> String {
    match found {
        Some(token) => format!("'{}'", token.text()),
        None => "end of input".to_string(),
    }
}

impl ErrorKind {
    /// Creates a syntax error expecting one of several lexemes or token kinds
    pub fn expected_token(
        expected: impl IntoIterator<Item = impl AsRef<str>>,
        found: impl Into<Option<Token>>,
    ) -> Self {
        Self::Syntax {
            expected: expected
                .into_iter()
                .map(|s| format!("'{}'", s.as_ref()))
                .join(" or "),
            found: found.into(),
        }
    }

    /// Creates a syntax error expecting something described in words
    pub fn expected(description: impl Into<String>, found: impl Into<Option<Token>>) -> Self {
        Self::Syntax {
            expected: description.into(),
            found: found.into(),
        }
    }
}

/// A program that is well formed but violates the declaration or typing rules
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    #[error("variable '{0}' wasn't declared before")]
    Undeclared(String),
    #[error("variable '{0}' was already declared")]
    AlreadyDeclared(String),
}

/// A defect in how the analyzer drove the lexer or the program builder. Never caused by the
/// input program.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("no token to retract")]
    NothingToRetract,
    #[error("a token was already retracted")]
    AlreadyRetracted,
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error(transparent)]
    Unpatched(#[from] UnpatchedJumps),
}

pub type AnalysisResult<T = ()> = Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use lalg_tokens::spanned::Span;
    use lalg_tokens::token::TokenKind;
    use test_log::test;

    #[test]
    fn test_expected_token_message() {
        let found = Token::new(Span::new(0, 1), TokenKind::Identifier, "x");
        let kind = ErrorKind::expected_token(["begin", ";"], found);
        assert_eq!(kind.to_string(), "syntax error: expected 'begin' or ';', found 'x'");
        let kind = ErrorKind::expected_token(["."], None);
        assert_eq!(kind.to_string(), "syntax error: expected '.', found end of input");
        let kind = ErrorKind::expected("a command", None);
        assert_eq!(kind.to_string(), "syntax error: expected a command, found end of input");
    }

    #[test]
    fn test_display_includes_non_terminals() {
        let source = "program p\nbegin\n  write(y)\nend.";
        let location = Location::resolve(source, Span::new(24, 1));
        let error = AnalysisError::new(
            SemanticError::Undeclared("y".to_string()).into(),
            location,
            vec!["program", "body", "commands", "command"],
        );
        let rendered = error.to_string();
        assert!(rendered.starts_with("semantic error: variable 'y' wasn't declared before\n"));
        assert!(rendered.contains("  -> 3:9\n"), "{rendered}");
        assert!(rendered.contains("  3: command\n"), "{rendered}");
    }
}
