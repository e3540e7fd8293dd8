//! A lexical token from a source file

use crate::spanned::{Span, Spanned};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use strum::{AsRefStr, EnumIter, EnumString};

/// A lexical token from a source file
#[derive(Clone, Eq)]
pub struct Token {
    span: Span,
    kind: TokenKind,
    text: String,
}

impl Token {
    /// Creates a new token
    pub fn new(span: Span, kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            span,
            kind,
            text: text.into(),
        }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Gets the literal text of this token
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Checks whether this token is of the given kind with the given text
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    /// Gets the keyword this token represents, if any
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::from_str(&self.text).ok(),
            _ => None,
        }
    }

    /// Checks whether this token is the given keyword
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.keyword() == Some(keyword)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token '{}' is a {}.", self.text, self.kind)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.text == other.text
    }
}

/// The kind for this token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, strum::Display)]
pub enum TokenKind {
    Integer,
    Float,
    Identifier,
    /// `+ - * /`
    Operator,
    Keyword,
    /// `:=`
    Attributor,
    /// `:`
    TypeDeclaration,
    /// `( ) , . $`
    Symbol,
    Semicolon,
    /// `= <> >= <= > <`
    Relational,
}

/// The reserved words of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Program,
    Begin,
    End,
    Real,
    Integer,
    Read,
    Write,
    If,
    Then,
    Else,
    While,
    Do,
}

impl Keyword {
    /// Checks if a word is reserved
    pub fn is_keyword(word: &str) -> bool {
        Self::from_str(word).is_ok()
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;
    use test_log::test;

    #[test]
    fn test_token_display() {
        let token = Token::new(Span::new(0, 1), TokenKind::Identifier, "x");
        assert_eq!(token.to_string(), "Token 'x' is a Identifier.");
    }

    #[test]
    fn test_token_eq_ignores_span() {
        let a = Token::new(Span::new(0, 1), TokenKind::Symbol, "$");
        let b = Token::new(Span::new(10, 1), TokenKind::Symbol, "$");
        assert_eq!(a, b);
        assert_ne!(a, Token::new(Span::new(0, 1), TokenKind::Symbol, "."));
    }

    #[test]
    fn test_keywords() {
        for keyword in Keyword::iter() {
            assert!(Keyword::is_keyword(keyword.as_ref()), "{keyword} should be reserved");
        }
        assert!(!Keyword::is_keyword("Program"));
        assert!(!Keyword::is_keyword("x"));
        let token = Token::new(Span::default(), TokenKind::Keyword, "begin");
        assert_eq!(token.keyword(), Some(Keyword::Begin));
        let token = Token::new(Span::default(), TokenKind::Identifier, "begin");
        assert_eq!(token.keyword(), None);
    }
}
