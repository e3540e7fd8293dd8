//! Responsible with converting source text into a token stream

use crate::lexer::state::{Action, State};
use crate::parser::InternalError;
use lalg_tokens::spanned::{Span, Spanned};
use lalg_tokens::token::{Keyword, Token, TokenKind};
use thiserror::Error;
use tracing::trace;

mod state;

/// Responsible with converting source text into a token stream.
///
/// The scanner is a finite automaton run over the source with one trailing space appended, so
/// the last token of the source is always terminated.
#[derive(Debug)]
pub struct Lexer {
    input: String,
    cursor: usize,
    last: Option<Token>,
    pushback: Option<Token>,
    poisoned: bool,
}

impl Lexer {
    /// Creates a new lexer over some source text
    pub fn new(source: &str) -> Self {
        let mut input = String::with_capacity(source.len() + 1);
        input.push_str(source);
        input.push(' ');
        Self {
            input,
            cursor: 0,
            last: None,
            pushback: None,
            poisoned: false,
        }
    }

    /// Produces the next token, or `None` at the end of the input
    pub fn next_token(&mut self) -> LexResult<Option<Token>> {
        let token = match self.pushback.take() {
            Some(token) => Some(token),
            None => self.scan()?,
        };
        self.last = token.clone();
        Ok(token)
    }

    /// Un-produces the most recently produced token, so the next call to [next_token](Self::next_token)
    /// returns it again.
    ///
    /// Only valid directly after a call to [next_token](Self::next_token) that returned a token.
    pub fn retract(&mut self) -> Result<(), InternalError> {
        if self.pushback.is_some() {
            return Err(InternalError::AlreadyRetracted);
        }
        let token = self.last.take().ok_or(InternalError::NothingToRetract)?;
        trace!("retracted {token:?}");
        self.pushback = Some(token);
        Ok(())
    }

    /// Gets the next token without consuming it
    pub fn peek(&mut self) -> LexResult<Option<&Token>> {
        if self.pushback.is_none() {
            self.pushback = self.scan()?;
        }
        self.last = None;
        Ok(self.pushback.as_ref())
    }

    fn scan(&mut self) -> LexResult<Option<Token>> {
        let mut state = State::Initial;
        let mut start = self.cursor;
        let mut buffer = String::new();

        while let Some(c) = self.input[self.cursor..].chars().next() {
            match state.step(c) {
                Action::Skip => {
                    self.cursor += c.len_utf8();
                    start = self.cursor;
                }
                Action::Shift(next) => {
                    buffer.push(c);
                    self.cursor += c.len_utf8();
                    state = next;
                }
                Action::Emit { kind, consume } => {
                    if consume {
                        buffer.push(c);
                        self.cursor += c.len_utf8();
                    }
                    let kind = match kind {
                        TokenKind::Identifier if Keyword::is_keyword(&buffer) => TokenKind::Keyword,
                        kind => kind,
                    };
                    let token = Token::new(Span::new(start, self.cursor - start), kind, buffer);
                    trace!("scanned {token:?} at {:?}", token.span());
                    return Ok(Some(token));
                }
                Action::Fail(failure) => {
                    self.poisoned = true;
                    return Err(failure.at(c, Span::new(self.cursor, c.len_utf8())));
                }
            }
        }
        debug_assert_eq!(state, State::Initial, "sentinel should terminate every token");

        Ok(None)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned {
            return None;
        }
        self.next_token().transpose()
    }
}

pub type LexResult<T> = Result<T, LexingError>;

/// A malformed lexeme. Lexing errors are never recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexingError {
    #[error("found a letter {found:?} after a number")]
    LetterAfterNumber { found: char, span: Span },
    #[error("expected a digit after '.', found {found:?}")]
    ExpectedDigitAfterDot { found: char, span: Span },
    #[error("expected letters after ':', found {found:?}")]
    DigitAfterColon { found: char, span: Span },
    #[error("invalid char: {found:?}")]
    UnexpectedChar { found: char, span: Span },
}

impl Spanned for LexingError {
    fn span(&self) -> Span {
        match self {
            LexingError::LetterAfterNumber { span, .. }
            | LexingError::ExpectedDigitAfterDot { span, .. }
            | LexingError::DigitAfterColon { span, .. }
            | LexingError::UnexpectedChar { span, .. } => *span,
        }
    }
}
