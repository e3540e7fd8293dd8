//! The states and transitions of the scanner

use crate::lexer::LexingError;
use lalg_tokens::spanned::Span;
use lalg_tokens::token::TokenKind;

/// A state of the scanner's finite automaton
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub(crate) enum State {
    #[default]
    Initial,
    ExpectingLetterOrNumber,
    ExpectingNumber,
    ExpectingOneNumberAfterDot,
    ExpectingNumberAfterDot,
    MaybeEqualsFromColon,
    MaybeEqualsFromRelational { first: char },
}

/// What the scanner should do with the current char
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    /// Ignore the char, the token has not started yet
    Skip,
    /// Accumulate the char and move to the next state
    Shift(State),
    /// Finish the token. `consume` is false when the char belongs to the next token
    Emit { kind: TokenKind, consume: bool },
    Fail(Failure),
}

/// Why a char can not be accepted
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Failure {
    LetterAfterNumber,
    ExpectedDigitAfterDot,
    DigitAfterColon,
    UnexpectedChar,
}

impl Failure {
    pub(crate) fn at(self, found: char, span: Span) -> LexingError {
        match self {
            Failure::LetterAfterNumber => LexingError::LetterAfterNumber { found, span },
            Failure::ExpectedDigitAfterDot => LexingError::ExpectedDigitAfterDot { found, span },
            Failure::DigitAfterColon => LexingError::DigitAfterColon { found, span },
            Failure::UnexpectedChar => LexingError::UnexpectedChar { found, span },
        }
    }
}

fn is_letter(c: char) -> bool {
    c.is_alphabetic()
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

impl Action {
    const fn emit(kind: TokenKind) -> Self {
        Action::Emit {
            kind,
            consume: true,
        }
    }

    const fn emit_before(kind: TokenKind) -> Self {
        Action::Emit {
            kind,
            consume: false,
        }
    }
}

impl State {
    /// The transition function of the automaton
    pub(crate) fn step(self, c: char) -> Action {
        use State::*;
        match self {
            Initial => match c {
                c if is_letter(c) => Action::Shift(ExpectingLetterOrNumber),
                c if is_digit(c) => Action::Shift(ExpectingNumber),
                ':' => Action::Shift(MaybeEqualsFromColon),
                '=' | '<' | '>' => Action::Shift(MaybeEqualsFromRelational { first: c }),
                '+' | '-' | '*' | '/' => Action::emit(TokenKind::Operator),
                '(' | ')' | ',' | '.' | '$' => Action::emit(TokenKind::Symbol),
                ';' => Action::emit(TokenKind::Semicolon),
                c if c.is_whitespace() => Action::Skip,
                _ => Action::Fail(Failure::UnexpectedChar),
            },
            ExpectingLetterOrNumber => {
                if is_letter(c) || is_digit(c) {
                    Action::Shift(ExpectingLetterOrNumber)
                } else {
                    Action::emit_before(TokenKind::Identifier)
                }
            }
            ExpectingNumber => match c {
                c if is_digit(c) => Action::Shift(ExpectingNumber),
                '.' => Action::Shift(ExpectingOneNumberAfterDot),
                c if is_letter(c) => Action::Fail(Failure::LetterAfterNumber),
                _ => Action::emit_before(TokenKind::Integer),
            },
            ExpectingOneNumberAfterDot => {
                if is_digit(c) {
                    Action::Shift(ExpectingNumberAfterDot)
                } else {
                    Action::Fail(Failure::ExpectedDigitAfterDot)
                }
            }
            ExpectingNumberAfterDot => match c {
                c if is_digit(c) => Action::Shift(ExpectingNumberAfterDot),
                c if is_letter(c) => Action::Fail(Failure::LetterAfterNumber),
                _ => Action::emit_before(TokenKind::Float),
            },
            MaybeEqualsFromColon => match c {
                '=' => Action::emit(TokenKind::Attributor),
                c if is_digit(c) => Action::Fail(Failure::DigitAfterColon),
                _ => Action::emit_before(TokenKind::TypeDeclaration),
            },
            MaybeEqualsFromRelational { first } => match c {
                '=' => Action::emit(TokenKind::Relational),
                '>' if first == '<' => Action::emit(TokenKind::Relational),
                _ => Action::emit_before(TokenKind::Relational),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_initial_transitions() {
        assert_eq!(State::Initial.step('a'), Action::Shift(State::ExpectingLetterOrNumber));
        assert_eq!(State::Initial.step('7'), Action::Shift(State::ExpectingNumber));
        assert_eq!(State::Initial.step(' '), Action::Skip);
        assert_eq!(State::Initial.step('\n'), Action::Skip);
        assert_eq!(State::Initial.step('*'), Action::emit(TokenKind::Operator));
        assert_eq!(State::Initial.step('$'), Action::emit(TokenKind::Symbol));
        assert_eq!(State::Initial.step(';'), Action::emit(TokenKind::Semicolon));
        assert_eq!(
            State::Initial.step('<'),
            Action::Shift(State::MaybeEqualsFromRelational { first: '<' })
        );
        assert_eq!(State::Initial.step('#'), Action::Fail(Failure::UnexpectedChar));
    }

    #[test]
    fn test_number_transitions() {
        assert_eq!(State::ExpectingNumber.step('a'), Action::Fail(Failure::LetterAfterNumber));
        assert_eq!(
            State::ExpectingNumber.step(')'),
            Action::emit_before(TokenKind::Integer)
        );
        assert_eq!(
            State::ExpectingOneNumberAfterDot.step(' '),
            Action::Fail(Failure::ExpectedDigitAfterDot)
        );
        assert_eq!(
            State::ExpectingNumberAfterDot.step('e'),
            Action::Fail(Failure::LetterAfterNumber)
        );
    }

    #[test]
    fn test_colon_and_relational_transitions() {
        assert_eq!(
            State::MaybeEqualsFromColon.step('='),
            Action::emit(TokenKind::Attributor)
        );
        assert_eq!(
            State::MaybeEqualsFromColon.step('1'),
            Action::Fail(Failure::DigitAfterColon)
        );
        assert_eq!(
            State::MaybeEqualsFromColon.step('x'),
            Action::emit_before(TokenKind::TypeDeclaration)
        );
        let less = State::MaybeEqualsFromRelational { first: '<' };
        let greater = State::MaybeEqualsFromRelational { first: '>' };
        assert_eq!(less.step('>'), Action::emit(TokenKind::Relational));
        assert_eq!(greater.step('>'), Action::emit_before(TokenKind::Relational));
        assert_eq!(greater.step('='), Action::emit(TokenKind::Relational));
    }
}
