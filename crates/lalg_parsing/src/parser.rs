//! The recursive descent syntactic analyzer.
//!
//! Walks the grammar one token of lookahead at a time, declaring variables into the
//! [SymbolTable] and driving the [CodeGenerator] inline as each construct is recognized.

use crate::codegen::CodeGenerator;
use crate::lexer::{Lexer, LexingError};
use crate::symbols::{SymbolTable, VarType};
use lalg_quads::{IntermediateProgram, PendingJump};
use lalg_tokens::spanned::{Span, Spanned};
use lalg_tokens::token::{Keyword, Token, TokenKind};
use lalg_tokens::Location;
use tracing::trace;

mod commands;
mod declarations;
mod error;
mod expressions;

pub use error::*;

/// Analyzes a whole program
pub fn analyze(source: &str) -> AnalysisResult<Analysis> {
    SyntacticAnalyzer::new(source).analyze()
}

/// The products of a successful analysis
#[derive(Debug)]
pub struct Analysis {
    program: IntermediateProgram,
    symbols: SymbolTable,
}

impl Analysis {
    /// The emitted program, every jump resolved and ending in `halt`
    pub fn program(&self) -> &IntermediateProgram {
        &self.program
    }

    /// The declared variables
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }
}

/// Checks the syntax and semantics of a program while generating its code.
///
/// An analyzer is used once, analysis stops at the first error.
#[derive(Debug)]
pub struct SyntacticAnalyzer<'s> {
    source: &'s str,
    lexer: Lexer,
    symbols: SymbolTable,
    generator: CodeGenerator,
    non_terminals: Vec<&'static str>,
    last_span: Option<Span>,
}

impl<'s> SyntacticAnalyzer<'s> {
    /// Creates a new analyzer for some source text
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            lexer: Lexer::new(source),
            symbols: SymbolTable::new(),
            generator: CodeGenerator::new(),
            non_terminals: vec![],
            last_span: None,
        }
    }

    /// Runs the analysis over the entire source
    pub fn analyze(mut self) -> AnalysisResult<Analysis> {
        self.parse("program", Self::program)?;
        if let Some(trailing) = self.consume()? {
            return Err(self.unexpected(ErrorKind::expected("end of input", trailing)));
        }
        self.generator.halt();

        let Self {
            generator, symbols, ..
        } = self;
        let program = generator.finish().map_err(InternalError::from)?;
        Ok(Analysis { program, symbols })
    }

    /// Wrapper function for parsing a non terminal
    fn parse<O, F>(&mut self, non_terminal: &'static str, parser: F) -> AnalysisResult<O>
    where
        F: FnOnce(&mut Self) -> AnalysisResult<O>,
    {
        trace!("starting parsing {non_terminal}");
        self.non_terminals.push(non_terminal);
        let r = parser(self);
        if r.is_ok() {
            trace!("finished parsing {non_terminal}");
            self.non_terminals.pop();
        }
        r
    }

    /// peek the current lookahead
    fn peek(&mut self) -> AnalysisResult<Option<Token>> {
        let peeked = self.lexer.peek().map(|token| token.cloned());
        peeked.map_err(|e| self.lexing_error(e))
    }

    fn consume(&mut self) -> AnalysisResult<Option<Token>> {
        let token = match self.lexer.next_token() {
            Ok(token) => token,
            Err(e) => return Err(self.lexing_error(e)),
        };
        if let Some(token) = &token {
            trace!("consumed {token:?}");
            self.last_span = Some(token.span());
        }
        Ok(token)
    }

    /// consumes if predicate matches
    fn consume_if<F>(&mut self, predicate: F) -> AnalysisResult<Option<Token>>
    where
        F: FnOnce(&Token) -> bool,
    {
        match self.peek()? {
            Some(token) if predicate(&token) => self.consume(),
            _ => Ok(None),
        }
    }

    /// Un-consumes the last consumed token
    fn retract(&mut self) -> AnalysisResult {
        self.lexer
            .retract()
            .map_err(|e| self.error(InternalError::from(e)))
    }

    /// Consumes a token of a given kind and text, or fails
    fn expect(&mut self, kind: TokenKind, text: &str) -> AnalysisResult<Token> {
        match self.consume()? {
            Some(token) if token.is(kind, text) => Ok(token),
            found => Err(self.unexpected(ErrorKind::expected_token([text], found))),
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> AnalysisResult<Token> {
        self.expect(TokenKind::Keyword, keyword.as_ref())
    }

    fn expect_symbol(&mut self, symbol: &str) -> AnalysisResult<Token> {
        self.expect(TokenKind::Symbol, symbol)
    }

    fn expect_identifier(&mut self) -> AnalysisResult<Token> {
        match self.consume()? {
            Some(token) if token.kind() == TokenKind::Identifier => Ok(token),
            found => Err(self.unexpected(ErrorKind::expected("an identifier", found))),
        }
    }

    /// Gets the declared type of a referenced variable
    fn reference(&self, token: &Token) -> AnalysisResult<VarType> {
        self.symbols.lookup(token.text()).ok_or_else(|| {
            self.error_at(
                SemanticError::Undeclared(token.text().to_string()),
                Some(token.span()),
            )
        })
    }

    /// Resolves a pending jump to the next instruction that will be emitted
    fn patch_here(&mut self, jump: PendingJump) -> AnalysisResult {
        self.generator
            .patch_here(jump)
            .map_err(|e| self.error(InternalError::from(e)))
    }

    fn lexing_error(&self, error: LexingError) -> AnalysisError {
        let span = error.span();
        self.error_at(error, Some(span))
    }

    /// Creates a syntax error located at the token that was found, or at the end of the last
    /// consumed token when the input ended
    fn unexpected(&self, kind: ErrorKind) -> AnalysisError {
        let span = match &kind {
            ErrorKind::Syntax {
                found: Some(found), ..
            } => Some(found.span()),
            _ => self.last_span.map(|span| span.end()),
        };
        self.error_at(kind, span)
    }

    /// Creates an error located at the last consumed token
    fn error(&self, kind: impl Into<ErrorKind>) -> AnalysisError {
        self.error_at(kind, self.last_span)
    }

    fn error_at(&self, kind: impl Into<ErrorKind>, span: Option<Span>) -> AnalysisError {
        AnalysisError::new(
            kind.into(),
            span.map(|span| Location::resolve(self.source, span)),
            self.non_terminals.clone(),
        )
    }

    /// `programa -> program IDENTIFIER corpo '.'`
    fn program(&mut self) -> AnalysisResult {
        self.expect_keyword(Keyword::Program)?;
        let name = self.expect_identifier()?;
        trace!("analyzing program {}", name.text());
        self.parse("body", Self::body)?;
        self.expect_symbol(".")?;
        Ok(())
    }

    /// `corpo -> declaracao begin comandos end`
    fn body(&mut self) -> AnalysisResult {
        self.parse("declarations", Self::declarations)?;
        self.expect_keyword(Keyword::Begin)?;
        self.parse("commands", Self::commands)?;
        self.expect_keyword(Keyword::End)?;
        Ok(())
    }
}
