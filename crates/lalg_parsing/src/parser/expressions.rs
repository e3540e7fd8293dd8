use crate::codegen::{Condition, Value};
use crate::parser::{AnalysisResult, ErrorKind, SyntacticAnalyzer};
use crate::symbols::VarType;
use lalg_quads::{Operand, Operator};
use lalg_tokens::token::TokenKind;

const RELATIONS: [&str; 6] = ["=", "<>", ">=", "<=", ">", "<"];

impl SyntacticAnalyzer<'_> {
    /// Peeks for an arithmetic operator of the given precedence level, without consuming it
    fn peek_arithmetic(&mut self, accepted: [Operator; 2]) -> AnalysisResult<Option<Operator>> {
        let op = match self.peek()? {
            Some(token) if token.kind() == TokenKind::Operator => {
                Operator::arithmetic(token.text())
            }
            _ => None,
        };
        Ok(op.filter(|op| accepted.contains(op)))
    }

    /// `expressao -> termo outros_termos`
    pub(super) fn expression(&mut self) -> AnalysisResult<Value> {
        let left = self.parse("term", Self::term)?;
        self.parse("other_terms", |p| p.other_terms(left))
    }

    /// `outros_termos -> ('+'|'-') termo outros_termos | empty`
    fn other_terms(&mut self, left: Value) -> AnalysisResult<Value> {
        match self.peek_arithmetic([Operator::Add, Operator::Subtract])? {
            Some(op) => {
                self.consume()?;
                let right = self.parse("term", Self::term)?;
                let value = self.generator.binary(op, left, right);
                self.parse("other_terms", |p| p.other_terms(value))
            }
            None => Ok(left),
        }
    }

    /// `condicao -> expressao relacao expressao`
    pub(super) fn condition(&mut self) -> AnalysisResult<Condition> {
        let left = self.parse("expression", Self::expression)?;
        let op = self.parse("relation", Self::relation)?;
        let right = self.parse("expression", Self::expression)?;
        Ok(self.generator.compare(op, left, right))
    }

    /// `relacao -> '=' | '<>' | '>=' | '<=' | '>' | '<'`
    fn relation(&mut self) -> AnalysisResult<Operator> {
        match self.consume()? {
            Some(token) if token.kind() == TokenKind::Relational => {
                match Operator::relational(token.text()) {
                    Some(op) => Ok(op),
                    None => Err(self.unexpected(ErrorKind::expected_token(RELATIONS, token))),
                }
            }
            found => Err(self.unexpected(ErrorKind::expected_token(RELATIONS, found))),
        }
    }

    /// `termo -> op_un fator mais_fatores`
    fn term(&mut self) -> AnalysisResult<Value> {
        let negated = self.parse("unary_op", Self::unary_op)?;
        let factor = self.parse("factor", Self::factor)?;
        let factor = if negated {
            self.generator.negate(factor)
        } else {
            factor
        };
        self.parse("more_factors", |p| p.more_factors(factor))
    }

    /// `op_un -> '-' | empty`
    ///
    /// Reads one token, giving it back to the lexer when it isn't a minus.
    fn unary_op(&mut self) -> AnalysisResult<bool> {
        match self.consume()? {
            Some(token) if token.is(TokenKind::Operator, "-") => Ok(true),
            Some(_) => {
                self.retract()?;
                Ok(false)
            }
            None => Ok(false),
        }
    }

    /// `fator -> IDENTIFIER | INTEGER | FLOAT | '(' expressao ')'`
    fn factor(&mut self) -> AnalysisResult<Value> {
        let token = self.consume()?;
        match token {
            Some(token) if token.kind() == TokenKind::Identifier => {
                let ty = self.reference(&token)?;
                Ok(Value::new(Operand::var(token.text()), ty))
            }
            Some(token) if token.kind() == TokenKind::Integer => {
                Ok(Value::new(Operand::constant(token.text()), VarType::Integer))
            }
            Some(token) if token.kind() == TokenKind::Float => {
                Ok(Value::new(Operand::constant(token.text()), VarType::Float))
            }
            Some(token) if token.is(TokenKind::Symbol, "(") => {
                let value = self.parse("expression", Self::expression)?;
                self.expect_symbol(")")?;
                Ok(value)
            }
            found => Err(self.unexpected(ErrorKind::expected(
                "an identifier, a number or '('",
                found,
            ))),
        }
    }

    /// `mais_fatores -> ('*'|'/') fator mais_fatores | empty`
    fn more_factors(&mut self, left: Value) -> AnalysisResult<Value> {
        match self.peek_arithmetic([Operator::Mult, Operator::Divide])? {
            Some(op) => {
                self.consume()?;
                let right = self.parse("factor", Self::factor)?;
                let value = self.generator.binary(op, left, right);
                self.parse("more_factors", |p| p.more_factors(value))
            }
            None => Ok(left),
        }
    }
}
