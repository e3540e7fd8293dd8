use crate::parser::{AnalysisResult, ErrorKind, SyntacticAnalyzer};
use crate::symbols::VarType;
use lalg_tokens::token::{Keyword, Token, TokenKind};
use tracing::{trace, warn};

/// Checks whether a token can begin a command
fn starts_command(token: &Token) -> bool {
    token.kind() == TokenKind::Identifier
        || matches!(
            token.keyword(),
            Some(Keyword::Read | Keyword::Write | Keyword::If | Keyword::While)
        )
}

impl SyntacticAnalyzer<'_> {
    /// `comandos -> comando mais_comandos`
    pub(super) fn commands(&mut self) -> AnalysisResult {
        self.parse("command", Self::command)?;
        self.parse("more_commands", Self::more_commands)
    }

    /// `mais_comandos -> ';' comandos | comandos | empty`
    ///
    /// The separating semicolon may be left out when the next token starts another command.
    fn more_commands(&mut self) -> AnalysisResult {
        if self
            .consume_if(|token| token.kind() == TokenKind::Semicolon)?
            .is_some()
            || self.peek()?.is_some_and(|token| starts_command(&token))
        {
            self.parse("commands", Self::commands)?;
        }
        Ok(())
    }

    /// ```text
    /// comando -> read '(' IDENTIFIER ')'
    ///          | write '(' IDENTIFIER ')'
    ///          | IDENTIFIER ':=' expressao
    ///          | if condicao then comandos pfalsa '$'
    ///          | while condicao do comandos '$'
    /// ```
    fn command(&mut self) -> AnalysisResult {
        let Some(token) = self.consume()? else {
            return Err(self.unexpected(ErrorKind::expected("a command", None)));
        };
        match token.keyword() {
            Some(Keyword::Read) => {
                let ident = self.parenthesized_identifier()?;
                self.generator.read(ident.text());
            }
            Some(Keyword::Write) => {
                let ident = self.parenthesized_identifier()?;
                self.generator.write(ident.text());
            }
            Some(Keyword::If) => self.if_command()?,
            Some(Keyword::While) => self.while_command()?,
            _ if token.kind() == TokenKind::Identifier => self.assignment(token)?,
            _ => return Err(self.unexpected(ErrorKind::expected("a command", token))),
        }
        Ok(())
    }

    /// `'(' IDENTIFIER ')'`, the identifier must be declared
    fn parenthesized_identifier(&mut self) -> AnalysisResult<Token> {
        self.expect_symbol("(")?;
        let ident = self.expect_identifier()?;
        self.reference(&ident)?;
        self.expect_symbol(")")?;
        Ok(ident)
    }

    /// `IDENTIFIER ':=' expressao`
    fn assignment(&mut self, target: Token) -> AnalysisResult {
        let declared = self.reference(&target)?;
        self.expect(TokenKind::Attributor, ":=")?;
        let value = self.parse("expression", Self::expression)?;
        if declared == VarType::Integer && value.ty == VarType::Float {
            warn!(
                "assigning a real value to integer variable '{}'",
                target.text()
            );
        }
        self.generator.store(target.text(), value);
        Ok(())
    }

    /// `if condicao then comandos pfalsa '$'`
    fn if_command(&mut self) -> AnalysisResult {
        let condition = self.parse("condition", Self::condition)?;
        self.expect_keyword(Keyword::Then)?;
        let on_false = self.generator.jump_if_false(&condition);
        self.parse("commands", Self::commands)?;
        let skip_else = self.generator.jump();
        self.patch_here(on_false)?;
        self.parse("else_branch", Self::else_branch)?;
        self.patch_here(skip_else)?;
        self.expect_symbol("$")?;
        Ok(())
    }

    /// `pfalsa -> else comandos | empty`
    fn else_branch(&mut self) -> AnalysisResult {
        if self
            .consume_if(|token| token.is_keyword(Keyword::Else))?
            .is_some()
        {
            self.parse("commands", Self::commands)?;
        }
        Ok(())
    }

    /// `while condicao do comandos '$'`
    fn while_command(&mut self) -> AnalysisResult {
        let start = self.generator.next_index();
        trace!("loop starts at {start:04}");
        let condition = self.parse("condition", Self::condition)?;
        self.expect_keyword(Keyword::Do)?;
        let exit = self.generator.jump_if_false(&condition);
        self.parse("commands", Self::commands)?;
        self.generator.jump_to(start);
        self.patch_here(exit)?;
        self.expect_symbol("$")?;
        Ok(())
    }
}
