use crate::parser::{AnalysisResult, ErrorKind, SyntacticAnalyzer};
use crate::symbols::VarType;
use lalg_tokens::spanned::Spanned;
use lalg_tokens::token::{Keyword, TokenKind};

impl SyntacticAnalyzer<'_> {
    /// `declaracao -> declaracao_var mais_declaracao | empty`
    pub(super) fn declarations(&mut self) -> AnalysisResult {
        let starts_declaration = self.peek()?.is_some_and(|token| {
            token
                .keyword()
                .and_then(VarType::from_keyword)
                .is_some()
        });
        if starts_declaration {
            self.parse("var_declaration", Self::var_declaration)?;
            self.parse("more_declarations", Self::more_declarations)?;
        }
        Ok(())
    }

    /// `declaracao_var -> tipo_var ':' variaveis`
    fn var_declaration(&mut self) -> AnalysisResult {
        let ty = self.parse("var_type", Self::var_type)?;
        self.expect(TokenKind::TypeDeclaration, ":")?;
        self.parse("variables", |p| p.variables(ty))
    }

    /// `tipo_var -> real | integer`
    fn var_type(&mut self) -> AnalysisResult<VarType> {
        match self.consume()? {
            Some(token) => match token.keyword().and_then(VarType::from_keyword) {
                Some(ty) => Ok(ty),
                None => Err(self.unexpected(ErrorKind::expected_token(
                    [Keyword::Real, Keyword::Integer],
                    token,
                ))),
            },
            None => Err(self.unexpected(ErrorKind::expected_token(
                [Keyword::Real, Keyword::Integer],
                None,
            ))),
        }
    }

    /// `variaveis -> IDENTIFIER mais_var`
    ///
    /// Every declared variable is allocated with the zero value of its type.
    fn variables(&mut self, ty: VarType) -> AnalysisResult {
        let ident = self.expect_identifier()?;
        self.symbols
            .declare(ident.text(), ty)
            .map_err(|e| self.error_at(e, Some(ident.span())))?;
        self.generator.allocate(ident.text(), ty);
        self.parse("more_variables", |p| p.more_variables(ty))
    }

    /// `mais_var -> ',' variaveis | empty`
    fn more_variables(&mut self, ty: VarType) -> AnalysisResult {
        if self
            .consume_if(|token| token.is(TokenKind::Symbol, ","))?
            .is_some()
        {
            self.parse("variables", |p| p.variables(ty))?;
        }
        Ok(())
    }

    /// `mais_declaracao -> ';' declaracao | empty`
    fn more_declarations(&mut self) -> AnalysisResult {
        if self
            .consume_if(|token| token.kind() == TokenKind::Semicolon)?
            .is_some()
        {
            self.parse("declarations", Self::declarations)?;
        }
        Ok(())
    }
}
