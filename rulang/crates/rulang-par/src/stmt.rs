//! Statement parsing - declarations, control flow, and blocks.
//!
//! Statement dispatch keys on the leading token; anything that is not a
//! recognized statement keyword parses as an expression statement.

use std::rc::Rc;

use rulang_lex::TokenKind;
use rulang_util::ParseError;

use crate::ast::*;
use crate::Parser;

impl Parser {
    /// Parses one statement, then swallows any separating semicolons.
    /// Statements are juxtaposed in Rulang; `;` is tolerated, never
    /// required.
    pub(crate) fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let stmt = self.parse_stmt_inner()?;
        while self.match_kind(&TokenKind::Semicolon) {}
        Ok(stmt)
    }

    fn parse_stmt_inner(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::State => self.parse_state_decl(),
            TokenKind::Transition => self.parse_transition_decl(),
            TokenKind::Let => self.parse_let_stmt(),
            // `fn name(...)` declares; `fn (...)` is an anonymous function
            // in expression position.
            TokenKind::Fn if matches!(self.peek_kind(1), TokenKind::Ident(_)) => {
                self.parse_fn_decl()
            },
            TokenKind::If => {
                let stmt = self.parse_if_stmt()?;
                Ok(Stmt::If(stmt))
            },
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Print => self.parse_print_stmt(),
            TokenKind::LBrace => {
                let block = self.parse_block()?;
                Ok(Stmt::Block(block))
            },
            TokenKind::Endpoint => self.parse_endpoint_decl(),
            TokenKind::Middleware => self.parse_middleware_decl(),
            TokenKind::Use => self.parse_use_stmt(),
            TokenKind::Validate => self.parse_validate_stmt(),
            TokenKind::Server => self.parse_server_stmt(),
            _ => {
                let expr = self.parse_expr()?;
                Ok(Stmt::Expr(expr))
            },
        }
    }

    /// `state NAME { ID (,? ID)* }` - commas between states are optional;
    /// the first identifier is the initial state.
    fn parse_state_decl(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let name = self.expect_ident("state machine name")?;
        self.expect(&TokenKind::LBrace, "`{` after state machine name")?;

        let mut states = vec![self.expect_ident("state name")?];
        self.match_kind(&TokenKind::Comma);
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            states.push(self.expect_ident("state name")?);
            self.match_kind(&TokenKind::Comma);
        }
        self.expect(&TokenKind::RBrace, "`}` after state list")?;

        Ok(Stmt::State(StateDecl { name, states, span }))
    }

    /// `transition NAME { (FROM -> TO when EVENT)* }`.
    fn parse_transition_decl(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let state_name = self.expect_ident("state machine name")?;
        self.expect(&TokenKind::LBrace, "`{` after state machine name")?;

        let mut rules = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let rule_span = self.current().span;
            let from = self.expect_ident("source state")?;
            self.expect(&TokenKind::Arrow, "`->` after source state")?;
            let to = self.expect_ident("target state")?;
            self.expect(&TokenKind::When, "`when` after target state")?;
            let event = self.parse_dotted_name()?;
            rules.push(TransitionRule {
                from,
                to,
                event,
                span: rule_span,
            });
        }
        self.expect(&TokenKind::RBrace, "`}` after transition rules")?;

        Ok(Stmt::Transition(TransitionDecl {
            state_name,
            rules,
            span,
        }))
    }

    /// Dotted identifier path, joined into one event string
    /// (`payment.success`). Segments accept keyword lexemes.
    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_name("event name")?;
        while self.match_kind(&TokenKind::Dot) {
            name.push('.');
            name.push_str(&self.expect_name("event path segment")?);
        }
        Ok(name)
    }

    /// `let NAME = EXPR`.
    fn parse_let_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let name = self.expect_ident("variable name after `let`")?;
        self.expect(&TokenKind::Eq, "`=` after variable name")?;
        let value = self.parse_expr()?;

        Ok(Stmt::Let(LetStmt { name, value, span }))
    }

    /// `fn NAME ( params ) BLOCK`.
    fn parse_fn_decl(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let name = self.expect_ident("function name")?;
        let params = self.parse_param_list()?;
        let body = Rc::new(self.parse_block()?);

        Ok(Stmt::Fn(FnDecl {
            name,
            params,
            body,
            span,
        }))
    }

    /// `( ID (, ID)* )` - shared by function declarations and function
    /// expressions.
    pub(crate) fn parse_param_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LParen, "`(` before parameter list")?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            params.push(self.expect_ident("parameter name")?);
            while self.match_kind(&TokenKind::Comma) {
                params.push(self.expect_ident("parameter name")?);
            }
        }
        self.expect(&TokenKind::RParen, "`)` after parameter list")?;
        Ok(params)
    }

    /// `if EXPR BLOCK (else (BLOCK | IF))?`.
    fn parse_if_stmt(&mut self) -> Result<IfStmt, ParseError> {
        self.advance();

        let cond = self.parse_expr()?;
        let then_block = self.parse_block()?;

        let else_clause = if self.match_kind(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                Some(Box::new(ElseClause::If(self.parse_if_stmt()?)))
            } else {
                Some(Box::new(ElseClause::Block(self.parse_block()?)))
            }
        } else {
            None
        };

        Ok(IfStmt {
            cond,
            then_block,
            else_clause,
        })
    }

    /// `return EXPR?` - the argument is absent when the next token closes
    /// the surrounding block.
    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let arg = if self.check(&TokenKind::RBrace)
            || self.check(&TokenKind::Semicolon)
            || self.is_at_end()
        {
            None
        } else {
            Some(self.parse_expr()?)
        };

        Ok(Stmt::Return(ReturnStmt { arg, span }))
    }

    /// `print EXPR` - parentheses around the argument are ordinary
    /// grouping, so both `print x` and `print(x)` parse.
    fn parse_print_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let arg = self.parse_expr()?;
        Ok(Stmt::Print(PrintStmt { arg, span }))
    }

    /// `{ stmt* }`.
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let open = self.expect(&TokenKind::LBrace, "`{`")?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            body.push(self.parse_stmt()?);
        }
        let close = self.expect(&TokenKind::RBrace, "`}` to close block")?;
        Ok(Block {
            body,
            span: open.span.to(close.span),
        })
    }

    /// `endpoint METHOD "path" (use [ID (, ID)*])? BLOCK`.
    fn parse_endpoint_decl(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let method = match self.current_kind() {
            TokenKind::Get => HttpMethod::Get,
            TokenKind::Post => HttpMethod::Post,
            TokenKind::Put => HttpMethod::Put,
            TokenKind::Delete => HttpMethod::Delete,
            TokenKind::Patch => HttpMethod::Patch,
            _ => return Err(self.error("expected HTTP method after `endpoint`")),
        };
        self.advance();

        let path = self.expect_string("endpoint path string")?;

        let middlewares = if self.match_kind(&TokenKind::Use) {
            self.parse_middleware_list()?
        } else {
            Vec::new()
        };

        let body = Rc::new(self.parse_block()?);

        Ok(Stmt::Endpoint(EndpointDecl {
            method,
            path,
            middlewares,
            body,
            span,
        }))
    }

    /// `[ ID (, ID)* ]` - the list may be empty.
    fn parse_middleware_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.expect(&TokenKind::LBracket, "`[` after `use`")?;
        let mut names = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            names.push(self.expect_ident("middleware name")?);
            while self.match_kind(&TokenKind::Comma) {
                names.push(self.expect_ident("middleware name")?);
            }
        }
        self.expect(&TokenKind::RBracket, "`]` after middleware list")?;
        Ok(names)
    }

    /// `middleware NAME BLOCK`.
    fn parse_middleware_decl(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let name = self.expect_ident("middleware name")?;
        let body = Rc::new(self.parse_block()?);

        Ok(Stmt::Middleware(MiddlewareDecl { name, body, span }))
    }

    /// `use NAME` or `use [ NAME (, NAME)* ]`.
    fn parse_use_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let middlewares = if self.check(&TokenKind::LBracket) {
            self.parse_middleware_list()?
        } else {
            vec![self.expect_ident("middleware name after `use`")?]
        };

        Ok(Stmt::Use(UseStmt { middlewares, span }))
    }

    /// `validate EXPR { FIELD* }`.
    fn parse_validate_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let target = self.parse_expr()?;
        let fields = self.parse_field_block()?;

        Ok(Stmt::Validate(ValidateStmt {
            target,
            fields,
            span,
        }))
    }

    /// `{ FIELD* }` where `FIELD := NAME : optional? TYPE ({ FIELD* })?`.
    fn parse_field_block(&mut self) -> Result<Vec<ValidationField>, ParseError> {
        self.expect(&TokenKind::LBrace, "`{` before validation fields")?;
        let mut fields = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            fields.push(self.parse_validation_field()?);
            self.match_kind(&TokenKind::Comma);
        }
        self.expect(&TokenKind::RBrace, "`}` after validation fields")?;
        Ok(fields)
    }

    fn parse_validation_field(&mut self) -> Result<ValidationField, ParseError> {
        let name = self.expect_name("field name")?;
        self.expect(&TokenKind::Colon, "`:` after field name")?;

        let optional = self.match_kind(&TokenKind::Optional);

        // Type names are ordinary identifiers, not keywords.
        let type_line = self.current().line();
        let type_name = self.expect_ident("validation type")?;
        let ty = FieldType::from_name(&type_name)
            .ok_or_else(|| self.error_at(type_line, format!("unknown validation type `{}`", type_name)))?;

        let nested = if self.check(&TokenKind::LBrace) {
            if ty != FieldType::Object {
                return Err(self.error("nested fields are only allowed on `object` fields"));
            }
            Some(self.parse_field_block()?)
        } else {
            None
        };

        Ok(ValidationField {
            name,
            ty,
            optional,
            nested,
        })
    }

    /// `server EXPR`.
    fn parse_server_stmt(&mut self) -> Result<Stmt, ParseError> {
        let span = self.current().span;
        self.advance();

        let port = self.parse_expr()?;
        Ok(Stmt::Server(ServerStmt { port, span }))
    }
}
