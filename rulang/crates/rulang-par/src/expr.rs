//! Expression parsing using Pratt parsing (top-down operator precedence).
//!
//! # Operator precedence (lowest to highest)
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `=` | Right |
//! | 2 | `or` | Left |
//! | 3 | `and` | Left |
//! | 4 | `==`, `!=` | Left |
//! | 5 | `<`, `>`, `<=`, `>=` | Left |
//! | 6 | `+`, `-` | Left |
//! | 7 | `*`, `/`, `%` | Left |
//! | 8 | unary `-` | Prefix |
//! | 9 | call `()`, member `.` | Left (postfix) |

use std::rc::Rc;

use rulang_lex::TokenKind;
use rulang_util::ParseError;

use crate::ast::*;
use crate::Parser;

/// Binding power levels for Pratt parsing.
/// Higher numbers = tighter binding (higher precedence).
#[doc(hidden)]
pub mod bp {
    /// Minimum binding power (start of expression).
    pub const MIN: u8 = 0;

    /// Assignment: `=` (right-associative).
    pub const ASSIGNMENT: u8 = 2;

    /// Logical OR: `or`.
    pub const LOGICAL_OR: u8 = 4;

    /// Logical AND: `and`.
    pub const LOGICAL_AND: u8 = 6;

    /// Equality: `==`, `!=`.
    pub const EQUALITY: u8 = 8;

    /// Comparison: `<`, `>`, `<=`, `>=`.
    pub const COMPARISON: u8 = 10;

    /// Additive: `+`, `-`.
    pub const ADDITIVE: u8 = 12;

    /// Multiplicative: `*`, `/`, `%`.
    pub const MULTIPLICATIVE: u8 = 14;

    /// Prefix operators (unary minus).
    pub const UNARY: u8 = 16;
}

impl Parser {
    /// Main expression entry point.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(bp::MIN)
    }

    /// Pratt parser core: parses an expression consuming only operators
    /// whose left binding power is at least `min_bp`.
    ///
    /// Left-associative operators use `right_bp = left_bp + 1`;
    /// assignment uses `right_bp = left_bp - 1` so `a = b = c` nests as
    /// `a = (b = c)`.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_prefix()?;

        loop {
            let (_, rbp) = match self.infix_binding_power() {
                Some(bp) if bp.0 >= min_bp => bp,
                _ => break,
            };

            let op_token = self.advance();
            let rhs = self.parse_expr_bp(rbp)?;

            lhs = if op_token.kind == TokenKind::Eq {
                let name = match lhs {
                    Expr::Ident(name) => name,
                    _ => {
                        return Err(self.error_at(
                            op_token.line(),
                            "invalid assignment target, expected an identifier",
                        ))
                    },
                };
                Expr::Assign(AssignExpr {
                    name,
                    value: Box::new(rhs),
                })
            } else {
                let op = binop_for(&op_token.kind);
                Expr::Binary(BinaryExpr {
                    left: Box::new(lhs),
                    op,
                    right: Box::new(rhs),
                })
            };
        }

        Ok(lhs)
    }

    /// Binding powers `(left, right)` for the current token, if it is an
    /// infix operator.
    fn infix_binding_power(&self) -> Option<(u8, u8)> {
        let bp = match self.current_kind() {
            TokenKind::Eq => (bp::ASSIGNMENT, bp::ASSIGNMENT - 1),
            TokenKind::Or => (bp::LOGICAL_OR, bp::LOGICAL_OR + 1),
            TokenKind::And => (bp::LOGICAL_AND, bp::LOGICAL_AND + 1),
            TokenKind::EqEq | TokenKind::NotEq => (bp::EQUALITY, bp::EQUALITY + 1),
            TokenKind::Lt | TokenKind::Gt | TokenKind::LtEq | TokenKind::GtEq => {
                (bp::COMPARISON, bp::COMPARISON + 1)
            },
            TokenKind::Plus | TokenKind::Minus => (bp::ADDITIVE, bp::ADDITIVE + 1),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
                (bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1)
            },
            _ => return None,
        };
        Some(bp)
    }

    /// Prefix expression: unary minus, or a primary followed by its
    /// postfix operators.
    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        if self.match_kind(&TokenKind::Minus) {
            let operand = self.parse_expr_bp(bp::UNARY)?;
            return Ok(Expr::Unary(UnaryExpr {
                op: UnOp::Neg,
                expr: Box::new(operand),
            }));
        }

        let mut expr = self.parse_primary()?;

        // Call and member access are left-associative postfix operators
        // binding tighter than anything else.
        loop {
            if self.match_kind(&TokenKind::LParen) {
                let args = self.parse_call_args()?;
                expr = Expr::Call(CallExpr {
                    callee: Box::new(expr),
                    args,
                });
            } else if self.match_kind(&TokenKind::Dot) {
                let property = self.expect_name("property name after `.`")?;
                expr = Expr::Member(MemberExpr {
                    object: Box::new(expr),
                    property,
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.current_kind().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Number(n))
            },
            TokenKind::String(s) => {
                self.advance();
                Ok(Expr::String(s))
            },
            TokenKind::True => {
                self.advance();
                Ok(Expr::Bool(true))
            },
            TokenKind::False => {
                self.advance();
                Ok(Expr::Bool(false))
            },
            TokenKind::Null => {
                self.advance();
                Ok(Expr::Null)
            },
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::Ident(name))
            },
            // `next` is a keyword, but in expression position it resolves
            // the host-provided `next` binding so `next()` works.
            TokenKind::Next => {
                self.advance();
                Ok(Expr::Ident("next".to_string()))
            },
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::RParen, "`)` after grouped expression")?;
                Ok(expr)
            },
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Fn => self.parse_fn_expr(),
            _ => Err(self.error("expected expression")),
        }
    }

    /// `( EXPR (, EXPR)* )` with the `(` already consumed.
    fn parse_call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            args.push(self.parse_expr()?);
            while self.match_kind(&TokenKind::Comma) {
                args.push(self.parse_expr()?);
            }
        }
        self.expect(&TokenKind::RParen, "`)` after call arguments")?;
        Ok(args)
    }

    /// `[ EXPR (, EXPR)* ,? ]`.
    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        self.advance();
        let mut elements = Vec::new();
        while !self.check(&TokenKind::RBracket) && !self.is_at_end() {
            elements.push(self.parse_expr()?);
            if !self.match_kind(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket, "`]` after array elements")?;
        Ok(Expr::Array(elements))
    }

    /// `{ KEY : EXPR (, KEY : EXPR)* ,? }` - keys are identifiers,
    /// keyword lexemes, or string literals.
    fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        self.advance();
        let mut entries = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            let key = match self.current_kind() {
                TokenKind::String(s) => {
                    let key = s.clone();
                    self.advance();
                    key
                },
                other => match other.ident_like() {
                    Some(name) => {
                        let key = name.to_string();
                        self.advance();
                        key
                    },
                    None => return Err(self.error("expected object key")),
                },
            };
            self.expect(&TokenKind::Colon, "`:` after object key")?;
            let value = self.parse_expr()?;
            entries.push(ObjectEntry { key, value });
            if !self.match_kind(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "`}` after object entries")?;
        Ok(Expr::Object(entries))
    }

    /// `fn ( params ) BLOCK` in expression position.
    fn parse_fn_expr(&mut self) -> Result<Expr, ParseError> {
        self.advance();
        let params = self.parse_param_list()?;
        let body = Rc::new(self.parse_block()?);
        Ok(Expr::Function(FnExpr { params, body }))
    }
}

fn binop_for(kind: &TokenKind) -> BinOp {
    match kind {
        TokenKind::Plus => BinOp::Add,
        TokenKind::Minus => BinOp::Sub,
        TokenKind::Star => BinOp::Mul,
        TokenKind::Slash => BinOp::Div,
        TokenKind::Percent => BinOp::Mod,
        TokenKind::EqEq => BinOp::Eq,
        TokenKind::NotEq => BinOp::Ne,
        TokenKind::Lt => BinOp::Lt,
        TokenKind::Gt => BinOp::Gt,
        TokenKind::LtEq => BinOp::Le,
        TokenKind::GtEq => BinOp::Ge,
        TokenKind::And => BinOp::And,
        TokenKind::Or => BinOp::Or,
        // infix_binding_power admits exactly the kinds above.
        other => unreachable!("not an infix operator: {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Stmt;

    fn parse_expr_source(source: &str) -> Expr {
        let program = Parser::new(rulang_lex::tokenize(source).unwrap())
            .parse()
            .unwrap();
        match program.body.into_iter().next() {
            Some(Stmt::Expr(expr)) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    fn parse_expr_err(source: &str) -> ParseError {
        Parser::new(rulang_lex::tokenize(source).unwrap())
            .parse()
            .unwrap_err()
    }

    fn assert_binary(expr: &Expr, op: BinOp) -> (&Expr, &Expr) {
        match expr {
            Expr::Binary(b) => {
                assert_eq!(b.op, op, "expected operator {:?}", op);
                (&b.left, &b.right)
            },
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_mul_over_add() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        let expr = parse_expr_source("1 + 2 * 3");
        let (left, right) = assert_binary(&expr, BinOp::Add);
        assert_eq!(left, &Expr::Number(1.0));
        assert_binary(right, BinOp::Mul);
    }

    #[test]
    fn test_precedence_and_over_or() {
        // a or b and c parses as a or (b and c)
        let expr = parse_expr_source("a or b and c");
        let (_, right) = assert_binary(&expr, BinOp::Or);
        assert_binary(right, BinOp::And);
    }

    #[test]
    fn test_precedence_comparison_over_equality() {
        // a == b < c parses as a == (b < c)
        let expr = parse_expr_source("a == b < c");
        let (_, right) = assert_binary(&expr, BinOp::Eq);
        assert_binary(right, BinOp::Lt);
    }

    #[test]
    fn test_left_associative_subtraction() {
        // a - b - c parses as (a - b) - c
        let expr = parse_expr_source("a - b - c");
        let (left, _) = assert_binary(&expr, BinOp::Sub);
        assert_binary(left, BinOp::Sub);
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        let expr = parse_expr_source("(1 + 2) * 3");
        let (left, _) = assert_binary(&expr, BinOp::Mul);
        assert_binary(left, BinOp::Add);
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let expr = parse_expr_source("a = b = 1");
        match expr {
            Expr::Assign(outer) => {
                assert_eq!(outer.name, "a");
                assert!(matches!(*outer.value, Expr::Assign(ref inner) if inner.name == "b"));
            },
            other => panic!("expected assignment, got {:?}", other),
        }
    }

    #[test]
    fn test_assignment_target_must_be_identifier() {
        let err = parse_expr_err("a.b = 1");
        assert!(err.message.contains("assignment target"));

        let err = parse_expr_err("1 = 2");
        assert!(err.message.contains("assignment target"));
    }

    #[test]
    fn test_unary_minus_binds_tighter_than_mul() {
        // -a * b parses as (-a) * b
        let expr = parse_expr_source("-a * b");
        let (left, _) = assert_binary(&expr, BinOp::Mul);
        assert!(matches!(left, Expr::Unary(_)));
    }

    #[test]
    fn test_member_chain_with_keyword_properties() {
        // req.body.name - `body` and `name` are plain idents, `state` on
        // the next line is a keyword lexeme used as a property.
        let expr = parse_expr_source("req.body.name");
        match expr {
            Expr::Member(outer) => {
                assert_eq!(outer.property, "name");
                match *outer.object {
                    Expr::Member(inner) => {
                        assert_eq!(inner.property, "body");
                        assert_eq!(*inner.object, Expr::Ident("req".to_string()));
                    },
                    other => panic!("expected nested member, got {:?}", other),
                }
            },
            other => panic!("expected member access, got {:?}", other),
        }

        let expr = parse_expr_source("order.state");
        assert!(matches!(expr, Expr::Member(ref m) if m.property == "state"));
    }

    #[test]
    fn test_call_with_arguments() {
        let expr = parse_expr_source("f(1, x, \"s\")");
        match expr {
            Expr::Call(call) => {
                assert_eq!(*call.callee, Expr::Ident("f".to_string()));
                assert_eq!(call.args.len(), 3);
            },
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_chained_call_and_member() {
        // res.status(401).json(x) nests call -> member -> call -> member
        let expr = parse_expr_source("res.status(401).json(x)");
        match expr {
            Expr::Call(call) => match *call.callee {
                Expr::Member(m) => {
                    assert_eq!(m.property, "json");
                    assert!(matches!(*m.object, Expr::Call(_)));
                },
                other => panic!("expected member callee, got {:?}", other),
            },
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_next_keyword_as_callee() {
        let expr = parse_expr_source("next()");
        match expr {
            Expr::Call(call) => {
                assert_eq!(*call.callee, Expr::Ident("next".to_string()));
                assert!(call.args.is_empty());
            },
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_array_literal() {
        let expr = parse_expr_source("[1, \"a\", true]");
        match expr {
            Expr::Array(elements) => {
                assert_eq!(elements.len(), 3);
                assert_eq!(elements[2], Expr::Bool(true));
            },
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_object_literal_keeps_declaration_order() {
        let expr = parse_expr_source("x = {b: 2, a: 1, \"with space\": 3}");
        let obj = match expr {
            Expr::Assign(assign) => *assign.value,
            other => panic!("expected assignment, got {:?}", other),
        };
        match obj {
            Expr::Object(entries) => {
                let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
                assert_eq!(keys, vec!["b", "a", "with space"]);
            },
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_object_literal_with_keyword_keys() {
        let expr = parse_expr_source("f({state: 1, use: 2})");
        match expr {
            Expr::Call(call) => match &call.args[0] {
                Expr::Object(entries) => {
                    assert_eq!(entries[0].key, "state");
                    assert_eq!(entries[1].key, "use");
                },
                other => panic!("expected object argument, got {:?}", other),
            },
            other => panic!("expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_anonymous_function_expression() {
        let expr = parse_expr_source("fn (a, b) { return a + b }");
        match expr {
            Expr::Function(func) => {
                assert_eq!(func.params, vec!["a", "b"]);
                assert_eq!(func.body.body.len(), 1);
            },
            other => panic!("expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_null_and_boolean_literals() {
        assert_eq!(parse_expr_source("null"), Expr::Null);
        assert_eq!(parse_expr_source("true"), Expr::Bool(true));
        assert_eq!(parse_expr_source("false"), Expr::Bool(false));
    }
}
