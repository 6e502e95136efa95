//! Line evaluator.
//!
//! ```text
//! expr    := ('iota' | '?') expr | operand+
//! operand := number | string | '(' expr ')'
//! ```
//!
//! Several operands in a row form a vector.
use std::fmt;

use iv_core::Value;
use iv_syntax::{DiagnosticKind, TokenKind, quote, unquote};
use rand::Rng;

use crate::{Parser, Result};

/// Largest vector `iota` will build.
pub const MAX_IOTA: i64 = 1 << 20;

/// Deepest nesting of parentheses and prefix operators on one line.
pub const MAX_EXPR_DEPTH: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Iota,
    Roll,
}

impl UnaryOp {
    fn name(self) -> &'static str {
        match self {
            UnaryOp::Iota => "iota",
            UnaryOp::Roll => "?",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Value),
    Vector(Vec<Expr>),
    Unary { op: UnaryOp, arg: Box<Expr> },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(Value::Str(s)) => f.write_str(&quote(s)),
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Vector(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Expr::Unary { op, arg } => write!(f, "({} {arg})", op.name()),
        }
    }
}

impl Parser<'_> {
    pub(crate) fn parse_expr(&mut self) -> Result<Expr> {
        if self.expr_depth >= MAX_EXPR_DEPTH {
            return Err(self.error(DiagnosticKind::ExprTooDeep(MAX_EXPR_DEPTH)));
        }
        self.expr_depth += 1;
        let expr = self.parse_nested();
        self.expr_depth -= 1;
        expr
    }

    fn parse_nested(&mut self) -> Result<Expr> {
        let tok = self.peek();
        let op = match (tok.kind, tok.text.as_str()) {
            (TokenKind::Identifier, "iota") => Some(UnaryOp::Iota),
            (TokenKind::Operator, "?") => Some(UnaryOp::Roll),
            _ => None,
        };
        if let Some(op) = op {
            self.next()?;
            let arg = self.parse_expr()?;
            return Ok(Expr::Unary {
                op,
                arg: Box::new(arg),
            });
        }

        let mut operands = Vec::new();
        while let Some(operand) = self.parse_operand()? {
            operands.push(operand);
        }
        match operands.len() {
            0 => {
                let tok = self.next()?;
                Err(match tok.kind {
                    TokenKind::Identifier => self.error(DiagnosticKind::UndefinedName(tok.text)),
                    _ => self.error(DiagnosticKind::UnexpectedToken(tok.to_string())),
                })
            }
            1 => Ok(operands.swap_remove(0)),
            _ => Ok(Expr::Vector(operands)),
        }
    }

    fn parse_operand(&mut self) -> Result<Option<Expr>> {
        match self.peek_kind() {
            TokenKind::Number => {
                let tok = self.next()?;
                let value = Value::parse_number(&tok.text)
                    .map_err(|e| self.error(DiagnosticKind::InvalidNumber(e.to_string())))?;
                Ok(Some(Expr::Literal(value)))
            }
            TokenKind::String | TokenKind::RawString => {
                let tok = self.next()?;
                let s = unquote(&tok.text)
                    .map_err(|e| self.error(DiagnosticKind::InvalidString(e.to_string())))?;
                Ok(Some(Expr::Literal(Value::Str(s))))
            }
            TokenKind::LeftParen => {
                self.next()?;
                let inner = self.parse_expr()?;
                self.need(&[TokenKind::RightParen])?;
                Ok(Some(inner))
            }
            _ => Ok(None),
        }
    }

    pub(crate) fn eval(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(v) => Ok(v.clone()),
            Expr::Vector(items) => items
                .iter()
                .map(|item| self.eval(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Vector),
            Expr::Unary { op, arg } => {
                let arg = self.eval(arg)?;
                match op {
                    UnaryOp::Iota => self.iota(&arg),
                    UnaryOp::Roll => self.roll(&arg),
                }
            }
        }
    }

    fn iota(&mut self, arg: &Value) -> Result<Value> {
        let n = match arg {
            Value::Int(n) if (0..=MAX_IOTA).contains(n) => *n,
            Value::Int(n) if *n > MAX_IOTA => {
                return Err(self.domain_error("iota", format!("{n} is too large")));
            }
            other => return Err(self.domain_error("iota", format!("bad argument {other}"))),
        };
        let origin = self.config().origin();
        Ok(Value::Vector((origin..origin + n).map(Value::Int).collect()))
    }

    fn roll(&mut self, arg: &Value) -> Result<Value> {
        match arg {
            Value::Int(n) if *n > 0 => {
                let origin = self.config().origin();
                let r = self.config_mut().rng().gen_range(0..*n);
                Ok(Value::Int(r + origin))
            }
            Value::Vector(items) => items
                .iter()
                .map(|item| self.roll(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Vector),
            other => Err(self.domain_error("?", format!("bad argument {other}"))),
        }
    }

    fn domain_error(&self, op: &'static str, detail: String) -> crate::Error {
        self.error(DiagnosticKind::DomainError { op, detail })
    }
}
