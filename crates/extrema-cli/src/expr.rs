//! Arithmetic expressions in one variable `x`.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?
//! primary := number | 'x' | constant | function '(' expr ')' | '(' expr ')'
//! ```
//!
//! `^` is right-associative and binds tighter than unary minus, so `-x^2`
//! is `-(x^2)` and `2^-x` is `2^(-x)`.

use std::fmt;
use std::str::FromStr;

use crate::error::{CliError, CliResult};

/// A parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal or named constant.
    Number(f64),
    /// The variable `x`.
    Var,
    /// Negation.
    Neg(Box<Expr>),
    /// Binary operation.
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Application of a built-in function.
    Call(Func, Box<Expr>),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Built-in functions of one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Cbrt,
    Abs,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "ln" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(func)
    }

    fn apply(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Exp => v.exp(),
            Self::Ln => v.ln(),
            Self::Log10 => v.log10(),
            Self::Log2 => v.log2(),
            Self::Sqrt => v.sqrt(),
            Self::Cbrt => v.cbrt(),
            Self::Abs => v.abs(),
        }
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        "nan" => Some(f64::NAN),
        "inf" => Some(f64::INFINITY),
        _ => None,
    }
}

impl Expr {
    /// Evaluates the expression at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Number(v) => *v,
            Self::Var => x,
            Self::Neg(inner) => -inner.eval(x),
            Self::Binary(op, lhs, rhs) => {
                let a = lhs.eval(x);
                let b = rhs.eval(x);
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                    BinOp::Pow => pow(a, b),
                }
            }
            Self::Call(func, arg) => func.apply(arg.eval(x)),
        }
    }
}

// integer exponents go through powi so x^2 matches x*x exactly
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= f64::from(i32::MAX) {
        base.powi(exponent as i32)
    } else {
        base.powf(exponent)
    }
}

impl FromStr for Expr {
    type Err = CliError;

    fn from_str(s: &str) -> CliResult<Self> {
        let tokens = tokenize(s)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            len: s.len(),
        };
        let expr = parser.expr()?;
        match parser.peek() {
            None => Ok(expr),
            Some((offset, token)) => Err(CliError::Parse {
                offset,
                message: format!("unexpected {}", token),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    LParen,
    RParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "number {}", v),
            Self::Ident(name) => write!(f, "'{}'", name),
            Self::Op(c) => write!(f, "'{}'", c),
            Self::LParen => f.write_str("'('"),
            Self::RParen => f.write_str("')'"),
        }
    }
}

fn tokenize(s: &str) -> CliResult<Vec<(usize, Token)>> {
    let bytes = s.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            c if c.is_ascii_whitespace() => i += 1,
            '+' | '-' | '*' | '/' | '^' => {
                tokens.push((i, Token::Op(c)));
                i += 1;
            }
            '(' => {
                tokens.push((i, Token::LParen));
                i += 1;
            }
            ')' => {
                tokens.push((i, Token::RParen));
                i += 1;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                // exponent suffix, only when digits follow
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    let mut j = i + 1;
                    if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j].is_ascii_digit() {
                        while j < bytes.len() && bytes[j].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let text = &s[start..i];
                let value = text.parse::<f64>().map_err(|_| CliError::Parse {
                    offset: start,
                    message: format!("invalid number '{}'", text),
                })?;
                tokens.push((start, Token::Number(value)));
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                    i += 1;
                }
                tokens.push((start, Token::Ident(s[start..i].to_string())));
            }
            _ => {
                let found = s[i..].chars().next().unwrap_or(c);
                return Err(CliError::Parse {
                    offset: i,
                    message: format!("unexpected character '{}'", found),
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    len: usize,
}

impl Parser {
    fn peek(&self) -> Option<(usize, &Token)> {
        self.tokens.get(self.pos).map(|(offset, token)| (*offset, token))
    }

    fn next(&mut self) -> Option<(usize, Token)> {
        let item = self.tokens.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.peek() {
            Some((_, Token::Op(c))) if ops.contains(c) => {
                let c = *c;
                self.pos += 1;
                Some(c)
            }
            _ => None,
        }
    }

    fn expect_rparen(&mut self) -> CliResult<()> {
        match self.next() {
            Some((_, Token::RParen)) => Ok(()),
            Some((offset, token)) => Err(CliError::Parse {
                offset,
                message: format!("expected ')', found {}", token),
            }),
            None => Err(CliError::Parse {
                offset: self.len,
                message: "expected ')', found end of input".to_string(),
            }),
        }
    }

    fn expr(&mut self) -> CliResult<Expr> {
        let mut lhs = self.term()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            let rhs = self.term()?;
            let op = if op == '+' { BinOp::Add } else { BinOp::Sub };
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> CliResult<Expr> {
        let mut lhs = self.unary()?;
        while let Some(op) = self.eat_op(&['*', '/']) {
            let rhs = self.unary()?;
            let op = if op == '*' { BinOp::Mul } else { BinOp::Div };
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> CliResult<Expr> {
        match self.eat_op(&['+', '-']) {
            Some('-') => Ok(Expr::Neg(Box::new(self.unary()?))),
            Some(_) => self.unary(),
            None => self.power(),
        }
    }

    fn power(&mut self) -> CliResult<Expr> {
        let base = self.primary()?;
        if self.eat_op(&['^']).is_some() {
            let exponent = self.unary()?;
            return Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> CliResult<Expr> {
        match self.next() {
            Some((_, Token::Number(v))) => Ok(Expr::Number(v)),
            Some((_, Token::LParen)) => {
                let inner = self.expr()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some((offset, Token::Ident(name))) => {
                if name == "x" {
                    return Ok(Expr::Var);
                }
                if let Some(value) = constant(&name) {
                    return Ok(Expr::Number(value));
                }
                let func = Func::from_name(&name).ok_or_else(|| CliError::Parse {
                    offset,
                    message: format!("unknown identifier '{}'", name),
                })?;
                match self.next() {
                    Some((_, Token::LParen)) => {}
                    _ => {
                        return Err(CliError::Parse {
                            offset,
                            message: format!("expected '(' after '{}'", name),
                        })
                    }
                }
                let arg = self.expr()?;
                self.expect_rparen()?;
                Ok(Expr::Call(func, Box::new(arg)))
            }
            Some((offset, token)) => Err(CliError::Parse {
                offset,
                message: format!("unexpected {}", token),
            }),
            None => Err(CliError::Parse {
                offset: self.len,
                message: "unexpected end of input".to_string(),
            }),
        }
    }
}
