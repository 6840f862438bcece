//! Recursive-descent parser with implicit multiplication (`3x`, `(a+b)(c-d)`).
//!
//! Letters are single-character symbols, so `xy` reads as `x*y`. A number may
//! only start a product; `x2` or `(x+1)3` are rejected instead of guessed.

use super::expr::Expr;
use super::BackendError;
use num_bigint::BigInt;
use num_rational::BigRational;

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Num(BigRational, String),
    Sym(char),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Num(_, raw) => raw.clone(),
            Token::Sym(c) => c.to_string(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Star => "*".into(),
            Token::Slash => "/".into(),
            Token::Caret => "**".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
        }
    }
}

fn parse_number(raw: &str) -> Result<BigRational, BackendError> {
    let invalid = || BackendError::InvalidNumber(raw.to_string());
    let (whole, frac) = match raw.split_once('.') {
        Some((w, f)) => (w, f),
        None => (raw, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    let digits = format!("{}{}", whole, frac);
    let numer: BigInt = digits.parse().map_err(|_| invalid())?;
    let denom = num_traits::pow(BigInt::from(10u8), frac.len());
    Ok(BigRational::new(numer, denom))
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, BackendError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let start = i;
        let token = match c {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '0'..='9' | '.' => {
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                let raw: String = chars[start..i].iter().collect();
                if raw.matches('.').count() > 1 {
                    return Err(BackendError::InvalidNumber(raw));
                }
                let value = parse_number(&raw)?;
                tokens.push((Token::Num(value, raw), start));
                continue;
            }
            c if c.is_ascii_alphabetic() => Token::Sym(c),
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Token::Caret
            }
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            other => {
                return Err(BackendError::UnexpectedChar {
                    ch: other,
                    pos: start,
                })
            }
        };
        tokens.push((token, start));
        i += 1;
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(t, _)| t.clone());
        self.pos += 1;
        token
    }

    fn unexpected(&self) -> BackendError {
        match self.tokens.get(self.pos) {
            Some((token, pos)) => BackendError::UnexpectedToken {
                found: token.describe(),
                pos: *pos,
            },
            None => BackendError::UnexpectedEnd,
        }
    }

    fn expression(&mut self) -> Result<Expr, BackendError> {
        let mut lhs = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    lhs = Expr::Add(Box::new(lhs), Box::new(self.term()?));
                }
                Some(Token::Minus) => {
                    self.advance();
                    lhs = Expr::Sub(Box::new(lhs), Box::new(self.term()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn term(&mut self) -> Result<Expr, BackendError> {
        let mut lhs = self.unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    lhs = Expr::Mul(Box::new(lhs), Box::new(self.unary()?));
                }
                Some(Token::Slash) => {
                    self.advance();
                    lhs = Expr::Div(Box::new(lhs), Box::new(self.unary()?));
                }
                // Juxtaposition: `2x`, `x(y+1)`, `(a)(b)`.
                Some(Token::Sym(_)) | Some(Token::LParen) => {
                    lhs = Expr::Mul(Box::new(lhs), Box::new(self.power()?));
                }
                _ => return Ok(lhs),
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, BackendError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                Ok(Expr::Neg(Box::new(self.unary()?)))
            }
            Some(Token::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, BackendError> {
        let base = self.primary()?;
        if let Some(Token::Caret) = self.peek() {
            self.advance();
            let exponent = self.unary()?;
            return Ok(Expr::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, BackendError> {
        match self.peek() {
            Some(Token::Num(..)) | Some(Token::Sym(_)) | Some(Token::LParen) => {}
            _ => return Err(self.unexpected()),
        }
        match self.advance() {
            Some(Token::Num(value, _)) => Ok(Expr::Num(value)),
            Some(Token::Sym(c)) => Ok(Expr::Sym(c.to_string())),
            _ => {
                let inner = self.expression()?;
                match self.peek() {
                    Some(Token::RParen) => {
                        self.advance();
                        Ok(inner)
                    }
                    _ => Err(self.unexpected()),
                }
            }
        }
    }
}

/// Parses one expression; the whole input must be consumed.
pub fn parse(input: &str) -> Result<Expr, BackendError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(BackendError::EmptyExpression);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.expression()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.unexpected());
    }
    Ok(expr)
}
