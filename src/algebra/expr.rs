//! Expression tree as read from the input, before any algebra runs.

use super::poly::Polynomial;
use super::rational::RationalFunction;
use super::BackendError;
use num_rational::BigRational;
use num_traits::ToPrimitive;
use std::fmt;
use tracing::debug;

/// Terms a single power may produce.
const MAX_TERMS: u128 = 5_000;
/// Coefficient pairs a single product may multiply.
const MAX_PRODUCT_WORK: usize = 1_000_000;

/// Size bounds checked before each product or power is expanded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Limits {
    max_exponent: u32,
    max_degree: u32,
    max_coefficient_bits: u64,
}

impl Limits {
    fn for_exponent(max_exponent: u32) -> Self {
        let e = u64::from(max_exponent);
        Self {
            max_exponent,
            max_degree: max_exponent.saturating_mul(4),
            max_coefficient_bits: e.saturating_mul(e).saturating_mul(4),
        }
    }

    fn fits_product(&self, a: &Polynomial, b: &Polynomial) -> bool {
        let terms = a.term_count().min(b.term_count()) as u64;
        u64::from(a.total_degree()) + u64::from(b.total_degree()) <= u64::from(self.max_degree)
            && a.coefficient_bits() + b.coefficient_bits() + bit_length(terms)
                <= self.max_coefficient_bits
            && a.term_count().saturating_mul(b.term_count()) <= MAX_PRODUCT_WORK
    }

    fn fits_power(&self, p: &Polynomial, n: u32) -> bool {
        if n <= 1 || p.term_count() == 0 {
            return true;
        }
        let n64 = u64::from(n);
        let bits = p.coefficient_bits() + bit_length(p.term_count() as u64);
        u64::from(p.total_degree()).saturating_mul(n64) <= u64::from(self.max_degree)
            && bits.saturating_mul(n64) <= self.max_coefficient_bits
            && power_terms(p, n) <= MAX_TERMS
    }
}

fn bit_length(n: u64) -> u64 {
    u64::from(u64::BITS - n.leading_zeros())
}

/// Upper bound on the terms of `p**n`: multisets of `n` terms, or monomials
/// of bounded degree in the symbols present, whichever is smaller.
fn power_terms(p: &Polynomial, n: u32) -> u128 {
    let t = p.term_count() as u128;
    let k = p.symbols().len() as u128;
    let d = u128::from(p.total_degree()) * u128::from(n);
    let multisets = binomial(u128::from(n) + t - 1, t - 1);
    let monomials = binomial(d + k, k);
    multisets.min(monomials)
}

/// `C(n, k)`, saturating just above `MAX_TERMS`.
fn binomial(n: u128, k: u128) -> u128 {
    let k = k.min(n - k);
    let mut value = 1u128;
    for i in 0..k {
        value = value * (n - i) / (i + 1);
        if value > MAX_TERMS {
            return MAX_TERMS + 1;
        }
    }
    value
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Num(BigRational),
    Sym(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) | Expr::Div(..) => 2,
            Expr::Neg(..) => 3,
            Expr::Pow(..) => 4,
            Expr::Num(n) if !n.is_integer() => 2,
            Expr::Num(_) | Expr::Sym(_) => 5,
        }
    }

    /// Evaluates the tree into a reduced rational function.
    pub fn evaluate(&self, max_exponent: u32) -> Result<RationalFunction, BackendError> {
        self.evaluate_within(&Limits::for_exponent(max_exponent))
    }

    fn evaluate_within(&self, limits: &Limits) -> Result<RationalFunction, BackendError> {
        match self {
            Expr::Num(n) => Ok(RationalFunction::constant(n.clone())),
            Expr::Sym(s) => Ok(RationalFunction::symbol(s)),
            Expr::Neg(e) => Ok(e.evaluate_within(limits)?.neg()),
            Expr::Add(a, b) | Expr::Sub(a, b) => {
                let (a_value, b_value) = (a.evaluate_within(limits)?, b.evaluate_within(limits)?);
                if a_value.denominator() != b_value.denominator() {
                    self.check(
                        limits.fits_product(a_value.numerator(), b_value.denominator())
                            && limits.fits_product(b_value.numerator(), a_value.denominator())
                            && limits.fits_product(a_value.denominator(), b_value.denominator()),
                    )?;
                }
                match self {
                    Expr::Add(..) => a_value.add(&b_value),
                    _ => a_value.sub(&b_value),
                }
            }
            Expr::Mul(a, b) => {
                let (a_value, b_value) = (a.evaluate_within(limits)?, b.evaluate_within(limits)?);
                self.check(
                    limits.fits_product(a_value.numerator(), b_value.numerator())
                        && limits.fits_product(a_value.denominator(), b_value.denominator()),
                )?;
                a_value.mul(&b_value)
            }
            Expr::Div(a, b) => {
                let (a_value, b_value) = (a.evaluate_within(limits)?, b.evaluate_within(limits)?);
                self.check(
                    limits.fits_product(a_value.numerator(), b_value.denominator())
                        && limits.fits_product(a_value.denominator(), b_value.numerator()),
                )?;
                a_value.div(&b_value)
            }
            Expr::Pow(base, exponent) => {
                let exponent_value = exponent.evaluate_within(limits)?;
                let n = exponent_value
                    .constant_value()
                    .filter(|q| q.is_integer())
                    .ok_or_else(|| BackendError::NonIntegerExponent(exponent.to_string()))?;
                let n = n
                    .to_integer()
                    .to_i64()
                    .filter(|n| n.unsigned_abs() <= u64::from(limits.max_exponent))
                    .ok_or_else(|| BackendError::ExponentTooLarge {
                        exponent: exponent.to_string(),
                        max: limits.max_exponent,
                    })?;
                let value = base.evaluate_within(limits)?;
                let magnitude = n.unsigned_abs() as u32;
                self.check(
                    limits.fits_power(value.numerator(), magnitude)
                        && limits.fits_power(value.denominator(), magnitude),
                )?;
                value.pow(n)
            }
        }
    }

    fn check(&self, fits: bool) -> Result<(), BackendError> {
        if fits {
            Ok(())
        } else {
            debug!(expression = %self, "expression exceeds size limits");
            Err(BackendError::ExpressionTooLarge {
                expression: self.to_string(),
            })
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parent: u8, strict: bool) -> fmt::Result {
        let own = self.precedence();
        if own < parent || (strict && own == parent) {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Sym(s) => write!(f, "{}", s),
            Expr::Neg(e) => {
                write!(f, "-")?;
                e.fmt_operand(f, 3, false)
            }
            Expr::Add(a, b) => {
                a.fmt_operand(f, 1, false)?;
                write!(f, " + ")?;
                b.fmt_operand(f, 2, false)
            }
            Expr::Sub(a, b) => {
                a.fmt_operand(f, 1, false)?;
                write!(f, " - ")?;
                b.fmt_operand(f, 2, false)
            }
            Expr::Mul(a, b) => {
                a.fmt_operand(f, 2, false)?;
                write!(f, "*")?;
                b.fmt_operand(f, 2, true)
            }
            Expr::Div(a, b) => {
                a.fmt_operand(f, 2, false)?;
                write!(f, "/")?;
                b.fmt_operand(f, 2, true)
            }
            Expr::Pow(base, exponent) => {
                base.fmt_operand(f, 4, true)?;
                write!(f, "**")?;
                exponent.fmt_operand(f, 4, false)
            }
        }
    }
}
