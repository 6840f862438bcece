//! Quotients of polynomials, kept reduced with a monic denominator.

use super::factor::Factorization;
use super::poly::Polynomial;
use super::univariate;
use super::BackendError;
use num_rational::BigRational;
use num_traits::One;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalFunction {
    num: Polynomial,
    den: Polynomial,
}

impl RationalFunction {
    pub fn new(num: Polynomial, den: Polynomial) -> Result<Self, BackendError> {
        if den.is_zero() {
            return Err(BackendError::DivisionByZero);
        }
        Ok(Self { num, den }.reduce())
    }

    pub fn from_polynomial(num: Polynomial) -> Self {
        Self {
            num,
            den: Polynomial::one(),
        }
    }

    pub fn constant(value: BigRational) -> Self {
        Self::from_polynomial(Polynomial::constant(value))
    }

    pub fn symbol(name: &str) -> Self {
        Self::from_polynomial(Polynomial::symbol(name))
    }

    pub fn numerator(&self) -> &Polynomial {
        &self.num
    }

    pub fn denominator(&self) -> &Polynomial {
        &self.den
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_polynomial(&self) -> bool {
        self.den.is_one()
    }

    pub fn constant_value(&self) -> Option<BigRational> {
        let num = self.num.constant_value()?;
        let den = self.den.constant_value()?;
        Some(num / den)
    }

    pub fn symbols(&self) -> BTreeSet<String> {
        let mut out = self.num.symbols();
        out.extend(self.den.symbols());
        out
    }

    pub fn add(&self, other: &Self) -> Result<Self, BackendError> {
        if self.den == other.den {
            return Self::new(&self.num + &other.num, self.den.clone());
        }
        Self::new(
            &(&self.num * &other.den) + &(&other.num * &self.den),
            &self.den * &other.den,
        )
    }

    pub fn sub(&self, other: &Self) -> Result<Self, BackendError> {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Self) -> Result<Self, BackendError> {
        Self::new(&self.num * &other.num, &self.den * &other.den)
    }

    pub fn div(&self, other: &Self) -> Result<Self, BackendError> {
        if other.is_zero() {
            return Err(BackendError::DivisionByZero);
        }
        Self::new(&self.num * &other.den, &self.den * &other.num)
    }

    pub fn neg(&self) -> Self {
        Self {
            num: -&self.num,
            den: self.den.clone(),
        }
    }

    pub fn pow(&self, exponent: i64) -> Result<Self, BackendError> {
        let magnitude = exponent.unsigned_abs() as u32;
        let raised = Self::new(self.num.pow(magnitude), self.den.pow(magnitude))?;
        if exponent < 0 {
            Self::constant(BigRational::one()).div(&raised)
        } else {
            Ok(raised)
        }
    }

    fn reduce(self) -> Self {
        let Self { mut num, mut den } = self;
        if num.is_zero() {
            return Self::from_polynomial(Polynomial::zero());
        }
        if let Some(c) = den.constant_value() {
            return Self::from_polynomial(num.scale(&c.recip()));
        }
        if let Some(q) = num.div_exact(&den) {
            return Self::from_polynomial(q);
        }

        let shared = num.monomial_gcd().gcd(&den.monomial_gcd());
        if !shared.is_one() {
            if let (Some(n), Some(d)) = (num.div_monomial(&shared), den.div_monomial(&shared)) {
                num = n;
                den = d;
            }
        }

        if let Some((n, d)) =
            cancel_univariate(&num, &den).or_else(|| cancel_factors(&num, &den))
        {
            num = n;
            den = d;
        }

        if let Some(c) = den.constant_value() {
            return Self::from_polynomial(num.scale(&c.recip()));
        }
        let lead = den.leading_coefficient().recip();
        Self {
            num: num.scale(&lead),
            den: den.scale(&lead),
        }
    }
}

/// Removes the gcd when numerator and denominator share a single variable.
fn cancel_univariate(num: &Polynomial, den: &Polynomial) -> Option<(Polynomial, Polynomial)> {
    let mut symbols = num.symbols();
    symbols.extend(den.symbols());
    if symbols.len() != 1 {
        return None;
    }
    let var = symbols.iter().next()?;
    let n = num.univariate_coefficients(var)?;
    let d = den.univariate_coefficients(var)?;
    let g = univariate::gcd(&n, &d);
    if univariate::degree(&g) == 0 {
        return None;
    }
    let (nq, nr) = univariate::div_rem(&n, &g);
    let (dq, dr) = univariate::div_rem(&d, &g);
    if !univariate::is_zero(&nr) || !univariate::is_zero(&dr) {
        return None;
    }
    Some((
        Polynomial::from_univariate(var, &nq),
        Polynomial::from_univariate(var, &dq),
    ))
}

/// Cancels the factors numerator and denominator share when several symbols
/// are involved. Only factors [`Factorization`] can find are seen.
fn cancel_factors(num: &Polynomial, den: &Polynomial) -> Option<(Polynomial, Polynomial)> {
    let mut symbols = num.symbols();
    symbols.extend(den.symbols());
    if symbols.len() < 2 {
        return None;
    }
    let n = Factorization::of(num);
    let mut d = Factorization::of(den);
    let mut cancelled = false;
    let mut kept = Vec::with_capacity(n.factors.len());
    for (factor, exponent) in n.factors {
        match d.factors.iter_mut().find(|(g, e)| *g == factor && *e > 0) {
            Some((_, den_exponent)) => {
                let common = exponent.min(*den_exponent);
                *den_exponent -= common;
                cancelled = true;
                if exponent > common {
                    kept.push((factor, exponent - common));
                }
            }
            None => kept.push((factor, exponent)),
        }
    }
    if !cancelled {
        return None;
    }
    debug!(symbols = symbols.len(), "cancelled common factors");
    Some((
        expand_factors(&n.coefficient, &kept),
        expand_factors(&d.coefficient, &d.factors),
    ))
}

fn expand_factors(coefficient: &BigRational, factors: &[(Polynomial, u32)]) -> Polynomial {
    factors
        .iter()
        .filter(|(_, e)| *e > 0)
        .fold(Polynomial::constant(coefficient.clone()), |acc, (f, e)| {
            &acc * &f.pow(*e)
        })
}

/// Whether a polynomial needs parentheses when used as a factor or divisor.
pub(crate) fn is_compound(p: &Polynomial) -> bool {
    p.term_count() > 1
}

impl fmt::Display for RationalFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        let num = if is_compound(&self.num) {
            format!("({})", self.num)
        } else {
            self.num.to_string()
        };
        let den_is_product = self
            .den
            .leading()
            .map_or(false, |(m, _)| m.factors().len() > 1);
        let den = if is_compound(&self.den) || den_is_product {
            format!("({})", self.den)
        } else {
            self.den.to_string()
        };
        write!(f, "{}/{}", num, den)
    }
}
