//! Factorization over the rationals.
//!
//! Content and common monomials are always pulled out. Linear factors are found
//! with the rational-root theorem for univariate polynomials and, through
//! `b = 1`, for homogeneous polynomials in two symbols. Anything left is kept
//! as a single factor.

use super::poly::{render_scaled, Monomial, Polynomial};
use super::rational::{is_compound, RationalFunction};
use super::univariate;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::fmt;

/// `coefficient * prod(factor ** multiplicity)`, every factor primitive with a
/// positive leading coefficient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    pub coefficient: BigRational,
    pub factors: Vec<(Polynomial, u32)>,
}

impl Factorization {
    pub fn of(p: &Polynomial) -> Self {
        if p.is_zero() {
            return Self {
                coefficient: BigRational::zero(),
                factors: Vec::new(),
            };
        }
        let (_, primitive) = p.primitive();
        let mut factors = Vec::new();

        let shared = primitive.monomial_gcd();
        for (var, exponent) in shared.factors() {
            factors.push((Polynomial::symbol(var), *exponent));
        }
        let rest = primitive.div_monomial(&shared).unwrap_or(primitive);
        if rest.constant_value().is_none() {
            factors.extend(split(&rest));
        }

        factors.sort_by(|(a, ea), (b, eb)| {
            a.total_degree()
                .cmp(&b.total_degree())
                .then_with(|| a.cmp_terms(b))
                .then_with(|| ea.cmp(eb))
        });

        // Factors are primitive, so the leading coefficients fix the constant.
        let product = factors
            .iter()
            .fold(Polynomial::one(), |acc, (f, e)| &acc * &f.pow(*e));
        let coefficient = p.leading_coefficient() / product.leading_coefficient();

        Self {
            coefficient,
            factors,
        }
    }

    pub fn is_constant(&self) -> bool {
        self.factors.is_empty()
    }

    /// Whether the rendering can stand as a numerator without parentheses.
    fn is_atomic(&self) -> bool {
        if !self.coefficient.denom().is_one() {
            return false;
        }
        match self.factors.as_slice() {
            [(f, 1)] if self.coefficient.is_one() => !is_compound(f),
            _ => true,
        }
    }
}

/// Splits a primitive polynomial without monomial content.
fn split(p: &Polynomial) -> Vec<(Polynomial, u32)> {
    let symbols: Vec<String> = p.symbols().into_iter().collect();
    match symbols.as_slice() {
        [var] => match p.univariate_coefficients(var) {
            Some(coeffs) => split_univariate(
                &coeffs,
                |root| linear_factor(var, None, root),
                |rest| Polynomial::from_univariate(var, rest),
            ),
            None => vec![(p.clone(), 1)],
        },
        [a, b] if p.is_homogeneous() => {
            let dehomogenized = p.substitute(b, &BigRational::one());
            match dehomogenized.univariate_coefficients(a) {
                Some(coeffs) => split_univariate(
                    &coeffs,
                    |root| linear_factor(a, Some(b), root),
                    |rest| homogenize(rest, a, b),
                ),
                None => vec![(p.clone(), 1)],
            }
        }
        _ => vec![(p.clone(), 1)],
    }
}

fn split_univariate<L, R>(coeffs: &[BigRational], linear: L, leftover: R) -> Vec<(Polynomial, u32)>
where
    L: Fn(&BigRational) -> Polynomial,
    R: Fn(&[BigRational]) -> Polynomial,
{
    let (roots, rest) = univariate::rational_roots(coeffs);
    let mut out: Vec<(Polynomial, u32)> = roots
        .iter()
        .map(|(root, multiplicity)| (linear(root), *multiplicity))
        .collect();
    if univariate::degree(&rest) > 0 {
        out.push((leftover(&rest).primitive().1, 1));
    }
    out
}

/// `q*var - p*other` for the root `p/q`; `other` defaults to 1.
fn linear_factor(var: &str, other: Option<&str>, root: &BigRational) -> Polynomial {
    let q = BigRational::from_integer(root.denom().clone());
    let p = BigRational::from_integer(root.numer().clone());
    let lead = Polynomial::term(Monomial::symbol(var, 1), q);
    let tail = match other {
        Some(o) => Polynomial::term(Monomial::symbol(o, 1), p),
        None => Polynomial::constant(p),
    };
    &lead - &tail
}

/// `sum(c_i * a**i * b**(d - i))` for dense coefficients of degree `d`.
fn homogenize(coeffs: &[BigRational], a: &str, b: &str) -> Polynomial {
    let d = univariate::degree(coeffs) as u32;
    let mut out = Polynomial::zero();
    for (i, c) in coeffs.iter().enumerate().take(d as usize + 1) {
        let i = i as u32;
        let m = Monomial::symbol(a, i).mul(&Monomial::symbol(b, d - i));
        out = &out + &Polynomial::term(m, c.clone());
    }
    out
}

impl fmt::Display for Factorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.is_empty() {
            return write!(f, "{}", self.coefficient);
        }
        if self.coefficient.is_one() {
            if let [(p, 1)] = self.factors.as_slice() {
                return write!(f, "{}", p);
            }
        }
        let body = self
            .factors
            .iter()
            .map(|(p, e)| {
                let base = if is_compound(p) {
                    format!("({})", p)
                } else {
                    p.to_string()
                };
                if *e == 1 {
                    base
                } else {
                    format!("{}**{}", base, e)
                }
            })
            .collect::<Vec<_>>()
            .join("*");
        let sign = if self.coefficient.is_negative() { "-" } else { "" };
        write!(
            f,
            "{}{}",
            sign,
            render_scaled(&self.coefficient.abs(), Some(body.as_str()))
        )
    }
}

/// Factored numerator over factored denominator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoredForm {
    pub numerator: Factorization,
    pub denominator: Factorization,
}

impl FactoredForm {
    pub fn of(value: &RationalFunction) -> Self {
        let mut numerator = Factorization::of(value.numerator());
        let mut denominator = Factorization::of(value.denominator());
        // Keep every constant on the numerator side.
        if !denominator.coefficient.is_one() {
            numerator.coefficient = &numerator.coefficient / &denominator.coefficient;
            denominator.coefficient = BigRational::one();
        }
        Self {
            numerator,
            denominator,
        }
    }
}

impl fmt::Display for FactoredForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_constant() {
            return write!(f, "{}", self.numerator);
        }
        let num = if self.numerator.is_atomic() {
            self.numerator.to_string()
        } else {
            format!("({})", self.numerator)
        };
        let den = match self.denominator.factors.as_slice() {
            [(p, _)] if !is_compound(p) => self.denominator.to_string(),
            _ => format!("({})", self.denominator),
        };
        write!(f, "{}/{}", num, den)
    }
}
