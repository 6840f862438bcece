//! Solving `expr = 0` for one symbol.

use super::poly::{render_scaled, Polynomial};
use super::rational::RationalFunction;
use super::univariate;
use super::BackendError;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Outcome of a solve: a finite list of distinct roots, or every value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "values", rename_all = "snake_case")]
pub enum SolutionSet<S> {
    Finite(Vec<S>),
    All,
}

impl<S> SolutionSet<S> {
    pub fn map<T, F: Fn(&S) -> T>(&self, f: F) -> SolutionSet<T> {
        match self {
            SolutionSet::Finite(v) => SolutionSet::Finite(v.iter().map(f).collect()),
            SolutionSet::All => SolutionSet::All,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SolutionSet::Finite(v) if v.is_empty())
    }
}

impl<S: fmt::Display> fmt::Display for SolutionSet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolutionSet::All => write!(f, "todos los valores"),
            SolutionSet::Finite(values) => {
                let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// `real + coeff * sqrt(radicand)`, times `I` when `imaginary`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surd {
    pub real: BigRational,
    pub coeff: BigRational,
    pub radicand: BigInt,
    pub imaginary: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Root {
    Rational(BigRational),
    Surd(Surd),
    /// Root depending on other symbols.
    Symbolic(RationalFunction),
}

impl Root {
    fn sort_key(&self) -> (u8, f64, f64) {
        let f = |q: &BigRational| q.to_f64().unwrap_or(0.0);
        match self {
            Root::Rational(q) => (0, f(q), 0.0),
            Root::Surd(s) if !s.imaginary => {
                let root = s.radicand.to_f64().unwrap_or(0.0).sqrt();
                (0, f(&s.real) + f(&s.coeff) * root, 0.0)
            }
            Root::Surd(s) => (1, f(&s.real), f(&s.coeff)),
            Root::Symbolic(_) => (2, 0.0, 0.0),
        }
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Root::Rational(q) => write!(f, "{}", q),
            Root::Symbolic(r) => write!(f, "{}", r),
            Root::Surd(s) => {
                let base = match (s.radicand.is_one(), s.imaginary) {
                    (true, _) => "I".to_string(),
                    (false, false) => format!("sqrt({})", s.radicand),
                    (false, true) => format!("sqrt({})*I", s.radicand),
                };
                let term = render_scaled(&s.coeff.abs(), Some(base.as_str()));
                match (s.real.is_zero(), s.coeff.is_negative()) {
                    (true, true) => write!(f, "-{}", term),
                    (true, false) => write!(f, "{}", term),
                    (false, true) => write!(f, "{} - {}", s.real, term),
                    (false, false) => write!(f, "{} + {}", s.real, term),
                }
            }
        }
    }
}

/// Primes above this are not divided out of a radicand.
const TRIAL_DIVISION_LIMIT: u32 = 100_000;

/// Splits `n/d` under a square root into `k * sqrt(m)`.
///
/// Square factors are pulled out by trial division up to
/// `TRIAL_DIVISION_LIMIT`; a cofactor that is itself a perfect square comes
/// out too, anything else stays under the root.
fn simplify_sqrt(value: &BigRational) -> (BigRational, BigInt) {
    // sqrt(n/d) = sqrt(n*d)/d
    let mut rest = value.numer() * value.denom();
    let mut outside = BigInt::one();
    let mut inside = BigInt::one();
    let mut p = 2u32;
    while p <= TRIAL_DIVISION_LIMIT && BigInt::from(p) * p <= rest {
        let mut exponent = 0u32;
        while (&rest % p).is_zero() {
            rest /= p;
            exponent += 1;
        }
        if exponent > 0 {
            outside *= BigInt::from(p).pow(exponent / 2);
            if exponent % 2 == 1 {
                inside *= p;
            }
        }
        p += if p == 2 { 1 } else { 2 };
    }
    let root = rest.sqrt();
    if &root * &root == rest {
        outside *= root;
    } else {
        inside *= rest;
    }
    (BigRational::new(outside, value.denom().clone()), inside)
}

fn quadratic_roots(c: &[BigRational]) -> Vec<Root> {
    let (a, b, k) = (&c[2], &c[1], &c[0]);
    let two_a = a * BigRational::from_integer(BigInt::from(2u8));
    let real = -b / &two_a;
    let disc = b * b - BigRational::from_integer(BigInt::from(4u8)) * a * k;
    let imaginary = disc.is_negative();
    let (outside, radicand) = simplify_sqrt(&disc.abs());
    let coeff = (outside / &two_a).abs();
    if radicand.is_one() && !imaginary {
        return vec![Root::Rational(&real - &coeff), Root::Rational(&real + &coeff)];
    }
    [-coeff.clone(), coeff]
        .into_iter()
        .map(|coeff| {
            Root::Surd(Surd {
                real: real.clone(),
                coeff,
                radicand: radicand.clone(),
                imaginary,
            })
        })
        .collect()
}

fn vanishes(den: &Polynomial, var: &str, root: &Root) -> bool {
    match root {
        Root::Rational(q) => den.substitute(var, q).is_zero(),
        _ => false,
    }
}

/// Solves `value = 0` for `var`.
pub fn solve(value: &RationalFunction, var: &str) -> Result<SolutionSet<Root>, BackendError> {
    let num = value.numerator();
    if num.is_zero() {
        return Ok(SolutionSet::All);
    }
    if !num.symbols().contains(var) {
        return Ok(SolutionSet::Finite(Vec::new()));
    }

    let mut roots = match num.univariate_coefficients(var) {
        Some(coeffs) => solve_univariate(&coeffs, var)?,
        None => solve_symbolic(num, var)?,
    };
    roots.retain(|r| !vanishes(value.denominator(), var, r));
    roots.sort_by(|a, b| {
        a.sort_key()
            .partial_cmp(&b.sort_key())
            .unwrap_or(Ordering::Equal)
    });
    roots.dedup();
    Ok(SolutionSet::Finite(roots))
}

fn solve_univariate(coeffs: &[BigRational], var: &str) -> Result<Vec<Root>, BackendError> {
    let (found, rest) = univariate::rational_roots(coeffs);
    let mut roots: Vec<Root> = found.into_iter().map(|(q, _)| Root::Rational(q)).collect();
    match univariate::degree(&rest) {
        0 => {}
        1 => roots.push(Root::Rational(-&rest[0] / &rest[1])),
        2 => roots.extend(quadratic_roots(&rest)),
        degree => {
            return Err(BackendError::Unsolvable {
                variable: var.to_string(),
                degree: degree as u32,
            })
        }
    }
    Ok(roots)
}

/// Linear equations whose coefficients involve other symbols.
fn solve_symbolic(num: &Polynomial, var: &str) -> Result<Vec<Root>, BackendError> {
    let by_power = num.coefficients_in(var);
    let degree = num.degree_in(var);
    if degree != 1 {
        return Err(BackendError::Unsolvable {
            variable: var.to_string(),
            degree,
        });
    }
    let zero = Polynomial::zero();
    let slope = by_power.get(&1).unwrap_or(&zero);
    let intercept = by_power.get(&0).unwrap_or(&zero);
    let root = RationalFunction::new(-intercept, slope.clone())?;
    Ok(vec![match root.constant_value() {
        Some(q) => Root::Rational(q),
        None => Root::Symbolic(root),
    }])
}
