//! Multivariate polynomials with exact rational coefficients.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Product of symbols raised to positive powers, sorted by symbol name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Monomial(Vec<(String, u32)>);

impl Monomial {
    pub fn one() -> Self {
        Self(Vec::new())
    }

    pub fn symbol(name: &str, exponent: u32) -> Self {
        if exponent == 0 {
            return Self::one();
        }
        Self(vec![(name.to_string(), exponent)])
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    pub fn factors(&self) -> &[(String, u32)] {
        &self.0
    }

    pub fn degree(&self) -> u32 {
        self.0.iter().map(|(_, e)| e).sum()
    }

    pub fn exponent_of(&self, name: &str) -> u32 {
        self.0
            .iter()
            .find(|(v, _)| v == name)
            .map(|(_, e)| *e)
            .unwrap_or(0)
    }

    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut merged: BTreeMap<&str, u32> = BTreeMap::new();
        for (v, e) in self.0.iter().chain(other.0.iter()) {
            *merged.entry(v.as_str()).or_insert(0) += e;
        }
        Monomial(merged.into_iter().map(|(v, e)| (v.to_string(), e)).collect())
    }

    /// `self / other`, or `None` when `other` does not divide `self`.
    pub fn div(&self, other: &Monomial) -> Option<Monomial> {
        let mut out = Vec::with_capacity(self.0.len());
        for (v, e) in &other.0 {
            if self.exponent_of(v) < *e {
                return None;
            }
        }
        for (v, e) in &self.0 {
            let rest = e - other.exponent_of(v);
            if rest > 0 {
                out.push((v.clone(), rest));
            }
        }
        Some(Monomial(out))
    }

    /// Drops `name` from the monomial, returning its former exponent.
    pub fn without(&self, name: &str) -> (Monomial, u32) {
        let exponent = self.exponent_of(name);
        let rest = self.0.iter().filter(|(v, _)| v != name).cloned().collect();
        (Monomial(rest), exponent)
    }

    pub fn gcd(&self, other: &Monomial) -> Monomial {
        let common = self
            .0
            .iter()
            .filter_map(|(v, e)| {
                let shared = (*e).min(other.exponent_of(v));
                (shared > 0).then(|| (v.clone(), shared))
            })
            .collect();
        Monomial(common)
    }
}

/// Lexicographic order with symbols compared alphabetically: `x > y`, `x**2 > x*y`.
impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        let mut a = self.0.iter().peekable();
        let mut b = other.0.iter().peekable();
        loop {
            match (a.peek(), b.peek()) {
                (None, None) => return Ordering::Equal,
                (Some(_), None) => return Ordering::Greater,
                (None, Some(_)) => return Ordering::Less,
                (Some((va, ea)), Some((vb, eb))) => match va.cmp(vb) {
                    Ordering::Less => return Ordering::Greater,
                    Ordering::Greater => return Ordering::Less,
                    Ordering::Equal => match ea.cmp(eb) {
                        Ordering::Equal => {
                            a.next();
                            b.next();
                        }
                        other => return other,
                    },
                },
            }
        }
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(v, e)| if *e == 1 { v.clone() } else { format!("{}**{}", v, e) })
            .collect();
        write!(f, "{}", parts.join("*"))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polynomial {
    terms: BTreeMap<Monomial, BigRational>,
}

impl Polynomial {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn constant(value: BigRational) -> Self {
        let mut p = Self::zero();
        p.add_term(Monomial::one(), value);
        p
    }

    pub fn integer(value: i64) -> Self {
        Self::constant(BigRational::from_integer(BigInt::from(value)))
    }

    pub fn symbol(name: &str) -> Self {
        Self::term(Monomial::symbol(name, 1), BigRational::one())
    }

    pub fn term(monomial: Monomial, coefficient: BigRational) -> Self {
        let mut p = Self::zero();
        p.add_term(monomial, coefficient);
        p
    }

    /// Builds `sum(coeffs[i] * var**i)`.
    pub fn from_univariate(var: &str, coeffs: &[BigRational]) -> Self {
        let mut p = Self::zero();
        for (i, c) in coeffs.iter().enumerate() {
            p.add_term(Monomial::symbol(var, i as u32), c.clone());
        }
        p
    }

    fn add_term(&mut self, monomial: Monomial, coefficient: BigRational) {
        if coefficient.is_zero() {
            return;
        }
        match self.terms.entry(monomial) {
            Entry::Vacant(slot) => {
                slot.insert(coefficient);
            }
            Entry::Occupied(mut slot) => {
                *slot.get_mut() += coefficient;
                if slot.get().is_zero() {
                    slot.remove();
                }
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.constant_value().map_or(false, |c| c.is_one())
    }

    /// The value of a constant polynomial, `None` if any symbol occurs.
    pub fn constant_value(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => self.terms.get(&Monomial::one()).cloned(),
            _ => None,
        }
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Terms from the largest monomial down.
    pub fn terms_desc(&self) -> impl Iterator<Item = (&Monomial, &BigRational)> {
        self.terms.iter().rev()
    }

    pub fn leading(&self) -> Option<(&Monomial, &BigRational)> {
        self.terms.iter().next_back()
    }

    pub fn leading_coefficient(&self) -> BigRational {
        self.leading()
            .map(|(_, c)| c.clone())
            .unwrap_or_else(BigRational::zero)
    }

    pub fn symbols(&self) -> BTreeSet<String> {
        self.terms
            .keys()
            .flat_map(|m| m.factors().iter().map(|(v, _)| v.clone()))
            .collect()
    }

    pub fn total_degree(&self) -> u32 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    /// Bits of the widest coefficient, numerator and denominator together.
    pub fn coefficient_bits(&self) -> u64 {
        self.terms
            .values()
            .map(|c| c.numer().bits() + c.denom().bits())
            .max()
            .unwrap_or(0)
    }

    pub fn degree_in(&self, var: &str) -> u32 {
        self.terms
            .keys()
            .map(|m| m.exponent_of(var))
            .max()
            .unwrap_or(0)
    }

    pub fn is_homogeneous(&self) -> bool {
        let mut degrees = self.terms.keys().map(Monomial::degree);
        match degrees.next() {
            Some(first) => degrees.all(|d| d == first),
            None => true,
        }
    }

    pub fn scale(&self, factor: &BigRational) -> Polynomial {
        let mut out = Polynomial::zero();
        for (m, c) in &self.terms {
            out.add_term(m.clone(), c * factor);
        }
        out
    }

    pub fn mul_monomial(&self, monomial: &Monomial) -> Polynomial {
        let mut out = Polynomial::zero();
        for (m, c) in &self.terms {
            out.add_term(m.mul(monomial), c.clone());
        }
        out
    }

    pub fn pow(&self, exponent: u32) -> Polynomial {
        let mut result = Polynomial::one();
        let mut base = self.clone();
        let mut e = exponent;
        while e > 0 {
            if e & 1 == 1 {
                result = &result * &base;
            }
            e >>= 1;
            if e > 0 {
                base = &base * &base;
            }
        }
        result
    }

    /// Groups terms by the power of `var`; the coefficients are polynomials in the other symbols.
    pub fn coefficients_in(&self, var: &str) -> BTreeMap<u32, Polynomial> {
        let mut out: BTreeMap<u32, Polynomial> = BTreeMap::new();
        for (m, c) in &self.terms {
            let (rest, e) = m.without(var);
            out.entry(e).or_default().add_term(rest, c.clone());
        }
        out
    }

    /// Dense coefficients (index = degree) when `var` is the only symbol present.
    pub fn univariate_coefficients(&self, var: &str) -> Option<Vec<BigRational>> {
        if self.symbols().iter().any(|s| s != var) {
            return None;
        }
        let degree = self.degree_in(var) as usize;
        let mut coeffs = vec![BigRational::zero(); degree + 1];
        for (m, c) in &self.terms {
            coeffs[m.exponent_of(var) as usize] = c.clone();
        }
        Some(coeffs)
    }

    /// Substitutes `var = value`.
    pub fn substitute(&self, var: &str, value: &BigRational) -> Polynomial {
        let mut out = Polynomial::zero();
        for (m, c) in &self.terms {
            let (rest, e) = m.without(var);
            let mut coefficient = c.clone();
            for _ in 0..e {
                coefficient *= value;
            }
            out.add_term(rest, coefficient);
        }
        out
    }

    /// Rational content, signed like the leading coefficient, so that
    /// `self / content` has coprime integer coefficients and a positive leading term.
    pub fn content(&self) -> BigRational {
        let mut numer_gcd = BigInt::zero();
        let mut denom_lcm = BigInt::one();
        for c in self.terms.values() {
            numer_gcd = numer_gcd.gcd(c.numer());
            denom_lcm = denom_lcm.lcm(c.denom());
        }
        if numer_gcd.is_zero() {
            return BigRational::one();
        }
        let content = BigRational::new(numer_gcd, denom_lcm);
        if self.leading_coefficient().is_negative() {
            -content
        } else {
            content
        }
    }

    pub fn primitive(&self) -> (BigRational, Polynomial) {
        let content = self.content();
        let primitive = self.scale(&content.recip());
        (content, primitive)
    }

    pub fn monomial_gcd(&self) -> Monomial {
        let mut keys = self.terms.keys();
        let first = match keys.next() {
            Some(m) => m.clone(),
            None => return Monomial::one(),
        };
        keys.fold(first, |acc, m| acc.gcd(m))
    }

    pub fn div_monomial(&self, monomial: &Monomial) -> Option<Polynomial> {
        let mut out = Polynomial::zero();
        for (m, c) in &self.terms {
            out.add_term(m.div(monomial)?, c.clone());
        }
        Some(out)
    }

    /// Exact division in lexicographic order; `None` when a remainder is left.
    pub fn div_exact(&self, divisor: &Polynomial) -> Option<Polynomial> {
        let (lead_m, lead_c) = divisor.leading()?;
        let mut remainder = self.clone();
        let mut quotient = Polynomial::zero();
        while let Some((m, c)) = remainder.leading() {
            let factor_m = m.div(lead_m)?;
            let factor_c = c / lead_c;
            let step = Polynomial::term(factor_m, factor_c);
            remainder = &remainder - &(&step * divisor);
            quotient = &quotient + &step;
        }
        Some(quotient)
    }

    /// Lexicographic comparison of the term lists, used to order factors.
    pub fn cmp_terms(&self, other: &Polynomial) -> Ordering {
        let mut a = self.terms_desc();
        let mut b = other.terms_desc();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some((ma, ca)), Some((mb, cb))) => {
                    // Smaller monomials first so `y` sorts before `x + 2`.
                    let ord = ma.cmp(mb).then_with(|| ca.cmp(cb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.add_term(m.clone(), c.clone());
        }
        out
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        for (m, c) in &rhs.terms {
            out.add_term(m.clone(), -c.clone());
        }
        out
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut out = Polynomial::zero();
        for (ma, ca) in &self.terms {
            for (mb, cb) in &rhs.terms {
                out.add_term(ma.mul(mb), ca * cb);
            }
        }
        out
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self.scale(&-BigRational::one())
    }
}

/// Renders `|coefficient| * body` the way the canonical printer does (`3*x/2`, `x/2`, `5`).
pub(crate) fn render_scaled(magnitude: &BigRational, body: Option<&str>) -> String {
    let numer = magnitude.numer();
    let denom = magnitude.denom();
    match body {
        None => magnitude.to_string(),
        Some(body) => {
            let mut s = String::new();
            if !numer.is_one() {
                s.push_str(&format!("{}*", numer));
            }
            s.push_str(body);
            if !denom.is_one() {
                s.push_str(&format!("/{}", denom));
            }
            s
        }
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (m, c)) in self.terms_desc().enumerate() {
            let body = (!m.is_one()).then(|| m.to_string());
            let rendered = render_scaled(&c.abs(), body.as_deref());
            match (i, c.is_negative()) {
                (0, true) => write!(f, "-{}", rendered)?,
                (0, false) => write!(f, "{}", rendered)?,
                (_, true) => write!(f, " - {}", rendered)?,
                (_, false) => write!(f, " + {}", rendered)?,
            }
        }
        Ok(())
    }
}
