//! Dense univariate helpers over the rationals. Coefficients are stored
//! lowest degree first.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use tracing::debug;

/// Largest |coefficient| whose divisors are enumerated when searching for rational roots.
const MAX_DIVISOR_SEARCH: u64 = 1_000_000_000_000;

/// Candidates tried per root before a cubic or higher part is left as it is.
const MAX_ROOT_CANDIDATES: usize = 20_000;

pub type Dense = Vec<BigRational>;

pub fn trim(mut coeffs: Dense) -> Dense {
    while coeffs.len() > 1 && coeffs.last().map_or(false, Zero::is_zero) {
        coeffs.pop();
    }
    if coeffs.is_empty() {
        coeffs.push(BigRational::zero());
    }
    coeffs
}

pub fn degree(coeffs: &[BigRational]) -> usize {
    coeffs.iter().rposition(|c| !c.is_zero()).unwrap_or(0)
}

pub fn is_zero(coeffs: &[BigRational]) -> bool {
    coeffs.iter().all(Zero::is_zero)
}

pub fn eval(coeffs: &[BigRational], x: &BigRational) -> BigRational {
    coeffs
        .iter()
        .rev()
        .fold(BigRational::zero(), |acc, c| acc * x + c)
}

/// Polynomial long division; `divisor` must not be zero.
pub fn div_rem(dividend: &[BigRational], divisor: &[BigRational]) -> (Dense, Dense) {
    let divisor = trim(divisor.to_vec());
    let dd = degree(&divisor);
    let lead = divisor[dd].clone();
    let mut rem = trim(dividend.to_vec());
    if degree(&rem) < dd || is_zero(&rem) {
        return (vec![BigRational::zero()], rem);
    }
    let mut quot = vec![BigRational::zero(); degree(&rem) - dd + 1];
    while !is_zero(&rem) && degree(&rem) >= dd {
        let dr = degree(&rem);
        let factor = &rem[dr] / &lead;
        let shift = dr - dd;
        for (i, c) in divisor.iter().enumerate().take(dd + 1) {
            rem[i + shift] -= &factor * c;
        }
        quot[shift] = factor;
        rem = trim(rem);
    }
    (trim(quot), rem)
}

/// Monic greatest common divisor.
pub fn gcd(a: &[BigRational], b: &[BigRational]) -> Dense {
    let mut x = trim(a.to_vec());
    let mut y = trim(b.to_vec());
    while !is_zero(&y) {
        let (_, r) = div_rem(&x, &y);
        x = y;
        y = r;
    }
    let lead = x[degree(&x)].clone();
    if lead.is_zero() {
        return x;
    }
    x.iter().map(|c| c / &lead).collect()
}

/// Divides by `(x - root)`, assuming `root` is a root.
fn deflate(coeffs: &[BigRational], root: &BigRational) -> Dense {
    let n = degree(coeffs);
    if n == 0 {
        return vec![BigRational::zero()];
    }
    let mut out = vec![BigRational::zero(); n];
    let mut carry = BigRational::zero();
    for i in (1..=n).rev() {
        carry = &carry * root + &coeffs[i];
        out[i - 1] = carry.clone();
    }
    trim(out)
}

fn divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    let n = n.abs().to_u64()?;
    if n == 0 || n > MAX_DIVISOR_SEARCH {
        return None;
    }
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1u64;
    while d * d <= n {
        if n % d == 0 {
            small.push(BigInt::from(d));
            if d * d != n {
                large.push(BigInt::from(n / d));
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    Some(small)
}

/// Scales to integer coefficients with the same roots.
fn integer_coefficients(coeffs: &[BigRational]) -> Vec<BigInt> {
    let lcm = coeffs
        .iter()
        .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
    coeffs
        .iter()
        .map(|c| (c * BigRational::from_integer(lcm.clone())).to_integer())
        .collect()
}

/// `q**n * f(p/q)` in integer arithmetic; zero exactly when `p/q` is a root.
fn scaled_value(ints: &[BigInt], p: &BigInt, q: &BigInt) -> BigInt {
    let n = ints.len() - 1;
    let mut acc = ints[n].clone();
    let mut q_power = BigInt::one();
    for a in ints[..n].iter().rev() {
        q_power *= q;
        acc = acc * p + a * &q_power;
    }
    acc
}

/// Rational root of a quadratic, present only when the discriminant is a square.
fn quadratic_rational_root(ints: &[BigInt]) -> Option<BigRational> {
    let (c, b, a) = (&ints[0], &ints[1], &ints[2]);
    let disc = b * b - BigInt::from(4u8) * a * c;
    if disc.is_negative() {
        return None;
    }
    let root = disc.sqrt();
    if &root * &root != disc {
        return None;
    }
    Some(BigRational::new(root - b, BigInt::from(2u8) * a))
}

/// Searches `±p/q` with `p | constant` and `q | lead`, testing candidates as
/// they are produced. Gives up after `MAX_ROOT_CANDIDATES` tests.
fn searched_root(ints: &[BigInt]) -> Option<BigRational> {
    let ps = divisors(&ints[0])?;
    let qs = divisors(&ints[ints.len() - 1])?;
    let mut tested = 0usize;
    for q in &qs {
        for p in &ps {
            if !p.gcd(q).is_one() {
                continue;
            }
            for p in [p.clone(), -p] {
                tested += 1;
                if tested > MAX_ROOT_CANDIDATES {
                    debug!(tested, "rational root search stopped");
                    return None;
                }
                if scaled_value(ints, &p, q).is_zero() {
                    return Some(BigRational::new(p, q.clone()));
                }
            }
        }
    }
    None
}

/// One rational root of a polynomial of positive degree without a zero root.
fn next_root(coeffs: &[BigRational]) -> Option<BigRational> {
    let ints = integer_coefficients(&coeffs[..=degree(coeffs)]);
    match ints.len() - 1 {
        1 => Some(BigRational::new(-&ints[0], ints[1].clone())),
        2 => quadratic_rational_root(&ints),
        _ => searched_root(&ints),
    }
}

/// Extracts every rational root with its multiplicity and returns what is left.
///
/// Roots come back in ascending order. Linear and quadratic parts are solved
/// directly; above that, when the coefficients are too large or the candidate
/// search runs out, the remainder keeps the roots not found.
pub fn rational_roots(coeffs: &[BigRational]) -> (Vec<(BigRational, u32)>, Dense) {
    let mut rest = trim(coeffs.to_vec());
    let mut roots = Vec::new();
    if degree(&rest) == 0 {
        return (roots, rest);
    }

    let mut zero_multiplicity = 0;
    while degree(&rest) > 0 && rest[0].is_zero() {
        rest.remove(0);
        zero_multiplicity += 1;
    }
    if zero_multiplicity > 0 {
        roots.push((BigRational::zero(), zero_multiplicity));
    }

    while degree(&rest) > 0 {
        let root = match next_root(&rest) {
            Some(root) => root,
            None => break,
        };
        let mut multiplicity = 0;
        while degree(&rest) > 0 && eval(&rest, &root).is_zero() {
            rest = deflate(&rest, &root);
            multiplicity += 1;
        }
        if multiplicity == 0 {
            break;
        }
        roots.push((root, multiplicity));
    }

    roots.sort_by(|a, b| a.0.cmp(&b.0));
    (roots, rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    #[test]
    fn finds_roots_with_multiplicity() {
        // (x - 1)^2 (x + 2) = x^3 - 3x + 2
        let (roots, rest) = rational_roots(&[q(2), q(-3), q(0), q(1)]);
        assert_eq!(roots, vec![(q(-2), 1), (q(1), 2)]);
        assert_eq!(degree(&rest), 0);
    }

    #[test]
    fn keeps_irreducible_remainder() {
        // x^2 + 1 has no rational roots
        let (roots, rest) = rational_roots(&[q(1), q(0), q(1)]);
        assert!(roots.is_empty());
        assert_eq!(degree(&rest), 2);
    }

    #[test]
    fn gcd_is_monic() {
        // gcd(x^2 - 1, 2x + 2) = x + 1
        let g = gcd(&[q(-1), q(0), q(1)], &[q(2), q(2)]);
        assert_eq!(g, vec![q(1), q(1)]);
    }

    #[test]
    fn quadratic_with_highly_composite_coefficients() {
        // 720720x^2 + x - 963761198400: the discriminant is not a square.
        let coeffs = [q(-963_761_198_400), q(1), q(720_720)];
        let (roots, rest) = rational_roots(&coeffs);
        assert!(roots.is_empty());
        assert_eq!(rest, coeffs.to_vec());

        // (720720x - 1)(x + 963761198400) has both.
        let a = q(720_720);
        let c = q(963_761_198_400);
        let coeffs = [-c.clone(), &a * &c - q(1), a];
        let (roots, rest) = rational_roots(&coeffs);
        assert_eq!(
            roots,
            vec![
                (-c, 1),
                (BigRational::new(BigInt::from(1), BigInt::from(720_720)), 1)
            ]
        );
        assert_eq!(degree(&rest), 0);
    }

    #[test]
    fn cubic_search_is_bounded() {
        // 720720x^3 + x + 963761198400: over a hundred thousand candidates, no root.
        let coeffs = [q(963_761_198_400), q(1), q(0), q(720_720)];
        let (roots, rest) = rational_roots(&coeffs);
        assert!(roots.is_empty());
        assert_eq!(degree(&rest), 3);
    }

    #[test]
    fn large_coefficients_still_find_linear_roots() {
        // x^2 - 10^30 = (x - 10^15)(x + 10^15), beyond the divisor search.
        let big = BigRational::from_integer(BigInt::from(10u8).pow(15));
        let coeffs = [-(&big * &big), q(0), q(1)];
        let (roots, rest) = rational_roots(&coeffs);
        assert_eq!(roots, vec![(-big.clone(), 1), (big, 1)]);
        assert_eq!(degree(&rest), 0);
    }
}
