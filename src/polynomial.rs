// Copyright 2026 the Polyspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polynomials of dynamic (run-time) degree, with approximate real
//! root extraction.

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Give up after this many consecutive failed random restarts in
/// [`Polynomial::roots`].
const MAX_ATTEMPTS: usize = 10;

/// Cap on Newton iterations per quadratic-factor search.
const BAIRSTOW_ITERATIONS: usize = 50;

/// Multiplication switches from the iterative to the recursive method
/// above this degree.
const MULTIPLY_THRESHOLD: usize = 5;

/// Seed for the restart generator used by [`Polynomial::roots`], so that
/// root extraction is reproducible run to run.
const ROOTS_SEED: u64 = 0x8566_2e10_7f4b_3c25;

/// A polynomial with dense `f64` coefficients, highest degree first.
///
/// For example, `x² − 3x + 2` is `Polynomial::new([1.0, -3.0, 2.0])`.
/// The degree is one less than the number of coefficients. A valid
/// polynomial has a non-zero leading coefficient unless it consists of
/// a single term; the zero polynomial is the single coefficient `[0.0]`.
///
/// These are plain values: they are cheap to clone and carry no
/// lifecycle beyond their coefficient storage.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polynomial {
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients, highest degree first.
    ///
    /// # Panics
    ///
    /// Panics if `coeffs` is empty.
    pub fn new(coeffs: impl Into<Vec<f64>>) -> Polynomial {
        let coeffs = coeffs.into();
        assert!(!coeffs.is_empty(), "a polynomial needs at least one coefficient");
        Polynomial { coeffs }
    }

    /// The zero polynomial.
    pub fn zero() -> Polynomial {
        Polynomial { coeffs: vec![0.0] }
    }

    /// The constant polynomial `c`.
    pub fn constant(c: f64) -> Polynomial {
        Polynomial { coeffs: vec![c] }
    }

    /// The coefficients, highest degree first.
    #[inline]
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// The degree of this polynomial.
    ///
    /// This only counts stored coefficients; call [`validate`] first if
    /// leading zeros may be present.
    ///
    /// [`validate`]: Polynomial::validate
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Whether this is the zero polynomial.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0] == 0.0
    }

    /// Whether this polynomial is constant (degree 0).
    #[inline]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Whether the leading coefficient is non-zero (or the polynomial is
    /// a single term).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.coeffs.len() == 1 || self.coeffs[0] != 0.0
    }

    /// Strip leading zero coefficients, re-establishing the validity
    /// invariant.
    pub fn validate(&mut self) {
        let lead = self.coeffs.iter().take_while(|&&c| c == 0.0).count();
        let lead = lead.min(self.coeffs.len() - 1);
        if lead > 0 {
            self.coeffs.drain(..lead);
        }
    }

    /// Evaluate at `x` by Horner's rule.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// The derivative of this polynomial.
    pub fn derivative(&self) -> Polynomial {
        let n = self.coeffs.len();
        if n == 1 {
            return Polynomial::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .take(n - 1)
            .enumerate()
            .map(|(i, &c)| c * (n - 1 - i) as f64)
            .collect();
        Polynomial { coeffs }
    }

    /// Divide in place by `divisor`, leaving the quotient in `self` and
    /// returning the remainder.
    ///
    /// This is synthetic (Horner-style) division: the quotient and
    /// remainder are produced in a single forward pass over the
    /// coefficient buffer.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is invalid or the zero polynomial.
    pub fn synthetic_divide(&mut self, divisor: &Polynomial) -> Polynomial {
        assert!(divisor.is_valid(), "division by an unnormalized polynomial");
        assert!(!divisor.is_zero(), "division by the zero polynomial");
        let m = divisor.coeffs.len();
        if m == 1 {
            let recip = divisor.coeffs[0].recip();
            for a in &mut self.coeffs {
                *a *= recip;
            }
            return Polynomial::zero();
        }
        let n = self.coeffs.len();
        if n < m {
            let rem = core::mem::replace(&mut self.coeffs, vec![0.0]);
            return Polynomial { coeffs: rem };
        }
        let lead = divisor.coeffs[0];
        for k in 0..=(n - m) {
            self.coeffs[k] /= lead;
            let q = self.coeffs[k];
            if q != 0.0 {
                for j in 1..m {
                    self.coeffs[k + j] -= q * divisor.coeffs[j];
                }
            }
        }
        let mut rem = Polynomial {
            coeffs: self.coeffs.split_off(n - m + 1),
        };
        rem.validate();
        rem
    }

    /// Find approximate real roots.
    ///
    /// Exact zero roots are stripped off as factors of `x`; the rest of
    /// the polynomial is reduced two degrees at a time by quadratic
    /// factors located with Bairstow's method, restarted from random
    /// trial divisors when an iteration fails to converge. Each
    /// quadratic factor always contributes exactly two entries to the
    /// result; a complex conjugate pair is reported as two NaN values so
    /// downstream indexing is preserved.
    ///
    /// Returns `None` if every random restart fails to converge. Callers that cannot tolerate that outcome should
    /// fall back to a brute-force parameter sweep.
    ///
    /// The restarts are drawn from a fixed-seed generator, so results
    /// are reproducible; use [`roots_with_rng`] to control the generator.
    ///
    /// [`roots_with_rng`]: Polynomial::roots_with_rng
    pub fn roots(&self, epsilon: f64) -> Option<Vec<f64>> {
        let mut rng = SmallRng::seed_from_u64(ROOTS_SEED);
        self.roots_with_rng(&mut rng, epsilon)
    }

    /// Find approximate real roots, drawing Bairstow restarts from `rng`.
    ///
    /// See [`roots`](Polynomial::roots) for the root contract.
    pub fn roots_with_rng(&self, rng: &mut impl Rng, epsilon: f64) -> Option<Vec<f64>> {
        assert!(epsilon > 0.0, "epsilon must be positive");
        let mut poly = self.clone();
        poly.validate();
        let mut roots = Vec::with_capacity(poly.degree());
        // Exact zero roots come off as factors of x before iterating.
        while poly.coeffs.len() > 1 && poly.coeffs[poly.coeffs.len() - 1] == 0.0 {
            poly.coeffs.pop();
            roots.push(0.0);
        }
        while poly.degree() > 2 {
            let mut attempts = 0;
            loop {
                let r = rng.random_range(-1.0..1.0);
                let s = rng.random_range(-1.0..1.0);
                if let Some((r, s)) = poly.bairstow_factor(r, s, epsilon) {
                    let [r0, r1] = quadratic_roots(r, s);
                    roots.push(r0);
                    roots.push(r1);
                    break;
                }
                attempts += 1;
                if attempts == MAX_ATTEMPTS {
                    return None;
                }
            }
        }
        match poly.coeffs.len() {
            2 => roots.push(-poly.coeffs[1] / poly.coeffs[0]),
            3 => {
                let recip = poly.coeffs[0].recip();
                let [r0, r1] = quadratic_roots(poly.coeffs[1] * recip, poly.coeffs[2] * recip);
                roots.push(r0);
                roots.push(r1);
            }
            _ => {}
        }
        Some(roots)
    }

    /// One Bairstow quadratic-factor search.
    ///
    /// Newton iteration on the trial divisor `x² + rx + s`, with the
    /// correction terms obtained from two successive synthetic divisions.
    /// On convergence, `self` is replaced by the quotient and the refined
    /// `(r, s)` is returned. A singular correction system or exhaustion
    /// of the iteration cap reports failure and leaves `self` untouched.
    fn bairstow_factor(&mut self, mut r: f64, mut s: f64, epsilon: f64) -> Option<(f64, f64)> {
        let n = self.coeffs.len() - 1;
        debug_assert!(n >= 3, "factor search needs degree at least 3");
        let a = self.coeffs.clone();
        let mut b = vec![0.0; n + 1];
        let mut c = vec![0.0; n + 1];
        let divide = |b: &mut Vec<f64>, r: f64, s: f64| {
            b[0] = a[0];
            b[1] = a[1] - r * b[0];
            for k in 2..=n {
                b[k] = a[k] - r * b[k - 1] - s * b[k - 2];
            }
        };
        for _ in 0..BAIRSTOW_ITERATIONS {
            divide(&mut b, r, s);
            c[0] = b[0];
            c[1] = b[1] - r * c[0];
            for k in 2..=n {
                c[k] = b[k] - r * c[k - 1] - s * c[k - 2];
            }
            let det = c[n - 2] * c[n - 2] - c[n - 3] * c[n - 1];
            if det == 0.0 {
                return None;
            }
            let dr = (b[n - 1] * c[n - 2] - b[n] * c[n - 3]) / det;
            let ds = (b[n] * c[n - 2] - b[n - 1] * c[n - 1]) / det;
            r += dr;
            s += ds;
            if dr.abs() <= epsilon * r.abs().max(epsilon) && ds.abs() <= epsilon * s.abs().max(epsilon)
            {
                divide(&mut b, r, s);
                self.coeffs.truncate(n - 1);
                self.coeffs.copy_from_slice(&b[..n - 1]);
                return Some((r, s));
            }
        }
        None
    }
}

/// Roots of the monic quadratic `x² + rx + s`.
///
/// Always two entries; a complex conjugate pair is reported as NaN.
fn quadratic_roots(r: f64, s: f64) -> [f64; 2] {
    let disc = r * r - 4.0 * s;
    if disc < 0.0 {
        [f64::NAN, f64::NAN]
    } else {
        let sq = disc.sqrt();
        [0.5 * (-r + sq), 0.5 * (-r - sq)]
    }
}

/// Iterative O(n·m) coefficient convolution.
fn multiply_iterative(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Accumulate `src`, shifted up by `x^shift`, into `dest`.
///
/// Coefficients are highest degree first, so degree 0 sits at the end of
/// each slice.
fn accumulate(dest: &mut [f64], src: &[f64], shift: usize) {
    let n = dest.len();
    let m = src.len();
    for i in 0..m {
        dest[n - 1 - shift - i] += src[m - 1 - i];
    }
}

/// Recursive divide-and-conquer multiplication.
///
/// Each operand is split in half, the four sub-products are computed
/// recursively, and the pieces are recombined with offset additions.
fn multiply_recursive(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.len() <= MULTIPLY_THRESHOLD + 1 || b.len() <= MULTIPLY_THRESHOLD + 1 {
        return multiply_iterative(a, b);
    }
    // Low halves hold the x^0..x^(k-1) terms, which is the tail of the
    // highest-first layout.
    let ka = a.len() / 2;
    let kb = b.len() / 2;
    let (a_hi, a_lo) = a.split_at(a.len() - ka);
    let (b_hi, b_lo) = b.split_at(b.len() - kb);
    let mut out = vec![0.0; a.len() + b.len() - 1];
    accumulate(&mut out, &multiply_recursive(a_hi, b_hi), ka + kb);
    accumulate(&mut out, &multiply_recursive(a_hi, b_lo), ka);
    accumulate(&mut out, &multiply_recursive(a_lo, b_hi), kb);
    accumulate(&mut out, &multiply_recursive(a_lo, b_lo), 0);
    out
}

impl AddAssign<&Polynomial> for Polynomial {
    fn add_assign(&mut self, rhs: &Polynomial) {
        if rhs.coeffs.len() > self.coeffs.len() {
            let pad = rhs.coeffs.len() - self.coeffs.len();
            self.coeffs.splice(0..0, core::iter::repeat(0.0).take(pad));
        }
        let off = self.coeffs.len() - rhs.coeffs.len();
        for (i, &c) in rhs.coeffs.iter().enumerate() {
            self.coeffs[off + i] += c;
        }
        self.validate();
    }
}

impl SubAssign<&Polynomial> for Polynomial {
    fn sub_assign(&mut self, rhs: &Polynomial) {
        if rhs.coeffs.len() > self.coeffs.len() {
            let pad = rhs.coeffs.len() - self.coeffs.len();
            self.coeffs.splice(0..0, core::iter::repeat(0.0).take(pad));
        }
        let off = self.coeffs.len() - rhs.coeffs.len();
        for (i, &c) in rhs.coeffs.iter().enumerate() {
            self.coeffs[off + i] -= c;
        }
        self.validate();
    }
}

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: Polynomial) -> Polynomial {
        self += &rhs;
        self
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(mut self, rhs: Polynomial) -> Polynomial {
        self -= &rhs;
        self
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let coeffs = if self.degree() <= MULTIPLY_THRESHOLD || rhs.degree() <= MULTIPLY_THRESHOLD {
            multiply_iterative(&self.coeffs, &rhs.coeffs)
        } else {
            multiply_recursive(&self.coeffs, &rhs.coeffs)
        };
        let mut out = Polynomial { coeffs };
        out.validate();
        out
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: Polynomial) -> Polynomial {
        &self * &rhs
    }
}

impl MulAssign<&Polynomial> for Polynomial {
    fn mul_assign(&mut self, rhs: &Polynomial) {
        *self = &*self * rhs;
    }
}

impl Div<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn div(self, rhs: &Polynomial) -> Polynomial {
        let mut out = self.clone();
        out.synthetic_divide(rhs);
        out
    }
}

impl Div for Polynomial {
    type Output = Polynomial;

    fn div(mut self, rhs: Polynomial) -> Polynomial {
        self.synthetic_divide(&rhs);
        self
    }
}

impl DivAssign<&Polynomial> for Polynomial {
    fn div_assign(&mut self, rhs: &Polynomial) {
        self.synthetic_divide(rhs);
    }
}

impl Rem<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    fn rem(self, rhs: &Polynomial) -> Polynomial {
        self.clone().synthetic_divide(rhs)
    }
}

impl Rem for Polynomial {
    type Output = Polynomial;

    fn rem(mut self, rhs: Polynomial) -> Polynomial {
        self.synthetic_divide(&rhs)
    }
}

impl RemAssign<&Polynomial> for Polynomial {
    fn rem_assign(&mut self, rhs: &Polynomial) {
        *self = self.clone().synthetic_divide(rhs);
    }
}

// Scalar arithmetic treats the scalar as the constant polynomial, so
// `+`/`-` touch only the constant term, `*`/`/` scale every
// coefficient, and `%` by a non-zero constant is identically zero.

impl AddAssign<f64> for Polynomial {
    fn add_assign(&mut self, rhs: f64) {
        let last = self.coeffs.len() - 1;
        self.coeffs[last] += rhs;
        self.validate();
    }
}

impl Add<f64> for Polynomial {
    type Output = Polynomial;

    fn add(mut self, rhs: f64) -> Polynomial {
        self += rhs;
        self
    }
}

impl SubAssign<f64> for Polynomial {
    fn sub_assign(&mut self, rhs: f64) {
        let last = self.coeffs.len() - 1;
        self.coeffs[last] -= rhs;
        self.validate();
    }
}

impl Sub<f64> for Polynomial {
    type Output = Polynomial;

    fn sub(mut self, rhs: f64) -> Polynomial {
        self -= rhs;
        self
    }
}

impl MulAssign<f64> for Polynomial {
    fn mul_assign(&mut self, rhs: f64) {
        if rhs == 0.0 {
            *self = Polynomial::zero();
            return;
        }
        for c in &mut self.coeffs {
            *c *= rhs;
        }
    }
}

impl Mul<f64> for Polynomial {
    type Output = Polynomial;

    fn mul(mut self, rhs: f64) -> Polynomial {
        self *= rhs;
        self
    }
}

impl DivAssign<f64> for Polynomial {
    fn div_assign(&mut self, rhs: f64) {
        assert!(rhs != 0.0, "division by zero");
        let recip = rhs.recip();
        for c in &mut self.coeffs {
            *c *= recip;
        }
    }
}

impl Div<f64> for Polynomial {
    type Output = Polynomial;

    fn div(mut self, rhs: f64) -> Polynomial {
        self /= rhs;
        self
    }
}

impl RemAssign<f64> for Polynomial {
    fn rem_assign(&mut self, rhs: f64) {
        assert!(rhs != 0.0, "division by zero");
        *self = Polynomial::zero();
    }
}

impl Rem<f64> for Polynomial {
    type Output = Polynomial;

    fn rem(mut self, rhs: f64) -> Polynomial {
        self %= rhs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_coeffs(p: &Polynomial, expected: &[f64]) {
        assert_eq!(p.coeffs(), expected);
    }

    #[test]
    fn validity() {
        let mut p = Polynomial::new([0.0, 0.0, 1.0, 2.0]);
        assert!(!p.is_valid());
        p.validate();
        assert_coeffs(&p, &[1.0, 2.0]);
        let mut z = Polynomial::new([0.0, 0.0]);
        z.validate();
        assert!(z.is_zero());
        assert!(z.is_valid());
    }

    #[test]
    fn evaluate_horner() {
        // x³ - 2x + 5
        let p = Polynomial::new([1.0, 0.0, -2.0, 5.0]);
        assert_eq!(p.evaluate(0.0), 5.0);
        assert_eq!(p.evaluate(2.0), 9.0);
        assert_eq!(p.evaluate(-1.0), 6.0);
    }

    #[test]
    fn derivative() {
        let p = Polynomial::new([3.0, 0.0, -2.0, 5.0]);
        assert_coeffs(&p.derivative(), &[9.0, 0.0, -2.0]);
        assert!(Polynomial::constant(4.0).derivative().is_zero());
    }

    #[test]
    fn add_sub_roundtrip() {
        let a = Polynomial::new([2.0, -1.0, 4.0, 0.5]);
        let b = Polynomial::new([1.0, 3.0]);
        let sum = &a + &b;
        assert_coeffs(&sum, &[2.0, -1.0, 5.0, 3.5]);
        let back = sum - b;
        assert_coeffs(&back, a.coeffs());
    }

    #[test]
    fn add_cancels_leading() {
        let a = Polynomial::new([1.0, 0.0, 2.0]);
        let b = Polynomial::new([-1.0, 0.0, 1.0]);
        let sum = &a + &b;
        assert_coeffs(&sum, &[3.0]);
    }

    #[test]
    fn multiply_matches_evaluation() {
        let a = Polynomial::new([1.0, -3.0, 2.0]);
        let b = Polynomial::new([2.0, 0.0, 1.0, -1.0]);
        let prod = &a * &b;
        for i in -4..=4 {
            let x = 0.5 * i as f64;
            let expect = a.evaluate(x) * b.evaluate(x);
            assert!((prod.evaluate(x) - expect).abs() < 1e-9 * expect.abs().max(1.0));
        }
    }

    #[test]
    fn multiply_recursive_matches_iterative() {
        // Degree 9 times degree 8 goes through the recursive path.
        let a = Polynomial::new((0..10).map(|i| (i as f64 * 0.7).sin() + 1.5).collect::<Vec<_>>());
        let b = Polynomial::new((0..9).map(|i| (i as f64 * 1.3).cos() - 0.5).collect::<Vec<_>>());
        let fast = &a * &b;
        let slow = multiply_iterative(a.coeffs(), b.coeffs());
        assert_eq!(fast.coeffs().len(), slow.len());
        for (f, s) in fast.coeffs().iter().zip(&slow) {
            assert!((f - s).abs() < 1e-12);
        }
    }

    #[test]
    fn synthetic_division_reconstructs() {
        let a = Polynomial::new([1.0, -2.0, 0.0, 3.0, -4.0]);
        let b = Polynomial::new([2.0, 1.0, -1.0]);
        let q = &a / &b;
        let r = &a % &b;
        let back = q * b + r;
        for (x, y) in back.coeffs().iter().zip(a.coeffs()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn division_by_larger_degree() {
        let a = Polynomial::new([1.0, 1.0]);
        let b = Polynomial::new([1.0, 0.0, 0.0]);
        let q = &a / &b;
        assert!(q.is_zero());
        let r = &a % &b;
        assert_coeffs(&r, a.coeffs());
    }

    #[test]
    #[should_panic(expected = "zero polynomial")]
    fn division_by_zero_polynomial() {
        let mut a = Polynomial::new([1.0, 1.0]);
        let _ = a.synthetic_divide(&Polynomial::zero());
    }

    #[test]
    fn scalar_ops() {
        let p = Polynomial::new([2.0, -4.0, 6.0]);
        assert_coeffs(&(p.clone() + 1.0), &[2.0, -4.0, 7.0]);
        assert_coeffs(&(p.clone() - 6.0), &[2.0, -4.0, 0.0]);
        assert_coeffs(&(p.clone() * 0.5), &[1.0, -2.0, 3.0]);
        assert_coeffs(&(p.clone() / 2.0), &[1.0, -2.0, 3.0]);
        assert!((p * 0.0).is_zero());
        assert!((Polynomial::new([1.0, 1.0]) % 3.0).is_zero());
    }

    #[test]
    fn quadratic_scenario() {
        // x² - 3x + 2 = (x - 1)(x - 2)
        let p = Polynomial::new([1.0, -3.0, 2.0]);
        let roots = p.roots(1e-6).expect("direct quadratic never fails");
        assert_eq!(roots.len(), 2);
        assert!((roots[0] - 2.0).abs() < 1e-9);
        assert!((roots[1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn complex_pair_is_nan() {
        // x² + 1 has no real roots.
        let p = Polynomial::new([1.0, 0.0, 1.0]);
        let roots = p.roots(1e-6).unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots[0].is_nan() && roots[1].is_nan());
    }

    #[test]
    fn zero_roots_stripped() {
        // x³ - x² = x²(x - 1)
        let p = Polynomial::new([1.0, -1.0, 0.0, 0.0]);
        let roots = p.roots(1e-6).unwrap();
        assert_eq!(roots.len(), 3);
        assert_eq!(roots[0], 0.0);
        assert_eq!(roots[1], 0.0);
        assert!((roots[2] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn quartic_residuals() {
        // (x - 1)(x + 2)(x - 3)(x + 0.5)
        let p = Polynomial::new([1.0, -1.0])
            * Polynomial::new([1.0, 2.0])
            * Polynomial::new([1.0, -3.0])
            * Polynomial::new([1.0, 0.5]);
        let roots = p.roots(1e-9).expect("well separated real roots");
        assert_eq!(roots.len(), 4);
        for &r in &roots {
            assert!(!r.is_nan());
            assert!(p.evaluate(r).abs() < 1e-6, "residual too large at {r}");
        }
    }

    #[test]
    fn roots_reproducible() {
        // All roots real, so the result is NaN-free and comparable.
        let p = Polynomial::new([1.0, -1.0])
            * Polynomial::new([1.0, 1.0])
            * Polynomial::new([1.0, -2.0])
            * Polynomial::new([1.0, 2.0])
            * Polynomial::new([1.0, 0.5]);
        let a = p.roots(1e-9);
        let b = p.roots(1e-9);
        assert_eq!(a, b);
        assert!(a.unwrap().iter().all(|r| !r.is_nan()));
    }

    #[test]
    fn linear_and_constant() {
        let p = Polynomial::new([2.0, -8.0]);
        assert_eq!(p.roots(1e-6).unwrap(), vec![4.0]);
        assert!(Polynomial::constant(3.0).roots(1e-6).unwrap().is_empty());
    }
}
