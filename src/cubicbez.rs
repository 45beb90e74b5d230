// Copyright 2026 the Polyspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cubic Bézier segments.

use arrayvec::ArrayVec;

use crate::spline::MAX_DEPTH;
use crate::{Point, Polynomial, Vec2};

/// Parameter grid used when snapping projection roots, and the sample
/// count of the brute-force fallback.
const PROJECTION_STEPS: usize = 1 << MAX_DEPTH;

/// Convergence tolerance handed to the root finder by [`CubicBez::nearest`].
const PROJECTION_EPSILON: f64 = 1e-6;

/// A single cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBez {
    /// The start point.
    pub p0: Point,
    /// The first control point.
    pub p1: Point,
    /// The second control point.
    pub p2: Point,
    /// The end point.
    pub p3: Point,
}

impl CubicBez {
    /// Create a new cubic Bézier segment.
    #[inline]
    pub fn new<P: Into<Point>>(p0: P, p1: P, p2: P, p3: P) -> CubicBez {
        CubicBez {
            p0: p0.into(),
            p1: p1.into(),
            p2: p2.into(),
            p3: p3.into(),
        }
    }

    /// Evaluate the segment at parameter `t`, with the standard cubic
    /// blending weights.
    ///
    /// Generally `t` is in the range [0..1].
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let v = self.p0.to_vec2() * (mt * mt * mt)
            + (self.p1.to_vec2() * (mt * mt * 3.0)
                + (self.p2.to_vec2() * (mt * 3.0) + self.p3.to_vec2() * t) * t)
                * t;
        v.to_point()
    }

    /// The derivative vector at parameter `t`.
    pub fn tangent(&self, t: f64) -> Vec2 {
        let mt = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * mt * mt)
            + (self.p2 - self.p1) * (6.0 * mt * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Subdivide into halves, using de Casteljau.
    #[inline]
    pub fn subdivide(&self) -> (CubicBez, CubicBez) {
        self.subdivide_at(0.5)
    }

    /// Subdivide at parameter `t`, using de Casteljau.
    ///
    /// The concatenation of the two sub-segments reproduces the original
    /// curve exactly.
    pub fn subdivide_at(&self, t: f64) -> (CubicBez, CubicBez) {
        let ab = self.p0.lerp(self.p1, t);
        let bc = self.p1.lerp(self.p2, t);
        let cd = self.p2.lerp(self.p3, t);
        let abc = ab.lerp(bc, t);
        let bcd = bc.lerp(cd, t);
        let mid = abc.lerp(bcd, t);
        (
            CubicBez::new(self.p0, ab, abc, mid),
            CubicBez::new(mid, bcd, cd, self.p3),
        )
    }

    /// Length of the chord between the two anchors.
    #[inline]
    pub fn chord(&self) -> f64 {
        self.p0.distance(self.p3)
    }

    /// The larger perpendicular deviation of the two control points from
    /// the chord.
    ///
    /// This bounds how far the curve strays from a straight line, which
    /// makes it a cheap flatness measure. A zero-length chord falls back
    /// to plain distance from the start anchor.
    pub fn deviation(&self) -> f64 {
        let chord = self.p3 - self.p0;
        let len2 = chord.hypot2();
        if len2 == 0.0 {
            return self
                .p0
                .distance(self.p1)
                .max(self.p0.distance(self.p2));
        }
        let u = chord / len2.sqrt();
        let d1 = u.cross(self.p1 - self.p0).abs();
        let d2 = u.cross(self.p2 - self.p0).abs();
        d1.max(d2)
    }

    /// The degree-5 polynomial in `t` whose real roots are the candidate
    /// parameters of the point on this segment closest to `p`.
    ///
    /// The polynomial is `(B(t) − p) · B′(t)`: squared distance to the
    /// curve is stationary exactly where the offset is orthogonal to the
    /// derivative.
    pub fn projection_polynomial(&self, p: Point) -> Polynomial {
        let component = |p0: f64, p1: f64, p2: f64, p3: f64, c: f64| {
            Polynomial::new([
                -p0 + 3.0 * p1 - 3.0 * p2 + p3,
                3.0 * p0 - 6.0 * p1 + 3.0 * p2,
                -3.0 * p0 + 3.0 * p1,
                p0 - c,
            ])
        };
        let x = component(self.p0.x, self.p1.x, self.p2.x, self.p3.x, p.x);
        let y = component(self.p0.y, self.p1.y, self.p2.y, self.p3.y, p.y);
        &x * &x.derivative() + &y * &y.derivative()
    }

    /// Find the point on the segment nearest `p`.
    ///
    /// Returns the parameter and the squared distance. Candidate
    /// parameters come from the roots of [`projection_polynomial`],
    /// snapped to a grid of 2⁸ steps, and are compared against both
    /// endpoints. If root finding fails to converge, a brute-force sweep
    /// of the same grid is used instead, accepting the inexactness.
    ///
    /// [`projection_polynomial`]: CubicBez::projection_polynomial
    pub fn nearest(&self, p: Point) -> (f64, f64) {
        let steps = PROJECTION_STEPS as f64;
        match self.projection_polynomial(p).roots(PROJECTION_EPSILON) {
            Some(roots) => {
                let mut candidates: ArrayVec<f64, 7> = ArrayVec::new();
                candidates.push(0.0);
                candidates.push(1.0);
                for root in roots {
                    if root > 0.0 && root < 1.0 {
                        candidates.push((root * steps).round() / steps);
                    }
                }
                self.pick_nearest(p, candidates.iter().copied())
            }
            None => self.pick_nearest(p, (0..=PROJECTION_STEPS).map(|i| i as f64 / steps)),
        }
    }

    fn pick_nearest(&self, p: Point, candidates: impl Iterator<Item = f64>) -> (f64, f64) {
        let mut best_t = 0.0;
        let mut best_d = f64::INFINITY;
        for t in candidates {
            let d = self.eval(t).distance_squared(p);
            if d < best_d {
                best_t = t;
                best_d = d;
            }
        }
        (best_t, best_d)
    }
}
