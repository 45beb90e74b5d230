// Copyright 2026 the Polyspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extrusion of a polyline into a solid stroke ribbon.

use smallvec::SmallVec;

use crate::{Point, Poly2, Vec2};

/// Triangle count of the arc fan approximating a round joint.
const JOINT_PRECISION: usize = 10;

/// Triangle count of the semicircular fan approximating a round cap.
const CAP_PRECISION: usize = 10;

/// Direction changes smaller than this are treated as straight and get
/// no joint geometry; this also covers the parallel-edge case where a
/// mitre has no intersection point.
const JOINT_EPSILON: f64 = 1e-12;

/// Defines the connection between two segments of an extruded path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Joint {
    /// No fill; adjacent quads leave a notch on the outside of the turn.
    None,
    /// A single triangle spanning the notch.
    Bevel,
    /// The offset edges are extended to their intersection point. If the
    /// edges are parallel the mitre point is silently omitted.
    Mitre,
    /// A fan of triangles approximating an arc.
    Round,
}

/// Defines the shape drawn at the ends of an open extruded path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cap {
    /// Flat end, flush with the endpoint.
    None,
    /// Square end extending half the stroke width past the endpoint.
    Square,
    /// Semicircular end with radius equal to half the stroke width.
    Round,
}

/// Describes the shape of an extruded stroke.
#[derive(Clone, Copy, Debug)]
pub struct Extrusion {
    /// Width of the stroke.
    pub width: f64,
    /// Style for connecting segments of the stroke.
    pub joint: Joint,
    /// Style for capping the ends of an open path.
    pub cap: Cap,
}

impl Extrusion {
    /// Creates a new extrusion style with the specified stroke width.
    ///
    /// # Panics
    ///
    /// Panics unless the width is positive.
    pub fn new(width: f64) -> Extrusion {
        assert!(width > 0.0, "stroke width must be positive");
        Extrusion {
            width,
            joint: Joint::Round,
            cap: Cap::Round,
        }
    }

    /// Builder method for setting the joint style.
    pub fn with_joint(mut self, joint: Joint) -> Extrusion {
        self.joint = joint;
        self
    }

    /// Builder method for setting the cap style.
    pub fn with_cap(mut self, cap: Cap) -> Extrusion {
        self.cap = cap;
        self
    }
}

struct MeshBuilder {
    vertices: Vec<Point>,
    indices: Vec<u16>,
}

impl MeshBuilder {
    fn push(&mut self, p: Point) -> u16 {
        assert!(
            self.vertices.len() < u16::MAX as usize,
            "extrusion exceeds index range"
        );
        self.vertices.push(p);
        (self.vertices.len() - 1) as u16
    }

    fn triangle(&mut self, a: Point, b: Point, c: Point) {
        let ia = self.push(a);
        let ib = self.push(b);
        let ic = self.push(c);
        self.indices.extend_from_slice(&[ia, ib, ic]);
    }
}

fn rotate(v: Vec2, theta: f64) -> Vec2 {
    let (sin, cos) = theta.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Extrude an ordered polyline into a solid ribbon of the given stroke.
///
/// Each segment contributes a quad of two offset edges at ±half the
/// stroke width; shared corners are stitched per the joint style. Open
/// paths are finished with the cap style at both ends; a closed path
/// wraps around instead (the closing segment is synthesized when the
/// last point does not coincide with the first) and never receives
/// caps.
///
/// The result is a triangle mesh. Consecutive duplicate points are
/// dropped before extrusion.
///
/// # Panics
///
/// Panics if fewer than two distinct points remain.
pub fn extrude(path: &[Point], closed: bool, style: &Extrusion) -> Poly2 {
    let mut pts: SmallVec<[Point; 16]> = SmallVec::new();
    for &p in path {
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    if closed && pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    assert!(pts.len() >= 2, "extrusion needs at least two distinct points");

    let half = 0.5 * style.width;
    let count = pts.len();
    let segments = if closed { count } else { count - 1 };
    let mut mesh = MeshBuilder {
        vertices: Vec::new(),
        indices: Vec::new(),
    };

    for i in 0..segments {
        let a = pts[i];
        let b = pts[(i + 1) % count];
        let n = (b - a).normalize().turn_90() * half;
        mesh.triangle(a + n, b + n, b - n);
        mesh.triangle(a + n, b - n, a - n);
    }

    // Stitch every shared corner: between segment i and i+1 for open
    // paths, wrapping around for closed ones.
    let corners = if closed { segments } else { segments - 1 };
    for i in 0..corners {
        let p = pts[(i + 1) % count];
        let u1 = (p - pts[i]).normalize();
        let u2 = (pts[(i + 2) % count] - p).normalize();
        let turn = u1.cross(u2);
        if turn.abs() <= JOINT_EPSILON {
            continue;
        }
        // The notch opens on the outside of the turn.
        let side = if turn > 0.0 { -half } else { half };
        let off1 = p + u1.turn_90() * side;
        let off2 = p + u2.turn_90() * side;
        match style.joint {
            Joint::None => {}
            Joint::Bevel => mesh.triangle(p, off1, off2),
            Joint::Mitre => {
                let t = (off2 - off1).cross(u2) / u1.cross(u2);
                let m = off1 + u1 * t;
                mesh.triangle(p, off1, m);
                mesh.triangle(p, m, off2);
            }
            Joint::Round => {
                let d1 = off1 - p;
                let d2 = off2 - p;
                let sweep = d1.cross(d2).atan2(d1.dot(d2));
                let step = sweep / JOINT_PRECISION as f64;
                for k in 0..JOINT_PRECISION {
                    let from = rotate(d1, step * k as f64);
                    let to = rotate(d1, step * (k + 1) as f64);
                    mesh.triangle(p, p + from, p + to);
                }
            }
        }
    }

    if !closed {
        let start_dir = (pts[1] - pts[0]).normalize();
        let end_dir = (pts[count - 1] - pts[count - 2]).normalize();
        add_cap(&mut mesh, style.cap, pts[0], -start_dir, half);
        add_cap(&mut mesh, style.cap, pts[count - 1], end_dir, half);
    }

    Poly2 {
        vertices: mesh.vertices,
        indices: mesh.indices,
    }
}

/// Close off one end of the ribbon. `out` is the unit direction pointing
/// away from the path at this endpoint.
fn add_cap(mesh: &mut MeshBuilder, cap: Cap, p: Point, out: Vec2, half: f64) {
    // The flat end edge runs from `left` to `right` across the stroke.
    let left = out.turn_90() * half;
    match cap {
        Cap::None => {}
        Cap::Square => {
            let q = p + out * half;
            mesh.triangle(p + left, q + left, q - left);
            mesh.triangle(p + left, q - left, p - left);
        }
        Cap::Round => {
            // Semicircular fan from one edge of the stroke to the
            // other, passing through the outward direction.
            let step = -core::f64::consts::PI / CAP_PRECISION as f64;
            for k in 0..CAP_PRECISION {
                let from = rotate(left, step * k as f64);
                let to = rotate(left, step * (k + 1) as f64);
                mesh.triangle(p, p + from, p + to);
            }
        }
    }
}
