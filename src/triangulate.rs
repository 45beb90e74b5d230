// Copyright 2026 the Polyspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ear-clipping triangulation of simple polygons.

use crate::poly2::signed_area;
use crate::{Point, Poly2};

/// Threshold on doubled triangle area below which a vertex counts as
/// collinear with its neighbors, and a clipped triangle as degenerate.
const AREA_EPSILON: f64 = 1e-12;

/// How a vertex sits relative to its two ring neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VertexKind {
    /// The interior angle is less than π; a candidate ear tip.
    Convex,
    /// A reflex vertex; never an ear tip.
    Concave,
    /// Collinear with its neighbors (zero-area ear).
    Tangential,
}

/// Triangulate a simple polygon by ear clipping.
///
/// The vertices describe the polygon boundary in order, either winding;
/// the result holds the same vertex list with a triangle-list index
/// buffer of `n − 2` triangles (fewer if collinear input produced
/// degenerate triangles, which are dropped).
///
/// Non-simple (self-intersecting) input is not detected; the clipper
/// degrades to clipping the least-bad vertex and the output may
/// overlap itself.
///
/// # Panics
///
/// Panics on fewer than 3 vertices, or more than `u16::MAX`.
pub fn triangulate(vertices: &[Point]) -> Poly2 {
    assert!(vertices.len() >= 3, "triangulation needs at least 3 vertices");
    assert!(
        vertices.len() <= u16::MAX as usize,
        "vertex count exceeds index range"
    );
    // Classification is relative to the polygon's own winding.
    let orientation = if signed_area(vertices) >= 0.0 { 1.0 } else { -1.0 };
    let mut active: Vec<usize> = (0..vertices.len()).collect();
    let mut kinds: Vec<VertexKind> = (0..active.len())
        .map(|i| classify(vertices, &active, i, orientation))
        .collect();
    let mut indices: Vec<u16> = Vec::with_capacity(3 * (vertices.len() - 2));
    while active.len() > 3 {
        let pick = find_ear(vertices, &active, &kinds);
        let m = active.len();
        let prev = (pick + m - 1) % m;
        let next = (pick + 1) % m;
        indices.extend_from_slice(&[
            active[prev] as u16,
            active[pick] as u16,
            active[next] as u16,
        ]);
        active.remove(pick);
        kinds.remove(pick);
        // Only the two vertices that just became adjacent can change kind.
        let m = active.len();
        let prev = (pick + m - 1) % m;
        let next = pick % m;
        kinds[prev] = classify(vertices, &active, prev, orientation);
        kinds[next] = classify(vertices, &active, next, orientation);
    }
    indices.extend_from_slice(&[
        active[0] as u16,
        active[1] as u16,
        active[2] as u16,
    ]);
    drop_degenerate(vertices, &mut indices);
    Poly2 {
        vertices: vertices.to_vec(),
        indices,
    }
}

fn classify(vertices: &[Point], active: &[usize], i: usize, orientation: f64) -> VertexKind {
    let m = active.len();
    let p = vertices[active[(i + m - 1) % m]];
    let v = vertices[active[i]];
    let n = vertices[active[(i + 1) % m]];
    let doubled = (v - p).cross(n - v) * orientation;
    if doubled > AREA_EPSILON {
        VertexKind::Convex
    } else if doubled < -AREA_EPSILON {
        VertexKind::Concave
    } else {
        VertexKind::Tangential
    }
}

/// Pick the vertex to clip: a convex vertex whose ear is empty, else any
/// non-concave vertex (near-degenerate input), else the first vertex
/// outright (pathological, self-intersecting input).
fn find_ear(vertices: &[Point], active: &[usize], kinds: &[VertexKind]) -> usize {
    for i in 0..active.len() {
        if kinds[i] == VertexKind::Convex && ear_is_empty(vertices, active, i) {
            return i;
        }
    }
    for i in 0..active.len() {
        if kinds[i] != VertexKind::Concave {
            return i;
        }
    }
    0
}

fn ear_is_empty(vertices: &[Point], active: &[usize], i: usize) -> bool {
    let m = active.len();
    let ia = active[(i + m - 1) % m];
    let ib = active[i];
    let ic = active[(i + 1) % m];
    let (a, b, c) = (vertices[ia], vertices[ib], vertices[ic]);
    active.iter().all(|&j| {
        j == ia
            || j == ib
            || j == ic
            || !point_in_triangle(vertices[j], a, b, c)
    })
}

/// Strict interior test; points on the boundary do not count.
fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let d1 = (b - a).cross(p - a);
    let d2 = (c - b).cross(p - b);
    let d3 = (a - c).cross(p - c);
    (d1 > AREA_EPSILON && d2 > AREA_EPSILON && d3 > AREA_EPSILON)
        || (d1 < -AREA_EPSILON && d2 < -AREA_EPSILON && d3 < -AREA_EPSILON)
}

fn drop_degenerate(vertices: &[Point], indices: &mut Vec<u16>) {
    let mut kept = 0;
    for tri in 0..indices.len() / 3 {
        let a = vertices[indices[3 * tri] as usize];
        let b = vertices[indices[3 * tri + 1] as usize];
        let c = vertices[indices[3 * tri + 2] as usize];
        if (b - a).cross(c - a).abs() > AREA_EPSILON {
            for k in 0..3 {
                indices[kept + k] = indices[3 * tri + k];
            }
            kept += 3;
        }
    }
    indices.truncate(kept);
}
