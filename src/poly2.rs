// Copyright 2026 the Polyspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A flat polygon mesh: vertices plus an index list.

use crate::{Point, Vec2};

/// A polygon given by a vertex list and an index list.
///
/// The meaning of the index list — triangle list or wireframe
/// traversal — is determined by how it was generated, not recorded
/// here; callers are expected to track which traversal applies. The
/// representation is deliberately the flat buffer pair a renderer
/// consumes directly.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Poly2 {
    /// The vertex positions.
    pub vertices: Vec<Point>,
    /// Indices into `vertices`.
    pub indices: Vec<u16>,
}

impl Poly2 {
    /// Create a polygon from vertices and indices.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range.
    pub fn new(vertices: Vec<Point>, indices: Vec<u16>) -> Poly2 {
        assert!(
            indices.iter().all(|&i| (i as usize) < vertices.len()),
            "index out of range"
        );
        Poly2 { vertices, indices }
    }

    /// Create an indexless polygon from a vertex ring.
    pub fn from_vertices(vertices: &[Point]) -> Poly2 {
        Poly2 {
            vertices: vertices.to_vec(),
            indices: Vec::new(),
        }
    }

    /// Create an indexless polygon from interleaved x, y coordinates.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate count is odd.
    pub fn from_coords(coords: &[f64]) -> Poly2 {
        assert!(coords.len() % 2 == 0, "coordinates must come in pairs");
        Poly2 {
            vertices: coords
                .chunks_exact(2)
                .map(|c| Point::new(c[0], c[1]))
                .collect(),
            indices: Vec::new(),
        }
    }

    /// Translate every vertex by `v`.
    pub fn translate(&mut self, v: Vec2) {
        for p in &mut self.vertices {
            *p += v;
        }
    }

    /// Scale every vertex about the origin.
    pub fn scale(&mut self, factor: f64) {
        for p in &mut self.vertices {
            *p = Point::new(p.x * factor, p.y * factor);
        }
    }

    /// The axis-aligned bounding box, as `(min, max)` corners.
    ///
    /// Returns two zero points for an empty vertex list.
    pub fn bounds(&self) -> (Point, Point) {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        if self.vertices.is_empty() {
            return (Point::ZERO, Point::ZERO);
        }
        for p in &self.vertices {
            min = Point::new(min.x.min(p.x), min.y.min(p.y));
            max = Point::new(max.x.max(p.x), max.y.max(p.y));
        }
        (min, max)
    }

    /// The signed area of the vertex ring, by the shoelace formula.
    ///
    /// Positive for counter-clockwise winding (y-up). This reads the
    /// vertex list as a closed loop and ignores the index list.
    pub fn ring_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// The total unsigned area of the mesh, reading the index list as
    /// triangles.
    pub fn mesh_area(&self) -> f64 {
        self.indices
            .chunks_exact(3)
            .map(|tri| {
                let a = self.vertices[tri[0] as usize];
                let b = self.vertices[tri[1] as usize];
                let c = self.vertices[tri[2] as usize];
                0.5 * (b - a).cross(c - a).abs()
            })
            .sum()
    }
}

/// Signed area of a vertex ring: positive for counter-clockwise winding.
pub(crate) fn signed_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        sum += p.x * q.y - q.x * p.y;
    }
    0.5 * sum
}
