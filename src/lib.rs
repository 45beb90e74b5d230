// Copyright 2026 the Polyspline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D curve and polygon math for editors and games.
//!
//! The polyspline library contains the geometry kernel of a spline
//! editor: editable sequences of cubic Bézier segments, dense
//! polynomials with approximate real root extraction (used for
//! projecting points onto curves), and the mesh generators that turn
//! curve approximations into renderable triangle lists — ear-clipping
//! triangulation and stroke extrusion with joint and cap styles.
//!
//! It produces and consumes plain vertex and index buffers; turning
//! those into draw calls is the embedding application's business.
//!
//! # Examples
//!
//! Editing and flattening a spline:
//! ```
//! use polyspline::{Criterion, CubicSpline, Point};
//!
//! let mut spline = CubicSpline::new(Point::ZERO, Point::new(4.0, 0.0));
//! spline.add_anchor(Point::new(4.0, 4.0));
//! spline.insert_anchor(0.5);
//! assert_eq!(spline.size(), 3);
//!
//! let outline = spline.approximate(0.25, Criterion::Distance);
//! assert_eq!(outline.first(), Some(&Point::ZERO));
//! assert_eq!(outline.last(), Some(&Point::new(4.0, 4.0)));
//! ```
//!
//! Meshing the result:
//! ```
//! use polyspline::{extrude, triangulate, Extrusion, Joint, Point};
//!
//! let square = [
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(0.0, 1.0),
//! ];
//! let fill = triangulate(&square);
//! assert_eq!(fill.indices.len(), 6);
//!
//! let outline = extrude(&square, true, &Extrusion::new(0.1).with_joint(Joint::Bevel));
//! assert!(outline.mesh_area() > 0.0);
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![allow(clippy::many_single_char_names)]

mod cubicbez;
mod extrude;
mod point;
mod poly2;
mod polynomial;
mod spline;
mod triangulate;
mod vec2;

pub use crate::cubicbez::*;
pub use crate::extrude::*;
pub use crate::point::*;
pub use crate::poly2::*;
pub use crate::polynomial::*;
pub use crate::spline::*;
pub use crate::triangulate::*;
pub use crate::vec2::*;
