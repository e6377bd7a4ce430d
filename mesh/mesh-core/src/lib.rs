//! Core polygon mesh types for meshcheck.
//!
//! This crate provides the foundational data model shared by the analysis
//! and I/O crates:
//!
//! - [`Vertex`] - A point in 3D space with a normal and a texture coordinate
//! - [`Face`] - A polygon referencing vertices (and texture coordinates) by index
//! - [`PolygonMesh`] - A named mesh made of vertices and faces
//! - [`MeshSource`] - The read-only contract the analysis engine consumes
//!
//! # Attribute Layout
//!
//! Unlike triangle-soup formats, every vertex carries a full attribute set
//! (position, normal, texture coordinate) as plain fields. Meshes coming
//! from sources without normals or texture coordinates use zero vectors.
//!
//! # Units and Precision
//!
//! The library is unit-agnostic. All coordinates are `f64`.
//!
//! # Example
//!
//! ```
//! use mesh_core::{Face, PolygonMesh, Vertex};
//!
//! let mut mesh = PolygonMesh::new("triangle");
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push(Face::triangle(0, 1, 2));
//!
//! assert_eq!(mesh.vertex_count(), 3);
//! assert_eq!(mesh.face_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod face;
mod mesh;
mod traits;
mod vertex;

pub use face::Face;
pub use mesh::PolygonMesh;
pub use traits::MeshSource;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector2, Vector3};
