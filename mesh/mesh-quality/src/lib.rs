//! Mesh quality analysis.
//!
//! This crate takes a polygonal surface mesh and reports geometric and
//! topological defects alongside quantitative quality metrics. Analysis is
//! a single pass over the mesh: topology is derived from the raw face list,
//! eight independent defect checks run over it, and the results land in an
//! issue list plus a metrics snapshot.
//!
//! Detected defect categories:
//!
//! - Degenerate (near-zero area) faces
//! - Sliver triangles with a high aspect ratio
//! - Non-manifold edges (more than two incident faces)
//! - Low- and high-valence vertices
//! - Overlapping (near-coincident) vertices
//! - Faces whose geometric normal disagrees with the stored vertex normals
//! - Texture stretch (3D-to-UV area distortion)
//! - Sharp dihedral angles on manifold edges
//!
//! The engine never mutates the mesh and never fails on malformed geometry;
//! faces with too few vertices are skipped and near-zero denominators are
//! special-cased to sentinel values.
//!
//! # Example
//!
//! ```
//! use mesh_core::{Face, PolygonMesh, Vertex};
//! use mesh_quality::{IssueKind, MeshQualityAnalyzer};
//!
//! let mesh = PolygonMesh::from_parts(
//!     "triangle",
//!     vec![
//!         Vertex::from_coords(0.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 0.0, 0.0),
//!         Vertex::from_coords(0.0, 1.0, 0.0),
//!     ],
//!     vec![Face::triangle(0, 1, 2)],
//! );
//!
//! let mut analyzer = MeshQualityAnalyzer::new(&mesh);
//! analyzer.analyze();
//!
//! // Geometrically fine, but each corner of an isolated triangle has
//! // only two neighbors.
//! assert!(analyzer.issues_by_kind(IssueKind::DegenerateFace).is_empty());
//! assert_eq!(analyzer.issues_by_kind(IssueKind::LowValenceVertex).len(), 3);
//! println!("{}", analyzer.summary());
//! ```
//!
//! # Concurrency
//!
//! One analyzer owns its mutable state outright and borrows the mesh
//! read-only; to analyze several meshes concurrently, create one analyzer
//! per mesh on independent threads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod analyzer;
mod geometry;
mod issue;
mod metrics;
mod topology;

pub use analyzer::MeshQualityAnalyzer;
pub use geometry::{
    aspect_ratio, dihedral_angle, distance, normal_agreement, triangle_area, uv_stretch,
};
pub use issue::{IssueKind, MeshIssue};
pub use metrics::QualityMetrics;
pub use topology::MeshConnectivity;
