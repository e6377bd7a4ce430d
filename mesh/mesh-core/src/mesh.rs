//! Named polygon mesh.

use crate::{Face, MeshSource, Vertex};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named polygon mesh.
///
/// Stores vertices and faces separately, with faces referencing vertices
/// by index. This is the concrete mesh type produced by the loaders and
/// consumed (read-only, by reference) by the analysis engine.
///
/// # Index Contract
///
/// Face vertex indices must reference existing vertices. Consumers treat
/// an out-of-bounds index as a precondition violation and panic via the
/// usual bounds check rather than attempting recovery.
///
/// # Example
///
/// ```
/// use mesh_core::{Face, PolygonMesh, Vertex};
///
/// let mesh = PolygonMesh::from_parts(
///     "quad",
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 1.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0),
///     ],
///     vec![Face::triangle(0, 1, 2), Face::triangle(0, 2, 3)],
/// );
///
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.face_count(), 2);
/// assert!(!mesh.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolygonMesh {
    /// Display name of the mesh.
    pub name: String,

    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Polygon faces referencing `vertices` by index.
    pub faces: Vec<Face>,
}

impl PolygonMesh {
    /// Create a new empty mesh with the given name.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh from its parts.
    #[inline]
    #[must_use]
    pub fn from_parts(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            vertices,
            faces,
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no vertices or no faces.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Reserve capacity for additional vertices and faces.
    pub fn reserve(&mut self, additional_vertices: usize, additional_faces: usize) {
        self.vertices.reserve(additional_vertices);
        self.faces.reserve(additional_faces);
    }
}

impl MeshSource for PolygonMesh {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    fn faces(&self) -> &[Face] {
        &self.faces
    }
}
