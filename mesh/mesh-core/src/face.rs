//! Polygon face type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A polygon face referencing vertices by index.
///
/// Faces are usually triangles but may carry more vertices. Geometric
/// consumers (area, normal, aspect ratio, UV stretch) read only the first
/// three indices; topology extraction walks the whole cycle.
///
/// `texcoord_indices` is parallel to `vertex_indices` and references the
/// source's texture-coordinate list. It may be empty for meshes without
/// texture coordinates.
///
/// # Example
///
/// ```
/// use mesh_core::Face;
///
/// let tri = Face::triangle(0, 1, 2);
/// assert_eq!(tri.vertex_indices, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// Ordered vertex indices forming the polygon.
    pub vertex_indices: Vec<u32>,

    /// Texture-coordinate indices, parallel to `vertex_indices`.
    pub texcoord_indices: Vec<u32>,
}

impl Face {
    /// Create a face from vertex and texture-coordinate indices.
    #[inline]
    #[must_use]
    pub const fn new(vertex_indices: Vec<u32>, texcoord_indices: Vec<u32>) -> Self {
        Self {
            vertex_indices,
            texcoord_indices,
        }
    }

    /// Create a triangle face with no texture-coordinate indices.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_core::Face;
    ///
    /// let tri = Face::triangle(3, 4, 5);
    /// assert_eq!(tri.arity(), 3);
    /// assert!(tri.texcoord_indices.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self {
            vertex_indices: vec![a, b, c],
            texcoord_indices: Vec::new(),
        }
    }

    /// Number of vertices in the polygon.
    #[inline]
    #[must_use]
    pub fn arity(&self) -> usize {
        self.vertex_indices.len()
    }

    /// Check whether the face has enough vertices for geometric queries.
    ///
    /// Faces with fewer than three vertices are skipped by area, normal,
    /// aspect-ratio, and UV computations (but still contribute edges to
    /// topology if they have at least two).
    #[inline]
    #[must_use]
    pub fn is_polygon(&self) -> bool {
        self.vertex_indices.len() >= 3
    }
}
