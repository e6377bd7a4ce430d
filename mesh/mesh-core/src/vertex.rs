//! Vertex type.

use nalgebra::{Point3, Vector2, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh vertex with position, normal, and texture coordinate.
///
/// All attributes are plain fields. Sources that carry no normals or
/// texture coordinates leave them at zero vectors; the analysis engine
/// treats near-zero normals as "not comparable" rather than as an error.
///
/// # Example
///
/// ```
/// use mesh_core::{Vertex, Vector3};
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0)
///     .with_normal(Vector3::new(0.0, 0.0, 1.0))
///     .with_uv(0.5, 0.5);
///
/// assert!((v.position.x - 1.0).abs() < f64::EPSILON);
/// assert!((v.normal.z - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in 3D space.
    pub position: Point3<f64>,

    /// Stored vertex normal. Zero if the source provided none.
    pub normal: Vector3<f64>,

    /// Texture coordinate (u, v). Zero if the source provided none.
    pub uv: Vector2<f64>,
}

impl Vertex {
    /// Create a vertex at the given position with zero normal and uv.
    #[inline]
    #[must_use]
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            normal: Vector3::zeros(),
            uv: Vector2::zeros(),
        }
    }

    /// Create a vertex from raw coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_core::Vertex;
    ///
    /// let v = Vertex::from_coords(0.0, 1.0, 2.0);
    /// assert!((v.position.y - 1.0).abs() < f64::EPSILON);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Set the stored normal.
    #[inline]
    #[must_use]
    pub fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.normal = normal;
        self
    }

    /// Set the texture coordinate.
    #[inline]
    #[must_use]
    pub fn with_uv(mut self, u: f64, v: f64) -> Self {
        self.uv = Vector2::new(u, v);
        self
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::from_coords(0.0, 0.0, 0.0)
    }
}
