//! The read contract consumed by the analysis engine.

use crate::{Face, Vertex};

/// Read-only view of a mesh: stable-ordered vertices and faces plus a
/// display name.
///
/// The analysis engine is generic over this trait so that hosts with their
/// own mesh representation can be analyzed without conversion. Both lists
/// must keep a stable order for the duration of a borrow; the engine never
/// mutates the mesh.
pub trait MeshSource {
    /// Display name of the mesh.
    fn name(&self) -> &str;

    /// Ordered vertex list.
    fn vertices(&self) -> &[Vertex];

    /// Ordered face list.
    fn faces(&self) -> &[Face];

    /// Number of vertices.
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Number of faces.
    fn face_count(&self) -> usize {
        self.faces().len()
    }
}
