//! Mesh connectivity derived from the raw face list.

use std::collections::BTreeMap;

use mesh_core::Face;

/// Edge-to-faces and vertex-adjacency tables for one mesh.
///
/// Edges are keyed by an unordered vertex-index pair canonicalized with
/// the lower index first, so the same geometric edge is found regardless
/// of face winding. The value holds the indices of every face containing
/// that edge as a consecutive vertex pair; its length is the edge's
/// face-multiplicity (1 = boundary, 2 = manifold interior, >2 =
/// non-manifold).
///
/// The edge table is ordered so that iterating it - and therefore the
/// issues emitted from it - is deterministic across runs.
///
/// # Example
///
/// ```
/// use mesh_core::Face;
/// use mesh_quality::MeshConnectivity;
///
/// let faces = vec![Face::triangle(0, 1, 2), Face::triangle(1, 3, 2)];
/// let conn = MeshConnectivity::build(&faces, 4);
///
/// // The shared edge (1, 2) has two incident faces.
/// assert_eq!(conn.faces_for_edge(2, 1).map(<[usize]>::len), Some(2));
/// assert_eq!(conn.valence(0), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshConnectivity {
    /// Canonical edge key to incident face indices, in face-discovery order.
    edge_faces: BTreeMap<(u32, u32), Vec<usize>>,
    /// Vertex index to distinct adjacent vertices, in discovery order.
    vertex_adjacency: Vec<Vec<u32>>,
}

impl MeshConnectivity {
    /// Build connectivity tables from a face list.
    ///
    /// Each face's vertex-index sequence is treated as a cycle (last wraps
    /// to first), emitting one edge per consecutive pair. Faces with fewer
    /// than two vertices contribute no edges. The tables always start from
    /// empty state; there is no incremental update.
    #[must_use]
    pub fn build(faces: &[Face], vertex_count: usize) -> Self {
        let mut edge_faces: BTreeMap<(u32, u32), Vec<usize>> = BTreeMap::new();
        let mut vertex_adjacency: Vec<Vec<u32>> = vec![Vec::new(); vertex_count];

        for (face_idx, face) in faces.iter().enumerate() {
            let arity = face.vertex_indices.len();
            if arity < 2 {
                continue;
            }

            for i in 0..arity {
                let a = face.vertex_indices[i];
                let b = face.vertex_indices[(i + 1) % arity];

                edge_faces.entry(canonical_edge(a, b)).or_default().push(face_idx);

                let adj_a = &mut vertex_adjacency[a as usize];
                if !adj_a.contains(&b) {
                    adj_a.push(b);
                }
                let adj_b = &mut vertex_adjacency[b as usize];
                if !adj_b.contains(&a) {
                    adj_b.push(a);
                }
            }
        }

        Self {
            edge_faces,
            vertex_adjacency,
        }
    }

    /// Iterate over all edges with their incident faces, in key order.
    pub fn edges(&self) -> impl Iterator<Item = ((u32, u32), &[usize])> + '_ {
        self.edge_faces
            .iter()
            .map(|(&edge, faces)| (edge, faces.as_slice()))
    }

    /// Get the faces incident to an edge, in discovery order.
    ///
    /// The vertex pair may be given in either direction. Returns `None`
    /// if no face contains the edge.
    #[must_use]
    pub fn faces_for_edge(&self, a: u32, b: u32) -> Option<&[usize]> {
        self.edge_faces
            .get(&canonical_edge(a, b))
            .map(Vec::as_slice)
    }

    /// Get the distinct vertices adjacent to a vertex, in discovery order.
    #[must_use]
    pub fn adjacent_vertices(&self, vertex: usize) -> &[u32] {
        self.vertex_adjacency
            .get(vertex)
            .map_or(&[], Vec::as_slice)
    }

    /// Number of distinct vertices adjacent to a vertex.
    #[must_use]
    pub fn valence(&self, vertex: usize) -> usize {
        self.adjacent_vertices(vertex).len()
    }

    /// Number of vertex slots in the adjacency table.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_adjacency.len()
    }

    /// Total number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }
}

/// Canonicalize an edge so the lower vertex index comes first.
#[inline]
fn canonical_edge(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}
