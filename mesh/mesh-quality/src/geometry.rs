//! Pure geometric primitives used by the defect checks.
//!
//! All functions read vertex positions and attributes by index, mutate
//! nothing, and special-case near-degenerate input to sentinel values
//! instead of dividing by zero or leaving the acos domain.

use mesh_core::{Face, Vertex};

/// Magnitudes at or below this are treated as zero-length.
const LENGTH_EPSILON: f64 = 1e-6;

/// Areas below this are treated as unmeasurable.
const AREA_EPSILON: f64 = 1e-6;

/// Area of the triangle spanned by three vertices.
///
/// Half the magnitude of the cross product of two edge vectors from the
/// first vertex.
///
/// # Panics
///
/// Panics if an index is out of bounds for `vertices`.
#[must_use]
pub fn triangle_area(vertices: &[Vertex], i0: u32, i1: u32, i2: u32) -> f64 {
    let p0 = vertices[i0 as usize].position;
    let p1 = vertices[i1 as usize].position;
    let p2 = vertices[i2 as usize].position;

    0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
}

/// Euclidean distance between two vertex positions.
///
/// # Panics
///
/// Panics if an index is out of bounds for `vertices`.
#[must_use]
pub fn distance(vertices: &[Vertex], a: u32, b: u32) -> f64 {
    (vertices[b as usize].position - vertices[a as usize].position).norm()
}

/// Aspect ratio of a triangle: longest edge over minimum height.
///
/// The minimum height is `2 * area / longest_edge`. When the area is at or
/// below the measurement epsilon the height is treated as zero and the
/// ratio is `f64::MAX` - "degenerate, arbitrarily bad shape" - rather
/// than an error.
///
/// # Panics
///
/// Panics if an index is out of bounds for `vertices`.
#[must_use]
pub fn aspect_ratio(vertices: &[Vertex], i0: u32, i1: u32, i2: u32) -> f64 {
    let e0 = distance(vertices, i0, i1);
    let e1 = distance(vertices, i1, i2);
    let e2 = distance(vertices, i2, i0);
    let max_edge = e0.max(e1).max(e2);

    let area = triangle_area(vertices, i0, i1, i2);

    let min_height = if area > AREA_EPSILON {
        2.0 * area / max_edge
    } else {
        0.0
    };

    if min_height > LENGTH_EPSILON {
        max_edge / min_height
    } else {
        f64::MAX
    }
}

/// Dihedral angle, in degrees, between two faces sharing an edge.
///
/// Each face's normal is the cross product of the vectors from the first
/// shared vertex to the second shared vertex and to that face's non-shared
/// vertex. Normals with magnitude at or below the epsilon are left
/// unnormalized (zero), the dot product is clamped to `[-1, 1]` to guard
/// floating-point overshoot, and the result is converted to degrees.
///
/// The non-shared vertex of each face is the **first** index in stored
/// order that differs from both shared vertices. Faces whose vertices all
/// lie on the shared edge fall back to vertex 0; polygons with several
/// candidate non-shared vertices use the first one found. Callers relying
/// on a specific vertex must ensure it comes first.
///
/// # Panics
///
/// Panics if a face or vertex index is out of bounds.
#[must_use]
pub fn dihedral_angle(
    vertices: &[Vertex],
    faces: &[Face],
    face_a: usize,
    face_b: usize,
    shared: (u32, u32),
) -> f64 {
    let opposite_a = first_non_shared(&faces[face_a], shared);
    let opposite_b = first_non_shared(&faces[face_b], shared);

    let p0 = vertices[shared.0 as usize].position;
    let p1 = vertices[shared.1 as usize].position;
    let pa = vertices[opposite_a as usize].position;
    let pb = vertices[opposite_b as usize].position;

    let along = p1 - p0;
    let normal_a = normalize_or_zero(along.cross(&(pa - p0)));
    let normal_b = normalize_or_zero(along.cross(&(pb - p0)));

    let dot = normal_a.dot(&normal_b).clamp(-1.0, 1.0);
    dot.acos().to_degrees()
}

/// First vertex index of `face` that is not on the shared edge.
fn first_non_shared(face: &Face, shared: (u32, u32)) -> u32 {
    face.vertex_indices
        .iter()
        .copied()
        .find(|&idx| idx != shared.0 && idx != shared.1)
        .unwrap_or(0)
}

fn normalize_or_zero(v: nalgebra::Vector3<f64>) -> nalgebra::Vector3<f64> {
    let len = v.norm();
    if len > LENGTH_EPSILON { v / len } else { v }
}

/// UV stretch factor for a face: ratio of 3D surface area to texture-space
/// area, symmetric to which space is larger (always >= 1 when measurable).
///
/// Uses the first three vertices' positions and texture coordinates; the
/// texture-space area comes from the shoelace formula. Returns `0.0` -
/// "not measurable", not a defect - if the face has fewer than three
/// vertex or texture-coordinate indices, or if either area is below the
/// measurement epsilon.
///
/// # Panics
///
/// Panics if a vertex index is out of bounds.
#[must_use]
pub fn uv_stretch(vertices: &[Vertex], face: &Face) -> f64 {
    if face.vertex_indices.len() < 3 || face.texcoord_indices.len() < 3 {
        return 0.0;
    }

    let i0 = face.vertex_indices[0];
    let i1 = face.vertex_indices[1];
    let i2 = face.vertex_indices[2];

    let surface_area = triangle_area(vertices, i0, i1, i2);

    let t0 = vertices[i0 as usize].uv;
    let t1 = vertices[i1 as usize].uv;
    let t2 = vertices[i2 as usize].uv;

    let uv_area =
        0.5 * ((t1.x - t0.x) * (t2.y - t0.y) - (t2.x - t0.x) * (t1.y - t0.y)).abs();

    if surface_area < AREA_EPSILON || uv_area < AREA_EPSILON {
        return 0.0;
    }

    (surface_area / uv_area).max(uv_area / surface_area)
}

/// Agreement between a face's geometric normal and its stored vertex
/// normals.
///
/// The geometric normal is the cross product of the first two edges; the
/// reference is the average of the first three vertices' stored normals.
/// Both are normalized. Returns the dot product of the two unit vectors -
/// negative means the face winding opposes the stored normals - or `None`
/// when either vector is too short to compare (degenerate face, or a mesh
/// without stored normals).
///
/// # Panics
///
/// Panics if a vertex index is out of bounds.
#[must_use]
pub fn normal_agreement(vertices: &[Vertex], face: &Face) -> Option<f64> {
    if face.vertex_indices.len() < 3 {
        return None;
    }

    let v0 = &vertices[face.vertex_indices[0] as usize];
    let v1 = &vertices[face.vertex_indices[1] as usize];
    let v2 = &vertices[face.vertex_indices[2] as usize];

    let geometric = (v1.position - v0.position).cross(&(v2.position - v0.position));
    let geo_len = geometric.norm();
    if geo_len <= LENGTH_EPSILON {
        return None;
    }

    let stored = (v0.normal + v1.normal + v2.normal) / 3.0;
    let stored_len = stored.norm();
    if stored_len <= LENGTH_EPSILON {
        return None;
    }

    Some((geometric / geo_len).dot(&(stored / stored_len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_core::Vector3;

    fn right_triangle() -> Vec<Vertex> {
        vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn area_of_right_triangle() {
        let verts = right_triangle();
        assert!((triangle_area(&verts, 0, 1, 2) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn area_of_collinear_points_is_zero() {
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(2.0, 0.0, 0.0),
        ];
        assert!(triangle_area(&verts, 0, 1, 2) < 1e-12);
    }

    #[test]
    fn distance_is_euclidean() {
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(3.0, 4.0, 0.0),
        ];
        assert!((distance(&verts, 0, 1) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn aspect_ratio_of_equilateral() {
        let h = 3.0_f64.sqrt() / 2.0;
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(0.5, h, 0.0),
        ];
        // Longest edge 1, min height = 2 * area / 1 = sqrt(3)/2.
        let expected = 1.0 / h;
        assert!((aspect_ratio(&verts, 0, 1, 2) - expected).abs() < 1e-9);
    }

    #[test]
    fn aspect_ratio_of_degenerate_is_max() {
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(2.0, 0.0, 0.0),
        ];
        assert!((aspect_ratio(&verts, 0, 1, 2) - f64::MAX).abs() < f64::EPSILON);
    }

    #[test]
    fn dihedral_angle_of_flat_pair_is_straight() {
        // Two coplanar triangles sharing edge (0, 1), consistent winding.
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(0.5, 1.0, 0.0),
            Vertex::from_coords(0.5, -1.0, 0.0),
        ];
        let faces = vec![Face::triangle(0, 1, 2), Face::triangle(1, 0, 3)];

        let angle = dihedral_angle(&verts, &faces, 0, 1, (0, 1));
        // The normals oppose for coplanar faces built from the same first
        // shared vertex, giving 180 degrees.
        assert!((angle - 180.0).abs() < 1e-9);
    }

    #[test]
    fn dihedral_angle_of_right_fold() {
        // Fold the second triangle 90 degrees out of plane.
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0),
            Vertex::from_coords(0.5, 1.0, 0.0),
            Vertex::from_coords(0.5, 0.0, 1.0),
        ];
        let faces = vec![Face::triangle(0, 1, 2), Face::triangle(0, 1, 3)];

        let angle = dihedral_angle(&verts, &faces, 0, 1, (0, 1));
        assert!((angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn first_non_shared_uses_stored_order() {
        let face = Face::new(vec![5, 7, 9, 11], Vec::new());
        assert_eq!(first_non_shared(&face, (5, 9)), 7);
        assert_eq!(first_non_shared(&face, (7, 5)), 9);
        // All vertices shared: falls back to 0.
        let edge_face = Face::new(vec![5, 7], Vec::new());
        assert_eq!(first_non_shared(&edge_face, (5, 7)), 0);
    }

    #[test]
    fn uv_stretch_of_matched_parameterization() {
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0).with_uv(0.0, 0.0),
            Vertex::from_coords(1.0, 0.0, 0.0).with_uv(1.0, 0.0),
            Vertex::from_coords(0.0, 1.0, 0.0).with_uv(0.0, 1.0),
        ];
        let mut face = Face::triangle(0, 1, 2);
        face.texcoord_indices = vec![0, 1, 2];

        assert!((uv_stretch(&verts, &face) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uv_stretch_is_symmetric_and_at_least_one() {
        let verts = vec![
            Vertex::from_coords(0.0, 0.0, 0.0).with_uv(0.0, 0.0),
            Vertex::from_coords(2.0, 0.0, 0.0).with_uv(1.0, 0.0),
            Vertex::from_coords(0.0, 2.0, 0.0).with_uv(0.0, 1.0),
        ];
        let mut face = Face::triangle(0, 1, 2);
        face.texcoord_indices = vec![0, 1, 2];

        // Surface area 2.0 vs uv area 0.5.
        assert!((uv_stretch(&verts, &face) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn uv_stretch_unmeasurable_without_texcoords() {
        let verts = right_triangle();
        let face = Face::triangle(0, 1, 2);
        assert!(uv_stretch(&verts, &face).abs() < f64::EPSILON);
    }

    #[test]
    fn normal_agreement_detects_inversion() {
        let up = Vector3::new(0.0, 0.0, 1.0);
        let verts: Vec<Vertex> = right_triangle()
            .into_iter()
            .map(|v| v.with_normal(-up))
            .collect();
        let face = Face::triangle(0, 1, 2);

        // Geometric normal is +Z, stored normals are -Z.
        let dot = normal_agreement(&verts, &face).unwrap();
        assert!((dot + 1.0).abs() < 1e-12);
    }

    #[test]
    fn normal_agreement_none_without_stored_normals() {
        let verts = right_triangle();
        let face = Face::triangle(0, 1, 2);
        assert!(normal_agreement(&verts, &face).is_none());
    }
}
