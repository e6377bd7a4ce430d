//! Wavefront OBJ parser.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hashbrown::HashMap;
use mesh_core::{Face, Point3, PolygonMesh, Vector2, Vector3, Vertex};

use crate::error::{ObjError, ObjResult};

/// Load the meshes from an OBJ file.
///
/// A new mesh starts at every `o`/`g` record with a name; faces before the
/// first such record form a mesh named after the file stem.
///
/// # Errors
///
/// Returns an error if the file cannot be read, a record is malformed, or
/// a face references a vertex/texcoord/normal that does not exist.
///
/// # Example
///
/// ```no_run
/// use mesh_obj::load_obj;
///
/// let meshes = load_obj("model.obj").unwrap();
/// assert!(!meshes.is_empty());
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P) -> ObjResult<Vec<PolygonMesh>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ObjError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ObjError::Io(e)
        }
    })?;

    let default_name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("mesh")
        .to_string();

    read_obj(BufReader::new(file), &default_name)
}

/// Parse OBJ data from any buffered reader.
///
/// `default_name` names the mesh formed by faces appearing before any
/// `o`/`g` record.
///
/// # Errors
///
/// Returns an error on malformed records or out-of-range indices.
pub fn read_obj<R: BufRead>(reader: R, default_name: &str) -> ObjResult<Vec<PolygonMesh>> {
    let mut positions: Vec<Point3<f64>> = Vec::new();
    let mut texcoords: Vec<Vector2<f64>> = Vec::new();
    let mut normals: Vec<Vector3<f64>> = Vec::new();

    let mut meshes: Vec<PolygonMesh> = Vec::new();
    let mut current = MeshBuilder::new(default_name);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };
        let args: Vec<&str> = parts.collect();

        match keyword {
            "v" => positions.push(Point3::from(parse_vec3(&args, line_no)?)),
            "vt" => texcoords.push(parse_vec2(&args, line_no)?),
            "vn" => normals.push(Vector3::from(parse_vec3(&args, line_no)?)),
            "o" | "g" => {
                if let Some(name) = args.first() {
                    if let Some(mesh) = current.finish() {
                        meshes.push(mesh);
                    }
                    current = MeshBuilder::new(name);
                }
            }
            "f" => {
                current.add_face(&args, line_no, &positions, &texcoords, &normals)?;
            }
            // Materials, smoothing groups, and the rest are irrelevant
            // to quality analysis.
            _ => {}
        }
    }

    if let Some(mesh) = current.finish() {
        meshes.push(mesh);
    }

    Ok(meshes)
}

/// One face-corner reference: position index plus optional texcoord and
/// normal indices, all resolved to 0-based.
type CornerKey = (usize, Option<usize>, Option<usize>);

/// Accumulates one output mesh, deduplicating vertices per distinct
/// `v/vt/vn` combination.
struct MeshBuilder {
    name: String,
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    corner_map: HashMap<CornerKey, u32>,
}

impl MeshBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            vertices: Vec::new(),
            faces: Vec::new(),
            corner_map: HashMap::new(),
        }
    }

    /// Convert to a mesh, or `None` if no face was ever added.
    fn finish(self) -> Option<PolygonMesh> {
        if self.faces.is_empty() {
            return None;
        }
        Some(PolygonMesh::from_parts(self.name, self.vertices, self.faces))
    }

    fn add_face(
        &mut self,
        corners: &[&str],
        line_no: usize,
        positions: &[Point3<f64>],
        texcoords: &[Vector2<f64>],
        normals: &[Vector3<f64>],
    ) -> ObjResult<()> {
        let mut vertex_indices = Vec::with_capacity(corners.len());
        let mut texcoord_indices = Vec::with_capacity(corners.len());

        for corner in corners {
            let key = parse_corner(corner, line_no, positions, texcoords, normals)?;
            let index = self.intern(key, positions, texcoords, normals, line_no)?;
            vertex_indices.push(index);
            if let Some(vt) = key.1 {
                #[allow(clippy::cast_possible_truncation)]
                texcoord_indices.push(vt as u32);
            }
        }

        // texcoord_indices must stay parallel to vertex_indices: a face
        // with any texture-less corner gets none at all.
        if texcoord_indices.len() != vertex_indices.len() {
            texcoord_indices.clear();
        }

        self.faces.push(Face::new(vertex_indices, texcoord_indices));
        Ok(())
    }

    /// Look up or create the output vertex for a corner.
    fn intern(
        &mut self,
        key: CornerKey,
        positions: &[Point3<f64>],
        texcoords: &[Vector2<f64>],
        normals: &[Vector3<f64>],
        line_no: usize,
    ) -> ObjResult<u32> {
        if let Some(&index) = self.corner_map.get(&key) {
            return Ok(index);
        }

        if self.vertices.len() > u32::MAX as usize {
            return Err(ObjError::invalid_record(
                line_no,
                "mesh exceeds u32 vertex capacity",
            ));
        }

        let mut vertex = Vertex::new(positions[key.0]);
        if let Some(vt) = key.1 {
            vertex = vertex.with_uv(texcoords[vt].x, texcoords[vt].y);
        }
        if let Some(vn) = key.2 {
            vertex = vertex.with_normal(normals[vn]);
        }

        #[allow(clippy::cast_possible_truncation)]
        let index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.corner_map.insert(key, index);
        Ok(index)
    }
}

/// Parse one `v/vt/vn` corner reference, resolving 1-based and negative
/// (relative) indices against the current list lengths.
fn parse_corner(
    corner: &str,
    line_no: usize,
    positions: &[Point3<f64>],
    texcoords: &[Vector2<f64>],
    normals: &[Vector3<f64>],
) -> ObjResult<CornerKey> {
    let mut fields = corner.split('/');

    let v_field = fields
        .next()
        .ok_or_else(|| ObjError::invalid_record(line_no, "empty face corner"))?;
    let v = resolve_index(v_field, positions.len(), line_no)?
        .ok_or_else(|| ObjError::invalid_record(line_no, "face corner without vertex index"))?;

    let vt = match fields.next() {
        Some(field) => resolve_index(field, texcoords.len(), line_no)?,
        None => None,
    };
    let vn = match fields.next() {
        Some(field) => resolve_index(field, normals.len(), line_no)?,
        None => None,
    };

    Ok((v, vt, vn))
}

/// Resolve one OBJ index field: 1-based positive, negative counts back
/// from the end of the list, empty means absent.
fn resolve_index(field: &str, count: usize, line_no: usize) -> ObjResult<Option<usize>> {
    fn out_of_range(line: usize, index: i64, count: usize) -> ObjError {
        ObjError::IndexOutOfRange { line, index, count }
    }

    if field.is_empty() {
        return Ok(None);
    }

    let raw: i64 = field
        .parse()
        .map_err(|_| ObjError::invalid_record(line_no, format!("bad index '{field}'")))?;

    let resolved = if raw > 0 {
        usize::try_from(raw - 1).map_err(|_| out_of_range(line_no, raw, count))?
    } else if raw < 0 {
        let back =
            usize::try_from(-raw).map_err(|_| out_of_range(line_no, raw, count))?;
        count
            .checked_sub(back)
            .ok_or_else(|| out_of_range(line_no, raw, count))?
    } else {
        return Err(out_of_range(line_no, raw, count));
    };

    if resolved >= count {
        return Err(out_of_range(line_no, raw, count));
    }
    Ok(Some(resolved))
}

fn parse_vec3(args: &[&str], line_no: usize) -> ObjResult<[f64; 3]> {
    if args.len() < 3 {
        return Err(ObjError::invalid_record(line_no, "expected three components"));
    }
    Ok([
        parse_float(args[0], line_no)?,
        parse_float(args[1], line_no)?,
        parse_float(args[2], line_no)?,
    ])
}

fn parse_vec2(args: &[&str], line_no: usize) -> ObjResult<Vector2<f64>> {
    if args.len() < 2 {
        return Err(ObjError::invalid_record(line_no, "expected two components"));
    }
    Ok(Vector2::new(
        parse_float(args[0], line_no)?,
        parse_float(args[1], line_no)?,
    ))
}

fn parse_float(field: &str, line_no: usize) -> ObjResult<f64> {
    field
        .parse()
        .map_err(|_| ObjError::invalid_record(line_no, format!("bad number '{field}'")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn parse(text: &str) -> Vec<PolygonMesh> {
        read_obj(text.as_bytes(), "default").unwrap()
    }

    #[test]
    fn single_triangle_with_attributes() {
        let meshes = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             vt 0 0\n\
             vt 1 0\n\
             vt 0 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1\n",
        );

        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.name, "default");
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);

        assert_eq!(mesh.faces[0].vertex_indices, vec![0, 1, 2]);
        assert_eq!(mesh.faces[0].texcoord_indices, vec![0, 1, 2]);

        let v1 = &mesh.vertices[1];
        assert!((v1.position.x - 1.0).abs() < f64::EPSILON);
        assert!((v1.uv.x - 1.0).abs() < f64::EPSILON);
        assert!((v1.normal.z - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn shared_corners_are_deduplicated() {
        let meshes = parse(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             f 1 2 3\n\
             f 1 3 4\n",
        );

        let mesh = &meshes[0];
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[1].vertex_indices, vec![0, 2, 3]);
    }

    #[test]
    fn negative_indices_resolve_from_the_end() {
        let meshes = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             f -3 -2 -1\n",
        );

        let mesh = &meshes[0];
        assert_eq!(mesh.faces[0].vertex_indices, vec![0, 1, 2]);
    }

    #[test]
    fn objects_split_into_meshes() {
        let meshes = parse(
            "o first\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             f 1 2 3\n\
             o second\n\
             v 0 0 1\nv 1 0 1\nv 0 1 1\n\
             f 4 5 6\n",
        );

        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].name, "first");
        assert_eq!(meshes[1].name, "second");
        // Indices are global to the file but local to each output mesh.
        assert_eq!(meshes[1].faces[0].vertex_indices, vec![0, 1, 2]);
    }

    #[test]
    fn quads_keep_their_arity() {
        let meshes = parse(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             f 1 2 3 4\n",
        );
        assert_eq!(meshes[0].faces[0].arity(), 4);
    }

    #[test]
    fn corner_without_texcoord_has_no_texcoord_index() {
        let meshes = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vn 0 0 1\n\
             f 1//1 2//1 3//1\n",
        );
        let face = &meshes[0].faces[0];
        assert_eq!(face.vertex_indices.len(), 3);
        assert!(face.texcoord_indices.is_empty());
    }

    #[test]
    fn mixed_texture_corners_keep_indices_parallel() {
        // One corner without a vt: the whole face loses its texcoord
        // indices rather than ending up with a shorter, misaligned list.
        let meshes = parse(
            "v 0 0 0\nv 4 0 0\nv 0 4 0\nv 4 4 0\n\
             vt 0 0\nvt 1 0\nvt 0 1\n\
             f 1/1 2 3/3 4/2\n",
        );
        let face = &meshes[0].faces[0];
        assert_eq!(face.vertex_indices.len(), 4);
        assert!(face.texcoord_indices.is_empty());
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let err = read_obj("v 0 0 0\nf 1 2 3\n".as_bytes(), "bad").unwrap_err();
        assert!(matches!(err, ObjError::IndexOutOfRange { line: 2, .. }));
    }

    #[test]
    fn zero_index_is_an_error() {
        let err = read_obj("v 0 0 0\nf 0 1 1\n".as_bytes(), "bad").unwrap_err();
        assert!(matches!(err, ObjError::IndexOutOfRange { .. }));
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = read_obj("v 0 zero 0\n".as_bytes(), "bad").unwrap_err();
        assert!(matches!(err, ObjError::InvalidRecord { line: 1, .. }));
    }

    #[test]
    fn comments_and_unknown_records_are_ignored() {
        let meshes = parse(
            "# header comment\n\
             mtllib scene.mtl\n\
             v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             usemtl steel\n\
             s 1\n\
             f 1 2 3\n",
        );
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].face_count(), 1);
    }

    #[test]
    fn file_without_faces_yields_no_meshes() {
        let meshes = parse("v 0 0 0\nv 1 0 0\n");
        assert!(meshes.is_empty());
    }
}
