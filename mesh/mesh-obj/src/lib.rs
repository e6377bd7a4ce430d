//! Wavefront OBJ loading for meshcheck.
//!
//! Parses the ASCII OBJ subset needed for quality analysis: vertex
//! positions (`v`), texture coordinates (`vt`), normals (`vn`), polygon
//! faces (`f`) with `v/vt/vn` references, and object/group records
//! (`o`/`g`) which split the file into separate meshes.
//!
//! Each distinct `v/vt/vn` combination becomes one output vertex carrying
//! its position, normal, and texture coordinate, so the analysis engine
//! can read attributes directly off the vertex.
//!
//! # Example
//!
//! ```no_run
//! use mesh_obj::load_obj;
//!
//! let meshes = load_obj("model.obj").unwrap();
//! for mesh in &meshes {
//!     println!("{}: {} faces", mesh.name, mesh.face_count());
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod obj;

pub use error::{ObjError, ObjResult};
pub use obj::{load_obj, read_obj};
