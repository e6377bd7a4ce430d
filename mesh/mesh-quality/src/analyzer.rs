//! The analysis engine: runs every defect check and owns the results.

use std::fmt::Write as _;

use hashbrown::HashMap;
use mesh_core::MeshSource;
use tracing::{debug, info};

use crate::geometry;
use crate::issue::{IssueKind, MeshIssue};
use crate::metrics::{MetricsAccumulator, QualityMetrics};
use crate::topology::MeshConnectivity;

/// Faces with area below this are degenerate.
const DEGENERATE_AREA_THRESHOLD: f64 = 1e-5;

/// Aspect ratios above this are flagged as slivers.
const HIGH_ASPECT_THRESHOLD: f64 = 10.0;

/// Valence below this (but above zero) is flagged as low.
const LOW_VALENCE_THRESHOLD: usize = 3;

/// Valence above this is flagged as high.
const HIGH_VALENCE_THRESHOLD: usize = 12;

/// Vertex pairs closer than this are flagged as overlapping.
const OVERLAP_THRESHOLD: f64 = 1e-4;

/// UV stretch factors above this are flagged.
const HIGH_STRETCH_THRESHOLD: f64 = 4.0;

/// Dihedral angles below this (degrees) on manifold edges are flagged.
const SHARP_ANGLE_THRESHOLD: f64 = 30.0;

/// Mesh quality analysis engine.
///
/// Borrows a mesh read-only for its lifetime and owns all mutable analysis
/// state (topology tables, issue list, metrics), so one analyzer per mesh
/// can run on independent threads. [`analyze`](Self::analyze) is the single
/// entry point; re-invoking it discards and rebuilds all state.
///
/// # Example
///
/// ```
/// use mesh_core::{Face, PolygonMesh, Vertex};
/// use mesh_quality::{IssueKind, MeshQualityAnalyzer};
///
/// // Two coincident vertices.
/// let mesh = PolygonMesh::from_parts(
///     "pair",
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 0.0, 0.0),
///     ],
///     vec![],
/// );
///
/// let mut analyzer = MeshQualityAnalyzer::new(&mesh);
/// analyzer.analyze();
///
/// let overlaps = analyzer.issues_by_kind(IssueKind::OverlappingVertices);
/// assert_eq!(overlaps.len(), 1);
/// assert!((overlaps[0].severity - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct MeshQualityAnalyzer<'a, M: MeshSource> {
    mesh: &'a M,
    quality_threshold: f64,
    issues: Vec<MeshIssue>,
    metrics: QualityMetrics,
    connectivity: MeshConnectivity,
}

impl<'a, M: MeshSource> MeshQualityAnalyzer<'a, M> {
    /// Create an analyzer with the default quality threshold of 0.5.
    #[must_use]
    pub fn new(mesh: &'a M) -> Self {
        Self::with_threshold(mesh, 0.5)
    }

    /// Create an analyzer with an explicit quality threshold.
    ///
    /// The threshold is stored and exposed but consulted by no current
    /// check; it is reserved for future severity gating.
    #[must_use]
    pub fn with_threshold(mesh: &'a M, quality_threshold: f64) -> Self {
        Self {
            mesh,
            quality_threshold,
            issues: Vec::new(),
            metrics: QualityMetrics::default(),
            connectivity: MeshConnectivity::default(),
        }
    }

    /// Run the full analysis.
    ///
    /// Clears any prior results, rebuilds the topology tables from the face
    /// list, runs all defect checks, and finalizes the metrics snapshot.
    /// Analyzing the same mesh twice yields identical issue lists and
    /// metrics.
    ///
    /// # Panics
    ///
    /// Panics if a face references a vertex index beyond the vertex list -
    /// that is an invariant violation of the input contract, not a
    /// recoverable condition.
    pub fn analyze(&mut self) {
        self.issues.clear();
        self.connectivity =
            MeshConnectivity::build(self.mesh.faces(), self.mesh.vertices().len());
        debug!(
            mesh = self.mesh.name(),
            vertices = self.mesh.vertices().len(),
            faces = self.mesh.faces().len(),
            edges = self.connectivity.edge_count(),
            "topology built"
        );

        let mut acc = MetricsAccumulator::default();

        self.check_degenerate_faces(&mut acc);
        self.check_aspect_ratios(&mut acc);
        self.check_non_manifold_edges(&mut acc);
        self.check_vertex_valence();
        self.check_overlapping_vertices();
        self.check_normal_direction();
        self.check_uv_stretch(&mut acc);
        self.check_sharp_angles(&mut acc);

        self.metrics = acc.finalize(self.mesh.faces().len());

        info!(
            mesh = self.mesh.name(),
            issues = self.issues.len(),
            "mesh quality analysis complete"
        );
    }

    /// All issues from the most recent analysis, in detection order.
    #[must_use]
    pub fn issues(&self) -> &[MeshIssue] {
        &self.issues
    }

    /// The metrics snapshot from the most recent analysis.
    #[must_use]
    pub fn metrics(&self) -> &QualityMetrics {
        &self.metrics
    }

    /// The topology tables from the most recent analysis.
    #[must_use]
    pub fn connectivity(&self) -> &MeshConnectivity {
        &self.connectivity
    }

    /// The reserved quality threshold this analyzer was built with.
    #[must_use]
    pub fn quality_threshold(&self) -> f64 {
        self.quality_threshold
    }

    /// Issues of one kind, preserving relative order.
    #[must_use]
    pub fn issues_by_kind(&self, kind: IssueKind) -> Vec<MeshIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.kind == kind)
            .cloned()
            .collect()
    }

    /// Issues with severity at or above `min_severity`, preserving order.
    #[must_use]
    pub fn issues_with_severity(&self, min_severity: f64) -> Vec<MeshIssue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity >= min_severity)
            .cloned()
            .collect()
    }

    /// Human-readable multi-line report of the most recent analysis.
    ///
    /// Contains the mesh name, face/vertex counts, every metric at fixed
    /// precision, and a per-kind issue count table.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let m = &self.metrics;

        let _ = writeln!(out, "Mesh Quality Analysis for: {}", self.mesh.name());
        let _ = writeln!(out, "----------------------------------------");
        let _ = writeln!(out, "Total faces: {}", self.mesh.faces().len());
        let _ = writeln!(out, "Total vertices: {}", self.mesh.vertices().len());
        let _ = writeln!(out);

        let _ = writeln!(out, "Quality Metrics:");
        let _ = writeln!(
            out,
            "- Face Area: min={:.6}, max={:.6}, avg={:.6}",
            m.min_face_area, m.max_face_area, m.avg_face_area
        );
        let _ = writeln!(
            out,
            "- Aspect Ratio: min={:.6}, max={:.6}, avg={:.6}",
            m.min_aspect_ratio, m.max_aspect_ratio, m.avg_aspect_ratio
        );
        let _ = writeln!(
            out,
            "- Dihedral Angle: min={:.6}, max={:.6} degrees",
            m.min_dihedral_angle, m.max_dihedral_angle
        );
        let _ = writeln!(out, "- Non-manifold edges: {}", m.non_manifold_edge_count);
        let _ = writeln!(out, "- Degenerate faces: {}", m.degenerate_face_count);
        let _ = writeln!(out, "- UV stretch factor: {:.6}", m.uv_stretch_factor);
        let _ = writeln!(out);

        let _ = writeln!(out, "Issues Found:");
        let mut counts: HashMap<IssueKind, usize> = HashMap::new();
        for issue in &self.issues {
            *counts.entry(issue.kind).or_insert(0) += 1;
        }
        for kind in IssueKind::ALL {
            if let Some(count) = counts.get(&kind) {
                let _ = writeln!(out, "- {kind}: {count}");
            }
        }

        out
    }

    fn push_issue(&mut self, kind: IssueKind, element: usize, severity: f64, related: Vec<usize>) {
        self.issues.push(MeshIssue::new(kind, element, severity, related));
    }

    /// Flag near-zero-area faces; accumulates face-area extrema inline.
    fn check_degenerate_faces(&mut self, acc: &mut MetricsAccumulator) {
        for (face_idx, face) in self.mesh.faces().iter().enumerate() {
            if !face.is_polygon() {
                continue;
            }

            let area = geometry::triangle_area(
                self.mesh.vertices(),
                face.vertex_indices[0],
                face.vertex_indices[1],
                face.vertex_indices[2],
            );
            acc.record_area(area);

            if area < DEGENERATE_AREA_THRESHOLD {
                let related = face.vertex_indices.iter().map(|&v| v as usize).collect();
                self.push_issue(
                    IssueKind::DegenerateFace,
                    face_idx,
                    1.0 - area / DEGENERATE_AREA_THRESHOLD,
                    related,
                );
                acc.degenerate_faces += 1;
            }
        }
    }

    /// Flag sliver triangles; accumulates aspect-ratio extrema inline.
    fn check_aspect_ratios(&mut self, acc: &mut MetricsAccumulator) {
        for (face_idx, face) in self.mesh.faces().iter().enumerate() {
            if !face.is_polygon() {
                continue;
            }

            let ratio = geometry::aspect_ratio(
                self.mesh.vertices(),
                face.vertex_indices[0],
                face.vertex_indices[1],
                face.vertex_indices[2],
            );
            acc.record_aspect(ratio);

            if ratio > HIGH_ASPECT_THRESHOLD {
                let severity = ((ratio - HIGH_ASPECT_THRESHOLD) / 30.0).min(1.0);
                let related = face.vertex_indices.iter().map(|&v| v as usize).collect();
                self.push_issue(IssueKind::HighAspectRatio, face_idx, severity, related);
            }
        }
    }

    /// Flag edges with more than two incident faces.
    #[allow(clippy::cast_precision_loss)]
    fn check_non_manifold_edges(&mut self, acc: &mut MetricsAccumulator) {
        let mut found = Vec::new();
        for ((v0, v1), incident) in self.connectivity.edges() {
            if incident.len() > 2 {
                let severity = ((incident.len() - 2) as f64 / 4.0).min(1.0);
                found.push((v0 as usize, severity, v1 as usize));
            }
        }
        for (element, severity, other) in found {
            self.push_issue(IssueKind::NonManifoldEdge, element, severity, vec![other]);
            acc.non_manifold_edges += 1;
        }
    }

    /// Flag vertices with unusually few or many distinct neighbors.
    #[allow(clippy::cast_precision_loss)]
    fn check_vertex_valence(&mut self) {
        for vertex_idx in 0..self.connectivity.vertex_count() {
            let valence = self.connectivity.valence(vertex_idx);

            if valence > 0 && valence < LOW_VALENCE_THRESHOLD {
                let related: Vec<usize> = self
                    .connectivity
                    .adjacent_vertices(vertex_idx)
                    .iter()
                    .map(|&v| v as usize)
                    .collect();
                let severity = 1.0 - valence as f64 / LOW_VALENCE_THRESHOLD as f64;
                self.push_issue(IssueKind::LowValenceVertex, vertex_idx, severity, related);
            }

            if valence > HIGH_VALENCE_THRESHOLD {
                let related: Vec<usize> = self
                    .connectivity
                    .adjacent_vertices(vertex_idx)
                    .iter()
                    .map(|&v| v as usize)
                    .collect();
                let severity =
                    ((valence - HIGH_VALENCE_THRESHOLD) as f64 / 8.0).min(1.0);
                self.push_issue(IssueKind::HighValenceVertex, vertex_idx, severity, related);
            }
        }
    }

    /// Flag distinct vertex pairs closer than the overlap threshold.
    ///
    /// All-pairs scan, O(V^2). Large meshes wanting this check faster can
    /// pre-bucket vertices in a spatial grid; the distance semantics must
    /// stay identical.
    fn check_overlapping_vertices(&mut self) {
        let vertices = self.mesh.vertices();
        let threshold_sq = OVERLAP_THRESHOLD * OVERLAP_THRESHOLD;

        for i in 0..vertices.len() {
            for j in (i + 1)..vertices.len() {
                let dist_sq = (vertices[j].position - vertices[i].position).norm_squared();

                if dist_sq < threshold_sq {
                    let severity = 1.0 - dist_sq.sqrt() / OVERLAP_THRESHOLD;
                    self.push_issue(IssueKind::OverlappingVertices, i, severity, vec![j]);
                }
            }
        }
    }

    /// Flag faces whose geometric normal opposes the stored vertex normals.
    fn check_normal_direction(&mut self) {
        for (face_idx, face) in self.mesh.faces().iter().enumerate() {
            let Some(dot) = geometry::normal_agreement(self.mesh.vertices(), face) else {
                continue;
            };

            if dot < 0.0 {
                let related = face.vertex_indices.iter().map(|&v| v as usize).collect();
                self.push_issue(
                    IssueKind::InvertedNormal,
                    face_idx,
                    (-dot).min(1.0),
                    related,
                );
            }
        }
    }

    /// Flag faces with excessive UV distortion; accumulates the average
    /// stretch over measurable faces only.
    fn check_uv_stretch(&mut self, acc: &mut MetricsAccumulator) {
        for (face_idx, face) in self.mesh.faces().iter().enumerate() {
            let stretch = geometry::uv_stretch(self.mesh.vertices(), face);
            if stretch <= 0.0 {
                continue;
            }
            acc.record_uv(stretch);

            if stretch > HIGH_STRETCH_THRESHOLD {
                let severity = ((stretch - HIGH_STRETCH_THRESHOLD) / 6.0).min(1.0);
                let related = face.vertex_indices.iter().map(|&v| v as usize).collect();
                self.push_issue(IssueKind::TextureStretch, face_idx, severity, related);
            }
        }
    }

    /// Flag sharp creases on manifold edges; accumulates dihedral extrema.
    fn check_sharp_angles(&mut self, acc: &mut MetricsAccumulator) {
        let mut found = Vec::new();
        for ((v0, v1), incident) in self.connectivity.edges() {
            if incident.len() != 2 {
                continue;
            }

            let angle = geometry::dihedral_angle(
                self.mesh.vertices(),
                self.mesh.faces(),
                incident[0],
                incident[1],
                (v0, v1),
            );
            acc.record_dihedral(angle);

            if angle < SHARP_ANGLE_THRESHOLD {
                let severity = 1.0 - angle / SHARP_ANGLE_THRESHOLD;
                found.push((v0 as usize, severity, v1 as usize));
            }
        }
        for (element, severity, other) in found {
            self.push_issue(IssueKind::SharpAngle, element, severity, vec![other]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_core::{Face, PolygonMesh, Vertex};

    fn unit_right_triangle() -> PolygonMesh {
        PolygonMesh::from_parts(
            "tri",
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(2.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
            ],
            vec![Face::triangle(0, 1, 2)],
        )
    }

    #[test]
    fn closed_tetrahedron_has_no_issues() {
        // Every vertex has valence 3 and every edge exactly two faces.
        let mesh = PolygonMesh::from_parts(
            "tetra",
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
                Vertex::from_coords(0.0, 0.0, 1.0),
            ],
            vec![
                Face::triangle(0, 1, 2),
                Face::triangle(0, 1, 3),
                Face::triangle(0, 2, 3),
                Face::triangle(1, 2, 3),
            ],
        );
        let mut analyzer = MeshQualityAnalyzer::new(&mesh);
        analyzer.analyze();

        assert!(analyzer.issues().is_empty());

        let m = analyzer.metrics();
        assert!((m.min_face_area - 0.5).abs() < 1e-12);
        assert_eq!(m.non_manifold_edge_count, 0);
        assert_eq!(m.degenerate_face_count, 0);
    }

    #[test]
    fn lone_triangle_vertices_are_low_valence() {
        let mesh = unit_right_triangle();
        let mut analyzer = MeshQualityAnalyzer::new(&mesh);
        analyzer.analyze();

        // Each corner has only two neighbors.
        let low = analyzer.issues_by_kind(IssueKind::LowValenceVertex);
        assert_eq!(low.len(), 3);
        for issue in &low {
            assert!((issue.severity - (1.0 - 2.0 / 3.0)).abs() < 1e-12);
        }
        assert!(analyzer.issues_by_kind(IssueKind::DegenerateFace).is_empty());
    }

    #[test]
    fn default_threshold_is_stored() {
        let mesh = unit_right_triangle();
        let analyzer = MeshQualityAnalyzer::new(&mesh);
        assert!((analyzer.quality_threshold() - 0.5).abs() < f64::EPSILON);

        let analyzer = MeshQualityAnalyzer::with_threshold(&mesh, 0.9);
        assert!((analyzer.quality_threshold() - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn degenerate_face_is_flagged_once() {
        let mesh = PolygonMesh::from_parts(
            "degen",
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(2.0, 0.0, 0.0),
            ],
            vec![Face::triangle(0, 1, 2)],
        );
        let mut analyzer = MeshQualityAnalyzer::new(&mesh);
        analyzer.analyze();

        let degens = analyzer.issues_by_kind(IssueKind::DegenerateFace);
        assert_eq!(degens.len(), 1);
        assert!(degens[0].severity >= 0.0 && degens[0].severity <= 1.0);
        assert_eq!(degens[0].related, vec![0, 1, 2]);
        assert_eq!(analyzer.metrics().degenerate_face_count, 1);
    }

    #[test]
    fn three_faces_on_one_edge_is_non_manifold() {
        let mesh = PolygonMesh::from_parts(
            "fan",
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.5, 1.0, 0.0),
                Vertex::from_coords(0.5, -1.0, 0.0),
                Vertex::from_coords(0.5, 0.0, 1.0),
            ],
            vec![
                Face::triangle(0, 1, 2),
                Face::triangle(0, 1, 3),
                Face::triangle(0, 1, 4),
            ],
        );
        let mut analyzer = MeshQualityAnalyzer::new(&mesh);
        analyzer.analyze();

        let issues = analyzer.issues_by_kind(IssueKind::NonManifoldEdge);
        assert_eq!(issues.len(), 1);
        assert!((issues[0].severity - 0.25).abs() < 1e-12);
        assert_eq!(issues[0].element, 0);
        assert_eq!(issues[0].related, vec![1]);
        assert_eq!(analyzer.metrics().non_manifold_edge_count, 1);
    }

    #[test]
    fn summary_lists_counts_per_kind() {
        let mesh = PolygonMesh::from_parts(
            "degen",
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(2.0, 0.0, 0.0),
            ],
            vec![Face::triangle(0, 1, 2)],
        );
        let mut analyzer = MeshQualityAnalyzer::new(&mesh);
        analyzer.analyze();

        let summary = analyzer.summary();
        assert!(summary.contains("Mesh Quality Analysis for: degen"));
        assert!(summary.contains("Total faces: 1"));
        assert!(summary.contains("Total vertices: 3"));
        assert!(summary.contains("Degenerate Face: 1"));
    }
}
