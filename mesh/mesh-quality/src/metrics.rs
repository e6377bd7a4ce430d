//! Quality metrics snapshot and its accumulation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate quality metrics for one analysis run.
///
/// Fields default to "no data" sentinels: `f64::MAX` for minima, zero for
/// maxima, averages, and counts. A mesh with zero faces (or zero
/// qualifying edges) reports exactly these sentinels; that is normal
/// output, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualityMetrics {
    /// Smallest face area observed.
    pub min_face_area: f64,
    /// Largest face area observed.
    pub max_face_area: f64,
    /// Mean face area over all faces.
    pub avg_face_area: f64,

    /// Smallest aspect ratio observed.
    pub min_aspect_ratio: f64,
    /// Largest aspect ratio observed.
    pub max_aspect_ratio: f64,
    /// Mean aspect ratio over all faces.
    pub avg_aspect_ratio: f64,

    /// Smallest dihedral angle observed on a manifold edge, in degrees.
    pub min_dihedral_angle: f64,
    /// Largest dihedral angle observed on a manifold edge, in degrees.
    pub max_dihedral_angle: f64,

    /// Number of edges shared by more than two faces.
    pub non_manifold_edge_count: usize,
    /// Number of faces with near-zero area.
    pub degenerate_face_count: usize,

    /// Mean UV stretch factor over faces where stretch was measurable.
    pub uv_stretch_factor: f64,
}

impl Default for QualityMetrics {
    fn default() -> Self {
        Self {
            min_face_area: f64::MAX,
            max_face_area: 0.0,
            avg_face_area: 0.0,
            min_aspect_ratio: f64::MAX,
            max_aspect_ratio: 0.0,
            avg_aspect_ratio: 0.0,
            min_dihedral_angle: f64::MAX,
            max_dihedral_angle: 0.0,
            non_manifold_edge_count: 0,
            degenerate_face_count: 0,
            uv_stretch_factor: 0.0,
        }
    }
}

/// Running state behind [`QualityMetrics`].
///
/// Extrema are tagged with `Option` while accumulating so that sentinel
/// floats never take part in comparisons; they become sentinel values only
/// at the reporting boundary in [`finalize`](Self::finalize).
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsAccumulator {
    area_total: f64,
    area_min: Option<f64>,
    area_max: Option<f64>,

    aspect_total: f64,
    aspect_min: Option<f64>,
    aspect_max: Option<f64>,

    dihedral_min: Option<f64>,
    dihedral_max: Option<f64>,

    uv_total: f64,
    uv_count: usize,

    pub(crate) non_manifold_edges: usize,
    pub(crate) degenerate_faces: usize,
}

impl MetricsAccumulator {
    /// Record one face's area.
    pub(crate) fn record_area(&mut self, area: f64) {
        self.area_total += area;
        self.area_min = Some(self.area_min.map_or(area, |m| m.min(area)));
        self.area_max = Some(self.area_max.map_or(area, |m| m.max(area)));
    }

    /// Record one face's aspect ratio.
    pub(crate) fn record_aspect(&mut self, ratio: f64) {
        self.aspect_total += ratio;
        self.aspect_min = Some(self.aspect_min.map_or(ratio, |m| m.min(ratio)));
        self.aspect_max = Some(self.aspect_max.map_or(ratio, |m| m.max(ratio)));
    }

    /// Record one manifold edge's dihedral angle, in degrees.
    ///
    /// A tracked minimum below 0.1 degrees is treated as unset and
    /// replaced by the next sample, even a larger one, so a near-zero
    /// angle observed early is reported as whatever angle came after
    /// it. This behavior is part of the compatibility contract.
    pub(crate) fn record_dihedral(&mut self, angle: f64) {
        self.dihedral_min = match self.dihedral_min {
            Some(min) if angle >= min && min >= 0.1 => Some(min),
            _ => Some(angle),
        };
        if angle > self.dihedral_max.unwrap_or(0.0) {
            self.dihedral_max = Some(angle);
        }
    }

    /// Record one face's measurable UV stretch factor.
    pub(crate) fn record_uv(&mut self, stretch: f64) {
        self.uv_total += stretch;
        self.uv_count += 1;
    }

    /// Convert to the reported snapshot.
    ///
    /// `face_count` is the mesh's total face count; face-derived averages
    /// divide by it, and sentinels are left untouched when it is zero.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn finalize(&self, face_count: usize) -> QualityMetrics {
        let mut metrics = QualityMetrics::default();

        if face_count > 0 {
            metrics.min_face_area = self.area_min.unwrap_or(f64::MAX);
            metrics.max_face_area = self.area_max.unwrap_or(0.0);
            metrics.avg_face_area = self.area_total / face_count as f64;

            metrics.min_aspect_ratio = self.aspect_min.unwrap_or(f64::MAX);
            metrics.max_aspect_ratio = self.aspect_max.unwrap_or(0.0);
            metrics.avg_aspect_ratio = self.aspect_total / face_count as f64;
        }

        if let Some(min) = self.dihedral_min {
            metrics.min_dihedral_angle = min;
        }
        if let Some(max) = self.dihedral_max {
            metrics.max_dihedral_angle = max;
        }

        if self.uv_count > 0 {
            metrics.uv_stretch_factor = self.uv_total / self.uv_count as f64;
        }

        metrics.non_manifold_edge_count = self.non_manifold_edges;
        metrics.degenerate_face_count = self.degenerate_faces;

        metrics
    }
}
