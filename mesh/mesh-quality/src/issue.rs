//! Defect categories and issue records.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Categories of mesh defects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IssueKind {
    /// Triangle area below the degeneracy threshold.
    DegenerateFace,
    /// Sliver triangle: longest edge far exceeds the minimum height.
    HighAspectRatio,
    /// Two distinct vertices closer than the overlap threshold.
    OverlappingVertices,
    /// Edge shared by more than two faces.
    NonManifoldEdge,
    /// Geometric face normal opposes the averaged stored vertex normals.
    InvertedNormal,
    /// Vertex connected to more neighbors than expected.
    HighValenceVertex,
    /// Vertex connected to fewer neighbors than expected (but at least one).
    LowValenceVertex,
    /// Excessive 3D-to-UV area distortion.
    TextureStretch,
    /// Dihedral angle on a manifold edge below the sharpness threshold.
    SharpAngle,
}

impl IssueKind {
    /// All kinds, in canonical display order.
    pub const ALL: [Self; 9] = [
        Self::DegenerateFace,
        Self::HighAspectRatio,
        Self::OverlappingVertices,
        Self::NonManifoldEdge,
        Self::InvertedNormal,
        Self::HighValenceVertex,
        Self::LowValenceVertex,
        Self::TextureStretch,
        Self::SharpAngle,
    ];

    /// Get the canonical display name for the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DegenerateFace => "Degenerate Face",
            Self::HighAspectRatio => "High Aspect Ratio",
            Self::OverlappingVertices => "Overlapping Vertices",
            Self::NonManifoldEdge => "Non-manifold Edge",
            Self::InvertedNormal => "Inverted Normal",
            Self::HighValenceVertex => "High Valence Vertex",
            Self::LowValenceVertex => "Low Valence Vertex",
            Self::TextureStretch => "Texture Stretch",
            Self::SharpAngle => "Sharp Angle",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single detected defect.
///
/// `element` identifies the primary offending element; whether it is a face
/// or a vertex index depends on the kind. `severity` is normalized toward
/// `[0, 1]`, but some kinds can exceed 1.0 - callers must not assume a hard
/// ceiling. `related` lists additional implicated vertex/face indices (for
/// example, all vertices of a degenerate face).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshIssue {
    /// Defect category.
    pub kind: IssueKind,

    /// Index of the primary offending element (face or vertex, per kind).
    pub element: usize,

    /// How far the defect exceeds its detection threshold.
    pub severity: f64,

    /// Additional implicated element indices.
    pub related: Vec<usize>,
}

impl MeshIssue {
    /// Create a new issue.
    #[must_use]
    pub const fn new(kind: IssueKind, element: usize, severity: f64, related: Vec<usize>) -> Self {
        Self {
            kind,
            element,
            severity,
            related,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(IssueKind::DegenerateFace.as_str(), "Degenerate Face");
        assert_eq!(IssueKind::NonManifoldEdge.as_str(), "Non-manifold Edge");
        assert_eq!(IssueKind::SharpAngle.to_string(), "Sharp Angle");
    }

    #[test]
    fn all_kinds_are_distinct() {
        for (i, a) in IssueKind::ALL.iter().enumerate() {
            for b in &IssueKind::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn issue_creation() {
        let issue = MeshIssue::new(IssueKind::DegenerateFace, 4, 0.75, vec![0, 1, 2]);
        assert_eq!(issue.kind, IssueKind::DegenerateFace);
        assert_eq!(issue.element, 4);
        assert_eq!(issue.related, vec![0, 1, 2]);
    }
}
