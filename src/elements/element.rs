//! Element - 2D truss or beam member between two nodes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{MaterialId, NodeId, Section, SectionId};
use crate::error::{FrameError, FrameResult};

/// Declared formulation of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Axial-only, pin-ended member
    Truss,
    /// Member resisting axial force, shear and bending
    Beam,
}

impl ElementKind {
    /// Kind used by the solver for this element.
    ///
    /// A beam whose section has I at or below `truss_threshold` is analysed as a
    /// truss. This lets a beam-tagged member with I = 0 act as a pin-ended bar.
    pub fn effective(self, section: &Section, truss_threshold: f64) -> ElementKind {
        match self {
            ElementKind::Beam if !section.is_truss_like(truss_threshold) => ElementKind::Beam,
            _ => ElementKind::Truss,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Truss => "truss",
            ElementKind::Beam => "beam",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "truss" => Ok(ElementKind::Truss),
            "beam" => Ok(ElementKind::Beam),
            _ => Err(FrameError::InvalidElementKind(s.to_string())),
        }
    }
}

/// A 2D member. Local x runs from `n1` to `n2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Start node
    pub n1: NodeId,
    /// End node
    pub n2: NodeId,
    /// Declared formulation
    pub kind: ElementKind,
    /// Material id
    pub material: MaterialId,
    /// Section id
    pub section: SectionId,
}

impl Element {
    /// Create a new element
    pub fn new(
        n1: NodeId,
        n2: NodeId,
        kind: ElementKind,
        material: MaterialId,
        section: SectionId,
    ) -> Self {
        Self {
            n1,
            n2,
            kind,
            material,
            section,
        }
    }

    /// Create a truss element
    pub fn truss(n1: NodeId, n2: NodeId, material: MaterialId, section: SectionId) -> Self {
        Self::new(n1, n2, ElementKind::Truss, material, section)
    }

    /// Create a beam element
    pub fn beam(n1: NodeId, n2: NodeId, material: MaterialId, section: SectionId) -> Self {
        Self::new(n1, n2, ElementKind::Beam, material, section)
    }

    /// Node ids as an ordered pair
    pub fn nodes(&self) -> [NodeId; 2] {
        [self.n1, self.n2]
    }

    /// Whether the element is connected to `node`
    pub fn connects(&self, node: NodeId) -> bool {
        self.n1 == node || self.n2 == node
    }

    pub(crate) fn validate_topology(&self) -> FrameResult<()> {
        if self.n1 == self.n2 {
            return Err(FrameError::InvalidGeometry(format!(
                "element connects node {} to itself",
                self.n1
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_creation() {
        let el = Element::beam(1, 2, 10, 20);
        assert_eq!(el.nodes(), [1, 2]);
        assert_eq!(el.kind, ElementKind::Beam);
        assert!(el.connects(2));
        assert!(!el.connects(3));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("truss".parse::<ElementKind>().unwrap(), ElementKind::Truss);
        assert_eq!(" Beam ".parse::<ElementKind>().unwrap(), ElementKind::Beam);
        let err = "cable".parse::<ElementKind>().unwrap_err();
        assert!(matches!(err, FrameError::InvalidElementKind(ref k) if k == "cable"));
    }

    #[test]
    fn test_effective_kind() {
        let stiff = Section::new(0.01, 1e-5);
        let pinned = Section::truss(0.01);
        assert_eq!(ElementKind::Beam.effective(&stiff, 1e-9), ElementKind::Beam);
        assert_eq!(ElementKind::Beam.effective(&pinned, 1e-9), ElementKind::Truss);
        assert_eq!(ElementKind::Truss.effective(&stiff, 1e-9), ElementKind::Truss);

        let borderline = Section::new(0.01, 1e-9);
        assert_eq!(ElementKind::Beam.effective(&borderline, 1e-9), ElementKind::Truss);
        assert_eq!(ElementKind::Beam.effective(&borderline, 5e-10), ElementKind::Beam);
    }

    #[test]
    fn test_self_loop_rejected() {
        assert!(Element::truss(4, 4, 1, 1).validate_topology().is_err());
    }
}
