//! Error types for the frame solver

use thiserror::Error;

use crate::elements::{ElementId, MaterialId, NodeId, SectionId};

/// Main error type for model edits and analysis
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("{kind} {id} already exists")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("Node {0} not found in model")]
    NodeNotFound(NodeId),

    #[error("Element {0} not found in model")]
    ElementNotFound(ElementId),

    #[error("Material {0} not found in model")]
    MaterialNotFound(MaterialId),

    #[error("Section {0} not found in model")]
    SectionNotFound(SectionId),

    #[error("Node {node} is still referenced by element {element}")]
    NodeInUse { node: NodeId, element: ElementId },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unknown element kind '{0}' (expected 'truss' or 'beam')")]
    InvalidElementKind(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model incomplete: {0}")]
    ModelIncomplete(String),

    #[error("Structure is unconstrained: {0}")]
    Unconstrained(String),

    #[error("Structure is likely under-constrained (condition number: {condition_number:.1e}).\n{diagnostics}")]
    UnderConstrained {
        condition_number: f64,
        diagnostics: String,
    },

    #[error("Stiffness matrix is singular. The structure is under-constrained.\n{diagnostics}")]
    NumericalFailure { diagnostics: String },

    #[error("Model not analyzed - run solve() first")]
    NotAnalyzed,

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl FrameError {
    /// True for errors raised by a mutator before the model was touched
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FrameError::DuplicateId { .. }
                | FrameError::NodeNotFound(_)
                | FrameError::ElementNotFound(_)
                | FrameError::MaterialNotFound(_)
                | FrameError::SectionNotFound(_)
                | FrameError::NodeInUse { .. }
                | FrameError::InvalidGeometry(_)
                | FrameError::InvalidElementKind(_)
                | FrameError::InvalidInput(_)
        )
    }

    /// True for errors produced by `solve()` on a structurally unusable model
    pub fn is_solve_failure(&self) -> bool {
        matches!(
            self,
            FrameError::ModelIncomplete(_)
                | FrameError::Unconstrained(_)
                | FrameError::UnderConstrained { .. }
                | FrameError::NumericalFailure { .. }
        )
    }
}

/// Result type for frame operations
pub type FrameResult<T> = Result<T, FrameError>;
