//! Structural elements module

mod boundary;
mod element;
mod material;
mod node;
mod section;

pub use boundary::BoundaryCondition;
pub use element::{Element, ElementKind};
pub use material::Material;
pub use node::Node;
pub use section::{Section, DEFAULT_TRUSS_THRESHOLD};

/// Caller-assigned node identifier
pub type NodeId = u32;
/// Caller-assigned element identifier
pub type ElementId = u32;
/// Caller-assigned material identifier
pub type MaterialId = u32;
/// Caller-assigned section identifier
pub type SectionId = u32;
