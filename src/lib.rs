//! Frame2D Solver - linear static analysis of 2D frames and trusses
//!
//! This library implements the direct stiffness method for plane structures:
//! - Truss (axial-only) and Euler-Bernoulli beam elements
//! - Nodal forces and moments
//! - Supports and enforced displacements per DOF
//! - Reactions, member end forces and shear/moment sampling
//! - Conditioning check with rigid-body mode diagnostics
//! - Pre-solve determinacy checklist and zero-force member detection
//!
//! ## Example
//! ```rust
//! use frame2d_solver::prelude::*;
//!
//! let mut model = FrameModel::new();
//!
//! model.add_material(1, Material::steel()).unwrap();
//! model.add_section(1, Section::rectangular(0.2, 0.4)).unwrap();
//!
//! model.add_node(1, Node::new(0.0, 0.0)).unwrap();
//! model.add_node(2, Node::new(5.0, 0.0)).unwrap();
//!
//! model.add_element(1, Element::beam(1, 2, 1, 1)).unwrap();
//! model.set_boundary_condition(1, BoundaryCondition::fixed()).unwrap();
//! model.set_load(2, NodeLoad::fy(-10_000.0)).unwrap();
//!
//! model.solve().unwrap();
//!
//! let tip = model.node_displacement(2).unwrap();
//! assert!(tip.uy < 0.0);
//! ```

pub mod analysis;
pub mod assembly;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod model;
pub mod results;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{AnalysisOptions, Determinacy, SolveState, StructureReport};
    pub use crate::elements::{
        BoundaryCondition, Element, ElementId, ElementKind, Material, MaterialId, Node, NodeId,
        Section, SectionId,
    };
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::NodeLoad;
    pub use crate::model::FrameModel;
    pub use crate::results::{
        AnalysisResults, AnalysisSummary, MemberForces, NodeDisplacement, Reactions,
        ShearMomentProfile, DEFAULT_ZERO_FORCE_THRESHOLD,
    };
}
