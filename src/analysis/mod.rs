//! Analysis options, solve state and the constrained linear solve

pub mod constraints;
pub mod diagnostics;

use serde::{Deserialize, Serialize};

use crate::elements::DEFAULT_TRUSS_THRESHOLD;

pub use constraints::{partition_dofs, solve_displacements, DofPartition};
pub use diagnostics::{
    format_diagnostics, rigid_body_diagnostics, structure_report, zero_stiffness_diagnostics,
    Determinacy, StructureReport,
};

/// Condition number of the free-DOF stiffness above which a solve is refused
pub const DEFAULT_CONDITION_THRESHOLD: f64 = 1e15;

/// Lifecycle of a model's analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SolveState {
    /// No results, or the model changed since the last solve
    #[default]
    Unsolved,
    /// A solve is running
    Solving,
    /// Results are current
    Solved,
    /// The last solve raised an error; no results are stored
    Failed,
}

/// Options for structural analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Reject `K_ff` when its condition number exceeds this value
    pub condition_threshold: f64,
    /// Sections with I below this value are analysed as axial-only
    pub truss_threshold: f64,
    /// Check static equilibrium after analysis
    pub check_statics: bool,
    /// Relative tolerance for the statics check
    pub statics_tolerance: f64,
    /// Report solve progress at info level instead of debug
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            condition_threshold: DEFAULT_CONDITION_THRESHOLD,
            truss_threshold: DEFAULT_TRUSS_THRESHOLD,
            check_statics: false,
            statics_tolerance: 1e-6,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Create options for linear static analysis
    pub fn linear() -> Self {
        Self::default()
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Enable the equilibrium check after each solve
    pub fn with_statics_check(mut self, tolerance: f64) -> Self {
        self.check_statics = true;
        self.statics_tolerance = tolerance;
        self
    }

    /// Set the conditioning limit
    pub fn with_condition_threshold(mut self, threshold: f64) -> Self {
        self.condition_threshold = threshold;
        self
    }

    /// Set the I threshold for axial-only behaviour
    pub fn with_truss_threshold(mut self, threshold: f64) -> Self {
        self.truss_threshold = threshold;
        self
    }

    pub(crate) fn progress_level(&self) -> log::Level {
        if self.log {
            log::Level::Info
        } else {
            log::Level::Debug
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = AnalysisOptions::default();
        assert_eq!(opts.condition_threshold, 1e15);
        assert_eq!(opts.truss_threshold, 1e-9);
        assert!(!opts.check_statics);
        assert_eq!(opts.progress_level(), log::Level::Debug);
    }

    #[test]
    fn test_builders() {
        let opts = AnalysisOptions::linear()
            .with_logging()
            .with_statics_check(1e-4)
            .with_condition_threshold(1e12);
        assert!(opts.check_statics);
        assert_eq!(opts.statics_tolerance, 1e-4);
        assert_eq!(opts.condition_threshold, 1e12);
        assert_eq!(opts.progress_level(), log::Level::Info);
    }

    #[test]
    fn test_partial_options_from_json() {
        let opts: AnalysisOptions = serde_json::from_str(r#"{"check_statics": true}"#).unwrap();
        assert!(opts.check_statics);
        assert_eq!(opts.condition_threshold, DEFAULT_CONDITION_THRESHOLD);
    }
}
