//! Support conditions

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Prescribed displacement components at a node.
///
/// `None` leaves a component free; `Some(value)` fixes it at `value`. Plain
/// supports use zero; a nonzero value is an enforced displacement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundaryCondition {
    /// Prescribed X translation
    #[serde(default)]
    pub ux: Option<f64>,
    /// Prescribed Y translation
    #[serde(default)]
    pub uy: Option<f64>,
    /// Prescribed rotation
    #[serde(default)]
    pub theta: Option<f64>,
}

impl BoundaryCondition {
    /// Create a condition from its three components
    pub fn new(ux: Option<f64>, uy: Option<f64>, theta: Option<f64>) -> Self {
        Self { ux, uy, theta }
    }

    /// No restraint at all
    pub fn free() -> Self {
        Self::default()
    }

    /// Fully fixed support (all DOFs restrained)
    pub fn fixed() -> Self {
        Self::new(Some(0.0), Some(0.0), Some(0.0))
    }

    /// Pinned support (translations restrained, rotation free)
    pub fn pinned() -> Self {
        Self::new(Some(0.0), Some(0.0), None)
    }

    /// Roller bearing on a horizontal surface (Y restrained only)
    pub fn roller_y() -> Self {
        Self::new(None, Some(0.0), None)
    }

    /// Roller bearing on a vertical surface (X restrained only)
    pub fn roller_x() -> Self {
        Self::new(Some(0.0), None, None)
    }

    /// Restrain X translation
    pub fn with_ux(mut self, value: f64) -> Self {
        self.ux = Some(value);
        self
    }

    /// Restrain Y translation
    pub fn with_uy(mut self, value: f64) -> Self {
        self.uy = Some(value);
        self
    }

    /// Restrain rotation
    pub fn with_theta(mut self, value: f64) -> Self {
        self.theta = Some(value);
        self
    }

    /// Components as [UX, UY, THETA]
    pub fn as_array(&self) -> [Option<f64>; 3] {
        [self.ux, self.uy, self.theta]
    }

    /// Overwrite only the components that `update` prescribes
    pub fn merge(&mut self, update: &BoundaryCondition) {
        if update.ux.is_some() {
            self.ux = update.ux;
        }
        if update.uy.is_some() {
            self.uy = update.uy;
        }
        if update.theta.is_some() {
            self.theta = update.theta;
        }
    }

    /// Get list of restrained component indices (0-2)
    pub fn restrained_dofs(&self) -> Vec<usize> {
        self.as_array()
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|_| i))
            .collect()
    }

    /// Check if any component is restrained
    pub fn is_supported(&self) -> bool {
        self.ux.is_some() || self.uy.is_some() || self.theta.is_some()
    }

    /// Check if either translation is restrained
    pub fn restrains_translation(&self) -> bool {
        self.ux.is_some() || self.uy.is_some()
    }

    /// Count number of restrained components
    pub fn num_restrained(&self) -> usize {
        self.restrained_dofs().len()
    }

    pub(crate) fn validate(&self) -> FrameResult<()> {
        for value in self.as_array().iter().flatten() {
            if !value.is_finite() {
                return Err(FrameError::InvalidInput(format!(
                    "prescribed displacement must be finite, got {}",
                    value
                )));
            }
        }
        Ok(())
    }
}
