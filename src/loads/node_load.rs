//! Node loads - forces and moments applied directly to nodes

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// The net load applied at a node
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeLoad {
    /// Force in X direction (N)
    #[serde(default)]
    pub fx: f64,
    /// Force in Y direction (N)
    #[serde(default)]
    pub fy: f64,
    /// Moment about the out-of-plane axis (N·m), counter-clockwise positive
    #[serde(default)]
    pub m: f64,
}

impl NodeLoad {
    /// Create a new node load with all components
    pub fn new(fx: f64, fy: f64, m: f64) -> Self {
        Self { fx, fy, m }
    }

    /// Create a force-only node load
    pub fn force(fx: f64, fy: f64) -> Self {
        Self::new(fx, fy, 0.0)
    }

    /// Create a moment-only node load
    pub fn moment(m: f64) -> Self {
        Self::new(0.0, 0.0, m)
    }

    /// Create a load in X direction
    pub fn fx(value: f64) -> Self {
        Self::force(value, 0.0)
    }

    /// Create a load in Y direction
    pub fn fy(value: f64) -> Self {
        Self::force(0.0, value)
    }

    /// Get the load as an array [FX, FY, M]
    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.m]
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.fx * factor, self.fy * factor, self.m * factor)
    }

    /// Whether every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.fx == 0.0 && self.fy == 0.0 && self.m == 0.0
    }

    pub(crate) fn validate(&self) -> FrameResult<()> {
        if self.as_array().iter().any(|v| !v.is_finite()) {
            return Err(FrameError::InvalidInput(format!(
                "load components must be finite, got ({}, {}, {})",
                self.fx, self.fy, self.m
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(NodeLoad::fy(-10.0).as_array(), [0.0, -10.0, 0.0]);
        assert_eq!(NodeLoad::moment(5.0).as_array(), [0.0, 0.0, 5.0]);
        assert!(NodeLoad::default().is_zero());
    }

    #[test]
    fn test_scaled() {
        let load = NodeLoad::new(1.0, -2.0, 3.0).scaled(2.0);
        assert_eq!(load, NodeLoad::new(2.0, -4.0, 6.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(NodeLoad::fx(f64::NAN).validate().is_err());
    }
}
