//! Node element - a joint in the XY plane

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// A 2D node (joint) in the frame model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub(crate) fn validate(&self) -> FrameResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(FrameError::InvalidInput(format!(
                "node coordinates must be finite, got ({}, {})",
                self.x, self.y
            )));
        }
        Ok(())
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_creation() {
        let node = Node::new(1.0, 2.0);
        assert_eq!(node.x, 1.0);
        assert_eq!(node.y, 2.0);
        assert_eq!(node.coords(), [1.0, 2.0]);
    }

    #[test]
    fn test_node_distance() {
        let n1 = Node::new(0.0, 0.0);
        let n2 = Node::new(3.0, 4.0);
        assert!((n1.distance_to(&n2) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(Node::new(f64::NAN, 0.0).validate().is_err());
        assert!(Node::new(0.0, f64::INFINITY).validate().is_err());
        assert!(Node::new(1.0, -1.0).validate().is_ok());
    }
}
