//! Section properties for frame elements

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Second moment of area at or below which a section carries no bending
pub const DEFAULT_TRUSS_THRESHOLD: f64 = 1e-9;

/// Cross-section properties for 2D frame elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area in m²
    pub a: f64,
    /// Second moment of area about the out-of-plane axis in m⁴
    pub i: f64,
}

impl Section {
    /// Create a new section with basic properties
    pub fn new(a: f64, i: f64) -> Self {
        Self { a, i }
    }

    /// Axial-only section (I = 0)
    pub fn truss(a: f64) -> Self {
        Self { a, i: 0.0 }
    }

    /// Create a rectangular section, bending in the depth direction
    pub fn rectangular(width: f64, depth: f64) -> Self {
        Self {
            a: width * depth,
            i: width * depth.powi(3) / 12.0,
        }
    }

    /// Create a solid circular section
    pub fn circular(diameter: f64) -> Self {
        let r = diameter / 2.0;
        Self {
            a: std::f64::consts::PI * r.powi(2),
            i: std::f64::consts::PI * r.powi(4) / 4.0,
        }
    }

    /// Create a hollow circular (pipe) section
    pub fn pipe(outer_diameter: f64, wall_thickness: f64) -> Self {
        let r_o = outer_diameter / 2.0;
        let r_i = r_o - wall_thickness;
        Self {
            a: std::f64::consts::PI * (r_o.powi(2) - r_i.powi(2)),
            i: std::f64::consts::PI * (r_o.powi(4) - r_i.powi(4)) / 4.0,
        }
    }

    /// Doubly symmetric I-beam: two flanges of `flange_width` joined by a web
    pub fn i_beam(
        depth: f64,
        flange_width: f64,
        web_thickness: f64,
        flange_thickness: f64,
    ) -> Self {
        let web_depth = depth - 2.0 * flange_thickness;
        Self {
            a: 2.0 * flange_width * flange_thickness + web_depth * web_thickness,
            i: (flange_width * depth.powi(3) - (flange_width - web_thickness) * web_depth.powi(3))
                / 12.0,
        }
    }

    /// Channel section bending about its strong axis.
    ///
    /// The web runs the full depth and the flanges are added on top of it, so
    /// the flange-web overlap is counted twice.
    pub fn channel(
        depth: f64,
        flange_width: f64,
        web_thickness: f64,
        flange_thickness: f64,
    ) -> Self {
        let arm = (depth - flange_thickness) / 2.0;
        Self {
            a: depth * web_thickness + 2.0 * flange_width * flange_thickness,
            i: (web_thickness * depth.powi(3) + 2.0 * flange_width * flange_thickness.powi(3))
                / 12.0
                + 2.0 * flange_width * flange_thickness * arm.powi(2),
        }
    }

    /// T-beam with the flange on top, I taken about the section centroid
    pub fn t_beam(
        depth: f64,
        flange_width: f64,
        web_thickness: f64,
        flange_thickness: f64,
    ) -> Self {
        let web_depth = depth - flange_thickness;
        let flange_area = flange_width * flange_thickness;
        let web_area = web_depth * web_thickness;
        let a = flange_area + web_area;

        // Measured from the top of the flange
        let flange_y = flange_thickness / 2.0;
        let web_y = flange_thickness + web_depth / 2.0;
        let y_bar = (flange_area * flange_y + web_area * web_y) / a;

        let i = flange_width * flange_thickness.powi(3) / 12.0
            + flange_area * (y_bar - flange_y).powi(2)
            + web_thickness * web_depth.powi(3) / 12.0
            + web_area * (web_y - y_bar).powi(2);

        Self { a, i }
    }

    /// Whether the section behaves as axial-only for the given threshold.
    ///
    /// Bending needs I strictly above the threshold.
    pub fn is_truss_like(&self, threshold: f64) -> bool {
        self.i <= threshold
    }

    pub(crate) fn validate(&self) -> FrameResult<()> {
        if !self.a.is_finite() || self.a <= 0.0 {
            return Err(FrameError::InvalidInput(format!(
                "section area must be positive, got {}",
                self.a
            )));
        }
        if !self.i.is_finite() || self.i < 0.0 {
            return Err(FrameError::InvalidInput(format!(
                "second moment of area must be non-negative, got {}",
                self.i
            )));
        }
        Ok(())
    }
}

impl Default for Section {
    fn default() -> Self {
        // 200mm x 200mm rectangle
        Self::rectangular(0.2, 0.2)
    }
}
