//! Material properties

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};

/// Material properties for structural analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity (Young's modulus) in Pa
    pub e: f64,
    /// Poisson's ratio (not used by the static solver)
    pub nu: Option<f64>,
    /// Density in kg/m³ (not used by the static solver)
    pub rho: Option<f64>,
}

impl Material {
    /// Create a material from its elastic modulus only
    pub fn new(e: f64) -> Self {
        Self {
            e,
            nu: None,
            rho: None,
        }
    }

    /// Set Poisson's ratio
    pub fn with_poisson(mut self, nu: f64) -> Self {
        self.nu = Some(nu);
        self
    }

    /// Create a standard steel material
    pub fn steel() -> Self {
        Self {
            e: 200e9,       // 200 GPa
            nu: Some(0.3),
            rho: Some(7850.0),
        }
    }

    /// Create an aluminum material (6061-T6)
    pub fn aluminum() -> Self {
        Self {
            e: 68.9e9,      // 68.9 GPa
            nu: Some(0.33),
            rho: Some(2700.0),
        }
    }

    /// Create a standard concrete material from its compressive strength in Pa
    pub fn concrete(fc: f64) -> Self {
        // ACI estimate: E = 4700 * sqrt(f'c in MPa) MPa
        let fc_mpa = fc / 1e6;
        Self {
            e: 4700.0 * fc_mpa.sqrt() * 1e6,
            nu: Some(0.2),
            rho: Some(2400.0),
        }
    }

    pub(crate) fn validate(&self) -> FrameResult<()> {
        if !self.e.is_finite() || self.e <= 0.0 {
            return Err(FrameError::InvalidInput(format!(
                "elastic modulus must be positive, got {}",
                self.e
            )));
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::steel()
    }
}
