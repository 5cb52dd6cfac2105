//! Boundary condition partitioning and the reduced linear solve

use std::collections::BTreeMap;

use log::{debug, log, warn};

use super::diagnostics::diagnose;
use super::AnalysisOptions;
use crate::assembly::DofMap;
use crate::elements::{BoundaryCondition, NodeId};
use crate::error::{FrameError, FrameResult};
use crate::math::{self, Mat, Vec as FEVec};

/// Split of the global DOFs into free and prescribed sets
#[derive(Debug, Clone, PartialEq)]
pub struct DofPartition {
    /// Unknown DOFs, ascending
    pub free: Vec<usize>,
    /// Prescribed DOFs, ascending
    pub fixed: Vec<usize>,
    /// Prescribed value for each entry of `fixed`
    pub prescribed: Vec<f64>,
}

impl DofPartition {
    pub fn num_free(&self) -> usize {
        self.free.len()
    }

    pub fn num_fixed(&self) -> usize {
        self.fixed.len()
    }
}

/// Displacements of the full model plus the conditioning of `K_ff`
#[derive(Debug, Clone)]
pub struct ReducedSolution {
    pub displacements: FEVec,
    pub condition_number: f64,
}

/// Collect every prescribed component of every boundary condition
pub fn partition_dofs(
    bcs: &BTreeMap<NodeId, BoundaryCondition>,
    dof_map: &DofMap,
) -> FrameResult<DofPartition> {
    let mut prescribed: BTreeMap<usize, f64> = BTreeMap::new();

    for (&node, bc) in bcs {
        let base = dof_map.base(node).ok_or(FrameError::NodeNotFound(node))?;
        for (component, value) in bc.as_array().iter().enumerate() {
            if let Some(value) = value {
                prescribed.insert(base + component, *value);
            }
        }
    }

    let free = (0..dof_map.num_dofs())
        .filter(|dof| !prescribed.contains_key(dof))
        .collect();
    let (fixed, prescribed) = prescribed.into_iter().unzip();

    Ok(DofPartition {
        free,
        fixed,
        prescribed,
    })
}

/// Solve `K_ff * U_f = F_f - K_fs * U_s` and rebuild the full displacement vector
///
/// The condition number of `K_ff` is checked first; an ill-conditioned or
/// singular system fails with the rigid-body diagnostics attached.
pub fn solve_displacements(
    k_global: &Mat,
    f_global: &FEVec,
    partition: &DofPartition,
    bcs: &BTreeMap<NodeId, BoundaryCondition>,
    dof_map: &DofMap,
    options: &AnalysisOptions,
) -> FrameResult<ReducedSolution> {
    let n_dofs = dof_map.num_dofs();
    let n_free = partition.num_free();

    let mut d_full = FEVec::zeros(n_dofs);
    for (&dof, &value) in partition.fixed.iter().zip(&partition.prescribed) {
        d_full[dof] = value;
    }

    if n_free == 0 {
        debug!("All {} DOFs are prescribed, nothing to solve", n_dofs);
        return Ok(ReducedSolution {
            displacements: d_full,
            condition_number: 1.0,
        });
    }

    // Partition stiffness matrix and load vector
    let mut k11 = Mat::zeros(n_free, n_free);
    let mut p1 = FEVec::zeros(n_free);

    for (i, &di) in partition.free.iter().enumerate() {
        p1[i] = f_global[di];

        for (j, &dj) in partition.free.iter().enumerate() {
            k11[(i, j)] = k_global[(di, dj)];
        }

        // Account for enforced displacements
        for (&dj, &value) in partition.fixed.iter().zip(&partition.prescribed) {
            if value != 0.0 {
                p1[i] -= k_global[(di, dj)] * value;
            }
        }
    }

    let condition_number = math::condition_number(&k11);
    log!(
        options.progress_level(),
        "K_ff is {}x{}, condition number {:.3e}",
        n_free,
        n_free,
        condition_number
    );

    // NaN compares false, so it is rejected here too
    if !(condition_number <= options.condition_threshold) {
        warn!(
            "Stiffness matrix is ill-conditioned (condition number {:.1e} > {:.1e})",
            condition_number, options.condition_threshold
        );
        return Err(FrameError::UnderConstrained {
            condition_number,
            diagnostics: diagnose(bcs, &k11, &partition.free, dof_map),
        });
    }

    let d1 = match math::solve_linear_system(&k11, &p1) {
        Some(d) => d,
        None => {
            warn!("Direct solve failed on a {}x{} system", n_free, n_free);
            return Err(FrameError::NumericalFailure {
                diagnostics: diagnose(bcs, &k11, &partition.free, dof_map),
            });
        }
    };

    for (i, &di) in partition.free.iter().enumerate() {
        d_full[di] = d1[i];
    }

    Ok(ReducedSolution {
        displacements: d_full,
        condition_number,
    })
}
