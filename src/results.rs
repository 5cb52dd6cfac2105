//! Result types for frame analysis

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::assembly::DofMap;
use crate::elements::{ElementId, NodeId};
use crate::math::Vec as FEVec;

/// Displacement results at a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Displacement in X direction
    pub ux: f64,
    /// Displacement in Y direction
    pub uy: f64,
    /// Rotation, counter-clockwise positive
    pub theta: f64,
}

impl NodeDisplacement {
    /// Create from array [UX, UY, THETA]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            ux: arr[0],
            uy: arr[1],
            theta: arr[2],
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.ux, self.uy, self.theta]
    }

    /// Get translation magnitude
    pub fn translation_magnitude(&self) -> f64 {
        self.ux.hypot(self.uy)
    }
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction force in X direction
    pub fx: f64,
    /// Reaction force in Y direction
    pub fy: f64,
    /// Reaction moment
    pub m: f64,
}

impl Reactions {
    /// Create from array [FX, FY, M]
    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            fx: arr[0],
            fy: arr[1],
            m: arr[2],
        }
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.fx, self.fy, self.m]
    }

    /// Get total force magnitude
    pub fn force_magnitude(&self) -> f64 {
        self.fx.hypot(self.fy)
    }
}

/// End forces of a member in its local frame, `k_local * d_local`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemberForces {
    /// Axial force at the i-node
    pub n1: f64,
    /// Shear force at the i-node
    pub v1: f64,
    /// Moment at the i-node
    pub m1: f64,
    /// Axial force at the j-node
    pub n2: f64,
    /// Shear force at the j-node
    pub v2: f64,
    /// Moment at the j-node
    pub m2: f64,
}

impl MemberForces {
    /// Create from the local force vector [N1, V1, M1, N2, V2, M2]
    pub fn from_array(arr: [f64; 6]) -> Self {
        Self {
            n1: arr[0],
            v1: arr[1],
            m1: arr[2],
            n2: arr[3],
            v2: arr[4],
            m2: arr[5],
        }
    }

    pub fn as_array(&self) -> [f64; 6] {
        [self.n1, self.v1, self.m1, self.n2, self.v2, self.m2]
    }

    /// Axial force, positive in tension.
    ///
    /// Equilibrium gives N2 = -N1, so -N1 is the pull the member exerts.
    pub fn axial(&self) -> f64 {
        -self.n1
    }

    /// Get maximum absolute end moment
    pub fn max_moment(&self) -> f64 {
        self.m1.abs().max(self.m2.abs())
    }

    /// Get maximum absolute end shear
    pub fn max_shear(&self) -> f64 {
        self.v1.abs().max(self.v2.abs())
    }
}

/// Shear and moment sampled along a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShearMomentProfile {
    /// Distance from the i-node, 0 to L
    pub x: Vec<f64>,
    pub shear: Vec<f64>,
    pub moment: Vec<f64>,
}

impl ShearMomentProfile {
    /// Sample `num_points` evenly spaced stations from the end forces.
    ///
    /// Without loads between the nodes the shear is constant (V1) and the
    /// moment linear, M(x) = M1 + V1 * x. Axial-only members give zeros.
    pub fn sample(forces: &MemberForces, length: f64, num_points: usize, axial_only: bool) -> Self {
        let x: Vec<f64> = match num_points {
            0 => Vec::new(),
            1 => vec![0.0],
            n => (0..n)
                .map(|k| length * k as f64 / (n - 1) as f64)
                .collect(),
        };

        let (shear, moment) = if axial_only {
            (vec![0.0; x.len()], vec![0.0; x.len()])
        } else {
            (
                vec![forces.v1; x.len()],
                x.iter().map(|&xi| forces.m1 + forces.v1 * xi).collect(),
            )
        };

        Self { x, shear, moment }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Largest absolute sampled moment
    pub fn max_abs_moment(&self) -> f64 {
        self.moment.iter().fold(0.0_f64, |acc, m| acc.max(m.abs()))
    }
}

/// |axial| below which a member counts as zero-force, in N
pub const DEFAULT_ZERO_FORCE_THRESHOLD: f64 = 5e-3;

/// Output of a successful solve
#[derive(Debug, Clone)]
pub struct AnalysisResults {
    pub(crate) dof_map: DofMap,
    pub(crate) displacements: FEVec,
    pub(crate) member_forces: BTreeMap<ElementId, [f64; 6]>,
    pub(crate) reactions: BTreeMap<NodeId, [f64; 3]>,
    pub(crate) axial_only: BTreeMap<ElementId, bool>,
    pub(crate) condition_number: f64,
    pub(crate) free_dofs: usize,
}

impl AnalysisResults {
    /// Full displacement vector, three entries per node in ascending node id order
    pub fn displacements(&self) -> &FEVec {
        &self.displacements
    }

    /// Node ids in the order of the displacement vector
    pub fn node_order(&self) -> &[NodeId] {
        self.dof_map.node_ids()
    }

    /// Global DOF index of a node component in `displacements()`
    pub fn dof_index(&self, node: NodeId, component: usize) -> Option<usize> {
        self.dof_map.dof(node, component)
    }

    /// Displacement of one node
    pub fn node_displacement(&self, node: NodeId) -> Option<NodeDisplacement> {
        let base = self.dof_map.base(node)?;
        Some(NodeDisplacement::from_array([
            self.displacements[base],
            self.displacements[base + 1],
            self.displacements[base + 2],
        ]))
    }

    /// Reactions keyed by supported node, [FX, FY, M]
    pub fn reactions(&self) -> &BTreeMap<NodeId, [f64; 3]> {
        &self.reactions
    }

    /// Reactions at one supported node
    pub fn reaction(&self, node: NodeId) -> Option<Reactions> {
        self.reactions.get(&node).copied().map(Reactions::from_array)
    }

    /// Local end forces keyed by element, [N1, V1, M1, N2, V2, M2]
    pub fn local_forces(&self) -> &BTreeMap<ElementId, [f64; 6]> {
        &self.member_forces
    }

    /// Local end forces of one element
    pub fn member_forces(&self, element: ElementId) -> Option<MemberForces> {
        self.member_forces
            .get(&element)
            .copied()
            .map(MemberForces::from_array)
    }

    /// Axial force of one element, positive in tension
    pub fn axial_force(&self, element: ElementId) -> Option<f64> {
        self.member_forces(element).map(|f| f.axial())
    }

    /// Elements whose |axial force| is below `threshold`, in ascending id order.
    ///
    /// Every element is checked, bending members included.
    pub fn zero_force_members(&self, threshold: f64) -> Vec<ElementId> {
        self.member_forces
            .iter()
            .filter(|(_, forces)| MemberForces::from_array(**forces).axial().abs() < threshold)
            .map(|(&eid, _)| eid)
            .collect()
    }

    /// Whether the element was analysed as axial-only
    pub fn is_axial_only(&self, element: ElementId) -> Option<bool> {
        self.axial_only.get(&element).copied()
    }

    /// Condition number of the reduced stiffness matrix
    pub fn condition_number(&self) -> f64 {
        self.condition_number
    }

    pub fn num_free_dofs(&self) -> usize {
        self.free_dofs
    }

    pub fn num_dofs(&self) -> usize {
        self.dof_map.num_dofs()
    }
}

/// Summary of analysis results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Maximum translation magnitude
    pub max_displacement: f64,
    /// Node with maximum displacement
    pub max_disp_node: Option<NodeId>,
    /// Maximum reaction force magnitude
    pub max_reaction: f64,
    /// Node with maximum reaction
    pub max_reaction_node: Option<NodeId>,
    /// Maximum absolute member axial force
    pub max_axial: f64,
    /// Member with maximum axial
    pub max_axial_member: Option<ElementId>,
    /// Maximum absolute member end moment
    pub max_moment: f64,
    /// Member with maximum moment
    pub max_moment_member: Option<ElementId>,
    /// Total number of nodes
    pub num_nodes: usize,
    /// Total number of elements
    pub num_elements: usize,
    /// Total DOFs
    pub total_dofs: usize,
    /// Free DOFs (unknown)
    pub free_dofs: usize,
    /// Condition number of the reduced stiffness matrix
    pub condition_number: f64,
}

impl AnalysisSummary {
    /// Collect extremes from a set of results
    pub fn from_results(results: &AnalysisResults) -> Self {
        let mut summary = Self {
            num_nodes: results.dof_map.num_nodes(),
            num_elements: results.member_forces.len(),
            total_dofs: results.num_dofs(),
            free_dofs: results.free_dofs,
            condition_number: results.condition_number,
            ..Default::default()
        };

        for &node in results.node_order() {
            if let Some(disp) = results.node_displacement(node) {
                let mag = disp.translation_magnitude();
                if mag > summary.max_displacement {
                    summary.max_displacement = mag;
                    summary.max_disp_node = Some(node);
                }
            }
        }

        for (&node, rxn) in &results.reactions {
            let mag = Reactions::from_array(*rxn).force_magnitude();
            if mag > summary.max_reaction {
                summary.max_reaction = mag;
                summary.max_reaction_node = Some(node);
            }
        }

        for (&eid, forces) in &results.member_forces {
            let forces = MemberForces::from_array(*forces);
            let axial = forces.axial().abs();
            if axial > summary.max_axial {
                summary.max_axial = axial;
                summary.max_axial_member = Some(eid);
            }

            let moment = forces.max_moment();
            if moment > summary.max_moment {
                summary.max_moment = moment;
                summary.max_moment_member = Some(eid);
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axial_sign() {
        // Tension: the i-end force points back towards n1
        let tension = MemberForces::from_array([-5.0, 0.0, 0.0, 5.0, 0.0, 0.0]);
        assert_eq!(tension.axial(), 5.0);
        let compression = MemberForces::from_array([5.0, 0.0, 0.0, -5.0, 0.0, 0.0]);
        assert_eq!(compression.axial(), -5.0);
    }

    #[test]
    fn test_profile_linear_moment() {
        let forces = MemberForces::from_array([0.0, 2.0, 10.0, 0.0, -2.0, -2.0]);
        let profile = ShearMomentProfile::sample(&forces, 4.0, 5, false);

        assert_eq!(profile.x, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert!(profile.shear.iter().all(|&v| v == 2.0));
        assert_relative_eq!(profile.moment[0], 10.0);
        assert_relative_eq!(profile.moment[4], 18.0);
        assert_relative_eq!(profile.max_abs_moment(), 18.0);
    }

    #[test]
    fn test_profile_axial_only_is_zero() {
        let forces = MemberForces::from_array([1.0, 2.0, 3.0, -1.0, -2.0, 4.0]);
        let profile = ShearMomentProfile::sample(&forces, 2.0, 3, true);
        assert_eq!(profile.len(), 3);
        assert!(profile.shear.iter().chain(&profile.moment).all(|&v| v == 0.0));
    }

    #[test]
    fn test_zero_force_members() {
        let results = AnalysisResults {
            dof_map: DofMap::new([1, 2, 3]),
            displacements: FEVec::zeros(9),
            member_forces: BTreeMap::from([
                (1, [-120.0, 0.0, 0.0, 120.0, 0.0, 0.0]),
                (2, [1e-4, 0.0, 0.0, -1e-4, 0.0, 0.0]),
                (4, [-4e-3, 3.0, 1.0, 4e-3, -3.0, 2.0]),
                (7, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            ]),
            reactions: BTreeMap::new(),
            axial_only: BTreeMap::new(),
            condition_number: 1.0,
            free_dofs: 0,
        };

        assert_eq!(
            results.zero_force_members(DEFAULT_ZERO_FORCE_THRESHOLD),
            vec![2, 4, 7]
        );
        assert_eq!(results.zero_force_members(1e-3), vec![2, 7]);
        assert!(results.zero_force_members(0.0).is_empty());
    }

    #[test]
    fn test_profile_degenerate_counts() {
        let forces = MemberForces::from_array([0.0, 1.0, 1.0, 0.0, -1.0, 0.0]);
        assert!(ShearMomentProfile::sample(&forces, 3.0, 0, false).is_empty());

        let single = ShearMomentProfile::sample(&forces, 3.0, 1, false);
        assert_eq!(single.x, vec![0.0]);
        assert_eq!(single.moment, vec![1.0]);
    }
}
