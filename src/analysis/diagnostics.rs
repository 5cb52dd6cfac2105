//! Structural diagnostics
//!
//! Rigid-body hints only produce advisory text for the error returned by
//! `solve()`. They never change control flow. `structure_report` is the
//! pre-solve checklist run on the model itself.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::assembly::DofMap;
use crate::elements::{BoundaryCondition, Element, ElementId, Node, NodeId};
use crate::math::Mat;

const COMPONENT_NAMES: [&str; 3] = ["X translation", "Y translation", "rotation"];

/// Fewest restrained DOFs that can hold a plane structure in place
pub const MIN_CONSTRAINED_DOFS: usize = 3;

/// Classification from the counting rule 2n = m + r
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "status", content = "degree")]
pub enum Determinacy {
    Determinate,
    /// Redundant members or supports, with the degree of redundancy
    Indeterminate(usize),
    /// Too few members or supports, with the number of free motions
    Mechanism(usize),
}

impl Determinacy {
    /// Classify n nodes, m members and r restrained DOFs
    pub fn classify(nodes: usize, members: usize, reactions: usize) -> Self {
        let joints = 2 * nodes;
        let bars = members + reactions;
        if joints > bars {
            Determinacy::Mechanism(joints - bars)
        } else if joints < bars {
            Determinacy::Indeterminate(bars - joints)
        } else {
            Determinacy::Determinate
        }
    }
}

impl fmt::Display for Determinacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Determinacy::Determinate => write!(f, "statically determinate"),
            Determinacy::Indeterminate(degree) => {
                write!(f, "statically indeterminate to degree {}", degree)
            }
            Determinacy::Mechanism(dofs) => {
                write!(f, "a mechanism with {} degree(s) of freedom", dofs)
            }
        }
    }
}

/// Pre-solve checklist for a model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureReport {
    pub num_nodes: usize,
    pub num_elements: usize,
    pub num_loads: usize,
    /// Nodes not referenced by any element
    pub unconnected_nodes: Vec<NodeId>,
    /// Restrained DOF components over all boundary conditions
    pub constrained_dofs: usize,
    pub determinacy: Determinacy,
    /// Set when no node is fully fixed and fewer than four DOFs are restrained
    pub possible_mechanism: bool,
}

impl StructureReport {
    /// Number of failed checks that will stop a solve or make it meaningless
    pub fn critical_issues(&self) -> usize {
        [
            self.num_nodes == 0,
            self.num_elements == 0,
            !self.unconnected_nodes.is_empty(),
            self.constrained_dofs < MIN_CONSTRAINED_DOFS,
            matches!(self.determinacy, Determinacy::Mechanism(_)),
        ]
        .iter()
        .filter(|&&failed| failed)
        .count()
    }

    pub fn is_ready(&self) -> bool {
        self.critical_issues() == 0
    }

    /// One line per failed or advisory check
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.num_nodes == 0 {
            warnings.push("No nodes defined in the structure".to_string());
        }
        if self.num_elements == 0 {
            warnings.push("No elements defined in the structure".to_string());
        }
        if !self.unconnected_nodes.is_empty() {
            let list = self
                .unconnected_nodes
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            warnings.push(format!("Nodes {} are not connected to any element", list));
        }
        if self.constrained_dofs < MIN_CONSTRAINED_DOFS {
            warnings.push(format!(
                "Only {} constrained degrees of freedom (minimum required: {})",
                self.constrained_dofs, MIN_CONSTRAINED_DOFS
            ));
        }
        if self.num_loads == 0 {
            warnings.push("No loads defined - results will be trivial".to_string());
        }
        if let Determinacy::Mechanism(_) = self.determinacy {
            warnings.push(format!("Structure is {}", self.determinacy));
        } else if self.possible_mechanism {
            warnings.push(
                "Structure might contain a mechanism - check for rigid body motion".to_string(),
            );
        }

        warnings
    }
}

impl fmt::Display for StructureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.num_nodes;
        let m = self.num_elements;
        let r = self.constrained_dofs;
        writeln!(
            f,
            "{} nodes, {} elements, {} constrained DOFs: structure is {} (2n = {}, m + r = {} + {})",
            n,
            m,
            r,
            self.determinacy,
            2 * n,
            m,
            r
        )?;
        for warning in self.warnings() {
            writeln!(f, "- {}", warning)?;
        }
        match self.critical_issues() {
            0 => write!(f, "All basic requirements for analysis are met."),
            count => write!(f, "Found {} critical issue(s).", count),
        }
    }
}

/// Run the pre-solve checklist over a model's registries.
///
/// Any `Some` component counts as a restrained DOF, whatever its value.
pub fn structure_report(
    nodes: &BTreeMap<NodeId, Node>,
    elements: &BTreeMap<ElementId, Element>,
    bcs: &BTreeMap<NodeId, BoundaryCondition>,
    num_loads: usize,
) -> StructureReport {
    let connected: BTreeSet<NodeId> = elements.values().flat_map(|e| e.nodes()).collect();
    let unconnected_nodes = nodes
        .keys()
        .copied()
        .filter(|id| !connected.contains(id))
        .collect();

    let constrained_dofs: usize = bcs.values().map(|bc| bc.num_restrained()).sum();
    let determinacy = Determinacy::classify(nodes.len(), elements.len(), constrained_dofs);

    let fixed_supports = bcs.values().filter(|bc| bc.num_restrained() == 3).count();
    let possible_mechanism = !elements.is_empty() && fixed_supports == 0 && constrained_dofs < 4;

    StructureReport {
        num_nodes: nodes.len(),
        num_elements: elements.len(),
        num_loads,
        unconnected_nodes,
        constrained_dofs,
        determinacy,
        possible_mechanism,
    }
}

/// Check the supports for missing X, Y and rotational restraint
pub fn rigid_body_diagnostics(bcs: &BTreeMap<NodeId, BoundaryCondition>) -> Vec<String> {
    let mut messages = Vec::new();

    let constrained_x = bcs.values().any(|bc| bc.ux.is_some());
    let constrained_y = bcs.values().any(|bc| bc.uy.is_some());

    if !constrained_x {
        messages.push("- Structure can translate freely in X direction".to_string());
    }
    if !constrained_y {
        messages.push("- Structure can translate freely in Y direction".to_string());
    }

    // Rotation is removed by a theta restraint or by two translationally
    // restrained nodes.
    let rotation_constrained = bcs.values().any(|bc| bc.theta.is_some());
    if !rotation_constrained {
        let anchored = bcs.values().filter(|bc| bc.restrains_translation()).count();
        if anchored < 2 {
            messages.push(
                "- Structure can rotate freely (need either a rotation constraint or two separated translation constraints)"
                    .to_string(),
            );
        }
    }

    messages
}

/// Report free DOFs with no stiffness at all, grouped by component.
///
/// Typical cause: a node whose rotation is only touched by truss elements.
pub fn zero_stiffness_diagnostics(k_ff: &Mat, free: &[usize], dof_map: &DofMap) -> Vec<String> {
    let max_diag = (0..k_ff.nrows())
        .map(|i| k_ff[(i, i)].abs())
        .fold(0.0_f64, f64::max);
    let tol = max_diag * f64::EPSILON;

    let mut by_component: [Vec<NodeId>; 3] = Default::default();
    for (i, &dof) in free.iter().enumerate() {
        if k_ff[(i, i)].abs() <= tol {
            if let Some((node, component)) = dof_map.locate(dof) {
                by_component[component].push(node);
            }
        }
    }

    by_component
        .iter()
        .enumerate()
        .filter(|(_, nodes)| !nodes.is_empty())
        .map(|(component, nodes)| {
            let list = nodes
                .iter()
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "- No stiffness against {} at node(s) {} (unconnected, or connected only to truss elements)",
                COMPONENT_NAMES[component], list
            )
        })
        .collect()
}

/// Assemble diagnostic messages into the text attached to a solve error
pub fn format_diagnostics(messages: &[String]) -> String {
    if messages.is_empty() {
        "No obvious rigid body modes detected, but the structure may still be unstable.".to_string()
    } else {
        format!(
            "Possible issues detected:\n{}\n\nAdd appropriate boundary conditions to fully constrain the structure.",
            messages.join("\n")
        )
    }
}

/// Full diagnostic text for a failed reduced solve
pub(crate) fn diagnose(
    bcs: &BTreeMap<NodeId, BoundaryCondition>,
    k_ff: &Mat,
    free: &[usize],
    dof_map: &DofMap,
) -> String {
    let mut messages = rigid_body_diagnostics(bcs);
    messages.extend(zero_stiffness_diagnostics(k_ff, free, dof_map));
    format_diagnostics(&messages)
}
