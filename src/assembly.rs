//! Global stiffness and load assembly
//!
//! DOFs are numbered through an explicit node id -> index map built for each
//! solve, so node ids need not be contiguous. With ids `1..=N` the numbering
//! matches `3 * (id - 1) + component`.

use std::collections::BTreeMap;

use log::debug;

use crate::analysis::AnalysisOptions;
use crate::elements::{Element, ElementKind, NodeId};
use crate::error::{FrameError, FrameResult};
use crate::math::{self, ElementGeometry, Mat, Mat6, Vec as FEVec};
use crate::model::FrameModel;

/// Degrees of freedom per node: ux, uy, theta
pub const DOFS_PER_NODE: usize = 3;

/// Dense DOF numbering for a set of node ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DofMap {
    order: Vec<NodeId>,
    index: BTreeMap<NodeId, usize>,
}

impl DofMap {
    /// Number the given nodes in ascending id order
    pub fn new<I: IntoIterator<Item = NodeId>>(node_ids: I) -> Self {
        let mut order: Vec<NodeId> = node_ids.into_iter().collect();
        order.sort_unstable();
        order.dedup();

        let index = order
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        Self { order, index }
    }

    pub fn num_nodes(&self) -> usize {
        self.order.len()
    }

    pub fn num_dofs(&self) -> usize {
        self.order.len() * DOFS_PER_NODE
    }

    /// Node ids in DOF order
    pub fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    /// First global DOF of a node
    pub fn base(&self, node: NodeId) -> Option<usize> {
        self.index.get(&node).map(|i| i * DOFS_PER_NODE)
    }

    /// Global DOF of one component (0 = ux, 1 = uy, 2 = theta) of a node
    pub fn dof(&self, node: NodeId, component: usize) -> Option<usize> {
        if component >= DOFS_PER_NODE {
            return None;
        }
        self.base(node).map(|b| b + component)
    }

    /// The six global DOFs of an element, i-node first
    pub fn element_dofs(&self, n1: NodeId, n2: NodeId) -> FrameResult<[usize; 6]> {
        let i = self.base(n1).ok_or(FrameError::NodeNotFound(n1))?;
        let j = self.base(n2).ok_or(FrameError::NodeNotFound(n2))?;
        Ok([i, i + 1, i + 2, j, j + 1, j + 2])
    }

    /// Node and component owning a global DOF
    pub fn locate(&self, dof: usize) -> Option<(NodeId, usize)> {
        self.order
            .get(dof / DOFS_PER_NODE)
            .map(|&node| (node, dof % DOFS_PER_NODE))
    }
}

/// Everything the solver needs about one element at its current geometry
#[derive(Debug, Clone)]
pub struct ElementMatrices {
    pub geometry: ElementGeometry,
    /// Formulation actually used (see `ElementKind::effective`)
    pub kind: ElementKind,
    /// Global -> local transformation
    pub t: Mat6,
    /// 6x6 local stiffness (truss embedded when axial-only)
    pub k_local: Mat6,
    /// T^T * k_local * T
    pub k_global: Mat6,
}

/// Build the element matrices from the current node coordinates
pub fn element_matrices(
    model: &FrameModel,
    element: &Element,
    options: &AnalysisOptions,
) -> FrameResult<ElementMatrices> {
    let i_node = model
        .node(element.n1)
        .ok_or(FrameError::NodeNotFound(element.n1))?;
    let j_node = model
        .node(element.n2)
        .ok_or(FrameError::NodeNotFound(element.n2))?;
    let material = model
        .material(element.material)
        .ok_or(FrameError::MaterialNotFound(element.material))?;
    let section = model
        .section(element.section)
        .ok_or(FrameError::SectionNotFound(element.section))?;

    let geometry = math::element_geometry(&i_node.coords(), &j_node.coords())?;
    let kind = element.kind.effective(section, options.truss_threshold);

    let t = math::transformation_matrix(geometry.c, geometry.s);
    let k_local = math::local_stiffness(kind, material.e, section.a, section.i, geometry.length);
    let k_global = math::to_global(&k_local, &t);

    Ok(ElementMatrices {
        geometry,
        kind,
        t,
        k_local,
        k_global,
    })
}

/// Build the global stiffness matrix
pub fn assemble_stiffness(
    model: &FrameModel,
    dof_map: &DofMap,
    options: &AnalysisOptions,
) -> FrameResult<Mat> {
    let n_dofs = dof_map.num_dofs();
    let mut k_global = Mat::zeros(n_dofs, n_dofs);

    for (&eid, element) in model.elements() {
        let matrices = element_matrices(model, element, options).map_err(|e| match e {
            FrameError::InvalidGeometry(msg) => {
                FrameError::InvalidGeometry(format!("element {eid}: {msg}"))
            }
            other => other,
        })?;
        let dofs = dof_map.element_dofs(element.n1, element.n2)?;

        for (a, &ga) in dofs.iter().enumerate() {
            for (b, &gb) in dofs.iter().enumerate() {
                k_global[(ga, gb)] += matrices.k_global[(a, b)];
            }
        }
    }

    debug!(
        "Assembled {}x{} global stiffness from {} elements",
        n_dofs,
        n_dofs,
        model.elements().len()
    );

    Ok(k_global)
}

/// Build the global load vector. Nodes without a load contribute zero.
pub fn assemble_loads(model: &FrameModel, dof_map: &DofMap) -> FrameResult<FEVec> {
    let mut p = FEVec::zeros(dof_map.num_dofs());

    for &node in dof_map.node_ids() {
        let load = model.load(node).copied().unwrap_or_default();
        let base = dof_map.base(node).ok_or(FrameError::NodeNotFound(node))?;
        for (i, value) in load.as_array().into_iter().enumerate() {
            p[base + i] = value;
        }
    }

    Ok(p)
}
