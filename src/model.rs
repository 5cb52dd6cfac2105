//! Frame model - registries, mutators and the solve entry point

use std::collections::BTreeMap;

use log::{info, log, warn};
use serde::Serialize;

use crate::analysis::{
    partition_dofs, solve_displacements, structure_report, AnalysisOptions, SolveState,
    StructureReport,
};
use crate::assembly::{assemble_loads, assemble_stiffness, element_matrices, DofMap};
use crate::elements::{
    BoundaryCondition, Element, ElementId, ElementKind, Material, MaterialId, Node, NodeId,
    Section, SectionId,
};
use crate::error::{FrameError, FrameResult};
use crate::loads::NodeLoad;
use crate::math::{self, Vec6};
use crate::results::{
    AnalysisResults, AnalysisSummary, MemberForces, NodeDisplacement, Reactions,
    ShearMomentProfile,
};

/// The 2D frame/truss model
///
/// All registries are keyed by caller-assigned ids and only change through
/// the mutators below, which check referential integrity and reset any
/// previous analysis.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameModel {
    nodes: BTreeMap<NodeId, Node>,
    materials: BTreeMap<MaterialId, Material>,
    sections: BTreeMap<SectionId, Section>,
    elements: BTreeMap<ElementId, Element>,
    loads: BTreeMap<NodeId, NodeLoad>,
    boundary_conditions: BTreeMap<NodeId, BoundaryCondition>,
    options: AnalysisOptions,

    #[serde(skip)]
    results: Option<AnalysisResults>,
    #[serde(skip)]
    state: SolveState,
}

impl FrameModel {
    /// Create a new empty model
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty model with custom analysis options
    pub fn with_options(options: AnalysisOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn invalidate(&mut self) {
        self.results = None;
        self.state = SolveState::Unsolved;
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Add a node to the model
    pub fn add_node(&mut self, id: NodeId, node: Node) -> FrameResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(FrameError::DuplicateId { kind: "Node", id });
        }
        node.validate()?;
        self.nodes.insert(id, node);
        self.invalidate();
        Ok(())
    }

    /// Move an existing node. Refused if a connected element would collapse.
    pub fn move_node(&mut self, id: NodeId, x: f64, y: f64) -> FrameResult<()> {
        if !self.nodes.contains_key(&id) {
            return Err(FrameError::NodeNotFound(id));
        }
        let moved = Node::new(x, y);
        moved.validate()?;

        for (&eid, element) in self.elements.iter().filter(|(_, e)| e.connects(id)) {
            let other = if element.n1 == id { element.n2 } else { element.n1 };
            let other = self.nodes.get(&other).ok_or(FrameError::NodeNotFound(other))?;
            math::element_geometry(&moved.coords(), &other.coords()).map_err(|_| {
                FrameError::InvalidGeometry(format!(
                    "moving node {id} to ({x}, {y}) gives element {eid} zero length"
                ))
            })?;
        }

        self.nodes.insert(id, moved);
        self.invalidate();
        Ok(())
    }

    /// Remove a node together with its load and boundary condition
    pub fn remove_node(&mut self, id: NodeId) -> FrameResult<Node> {
        if let Some((&element, _)) = self.elements.iter().find(|(_, e)| e.connects(id)) {
            return Err(FrameError::NodeInUse { node: id, element });
        }
        let node = self.nodes.remove(&id).ok_or(FrameError::NodeNotFound(id))?;
        self.loads.remove(&id);
        self.boundary_conditions.remove(&id);
        self.invalidate();
        Ok(node)
    }

    /// Add a material to the model
    pub fn add_material(&mut self, id: MaterialId, material: Material) -> FrameResult<()> {
        if self.materials.contains_key(&id) {
            return Err(FrameError::DuplicateId { kind: "Material", id });
        }
        material.validate()?;
        self.materials.insert(id, material);
        self.invalidate();
        Ok(())
    }

    /// Replace an existing material, returning the old one
    pub fn replace_material(&mut self, id: MaterialId, material: Material) -> FrameResult<Material> {
        if !self.materials.contains_key(&id) {
            return Err(FrameError::MaterialNotFound(id));
        }
        material.validate()?;
        let old = self.materials.insert(id, material);
        self.invalidate();
        old.ok_or(FrameError::MaterialNotFound(id))
    }

    /// Add a section to the model
    pub fn add_section(&mut self, id: SectionId, section: Section) -> FrameResult<()> {
        if self.sections.contains_key(&id) {
            return Err(FrameError::DuplicateId { kind: "Section", id });
        }
        section.validate()?;
        self.sections.insert(id, section);
        self.invalidate();
        Ok(())
    }

    /// Replace an existing section, returning the old one
    pub fn replace_section(&mut self, id: SectionId, section: Section) -> FrameResult<Section> {
        if !self.sections.contains_key(&id) {
            return Err(FrameError::SectionNotFound(id));
        }
        section.validate()?;
        let old = self.sections.insert(id, section);
        self.invalidate();
        old.ok_or(FrameError::SectionNotFound(id))
    }

    fn check_element(&self, element: &Element) -> FrameResult<()> {
        element.validate_topology()?;

        let i_node = self
            .nodes
            .get(&element.n1)
            .ok_or(FrameError::NodeNotFound(element.n1))?;
        let j_node = self
            .nodes
            .get(&element.n2)
            .ok_or(FrameError::NodeNotFound(element.n2))?;
        if !self.materials.contains_key(&element.material) {
            return Err(FrameError::MaterialNotFound(element.material));
        }
        if !self.sections.contains_key(&element.section) {
            return Err(FrameError::SectionNotFound(element.section));
        }

        math::element_geometry(&i_node.coords(), &j_node.coords())?;
        Ok(())
    }

    /// Add an element to the model
    pub fn add_element(&mut self, id: ElementId, element: Element) -> FrameResult<()> {
        if self.elements.contains_key(&id) {
            return Err(FrameError::DuplicateId { kind: "Element", id });
        }
        self.check_element(&element)?;
        self.elements.insert(id, element);
        self.invalidate();
        Ok(())
    }

    /// Replace an existing element, returning the old one
    pub fn replace_element(&mut self, id: ElementId, element: Element) -> FrameResult<Element> {
        if !self.elements.contains_key(&id) {
            return Err(FrameError::ElementNotFound(id));
        }
        self.check_element(&element)?;
        let old = self.elements.insert(id, element);
        self.invalidate();
        old.ok_or(FrameError::ElementNotFound(id))
    }

    /// Remove an element. Its nodes stay in the model.
    pub fn remove_element(&mut self, id: ElementId) -> FrameResult<Element> {
        let element = self
            .elements
            .remove(&id)
            .ok_or(FrameError::ElementNotFound(id))?;
        self.invalidate();
        Ok(element)
    }

    /// Set the load at a node, replacing any previous load
    pub fn set_load(&mut self, node: NodeId, load: NodeLoad) -> FrameResult<()> {
        if !self.nodes.contains_key(&node) {
            return Err(FrameError::NodeNotFound(node));
        }
        load.validate()?;
        self.loads.insert(node, load);
        self.invalidate();
        Ok(())
    }

    /// Remove the load at a node
    pub fn clear_load(&mut self, node: NodeId) -> Option<NodeLoad> {
        let removed = self.loads.remove(&node);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    /// Apply a boundary condition to a node.
    ///
    /// Components given as `Some` overwrite the stored ones; `None`
    /// components leave the existing restraint untouched.
    pub fn set_boundary_condition(
        &mut self,
        node: NodeId,
        condition: BoundaryCondition,
    ) -> FrameResult<()> {
        if !self.nodes.contains_key(&node) {
            return Err(FrameError::NodeNotFound(node));
        }
        condition.validate()?;
        self.boundary_conditions
            .entry(node)
            .or_default()
            .merge(&condition);
        self.invalidate();
        Ok(())
    }

    /// Remove every restraint at a node
    pub fn clear_boundary_condition(&mut self, node: NodeId) -> Option<BoundaryCondition> {
        let removed = self.boundary_conditions.remove(&node);
        if removed.is_some() {
            self.invalidate();
        }
        removed
    }

    /// Empty every registry. Analysis options are kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.materials.clear();
        self.sections.clear();
        self.elements.clear();
        self.loads.clear();
        self.boundary_conditions.clear();
        self.invalidate();
    }

    /// Replace the analysis options used by `solve()`
    pub fn set_options(&mut self, options: AnalysisOptions) {
        self.options = options;
        self.invalidate();
    }

    // ========================
    // Accessors
    // ========================

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn materials(&self) -> &BTreeMap<MaterialId, Material> {
        &self.materials
    }

    pub fn sections(&self) -> &BTreeMap<SectionId, Section> {
        &self.sections
    }

    pub fn elements(&self) -> &BTreeMap<ElementId, Element> {
        &self.elements
    }

    pub fn loads(&self) -> &BTreeMap<NodeId, NodeLoad> {
        &self.loads
    }

    pub fn boundary_conditions(&self) -> &BTreeMap<NodeId, BoundaryCondition> {
        &self.boundary_conditions
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(&id)
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(&id)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn load(&self, node: NodeId) -> Option<&NodeLoad> {
        self.loads.get(&node)
    }

    pub fn boundary_condition(&self, node: NodeId) -> Option<&BoundaryCondition> {
        self.boundary_conditions.get(&node)
    }

    /// Length of an element from the current node coordinates
    pub fn element_length(&self, id: ElementId) -> Option<f64> {
        let element = self.elements.get(&id)?;
        let i_node = self.nodes.get(&element.n1)?;
        let j_node = self.nodes.get(&element.n2)?;
        Some(i_node.distance_to(j_node))
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Current analysis state
    pub fn state(&self) -> SolveState {
        self.state
    }

    /// Check if the model holds current results
    pub fn is_analyzed(&self) -> bool {
        self.state == SolveState::Solved && self.results.is_some()
    }

    /// Results of the last successful solve, if still current
    pub fn results(&self) -> Option<&AnalysisResults> {
        self.results.as_ref()
    }

    // ========================
    // Analysis
    // ========================

    /// Run a linear static analysis with the model's options
    pub fn solve(&mut self) -> FrameResult<&AnalysisResults> {
        let options = self.options.clone();
        self.solve_with(&options)
    }

    /// Run a linear static analysis with custom options.
    ///
    /// On error the model is left unchanged apart from its state, which
    /// becomes `Failed`, and no results are stored.
    pub fn solve_with(&mut self, options: &AnalysisOptions) -> FrameResult<&AnalysisResults> {
        self.results = None;
        self.state = SolveState::Solving;

        match self.run_analysis(options) {
            Ok(results) => {
                self.state = SolveState::Solved;
                Ok(self.results.insert(results))
            }
            Err(err) => {
                warn!("Analysis failed: {}", err);
                self.state = SolveState::Failed;
                Err(err)
            }
        }
    }

    fn check_preconditions(&self) -> FrameResult<()> {
        if self.nodes.is_empty() || self.elements.is_empty() {
            return Err(FrameError::ModelIncomplete(format!(
                "need at least one node and one element (have {} nodes, {} elements)",
                self.nodes.len(),
                self.elements.len()
            )));
        }
        if self.boundary_conditions.is_empty() {
            return Err(FrameError::Unconstrained(
                "no boundary conditions defined".to_string(),
            ));
        }
        if !self.boundary_conditions.values().any(|bc| bc.is_supported()) {
            return Err(FrameError::Unconstrained(
                "boundary conditions prescribe no displacement component".to_string(),
            ));
        }
        Ok(())
    }

    fn run_analysis(&self, options: &AnalysisOptions) -> FrameResult<AnalysisResults> {
        self.check_preconditions()?;

        log!(
            options.progress_level(),
            "Solving frame model: {} nodes, {} elements, {} supports",
            self.nodes.len(),
            self.elements.len(),
            self.boundary_conditions.len()
        );

        let dof_map = DofMap::new(self.nodes.keys().copied());
        let k_global = assemble_stiffness(self, &dof_map, options)?;
        let f_global = assemble_loads(self, &dof_map)?;

        let partition = partition_dofs(&self.boundary_conditions, &dof_map)?;
        let solution = solve_displacements(
            &k_global,
            &f_global,
            &partition,
            &self.boundary_conditions,
            &dof_map,
            options,
        )?;
        let u = solution.displacements;

        // Reactions: R = K * U - F at every supported node
        let r_global = &k_global * &u - &f_global;
        let mut reactions = BTreeMap::new();
        for &node in self.boundary_conditions.keys() {
            let base = dof_map.base(node).ok_or(FrameError::NodeNotFound(node))?;
            reactions.insert(node, [r_global[base], r_global[base + 1], r_global[base + 2]]);
        }

        // Member end forces in local axes: f = k_local * T * u
        let mut member_forces = BTreeMap::new();
        let mut axial_only = BTreeMap::new();
        for (&eid, element) in &self.elements {
            let matrices = element_matrices(self, element, options)?;
            let dofs = dof_map.element_dofs(element.n1, element.n2)?;
            let u_element = Vec6::from_iterator(dofs.iter().map(|&d| u[d]));
            let f_local = matrices.k_local * (matrices.t * u_element);

            let mut forces = [0.0; 6];
            forces.copy_from_slice(f_local.as_slice());
            member_forces.insert(eid, forces);
            axial_only.insert(eid, matrices.kind == ElementKind::Truss);
        }

        if options.check_statics {
            self.check_statics(&reactions, options.statics_tolerance);
        }

        info!(
            "Analysis complete: {} free DOFs, condition number {:.3e}",
            partition.num_free(),
            solution.condition_number
        );

        Ok(AnalysisResults {
            dof_map,
            displacements: u,
            member_forces,
            reactions,
            axial_only,
            condition_number: solution.condition_number,
            free_dofs: partition.num_free(),
        })
    }

    /// Sum of applied loads and reactions as [ΣFx, ΣFy, ΣM about the origin],
    /// together with the sum of absolute contributions for scaling.
    fn statics_sums(&self, reactions: &BTreeMap<NodeId, [f64; 3]>) -> ([f64; 3], [f64; 3]) {
        let mut sum = [0.0; 3];
        let mut scale = [0.0; 3];

        let applied = self.loads.iter().map(|(&n, load)| (n, load.as_array()));
        let supports = reactions.iter().map(|(&n, r)| (n, *r));

        for (node, [fx, fy, m]) in applied.chain(supports) {
            let Some(position) = self.nodes.get(&node) else {
                continue;
            };
            let moment = position.x * fy - position.y * fx + m;
            sum[0] += fx;
            sum[1] += fy;
            sum[2] += moment;
            scale[0] += fx.abs();
            scale[1] += fy.abs();
            scale[2] += (position.x * fy).abs() + (position.y * fx).abs() + m.abs();
        }

        (sum, scale)
    }

    fn check_statics(&self, reactions: &BTreeMap<NodeId, [f64; 3]>, tolerance: f64) {
        let (sum, scale) = self.statics_sums(reactions);
        let labels = ["sum Fx", "sum Fy", "sum M"];

        for ((residual, scale), label) in sum.iter().zip(scale).zip(labels) {
            if residual.abs() > tolerance * scale.max(1.0) {
                warn!(
                    "Statics check failed: {} = {:.6e} exceeds tolerance (scale {:.3e})",
                    label, residual, scale
                );
            }
        }
    }

    // ========================
    // Result Access Methods
    // ========================

    fn require_results(&self) -> FrameResult<&AnalysisResults> {
        self.results.as_ref().ok_or(FrameError::NotAnalyzed)
    }

    /// Get node displacement
    pub fn node_displacement(&self, node: NodeId) -> FrameResult<NodeDisplacement> {
        let results = self.require_results()?;
        results
            .node_displacement(node)
            .ok_or(FrameError::NodeNotFound(node))
    }

    /// Get node reactions. Nodes without a boundary condition report zero.
    pub fn node_reaction(&self, node: NodeId) -> FrameResult<Reactions> {
        let results = self.require_results()?;
        if !self.nodes.contains_key(&node) {
            return Err(FrameError::NodeNotFound(node));
        }
        Ok(results
            .reaction(node)
            .unwrap_or(Reactions::from_array([0.0; 3])))
    }

    /// Get member end forces in local axes
    pub fn member_forces(&self, element: ElementId) -> FrameResult<MemberForces> {
        let results = self.require_results()?;
        results
            .member_forces(element)
            .ok_or(FrameError::ElementNotFound(element))
    }

    /// Axial force of an element, tension positive. `None` when unsolved or unknown.
    pub fn axial_force(&self, element: ElementId) -> Option<f64> {
        self.results.as_ref()?.axial_force(element)
    }

    /// Shear and moment at `num_points` evenly spaced stations along an element
    ///
    /// Only exact for models loaded at the nodes. Members analysed as
    /// axial-only report zero shear and moment.
    pub fn shear_moment_profile(
        &self,
        element: ElementId,
        num_points: usize,
    ) -> Option<ShearMomentProfile> {
        let results = self.results.as_ref()?;
        let forces = results.member_forces(element)?;
        let axial_only = results.is_axial_only(element)?;
        let length = self.element_length(element)?;

        Some(ShearMomentProfile::sample(
            &forces, length, num_points, axial_only,
        ))
    }

    /// Get analysis summary
    pub fn summary(&self) -> FrameResult<AnalysisSummary> {
        let results = self.require_results()?;
        Ok(AnalysisSummary::from_results(results))
    }

    /// Net [ΣFx, ΣFy, ΣM about the origin] of applied loads plus reactions
    pub fn equilibrium_residual(&self) -> FrameResult<[f64; 3]> {
        let results = self.require_results()?;
        Ok(self.statics_sums(results.reactions()).0)
    }

    /// Pre-solve checklist: connectivity, support count and determinacy.
    ///
    /// Advisory only. Works in any state and never touches results.
    pub fn diagnose(&self) -> StructureReport {
        structure_report(
            &self.nodes,
            &self.elements,
            &self.boundary_conditions,
            self.loads.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cantilever(p: f64) -> FrameModel {
        let mut model = FrameModel::new();
        model.add_material(1, Material::new(200e9)).unwrap();
        model.add_section(1, Section::new(0.01, 1e-4)).unwrap();
        model.add_node(1, Node::new(0.0, 0.0)).unwrap();
        model.add_node(2, Node::new(3.0, 0.0)).unwrap();
        model.add_element(1, Element::beam(1, 2, 1, 1)).unwrap();
        model
            .set_boundary_condition(1, BoundaryCondition::fixed())
            .unwrap();
        model.set_load(2, NodeLoad::fy(p)).unwrap();
        model
    }

    #[test]
    fn test_simple_cantilever() {
        let (p, l, e, i): (f64, f64, f64, f64) = (-10_000.0, 3.0, 200e9, 1e-4);
        let mut model = cantilever(p);
        model.solve().unwrap();

        let disp = model.node_displacement(2).unwrap();
        assert_relative_eq!(disp.uy, p * l.powi(3) / (3.0 * e * i), max_relative = 1e-9);
        assert_relative_eq!(disp.theta, p * l * l / (2.0 * e * i), max_relative = 1e-9);
        assert_relative_eq!(disp.ux, 0.0, epsilon = 1e-15);

        let rxn = model.node_reaction(1).unwrap();
        assert_relative_eq!(rxn.fy, -p, max_relative = 1e-9);
        assert_relative_eq!(rxn.m, -p * l, max_relative = 1e-9);
        assert_eq!(model.state(), SolveState::Solved);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut model = cantilever(-1.0);
        assert!(matches!(
            model.add_node(1, Node::new(5.0, 5.0)),
            Err(FrameError::DuplicateId { kind: "Node", id: 1 })
        ));
        assert!(matches!(
            model.add_element(1, Element::beam(1, 2, 1, 1)),
            Err(FrameError::DuplicateId { kind: "Element", .. })
        ));
        assert_eq!(model.nodes().len(), 2);
    }

    #[test]
    fn test_add_element_checks_references() {
        let mut model = cantilever(-1.0);
        assert!(matches!(
            model.add_element(2, Element::beam(1, 9, 1, 1)),
            Err(FrameError::NodeNotFound(9))
        ));
        assert!(matches!(
            model.add_element(2, Element::beam(1, 2, 4, 1)),
            Err(FrameError::MaterialNotFound(4))
        ));
        assert!(matches!(
            model.add_element(2, Element::beam(2, 2, 1, 1)),
            Err(FrameError::InvalidGeometry(_))
        ));

        model.add_node(3, Node::new(0.0, 0.0)).unwrap();
        assert!(matches!(
            model.add_element(2, Element::beam(1, 3, 1, 1)),
            Err(FrameError::InvalidGeometry(_))
        ));
        assert_eq!(model.elements().len(), 1);
    }

    #[test]
    fn test_mutation_invalidates_results() {
        let mut model = cantilever(-1.0);
        model.solve().unwrap();
        assert!(model.is_analyzed());

        model.set_load(2, NodeLoad::fy(-2.0)).unwrap();
        assert!(!model.is_analyzed());
        assert_eq!(model.state(), SolveState::Unsolved);
        assert!(model.results().is_none());
        assert!(matches!(model.node_displacement(2), Err(FrameError::NotAnalyzed)));
        assert_eq!(model.axial_force(1), None);
    }

    #[test]
    fn test_remove_node_in_use() {
        let mut model = cantilever(-1.0);
        assert!(matches!(
            model.remove_node(2),
            Err(FrameError::NodeInUse { node: 2, element: 1 })
        ));

        model.remove_element(1).unwrap();
        model.remove_node(2).unwrap();
        assert!(model.load(2).is_none());
        assert!(model.node(2).is_none());
    }

    #[test]
    fn test_move_node_keeps_elements_valid() {
        let mut model = cantilever(-1.0);
        assert!(matches!(
            model.move_node(2, 0.0, 0.0),
            Err(FrameError::InvalidGeometry(_))
        ));
        assert_eq!(model.node(2).unwrap().x, 3.0);

        model.move_node(2, 0.0, 4.0).unwrap();
        assert_relative_eq!(model.element_length(1).unwrap(), 4.0);
    }

    #[test]
    fn test_failed_solve_leaves_model_editable() {
        let mut model = cantilever(-1.0);
        model.clear_boundary_condition(1);

        assert!(matches!(model.solve(), Err(FrameError::Unconstrained(_))));
        assert_eq!(model.state(), SolveState::Failed);
        assert!(model.results().is_none());

        model
            .set_boundary_condition(1, BoundaryCondition::fixed())
            .unwrap();
        assert_eq!(model.state(), SolveState::Unsolved);
        assert!(model.solve().is_ok());
    }

    #[test]
    fn test_empty_model_is_incomplete() {
        let mut model = FrameModel::new();
        assert!(matches!(model.solve(), Err(FrameError::ModelIncomplete(_))));
    }

    #[test]
    fn test_equilibrium_residual() {
        let mut model = cantilever(-500.0);
        model.set_load(2, NodeLoad::new(120.0, -500.0, 75.0)).unwrap();
        model
            .solve_with(&AnalysisOptions::default().with_statics_check(1e-9))
            .unwrap();

        let residual = model.equilibrium_residual().unwrap();
        for value in residual {
            assert_relative_eq!(value, 0.0, epsilon = 1e-6);
        }

        let summary = model.summary().unwrap();
        assert_eq!(summary.num_nodes, 2);
        assert_eq!(summary.free_dofs, 3);
        assert_eq!(summary.max_disp_node, Some(2));
    }

    #[test]
    fn test_diagnose_before_and_after_solve() {
        let mut model = cantilever(-1_000.0);
        let report = model.diagnose();
        assert_eq!(report.num_nodes, 2);
        assert_eq!(report.constrained_dofs, 3);
        assert!(report.is_ready());
        assert!(!report.possible_mechanism);

        model.solve().unwrap();
        assert_eq!(model.diagnose(), report);
        assert_eq!(model.state(), SolveState::Solved);

        model.add_node(5, Node::new(9.0, 9.0)).unwrap();
        let report = model.diagnose();
        assert_eq!(report.unconnected_nodes, vec![5]);
        assert!(!report.is_ready());
    }
}
