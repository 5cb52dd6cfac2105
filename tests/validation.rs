use approx::assert_relative_eq;
use frame2d_solver::prelude::*;

fn two_node_model(kind: ElementKind) -> FrameModel {
    let mut model = FrameModel::new();
    model.add_material(1, Material::steel()).unwrap();
    model.add_section(1, Section::rectangular(0.1, 0.2)).unwrap();
    model.add_node(1, Node::new(0.0, 0.0)).unwrap();
    model.add_node(2, Node::new(2.0, 0.0)).unwrap();
    model
        .add_element(1, Element::new(1, 2, kind, 1, 1))
        .unwrap();
    model
}

#[test]
fn model_without_supports_is_unconstrained() {
    let mut model = two_node_model(ElementKind::Beam);
    model.set_load(2, NodeLoad::fy(-1.0)).unwrap();

    let err = model.solve().unwrap_err();
    assert!(matches!(err, FrameError::Unconstrained(_)));
    assert!(err.is_solve_failure());
    assert_eq!(model.state(), SolveState::Failed);

    // A condition that prescribes nothing does not count as a support
    model
        .set_boundary_condition(1, BoundaryCondition::free())
        .unwrap();
    assert!(matches!(model.solve(), Err(FrameError::Unconstrained(_))));
}

#[test]
fn model_without_elements_is_incomplete() {
    let mut model = FrameModel::new();
    model.add_node(1, Node::new(0.0, 0.0)).unwrap();
    model
        .set_boundary_condition(1, BoundaryCondition::fixed())
        .unwrap();
    assert!(matches!(model.solve(), Err(FrameError::ModelIncomplete(_))));
}

#[test]
fn unrestrained_rotation_is_under_constrained() {
    // Pinned bar: nothing resists rotation or transverse movement at node 2
    let mut model = two_node_model(ElementKind::Truss);
    model
        .set_boundary_condition(1, BoundaryCondition::pinned())
        .unwrap();
    model.set_load(2, NodeLoad::fx(100.0)).unwrap();

    match model.solve().unwrap_err() {
        FrameError::UnderConstrained {
            condition_number,
            diagnostics,
        } => {
            assert!(condition_number > 1e15);
            assert!(diagnostics.starts_with("Possible issues detected:"));
            assert!(diagnostics.contains("- Structure can rotate freely"));
            assert!(diagnostics.contains("No stiffness against Y translation at node(s) 2"));
            assert!(diagnostics.contains("No stiffness against rotation at node(s) 1, 2"));
            assert!(!diagnostics.contains("translate freely"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(model.results().is_none());
    assert_eq!(model.axial_force(1), None);
}

#[test]
fn single_roller_is_under_constrained() {
    let mut model = two_node_model(ElementKind::Beam);
    model
        .set_boundary_condition(1, BoundaryCondition::roller_y())
        .unwrap();
    model.set_load(2, NodeLoad::fy(-1.0)).unwrap();

    let err = model.solve().unwrap_err();
    assert!(err.is_solve_failure());
    match err {
        FrameError::UnderConstrained {
            condition_number,
            diagnostics,
        } => {
            assert!(condition_number > 1e15);
            assert!(diagnostics.contains("translate freely in X"));
            assert!(diagnostics.contains("rotate freely"));
            assert!(!diagnostics.contains("translate freely in Y"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(model.state(), SolveState::Failed);
}

#[test]
fn singular_system_past_the_condition_guard_is_a_numerical_failure() {
    let mut model = two_node_model(ElementKind::Beam);
    model
        .set_boundary_condition(1, BoundaryCondition::roller_y())
        .unwrap();
    model.set_load(2, NodeLoad::fy(-1.0)).unwrap();

    let options = AnalysisOptions::default().with_condition_threshold(f64::INFINITY);
    let err = model.solve_with(&options).unwrap_err();
    assert!(err.is_solve_failure());
    assert!(!err.is_validation());
    match err {
        FrameError::NumericalFailure { diagnostics } => {
            assert!(diagnostics.starts_with("Possible issues detected:"));
            assert!(diagnostics.contains("translate freely in X"));
            assert!(diagnostics.contains("rotate freely"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(model.state(), SolveState::Failed);
    assert!(model.results().is_none());
}

#[test]
fn diagnose_flags_a_mechanism_before_solving() {
    let mut model = two_node_model(ElementKind::Beam);
    model
        .set_boundary_condition(1, BoundaryCondition::roller_y())
        .unwrap();

    let report = model.diagnose();
    assert_eq!(report.constrained_dofs, 1);
    assert_eq!(report.determinacy, Determinacy::Mechanism(2));
    assert!(!report.is_ready());
    assert_eq!(model.state(), SolveState::Unsolved);

    model
        .set_boundary_condition(1, BoundaryCondition::fixed())
        .unwrap();
    let report = model.diagnose();
    assert_eq!(report.determinacy, Determinacy::Determinate);
    assert!(report.is_ready());
}

#[test]
fn restraining_the_missing_dofs_fixes_the_solve() {
    let mut model = two_node_model(ElementKind::Truss);
    model
        .set_boundary_condition(1, BoundaryCondition::pinned())
        .unwrap();
    model.set_load(2, NodeLoad::fx(100.0)).unwrap();
    assert!(model.solve().is_err());

    model
        .set_boundary_condition(1, BoundaryCondition::free().with_theta(0.0))
        .unwrap();
    model
        .set_boundary_condition(2, BoundaryCondition::free().with_uy(0.0).with_theta(0.0))
        .unwrap();
    model.solve().unwrap();
    assert_relative_eq!(model.axial_force(1).unwrap(), 100.0, max_relative = 1e-9);
}

#[test]
fn boundary_conditions_merge_per_component() {
    let mut model = two_node_model(ElementKind::Beam);
    model
        .set_boundary_condition(1, BoundaryCondition::pinned())
        .unwrap();
    model
        .set_boundary_condition(1, BoundaryCondition::free().with_theta(0.0))
        .unwrap();

    let bc = model.boundary_condition(1).unwrap();
    assert_eq!(bc.ux, Some(0.0));
    assert_eq!(bc.uy, Some(0.0));
    assert_eq!(bc.theta, Some(0.0));

    model
        .set_boundary_condition(1, BoundaryCondition::free().with_ux(0.25))
        .unwrap();
    let bc = model.boundary_condition(1).unwrap();
    assert_eq!(bc.ux, Some(0.25));
    assert_eq!(bc.uy, Some(0.0));

    assert!(model.clear_boundary_condition(1).is_some());
    assert!(model.boundary_condition(1).is_none());
}

#[test]
fn setting_a_load_replaces_the_previous_one() {
    let mut replaced = two_node_model(ElementKind::Beam);
    replaced
        .set_boundary_condition(1, BoundaryCondition::fixed())
        .unwrap();
    replaced.set_load(2, NodeLoad::fy(-500.0)).unwrap();
    replaced.set_load(2, NodeLoad::fx(300.0)).unwrap();
    assert_eq!(replaced.load(2), Some(&NodeLoad::fx(300.0)));
    replaced.solve().unwrap();

    let mut single = two_node_model(ElementKind::Beam);
    single
        .set_boundary_condition(1, BoundaryCondition::fixed())
        .unwrap();
    single.set_load(2, NodeLoad::fx(300.0)).unwrap();
    single.solve().unwrap();

    let a = replaced.node_displacement(2).unwrap();
    let b = single.node_displacement(2).unwrap();
    assert_eq!(a, b);
    assert_relative_eq!(a.uy, 0.0, epsilon = 1e-15);
}

#[test]
fn invalid_input_leaves_model_unchanged() {
    let mut model = two_node_model(ElementKind::Beam);

    let err = model.add_material(2, Material::new(0.0)).unwrap_err();
    assert!(matches!(err, FrameError::InvalidInput(_)));
    assert!(err.is_validation());
    assert_eq!(model.materials().len(), 1);

    assert!(matches!(
        model.add_section(2, Section::new(-1.0, 1e-4)),
        Err(FrameError::InvalidInput(_))
    ));
    assert!(matches!(
        model.add_node(3, Node::new(f64::NAN, 0.0)),
        Err(FrameError::InvalidInput(_))
    ));
    assert!(matches!(
        model.set_load(2, NodeLoad::fx(f64::INFINITY)),
        Err(FrameError::InvalidInput(_))
    ));
    assert!(matches!(
        model.set_load(7, NodeLoad::fx(1.0)),
        Err(FrameError::NodeNotFound(7))
    ));
    assert!(matches!(
        model.set_boundary_condition(7, BoundaryCondition::fixed()),
        Err(FrameError::NodeNotFound(7))
    ));
    assert!(matches!(
        model.replace_section(5, Section::truss(1.0)),
        Err(FrameError::SectionNotFound(5))
    ));
    assert!(matches!(
        model.remove_element(5),
        Err(FrameError::ElementNotFound(5))
    ));

    assert_eq!(model.sections().len(), 1);
    assert_eq!(model.nodes().len(), 2);
    assert!(model.loads().is_empty());
}

#[test]
fn element_kind_names() {
    assert_eq!("truss".parse::<ElementKind>().unwrap(), ElementKind::Truss);
    assert_eq!(" Beam ".parse::<ElementKind>().unwrap(), ElementKind::Beam);
    assert!(matches!(
        "frame".parse::<ElementKind>(),
        Err(FrameError::InvalidElementKind(_))
    ));
}

#[test]
fn editing_after_a_solve_requires_a_new_solve() {
    let mut model = two_node_model(ElementKind::Beam);
    model
        .set_boundary_condition(1, BoundaryCondition::fixed())
        .unwrap();
    model.set_load(2, NodeLoad::fy(-1_000.0)).unwrap();
    model.solve().unwrap();
    let short_tip = model.node_displacement(2).unwrap().uy;

    model.move_node(2, 4.0, 0.0).unwrap();
    assert_eq!(model.state(), SolveState::Unsolved);
    assert!(matches!(model.summary(), Err(FrameError::NotAnalyzed)));
    assert_relative_eq!(model.element_length(1).unwrap(), 4.0);

    model.solve().unwrap();
    let long_tip = model.node_displacement(2).unwrap().uy;
    assert_relative_eq!(long_tip / short_tip, 8.0, max_relative = 1e-9);
}

#[test]
fn replacing_material_changes_stiffness() {
    let mut model = two_node_model(ElementKind::Beam);
    model
        .set_boundary_condition(1, BoundaryCondition::fixed())
        .unwrap();
    model.set_load(2, NodeLoad::fy(-1_000.0)).unwrap();
    model.solve().unwrap();
    let steel_tip = model.node_displacement(2).unwrap().uy;

    let old = model
        .replace_material(1, Material::new(100e9))
        .unwrap();
    assert_eq!(old, Material::steel());
    model.solve().unwrap();
    let soft_tip = model.node_displacement(2).unwrap().uy;

    assert_relative_eq!(soft_tip / steel_tip, old.e / 100e9, max_relative = 1e-9);
}

#[test]
fn clear_empties_the_model() {
    let mut model = two_node_model(ElementKind::Beam);
    model
        .set_boundary_condition(1, BoundaryCondition::fixed())
        .unwrap();
    model.solve().unwrap();

    model.clear();
    assert!(model.nodes().is_empty());
    assert!(model.elements().is_empty());
    assert!(model.boundary_conditions().is_empty());
    assert!(model.results().is_none());
    assert!(matches!(model.solve(), Err(FrameError::ModelIncomplete(_))));
}

#[test]
fn model_serializes_to_json() {
    let model = two_node_model(ElementKind::Truss);
    let json = serde_json::to_value(&model).unwrap();
    assert_eq!(json["elements"]["1"]["kind"], "truss");
    assert_eq!(json["nodes"]["2"]["x"], 2.0);
}
