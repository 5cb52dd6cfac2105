//! Frame solver example - portal frame and a small truss

use frame2d_solver::prelude::*;

fn portal_frame() -> FrameResult<()> {
    println!("=== Portal Frame ===\n");

    let mut model = FrameModel::new();

    model.add_material(1, Material::steel())?;

    // Roughly a W12x26 about its strong axis
    model.add_section(1, Section::new(0.00494, 8.49e-5))?;

    //     3 -------- 4
    //     |          |
    //     |          |
    //     1          2
    //   Fixed      Fixed
    let height = 4.0;
    let span = 6.0;

    model.add_node(1, Node::new(0.0, 0.0))?;
    model.add_node(2, Node::new(span, 0.0))?;
    model.add_node(3, Node::new(0.0, height))?;
    model.add_node(4, Node::new(span, height))?;

    model.add_element(1, Element::beam(1, 3, 1, 1))?;
    model.add_element(2, Element::beam(2, 4, 1, 1))?;
    model.add_element(3, Element::beam(3, 4, 1, 1))?;

    model.set_boundary_condition(1, BoundaryCondition::fixed())?;
    model.set_boundary_condition(2, BoundaryCondition::fixed())?;

    // 20 kN/m on the beam lumped to its ends, plus 10 kN lateral at roof level
    let gravity = -span * 20000.0 / 2.0;
    model.set_load(3, NodeLoad::force(10000.0, gravity))?;
    model.set_load(4, NodeLoad::fy(gravity))?;

    println!("Running linear analysis...\n");
    model.solve_with(&AnalysisOptions::default().with_statics_check(1e-6))?;

    println!("Node Displacements:");
    for &node in model.nodes().keys() {
        let disp = model.node_displacement(node)?;
        println!(
            "  {}: UX={:.4}mm, UY={:.4}mm, THETA={:.6}rad",
            node,
            disp.ux * 1000.0,
            disp.uy * 1000.0,
            disp.theta
        );
    }

    println!("\nSupport Reactions:");
    for &node in model.boundary_conditions().keys() {
        let rxn = model.node_reaction(node)?;
        println!(
            "  {}: FX={:.2}kN, FY={:.2}kN, M={:.2}kN·m",
            node,
            rxn.fx / 1000.0,
            rxn.fy / 1000.0,
            rxn.m / 1000.0
        );
    }

    println!("\nMember Forces:");
    for &element in model.elements().keys() {
        let forces = model.member_forces(element)?;
        println!(
            "  {}: N={:.2}kN, Vmax={:.2}kN, Mmax={:.2}kN·m",
            element,
            forces.axial() / 1000.0,
            forces.max_shear() / 1000.0,
            forces.max_moment() / 1000.0
        );
    }

    if let Some(profile) = model.shear_moment_profile(3, 5) {
        println!("\nBeam moment diagram:");
        for (x, m) in profile.x.iter().zip(&profile.moment) {
            println!("  x={:.2}m  M={:.2}kN·m", x, m / 1000.0);
        }
    }

    let summary = model.summary()?;
    println!("\nSummary:");
    if let Some(node) = summary.max_disp_node {
        println!("  Max displacement: {:.4}mm at node {}", summary.max_displacement * 1000.0, node);
    }
    if let Some(node) = summary.max_reaction_node {
        println!("  Max reaction: {:.2}kN at node {}", summary.max_reaction / 1000.0, node);
    }
    if let Some(element) = summary.max_axial_member {
        println!("  Max axial: {:.2}kN in element {}", summary.max_axial / 1000.0, element);
    }
    if let Some(element) = summary.max_moment_member {
        println!("  Max moment: {:.2}kN·m in element {}", summary.max_moment / 1000.0, element);
    }
    println!("  Condition number: {:.3e}", summary.condition_number);
    println!();

    Ok(())
}

fn triangle_truss() -> FrameResult<()> {
    println!("=== Triangle Truss ===\n");

    let mut model = FrameModel::new();
    model.add_material(1, Material::steel())?;
    model.add_section(1, Section::truss(1e-3))?;

    model.add_node(1, Node::new(0.0, 0.0))?;
    model.add_node(2, Node::new(4.0, 0.0))?;
    model.add_node(3, Node::new(2.0, 2.0))?;

    model.add_element(1, Element::truss(1, 2, 1, 1))?;
    model.add_element(2, Element::truss(1, 3, 1, 1))?;
    model.add_element(3, Element::truss(2, 3, 1, 1))?;

    // Bars give no rotational stiffness, so every rotation is held
    model.set_boundary_condition(1, BoundaryCondition::fixed())?;
    model.set_boundary_condition(2, BoundaryCondition::roller_y().with_theta(0.0))?;
    model.set_boundary_condition(3, BoundaryCondition::free().with_theta(0.0))?;

    model.set_load(3, NodeLoad::fy(-50000.0))?;

    println!("{}\n", model.diagnose());

    let results = model.solve()?;
    let idle = results.zero_force_members(DEFAULT_ZERO_FORCE_THRESHOLD);
    if !idle.is_empty() {
        println!("  Zero-force members: {:?}", idle);
    }

    for &element in model.elements().keys() {
        if let Some(axial) = model.axial_force(element) {
            let state = if axial >= 0.0 { "tension" } else { "compression" };
            println!("  Bar {}: {:.2}kN ({})", element, axial / 1000.0, state);
        }
    }

    let residual = model.equilibrium_residual()?;
    println!(
        "\nEquilibrium residual: [{:.2e}, {:.2e}, {:.2e}]",
        residual[0], residual[1], residual[2]
    );

    Ok(())
}

fn main() -> FrameResult<()> {
    env_logger::init();

    portal_frame()?;
    triangle_truss()?;

    println!("\n=== Analysis Complete ===");
    Ok(())
}
