//! Frame solver HTTP server

use std::net::SocketAddr;

use anyhow::Context;
use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use frame2d_solver::prelude::*;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Deserialize)]
struct DiagnoseRequest {
    model: ModelData,
}

#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    model: ModelData,
    #[serde(default)]
    options: Option<AnalysisOptions>,
    /// Stations per element for shear/moment profiles; omitted means none
    #[serde(default)]
    profile_points: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ModelData {
    nodes: Vec<NodeData>,
    materials: Vec<MaterialData>,
    sections: Vec<SectionData>,
    elements: Vec<ElementData>,
    #[serde(default)]
    loads: Vec<LoadData>,
    #[serde(default)]
    boundary_conditions: Vec<BoundaryData>,
}

#[derive(Debug, Deserialize)]
struct NodeData {
    id: NodeId,
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
struct MaterialData {
    id: MaterialId,
    e: f64,
}

#[derive(Debug, Deserialize)]
struct SectionData {
    id: SectionId,
    a: f64,
    #[serde(default)]
    i: f64,
}

#[derive(Debug, Deserialize)]
struct ElementData {
    id: ElementId,
    n1: NodeId,
    n2: NodeId,
    #[serde(default = "default_kind")]
    kind: String,
    material: MaterialId,
    section: SectionId,
}

fn default_kind() -> String {
    "beam".to_string()
}

#[derive(Debug, Deserialize)]
struct LoadData {
    node: NodeId,
    #[serde(default)]
    fx: f64,
    #[serde(default)]
    fy: f64,
    #[serde(default)]
    m: f64,
}

#[derive(Debug, Deserialize)]
struct BoundaryData {
    node: NodeId,
    #[serde(flatten)]
    condition: BoundaryCondition,
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<ResultsData>,
}

#[derive(Debug, Serialize)]
struct DiagnoseResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<StructureReport>,
    warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ResultsData {
    node_displacements: Vec<NodeDisplacementResult>,
    reactions: Vec<ReactionResult>,
    member_forces: Vec<MemberForceResult>,
    zero_force_members: Vec<ElementId>,
    summary: AnalysisSummary,
}

#[derive(Debug, Serialize)]
struct NodeDisplacementResult {
    node: NodeId,
    ux: f64,
    uy: f64,
    theta: f64,
}

#[derive(Debug, Serialize)]
struct ReactionResult {
    node: NodeId,
    fx: f64,
    fy: f64,
    m: f64,
}

#[derive(Debug, Serialize)]
struct MemberForceResult {
    element: ElementId,
    axial: f64,
    #[serde(flatten)]
    end_forces: MemberForces,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<ShearMomentProfile>,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn analyze(Json(request): Json<AnalysisRequest>) -> impl IntoResponse {
    match run_analysis(request) {
        Ok(results) => (
            StatusCode::OK,
            Json(AnalysisResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            let status = if e.is_solve_failure() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                StatusCode::BAD_REQUEST
            };
            warn!("Analysis request rejected ({}): {}", status, e);
            (
                status,
                Json(AnalysisResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

async fn diagnose(Json(request): Json<DiagnoseRequest>) -> impl IntoResponse {
    match build_model(request.model, AnalysisOptions::default()) {
        Ok(model) => {
            let report = model.diagnose();
            (
                StatusCode::OK,
                Json(DiagnoseResponse {
                    success: true,
                    error: None,
                    warnings: report.warnings(),
                    report: Some(report),
                }),
            )
        }
        Err(e) => {
            warn!("Diagnose request rejected: {}", e);
            (
                StatusCode::BAD_REQUEST,
                Json(DiagnoseResponse {
                    success: false,
                    error: Some(e.to_string()),
                    report: None,
                    warnings: Vec::new(),
                }),
            )
        }
    }
}

fn build_model(data: ModelData, options: AnalysisOptions) -> FrameResult<FrameModel> {
    let mut model = FrameModel::with_options(options);

    for mat in data.materials {
        model.add_material(mat.id, Material::new(mat.e))?;
    }

    for sec in data.sections {
        model.add_section(sec.id, Section::new(sec.a, sec.i))?;
    }

    for node in data.nodes {
        model.add_node(node.id, Node::new(node.x, node.y))?;
    }

    for element in data.elements {
        let kind: ElementKind = element.kind.parse()?;
        model.add_element(
            element.id,
            Element::new(element.n1, element.n2, kind, element.material, element.section),
        )?;
    }

    for bc in data.boundary_conditions {
        model.set_boundary_condition(bc.node, bc.condition)?;
    }

    // Repeated entries for the same node replace each other
    for load in data.loads {
        model.set_load(load.node, NodeLoad::new(load.fx, load.fy, load.m))?;
    }

    Ok(model)
}

fn run_analysis(request: AnalysisRequest) -> FrameResult<ResultsData> {
    let mut model = build_model(request.model, request.options.unwrap_or_default())?;
    model.solve()?;

    let mut node_displacements = Vec::new();
    for &node in model.nodes().keys() {
        let disp = model.node_displacement(node)?;
        node_displacements.push(NodeDisplacementResult {
            node,
            ux: disp.ux,
            uy: disp.uy,
            theta: disp.theta,
        });
    }

    let mut reactions = Vec::new();
    for &node in model.boundary_conditions().keys() {
        let rxn = model.node_reaction(node)?;
        reactions.push(ReactionResult {
            node,
            fx: rxn.fx,
            fy: rxn.fy,
            m: rxn.m,
        });
    }

    let mut member_forces = Vec::new();
    for &element in model.elements().keys() {
        let end_forces = model.member_forces(element)?;
        member_forces.push(MemberForceResult {
            element,
            axial: end_forces.axial(),
            end_forces,
            profile: request
                .profile_points
                .and_then(|n| model.shear_moment_profile(element, n)),
        });
    }

    let zero_force_members = model
        .results()
        .map(|r| r.zero_force_members(DEFAULT_ZERO_FORCE_THRESHOLD))
        .unwrap_or_default();

    Ok(ResultsData {
        node_displacements,
        reactions,
        member_forces,
        zero_force_members,
        summary: model.summary()?,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/analyze", post(analyze))
        .route("/api/v1/diagnose", post(diagnose))
        .layer(cors);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8086".to_string());
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("invalid listen address {host}:{port}"))?;

    info!("Frame solver server listening on http://{}", addr);
    info!("  Health check: GET  /health");
    info!("  Analysis:     POST /api/v1/analyze");
    info!("  Diagnose:     POST /api/v1/diagnose");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
