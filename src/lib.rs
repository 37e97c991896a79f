#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dimension;
pub mod dxf;
pub mod error;
pub mod geom;
pub mod geometry;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod scene;
pub mod symbols;
pub mod text_metrics;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, load_config};
pub use dxf::write_dxf;
pub use error::{Diagnostic, Diagnostics, PlanError, Result};
pub use geometry::build_scene;
pub use ir::PlanRequest;
pub use layout::{PlanLayout, compute_layout};
pub use parser::parse_plan;
#[cfg(feature = "png")]
pub use render::rasterize;
pub use render::render_svg;
pub use scene::VectorScene;

use config::RenderConfig;
use tracing::info;

/// Everything one request produces.
#[derive(Debug, Clone)]
pub struct PlanOutput {
    pub request: PlanRequest,
    pub layout: PlanLayout,
    pub scene: VectorScene,
    /// Layout diagnostics followed by drawing diagnostics.
    pub diagnostics: Diagnostics,
    /// Render settings after the plan's own overrides.
    pub render: RenderConfig,
    pub svg: String,
    pub dxf: String,
}

/// Parses, lays out and draws a plan. Rendering options in the plan
/// override `config.render`.
pub fn render_plan(input: &str, config: &Config) -> Result<PlanOutput> {
    let request = parse_plan(input)?;
    let mut config = config.clone();
    config.render = config
        .render
        .with_request_overrides(request.background, request.dpi);
    render_request(request, &config)
}

/// Runs the pipeline on an already parsed request using `config` as is.
pub fn render_request(request: PlanRequest, config: &Config) -> Result<PlanOutput> {
    if config.layout.strict_references {
        request.check_references()?;
    }

    let layout = compute_layout(&request, &config.layout);
    let (scene, scene_diagnostics) = build_scene(&request, &layout, &config.layout);
    let mut diagnostics = layout.diagnostics.clone();
    diagnostics.extend(scene_diagnostics);

    let svg = render_svg(&scene, &config.theme, &config.render);
    let dxf = write_dxf(&scene);
    info!(
        rooms = request.rooms.len(),
        mode = layout.mode.as_str(),
        primitives = scene.len(),
        diagnostics = diagnostics.len(),
        "plan rendered"
    );

    Ok(PlanOutput {
        request,
        layout,
        scene,
        diagnostics,
        render: config.render.clone(),
        svg,
        dxf,
    })
}
