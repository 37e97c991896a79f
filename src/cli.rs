use crate::config::{Background, Config, load_config};
use crate::layout_dump::LayoutDump;
use crate::parser::parse_plan;
use crate::render::write_output_text;
use crate::{PlanOutput, render_request};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fplan",
    version,
    about = "Floor-plan synthesis: room program in, CAD wireframe out"
)]
pub struct Args {
    /// Plan file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for svg, dxf and layout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Raster resolution, overrides the plan and config
    #[arg(long = "dpi")]
    pub dpi: Option<u32>,

    /// Paper color: light or dark
    #[arg(long = "background", value_parser = parse_background)]
    pub background: Option<Background>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Dxf,
    /// JSON dump of the solved layout
    Layout,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let request = parse_plan(&input)?;
    config.render = config
        .render
        .with_request_overrides(request.background, request.dpi);
    apply_flags(&mut config, &args);

    let output = render_request(request, &config)?;
    match args.output_format {
        OutputFormat::Svg => write_output_text(&output.svg, args.output.as_deref())?,
        OutputFormat::Dxf => write_output_text(&output.dxf, args.output.as_deref())?,
        OutputFormat::Layout => {
            let json = LayoutDump::from_layout(&output.layout, &output.request).to_json()?;
            write_output_text(&json, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let path = ensure_output(&args.output, "png")?;
            write_png(&output, &config, &path)?;
        }
    }

    if !output.diagnostics.is_empty() {
        eprintln!("{} warning(s):", output.diagnostics.len());
        for diagnostic in output.diagnostics.iter() {
            eprintln!("  - {diagnostic}");
        }
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn apply_flags(config: &mut Config, args: &Args) {
    if let Some(dpi) = args.dpi {
        config.render.dpi = dpi.max(1);
    }
    if let Some(background) = args.background {
        config.render.background = background;
    }
}

fn parse_background(token: &str) -> std::result::Result<Background, String> {
    Background::from_token(token).ok_or_else(|| format!("unknown background '{token}'"))
}

#[cfg(feature = "png")]
fn write_png(output: &PlanOutput, config: &Config, path: &Path) -> Result<()> {
    let png = crate::render::rasterize(&output.scene, &config.theme, &output.render)?;
    crate::render::write_output_png(&png, path)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_png(_output: &PlanOutput, _config: &Config, _path: &Path) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires building with the `png` feature"
    ))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
