//! LORAN-C grid generation service.
//!
//! Loads a chain/region configuration, computes the hyperbolic TD grid
//! clipped to the region, and writes it as a GeoJSON FeatureCollection,
//! optionally with a PNG chart preview.

mod geojson;
mod render;
mod sample;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use loran_solver::{assemble_chain, AssemblyDiagnostics, GridConfig, Propagation};

#[derive(Parser, Debug)]
#[command(name = "grid-gen")]
#[command(about = "LORAN-C hyperbolic navigation grid generator")]
struct Args {
    /// Path to the JSON run configuration
    #[arg(short, long, default_value = "config/loran_config.json")]
    config: PathBuf,

    /// Output GeoJSON path
    #[arg(short, long, default_value = "loran_grid.geojson")]
    output: PathBuf,

    /// Optional PNG preview of the clipped grid
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Preview raster width in pixels
    #[arg(long, default_value = "1024")]
    preview_width: u32,

    /// Write a sample configuration to the --config path and exit
    #[arg(long)]
    write_sample_config: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if args.write_sample_config {
        sample::write_sample_config(&args.config)?;
        info!(path = %args.config.display(), "wrote sample configuration");
        return Ok(());
    }

    let raw = fs::read_to_string(&args.config)
        .with_context(|| format!("reading configuration {}", args.config.display()))?;
    let config: GridConfig = serde_json::from_str(&raw)
        .with_context(|| format!("parsing configuration {}", args.config.display()))?;
    config.validate()?;

    let propagation = Propagation::new(config.propagation_speed_m_per_s)?;
    let mut lines = Vec::new();
    let mut totals = AssemblyDiagnostics::default();
    for chain in &config.chains {
        let assembly = assemble_chain(chain, &config.region, &config.solver, propagation)?;
        info!(
            chain = %chain.id,
            lines = assembly.lines.len(),
            empty = assembly.diagnostics.lines_empty,
            skipped_pairs = assembly.diagnostics.pairs_skipped,
            nonconverged = assembly.diagnostics.rays_nonconverged,
            "assembled chain"
        );
        totals.lines_solved += assembly.diagnostics.lines_solved;
        totals.lines_empty += assembly.diagnostics.lines_empty;
        totals.pairs_skipped += assembly.diagnostics.pairs_skipped;
        totals.rays_nonconverged += assembly.diagnostics.rays_nonconverged;
        totals.degenerate_skips += assembly.diagnostics.degenerate_skips;
        lines.extend(assembly.lines);
    }

    let collection = geojson::feature_collection(&lines);
    let encoded = serde_json::to_string_pretty(&collection)?;
    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    fs::write(&args.output, encoded)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        features = collection.features.len(),
        solved = totals.lines_solved,
        path = %args.output.display(),
        "wrote grid"
    );

    if let Some(path) = &args.preview {
        render::render_preview(&lines, &config.region, args.preview_width, path)?;
        info!(path = %path.display(), "wrote preview");
    }

    Ok(())
}
