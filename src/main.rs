//! AIM viewer entry point: CSV in, interactive sunburst out.

mod app;
mod share;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use aim_chart::{compute_arcs, compute_radii, HeatmapMode, NavSnapshot};
use aim_core::model::BeliefTree;
use aim_core::parse::parse_report;
use aim_core::record::RawRecord;

/// Interactive sunburst viewer for AIM belief maps
#[derive(Debug, Parser)]
#[command(name = "aim-viewer", version, about)]
struct Args {
    /// CSV file with the belief-map rows
    #[arg(value_name = "CSV")]
    input: Option<PathBuf>,

    /// Heatmap mode to start with (off, confidence, adapting, celebrating,
    /// connecting; the legacy ac/ce/cx codes also work)
    #[arg(long, default_value = "off")]
    heatmap: String,

    /// Gist id the rows came from, used for shareable links
    #[arg(long)]
    gist: Option<String>,

    /// Print the full-view arc descriptors as JSON and exit
    #[arg(long)]
    dump_arcs: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let heatmap: HeatmapMode = args.heatmap.parse().expect("heatmap parsing is total");

    let tree = args
        .input
        .as_deref()
        .map(load_tree)
        .transpose()?;

    if args.dump_arcs {
        let tree = tree.context("--dump-arcs needs a CSV file to load")?;
        dump_arcs(&tree, heatmap)?;
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_title("AIM Viewer"),
        ..Default::default()
    };
    let app = app::ViewerApp::new(tree, heatmap, args.gist);
    eframe::run_native(
        "AIM Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("viewer window failed: {e}"))
}

/// Read and parse a CSV row file
fn load_tree(path: &Path) -> Result<BeliefTree> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let mut rows: Vec<RawRecord> = Vec::new();
    for record in reader.deserialize() {
        let record: RawRecord =
            record.with_context(|| format!("malformed CSV record in {}", path.display()))?;
        rows.push(record);
    }

    let report = parse_report(&rows);
    tracing::info!(
        rows = report.stats.rows,
        nodes = report.stats.nodes_populated,
        projects = report.stats.projects,
        lenses = report.stats.lenses,
        skipped = report.stats.skipped_unknown_label + report.stats.skipped_blank_label,
        "loaded belief map"
    );
    Ok(report.tree)
}

/// Inspection aid: the arc descriptors the chart would draw at 800px
fn dump_arcs(tree: &BeliefTree, heatmap: HeatmapMode) -> Result<()> {
    let radii = compute_radii(800.0);
    let snapshot = NavSnapshot {
        heatmap,
        ..Default::default()
    };
    let arcs = compute_arcs(tree, snapshot, &radii);
    println!("{}", serde_json::to_string_pretty(&arcs)?);
    Ok(())
}
