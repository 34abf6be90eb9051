use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use cone_forge::IntersectionMap;
use cone_forge::ops::find_intersections;

use crate::commands::{
    HalfInputs, ReportFormat, ThresholdArgs, load_halves, print_boxed_label, resolve_config,
    run_with_spinner, write_json,
};

/// Matches half-1 cones against half-2 cones with the facing and proximity tests.
#[derive(Debug, Default, Args)]
pub struct IntersectArgs {
    #[command(flatten)]
    pub inputs: HalfInputs,
    #[command(flatten)]
    pub thresholds: ThresholdArgs,
    /// Maximum angle in degrees between two cone orientations.
    #[arg(long, value_name = "DEGREES")]
    pub angle_tolerance: Option<f64>,
    /// Report format. Defaults to tables on a terminal and JSON otherwise.
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,
    /// Output file for the JSON map. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Loads both halves, intersects them, and reports the directed map.
pub fn run(args: &IntersectArgs) -> Result<()> {
    let config = resolve_config(&args.thresholds, args.angle_tolerance)?;
    let (half1, half2) = run_with_spinner("Loading cones", || load_halves(&args.inputs))?;

    let map = run_with_spinner("Intersecting cones", || {
        Ok(find_intersections(&half1, &half2, &config))
    })?;
    log::info!(
        "{} half-1 cones intersect {} half-2 cones over {} edges",
        map.len(),
        half2.len(),
        map.edge_count()
    );

    match ReportFormat::resolve(args.report, args.output.as_deref()) {
        ReportFormat::Json => write_json(&map, args.output.as_deref()),
        ReportFormat::Table => print_tables(&map, half1.len(), half2.len()),
    }
}

fn print_tables(map: &IntersectionMap, half1_cones: usize, half2_cones: usize) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "Cone Intersections")?;
    let mut edge_table = Table::new();
    edge_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    edge_table.set_titles(row!["Half-1 Cone", "Half-2 Cones"]);
    for (source, targets) in map.iter() {
        let joined = targets
            .iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        edge_table.add_row(row![source, joined]);
    }
    edge_table
        .print(&mut stderr)
        .context("Failed to render intersection table")?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Summary")?;
    let mut summary_table = Table::new();
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row!["Half-1 cones", half1_cones]);
    summary_table.add_row(row!["Half-2 cones", half2_cones]);
    summary_table.add_row(row!["Intersecting half-1 cones", map.len()]);
    summary_table.add_row(row!["Edges", map.edge_count()]);
    summary_table
        .print(&mut stderr)
        .context("Failed to render intersection summary")?;

    Ok(())
}
