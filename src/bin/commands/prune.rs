use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};
use serde::Serialize;

use cone_forge::Point;
use cone_forge::geometry::distance;
use cone_forge::ops::{DistancePruning, prune_by_distance};

use crate::commands::{
    HalfInputs, ReportFormat, ThresholdArgs, load_halves, print_boxed_label, resolve_config,
    run_with_spinner, write_json,
};

/// Lists apex pairs of the two halves within twice the hydrogen-bond cutoff.
#[derive(Debug, Default, Args)]
pub struct PruneArgs {
    #[command(flatten)]
    pub inputs: HalfInputs,
    #[command(flatten)]
    pub thresholds: ThresholdArgs,
    /// Report format. Defaults to tables on a terminal and JSON otherwise.
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,
    /// Output file for the JSON report. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct PruneReport {
    cutoff: f64,
    pair_count: usize,
    pairs: Vec<[[f64; 3]; 2]>,
}

impl PruneReport {
    fn new(pruning: &DistancePruning, cutoff: f64) -> Self {
        Self {
            cutoff,
            pair_count: pruning.pair_count(),
            pairs: pruning
                .pairs()
                .map(|(p1, p2)| [coords(p1), coords(p2)])
                .collect(),
        }
    }
}

fn coords(point: &Point) -> [f64; 3] {
    [point.x, point.y, point.z]
}

/// Loads both halves and prunes their apexes by distance.
pub fn run(args: &PruneArgs) -> Result<()> {
    let config = resolve_config(&args.thresholds, None)?;
    let (half1, half2) = run_with_spinner("Loading cones", || load_halves(&args.inputs))?;

    let pruning = run_with_spinner("Pruning apex pairs", || {
        Ok(prune_by_distance(
            &half1.apexes(),
            &half2.apexes(),
            config.hbond_distance_cutoff,
        ))
    })?;
    log::info!(
        "{} of {} apex pairs within {:.3} Å",
        pruning.pair_count(),
        pruning.distances.len(),
        config.proximity_threshold()
    );

    let report = PruneReport::new(&pruning, config.hbond_distance_cutoff);
    match ReportFormat::resolve(args.report, args.output.as_deref()) {
        ReportFormat::Json => write_json(&report, args.output.as_deref()),
        ReportFormat::Table => print_tables(&report, &pruning),
    }
}

fn print_tables(report: &PruneReport, pruning: &DistancePruning) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "Apex Pairs")?;
    let mut pair_table = Table::new();
    pair_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    pair_table.set_titles(row!["Half-1 Apex", "Half-2 Apex", "Distance (Å)"]);
    for (p1, p2) in pruning.pairs() {
        pair_table.add_row(row![
            format_point(p1),
            format_point(p2),
            format!("{:.3}", distance(p1, p2))
        ]);
    }
    pair_table
        .print(&mut stderr)
        .context("Failed to render apex pair table")?;
    writeln!(&mut stderr)?;

    print_boxed_label(&mut stderr, "Summary")?;
    let mut summary_table = Table::new();
    summary_table.set_format(*format::consts::FORMAT_BOX_CHARS);
    summary_table.set_titles(row!["Metric", "Value"]);
    summary_table.add_row(row![
        "Distance matrix",
        format!("{} × {}", pruning.distances.nrows(), pruning.distances.ncols())
    ]);
    summary_table.add_row(row!["Threshold (Å)", format!("{:.3}", report.cutoff * 2.0)]);
    summary_table.add_row(row!["Pairs", report.pair_count]);
    summary_table
        .print(&mut stderr)
        .context("Failed to render pruning summary")?;

    Ok(())
}

fn format_point(point: &Point) -> String {
    format!("({:.3}, {:.3}, {:.3})", point.x, point.y, point.z)
}
