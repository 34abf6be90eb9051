use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use cone_forge::io::read_hbond_edges_path;
use cone_forge::{EdgeFilter, HBondEdge};

use crate::commands::{ReportFormat, print_boxed_label, write_json};

/// Lists hydrogen bonds from an HBondFinder result table.
#[derive(Debug, Args)]
pub struct HbondsArgs {
    /// HBondFinder output file.
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
    /// Keep only bonds whose donor and acceptor lie on different chains.
    #[arg(long)]
    pub inter: bool,
    /// Report format. Defaults to tables on a terminal and JSON otherwise.
    #[arg(long, value_enum)]
    pub report: Option<ReportFormat>,
    /// Output file for the JSON edge list. When omitted, stdout is used.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Parses the HBondFinder table and reports its edges.
pub fn run(args: &HbondsArgs) -> Result<()> {
    let filter = if args.inter {
        EdgeFilter::InterChain
    } else {
        EdgeFilter::All
    };
    let edges = read_hbond_edges_path(&args.input, filter).with_context(|| {
        format!("Failed to read HBondFinder output {}", args.input.display())
    })?;
    log::info!("{} hydrogen bonds ({filter:?})", edges.len());

    match ReportFormat::resolve(args.report, args.output.as_deref()) {
        ReportFormat::Json => write_json(&edges, args.output.as_deref()),
        ReportFormat::Table => print_table(&edges),
    }
}

fn print_table(edges: &[HBondEdge]) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "Hydrogen Bonds")?;
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Donor", "Acceptor", "Distance (Å)", "Chains"]);
    for edge in edges {
        let chains = if edge.same_chain { "intra" } else { "inter" };
        table.add_row(row![
            edge.donor,
            edge.acceptor,
            format!("{:.2}", edge.distance),
            chains
        ]);
    }
    table
        .print(&mut stderr)
        .context("Failed to render hydrogen-bond table")?;
    writeln!(&mut stderr, "{} bonds", edges.len())?;

    Ok(())
}
