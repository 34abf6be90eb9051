use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};

mod commands;

use commands::{hbonds, intersect, prune, repair_surf};

#[derive(Parser, Debug)]
#[command(
    name = "coneforge",
    about = "A command-line tool for matching hydrogen-bond donor and acceptor cones across molecular interfaces.",
    version,
    author,
    arg_required_else_help = true
)]
struct Cli {
    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the half-2 cones each half-1 cone can hydrogen-bond with.
    Intersect(intersect::IntersectArgs),
    /// List apex pairs within twice the hydrogen-bond cutoff.
    Prune(prune::PruneArgs),
    /// Replace NaN vertex coordinates of a SURF mesh with neighbor averages.
    RepairSurf(repair_surf::RepairSurfArgs),
    /// Parse hydrogen bonds reported by HBondFinder.
    Hbonds(hbonds::HbondsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Intersect(args) => intersect::run(args)?,
        Command::Prune(args) => prune::run(args)?,
        Command::RepairSurf(args) => repair_surf::run(args)?,
        Command::Hbonds(args) => hbonds::run(args)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}
