use std::fs::{self, File};
use std::io::{self as stdio, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;

use cone_forge::io::{parse_cone_file, read_interface_atoms_path};
use cone_forge::ops::{IntersectConfig, filter_to_interface_by};
use cone_forge::{ConeKind, ConeTable, InterfaceAtomSet, Point};

pub mod hbonds;
pub mod intersect;
pub mod prune;
pub mod repair_surf;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Machine-readable JSON written to the output file or stdout.
    #[value(name = "json")]
    Json,
    /// Human-readable tables rendered on stderr.
    #[value(name = "table")]
    Table,
}

impl ReportFormat {
    /// Picks the requested format, or tables for an interactive terminal and JSON otherwise.
    pub fn resolve(requested: Option<Self>, output: Option<&Path>) -> Self {
        requested.unwrap_or(if interactive_stdout_requested(output) {
            Self::Table
        } else {
            Self::Json
        })
    }
}

/// Cone and interface inputs for the two halves of an interface.
#[derive(Debug, Default, Args)]
pub struct HalfInputs {
    /// Acceptor cone file of the first half.
    #[arg(long, value_name = "FILE")]
    pub half1_acceptors: Option<PathBuf>,
    /// Donor cone file of the first half.
    #[arg(long, value_name = "FILE")]
    pub half1_donors: Option<PathBuf>,
    /// Acceptor cone file of the second half.
    #[arg(long, value_name = "FILE")]
    pub half2_acceptors: Option<PathBuf>,
    /// Donor cone file of the second half.
    #[arg(long, value_name = "FILE")]
    pub half2_donors: Option<PathBuf>,
    /// Interface atom coordinates of the first half. Cones of that half are kept unfiltered when omitted.
    #[arg(long, value_name = "FILE")]
    pub half1_interface: Option<PathBuf>,
    /// Interface atom coordinates of the second half. Cones of that half are kept unfiltered when omitted.
    #[arg(long, value_name = "FILE")]
    pub half2_interface: Option<PathBuf>,
    /// Maximum distance between a cone apex and an interface atom. Exact coordinate equality when omitted.
    #[arg(long, value_name = "ANGSTROM")]
    pub interface_tolerance: Option<f64>,
}

/// Threshold overrides shared by the geometric commands.
#[derive(Debug, Default, Args)]
pub struct ThresholdArgs {
    /// TOML file with `angle_tolerance_degrees` and `hbond_distance_cutoff`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Hydrogen-bond distance cutoff in ångströms.
    #[arg(long, value_name = "ANGSTROM")]
    pub hbond_cutoff: Option<f64>,
}

/// Loads both halves and applies the interface filter when interface files are provided.
pub fn load_halves(inputs: &HalfInputs) -> Result<(ConeTable, ConeTable)> {
    if let Some(tolerance) = inputs.interface_tolerance {
        if !(tolerance >= 0.0) {
            bail!("--interface-tolerance must be a non-negative number, got {tolerance}");
        }
    }

    let half1 = load_half(
        "first",
        inputs.half1_acceptors.as_deref(),
        inputs.half1_donors.as_deref(),
    )?;
    let half2 = load_half(
        "second",
        inputs.half2_acceptors.as_deref(),
        inputs.half2_donors.as_deref(),
    )?;

    let interface1 = load_interface(inputs.half1_interface.as_deref())?;
    let interface2 = load_interface(inputs.half2_interface.as_deref())?;
    if interface1.is_none() && interface2.is_none() {
        if inputs.interface_tolerance.is_some() {
            log::warn!(
                "--interface-tolerance has no effect without --half1-interface or --half2-interface"
            );
        }
        return Ok((half1, half2));
    }

    let tolerance = inputs.interface_tolerance;
    let (filtered1, filtered2) = filter_to_interface_by(
        &half1,
        &half2,
        |apex| is_member(interface1.as_ref(), apex, tolerance),
        |apex| is_member(interface2.as_ref(), apex, tolerance),
    );
    log::info!(
        "interface filter kept {}/{} and {}/{} cones",
        filtered1.len(),
        half1.len(),
        filtered2.len(),
        half2.len()
    );

    Ok((filtered1, filtered2))
}

fn is_member(set: Option<&InterfaceAtomSet>, apex: &Point, tolerance: Option<f64>) -> bool {
    match (set, tolerance) {
        (None, _) => true,
        (Some(set), None) => set.contains(apex),
        (Some(set), Some(tolerance)) => set.contains_within(apex, tolerance),
    }
}

fn load_half(label: &str, acceptors: Option<&Path>, donors: Option<&Path>) -> Result<ConeTable> {
    if acceptors.is_none() && donors.is_none() {
        bail!("The {label} half needs at least one acceptor or donor cone file.");
    }

    let mut table = ConeTable::new();
    for (path, kind) in [(acceptors, ConeKind::Acceptor), (donors, ConeKind::Donor)] {
        let Some(path) = path else { continue };
        let cones = parse_cone_file(path, kind)
            .with_context(|| format!("Failed to read {kind} cones from {}", path.display()))?;
        log::debug!("{}: {} {kind} cones", path.display(), cones.len());
        table.merge(cones);
    }

    Ok(table)
}

fn load_interface(path: Option<&Path>) -> Result<Option<InterfaceAtomSet>> {
    path.map(|path| {
        read_interface_atoms_path(path)
            .with_context(|| format!("Failed to read interface atoms from {}", path.display()))
    })
    .transpose()
}

/// Resolves thresholds: defaults, then the config file, then explicit flags.
pub fn resolve_config(
    thresholds: &ThresholdArgs,
    angle_tolerance: Option<f64>,
) -> Result<IntersectConfig> {
    let mut config = match &thresholds.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            IntersectConfig::from_toml_str(&text)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => IntersectConfig::default(),
    };

    if let Some(degrees) = angle_tolerance {
        config = config.angle_tolerance(degrees);
    }
    if let Some(cutoff) = thresholds.hbond_cutoff {
        config = config.hbond_cutoff(cutoff);
    }
    config.validate().context("Invalid thresholds")?;

    Ok(config)
}

/// Serializes `value` as pretty JSON to `output`, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)
                .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
            writeln!(writer)?;
            writer.flush().context("Failed to flush output writer")?;
        }
        None => {
            let stdout = stdio::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            serde_json::to_writer_pretty(&mut writer, value)
                .context("Failed to write JSON to stdout")?;
            writeln!(writer)?;
            writer.flush().context("Failed to flush stdout")?;
        }
    }
    Ok(())
}

/// Wraps long-running operations with a spinner rendered to stderr.
pub fn run_with_spinner<T, F>(message: &str, work: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.to_string());

    let result = work();

    match &result {
        Ok(_) => spinner.finish_with_message(format!("{} ✓", message)),
        Err(_) => spinner.abandon_with_message(format!("{} ✗", message)),
    }

    result
}

/// Returns true when stdout is a TTY and no explicit output file was supplied.
pub fn interactive_stdout_requested(output: Option<&Path>) -> bool {
    output.is_none() && stdio::stdout().is_terminal()
}

pub fn print_boxed_label<W: Write>(writer: &mut W, title: &str) -> stdio::Result<()> {
    let inner = format!(" {title} ");
    let width = inner.chars().count();
    writeln!(writer, "╭{}╮", "─".repeat(width))?;
    writeln!(writer, "│{}│", inner)?;
    writeln!(writer, "╰{}╯", "─".repeat(width))?;
    Ok(())
}
