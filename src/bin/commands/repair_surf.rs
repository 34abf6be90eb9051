use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use prettytable::{Table, format, row};

use cone_forge::MeshGraph;
use cone_forge::io::{read_surf_mesh, write_patched_surf};
use cone_forge::ops::{VertexRepair, repair_nan_vertices};

use crate::commands::{print_boxed_label, run_with_spinner};

const AXES: [&str; 3] = ["x", "y", "z"];

/// Replaces `nan` vertex coordinates of a `.SURF` mesh with neighbor averages.
#[derive(Debug, Args)]
pub struct RepairSurfArgs {
    /// Source `.SURF` file.
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,
    /// Patched output file. Defaults to `<stem>_patched.SURF` next to the input.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Reads, repairs, and rewrites a surface mesh.
pub fn run(args: &RepairSurfArgs) -> Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read SURF file {}", args.input.display()))?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));

    let (mesh, repairs) = run_with_spinner("Repairing NaN vertices", || {
        let mut mesh = read_surf_mesh(Cursor::new(source.as_bytes()))
            .map_err(|e| e.with_path(&args.input))
            .with_context(|| format!("Failed to parse {}", args.input.display()))?;
        let graph = MeshGraph::from_mesh(&mesh);
        let repairs = repair_nan_vertices(&mut mesh, &graph)
            .with_context(|| format!("Failed to repair {}", args.input.display()))?;
        Ok((mesh, repairs))
    })?;

    let file = File::create(&output)
        .with_context(|| format!("Failed to create output file {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    write_patched_surf(Cursor::new(source.as_bytes()), &mut writer, &mesh)
        .with_context(|| format!("Failed to write patched mesh to {}", output.display()))?;
    writer.flush().context("Failed to flush output writer")?;

    log::info!("wrote {} ({} repaired coordinates)", output.display(), repairs.len());
    print_repairs(&repairs, &output)
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}_patched.SURF"))
}

fn print_repairs(repairs: &[VertexRepair], output: &Path) -> Result<()> {
    let mut stderr = io::stderr().lock();

    print_boxed_label(&mut stderr, "Repaired Coordinates")?;
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table.set_titles(row!["Vertex", "Axis", "Value"]);
    for repair in repairs {
        table.add_row(row![
            repair.vertex,
            AXES[repair.axis],
            format!("{:.6}", repair.value)
        ]);
    }
    table
        .print(&mut stderr)
        .context("Failed to render repair table")?;
    writeln!(&mut stderr, "Patched mesh written to {}", output.display())?;

    Ok(())
}
