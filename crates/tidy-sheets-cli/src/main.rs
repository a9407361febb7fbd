//! tidy-sheets CLI - look at a grid the way a pipeline will see it

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tidy_sheets::prelude::*;

#[derive(Parser)]
#[command(name = "tidy")]
#[command(author, version, about = "Inspect spreadsheet grids and preview selections")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the name, cell count and bounds of a grid
    Info {
        /// Input file (csv, tsv)
        input: PathBuf,
    },

    /// Print selected cells as `REF<TAB>value` lines
    Preview {
        /// Input file (csv, tsv)
        input: PathBuf,

        /// Excel-style reference to narrow to, e.g. "B2:D9", "3", "C:E"
        #[arg(short, long)]
        range: Option<String>,

        /// Skip blank cells
        #[arg(short, long)]
        non_blank: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Commands::Info { input } => show_info(&input),
        Commands::Preview {
            input,
            range,
            non_blank,
        } => preview(&input, range.as_deref(), non_blank),
    }
}

fn open(input: &Path) -> Result<Selectable> {
    Selectable::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn show_info(input: &Path) -> Result<()> {
    let sheet = open(input)?;

    println!("File: {}", input.display());
    println!("Name: {}", sheet.name());
    println!("Cells: {}", sheet.len());
    match sheet.live_table().bounds() {
        Some(bounds) => println!(
            "Bounds: {} ({} rows x {} columns)",
            bounds.excel_ref(),
            bounds.max_y - bounds.min_y + 1,
            bounds.max_x - bounds.min_x + 1
        ),
        None => println!("Bounds: empty"),
    }
    println!("Non-blank cells: {}", sheet.is_not_blank().len());

    Ok(())
}

fn preview(input: &Path, range: Option<&str>, non_blank: bool) -> Result<()> {
    let mut selection = open(input)?;

    if let Some(reference) = range {
        selection = selection
            .excel_ref(reference)
            .with_context(|| format!("Cannot select '{}'", reference))?;
    }
    if non_blank {
        selection = selection.is_not_blank();
    }
    log::debug!("previewing {} cell(s)", selection.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for cell in selection.cells() {
        writeln!(out, "{}\t{}", cell.excel_ref(), cell.value)
            .context("Failed to write to stdout")?;
    }

    Ok(())
}
