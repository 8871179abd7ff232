//! Convert a scanner report into the HDF execution schema.
//!
//! Usage:
//!   hdf-convert --format gosec --file report.json
//!   hdf-convert --format conveyor --validate < report.json

use anyhow::{Context, Result};
use clap::Parser;
use hdfconv::{ConvertOptions, Format, allowed_format_names, convert, schema};
use std::fs::{self, File};
use std::io::{Read, stdin};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hdf-convert")]
#[command(about = "Convert scanner output into the HDF execution schema")]
struct Cli {
    /// Source format name.
    #[arg(long)]
    format: String,
    /// Optional input file; reads stdin when omitted.
    #[arg(long)]
    file: Option<PathBuf>,
    /// Optional output file; writes stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Validate every produced execution against the bundled exec-json schema.
    #[arg(long)]
    validate: bool,
    /// Embed the raw parsed input under passthrough.raw (formats that support it).
    #[arg(long)]
    with_raw: bool,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    let mut buf = String::new();
    if let Some(path) = file {
        File::open(path)
            .with_context(|| format!("opening input file {}", path.display()))?
            .read_to_string(&mut buf)
            .with_context(|| format!("reading input file {}", path.display()))?;
    } else {
        stdin()
            .read_to_string(&mut buf)
            .context("reading stdin for input JSON")?;
    }
    Ok(buf)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = Format::try_from(cli.format.as_str())
        .with_context(|| format!("supported formats: {}", allowed_format_names().join(", ")))?;
    let input = read_input(cli.file.as_ref())?;

    let conversion = convert(
        format,
        &input,
        ConvertOptions {
            with_raw: cli.with_raw,
        },
    )?;

    if cli.validate {
        for execution in conversion.executions() {
            schema::validate_execution(&execution.to_value()?)?;
        }
    }

    let rendered =
        serde_json::to_string_pretty(&conversion.to_value()?).context("rendering output JSON")?;
    match cli.output {
        Some(path) => fs::write(&path, format!("{rendered}\n"))
            .with_context(|| format!("writing output file {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}
