//! Format registry.
//!
//! Centralizes how format names map to adapters so binaries and callers go
//! through one dispatch table instead of hard-coding format strings. New
//! adapters register here without changing public CLI flags.

use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::adapters::{conveyor, gosec};
use crate::hdf::Execution;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Gosec,
    Conveyor,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Gosec => "gosec",
            Format::Conveyor => "conveyor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Format::Gosec => "gosec static analysis report",
            Format::Conveyor => "Conveyor multi-scanner report",
        }
    }
}

impl TryFrom<&str> for Format {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "gosec" => Ok(Format::Gosec),
            "conveyor" => Ok(Format::Conveyor),
            other => bail!("unknown format: {other}"),
        }
    }
}

/// Conversion options shared across adapters. Formats that do not support an
/// option ignore it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    /// Embed the raw parsed input under `passthrough.raw`.
    pub with_raw: bool,
}

/// Converted output: one execution, or one execution per sub-scanner for
/// formats that bundle several tools in a single report.
#[derive(Clone, Debug)]
pub enum Conversion {
    Single(Execution),
    Grouped(BTreeMap<String, Execution>),
}

impl Conversion {
    pub fn to_value(&self) -> Result<Value> {
        match self {
            Conversion::Single(execution) => execution.to_value(),
            Conversion::Grouped(executions) => {
                serde_json::to_value(executions).context("serializing grouped executions")
            }
        }
    }

    pub fn executions(&self) -> Vec<&Execution> {
        match self {
            Conversion::Single(execution) => vec![execution],
            Conversion::Grouped(executions) => executions.values().collect(),
        }
    }
}

struct FormatSpec {
    format: Format,
    convert: fn(&str, ConvertOptions) -> Result<Conversion>,
}

const FORMAT_SPECS: &[FormatSpec] = &[
    FormatSpec {
        format: Format::Gosec,
        convert: convert_gosec,
    },
    FormatSpec {
        format: Format::Conveyor,
        convert: convert_conveyor,
    },
];

pub fn allowed_format_names() -> Vec<&'static str> {
    FORMAT_SPECS.iter().map(|spec| spec.format.as_str()).collect()
}

/// Convert a raw report through the adapter registered for `format`.
pub fn convert(format: Format, input: &str, options: ConvertOptions) -> Result<Conversion> {
    for spec in FORMAT_SPECS {
        if spec.format == format {
            return (spec.convert)(input, options);
        }
    }
    bail!("no adapter registered for format '{}'", format.as_str())
}

fn convert_gosec(input: &str, options: ConvertOptions) -> Result<Conversion> {
    let execution = gosec::convert(
        input,
        gosec::Options {
            with_raw: options.with_raw,
        },
    )?;
    Ok(Conversion::Single(execution))
}

fn convert_conveyor(input: &str, options: ConvertOptions) -> Result<Conversion> {
    let executions = conveyor::convert(
        input,
        conveyor::Options {
            with_raw: options.with_raw,
        },
    )?;
    Ok(Conversion::Grouped(executions))
}
