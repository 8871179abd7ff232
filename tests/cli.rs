// CLI guard rails for the hdf-convert binary.

#[path = "support/common.rs"]
mod common;

use anyhow::{Context, Result};
use common::{sample_conveyor_report, sample_gosec_report};
use serde_json::Value;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn hdf_convert() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hdf-convert"))
}

#[test]
fn converts_a_gosec_report_from_a_file() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("gosec.json");
    fs::write(&input, sample_gosec_report())?;

    let output = hdf_convert()
        .args(["--format", "gosec", "--validate", "--file"])
        .arg(&input)
        .output()
        .context("running hdf-convert")?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value: Value = serde_json::from_slice(&output.stdout).context("parsing CLI output")?;
    assert_eq!(value["profiles"][0]["name"], "Gosec scanner");
    assert_eq!(value["profiles"][0]["controls"].as_array().unwrap().len(), 2);
    Ok(())
}

#[test]
fn converts_a_conveyor_report_from_stdin_to_a_file() -> Result<()> {
    let dir = TempDir::new()?;
    let out_path = dir.path().join("converted.json");

    let mut child = hdf_convert()
        .args(["--format", "conveyor", "--validate", "--output"])
        .arg(&out_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawning hdf-convert")?;
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(sample_conveyor_report().as_bytes())?;
    let output = child.wait_with_output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let written = fs::read_to_string(&out_path)?;
    let value: Value = serde_json::from_str(&written).context("parsing written output")?;
    assert!(value.get("Moldy").is_some(), "output was: {written}");
    assert!(value.get("CodeQuality").is_some());
    Ok(())
}

#[test]
fn rejects_an_unknown_format() -> Result<()> {
    let output = hdf_convert()
        .args(["--format", "mystery-scanner"])
        .stdin(Stdio::null())
        .output()
        .context("running hdf-convert")?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("supported formats"),
        "stderr was: {stderr}"
    );
    Ok(())
}

#[test]
fn surfaces_parse_failures_with_context() -> Result<()> {
    let mut child = hdf_convert()
        .args(["--format", "gosec"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawning hdf-convert")?;
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(b"{ this is not json")?;
    let output = child.wait_with_output()?;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("gosec"), "stderr was: {stderr}");
    Ok(())
}
