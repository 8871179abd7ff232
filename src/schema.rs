//! Output-schema validation for converted executions.
//!
//! The canonical exec-json schema ships with the crate and is compiled once
//! per process. Validation is for *output* only: the engine never validates
//! scanner input, it just refuses to emit a document that drifted from the
//! canonical contract. Used by the CLI `--validate` flag and the test suite.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

const EXEC_SCHEMA_SRC: &str = include_str!("../schemas/exec-json.schema.json");

static SCHEMA_DOC: OnceLock<Value> = OnceLock::new();
static COMPILED: OnceLock<JSONSchema> = OnceLock::new();

fn compiled_schema() -> Result<&'static JSONSchema> {
    if let Some(compiled) = COMPILED.get() {
        return Ok(compiled);
    }
    let parsed: Value =
        serde_json::from_str(EXEC_SCHEMA_SRC).context("parsing bundled exec-json schema")?;
    let doc: &'static Value = SCHEMA_DOC.get_or_init(|| parsed);
    let compiled = JSONSchema::compile(doc)
        .map_err(|err| anyhow!("compiling bundled exec-json schema: {err}"))?;
    Ok(COMPILED.get_or_init(|| compiled))
}

/// Validate a serialized execution against the bundled exec-json schema.
/// All violations are joined into a single failure message.
pub fn validate_execution(value: &Value) -> Result<()> {
    let schema = compiled_schema()?;
    if let Err(errors) = schema.validate(value) {
        let details = errors
            .map(|err| format!("{} (at {})", err, err.instance_path))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("document failed exec-json validation:\n{details}");
    }
    Ok(())
}
