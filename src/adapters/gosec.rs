//! gosec (Go source security checker) adapter.
//!
//! gosec reports are flat: a `GosecVersion` header plus an `issues` array.
//! Controls expand from `issues` keyed by `rule_id`, so repeated findings for
//! the same rule collapse to the most recent one. Every gosec issue is a
//! finding, so results carry a fixed `failed` status and a synthesized
//! file/line/column location message.

use anyhow::{Context, Result};
use serde_json::{Value, json};

use super::{DEFAULT_STATIC_ANALYSIS_NIST_TAGS, PLATFORM_NAME, TOOL_VERSION, keyed_map_to_array};
use crate::hdf::Execution;
use crate::mapping::{ArraySpec, FieldRule, ObjectSpec, Spec, interpret};
use crate::parse_document;

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Embed the parsed scanner document under `passthrough.raw`.
    pub with_raw: bool,
}

pub fn to_hdf(input: &str) -> Result<Execution> {
    convert(input, Options::default())
}

pub fn convert(input: &str, options: Options) -> Result<Execution> {
    let doc = parse_document(input).context("parsing gosec report")?;
    let spec = execution_spec(DEFAULT_STATIC_ANALYSIS_NIST_TAGS);
    let mut value = interpret(&spec, &doc)?;
    keyed_map_to_array(&mut value, "/profiles/0/controls");
    let mut execution = Execution::from_value(value)?;
    if options.with_raw {
        execution.passthrough = Some(json!({"raw": doc}));
    }
    Ok(execution)
}

fn execution_spec(nist_tags: &[&str]) -> Spec {
    Spec::Object(
        ObjectSpec::new()
            .field(
                "platform",
                Spec::Object(
                    ObjectSpec::new()
                        .field("name", Spec::literal(PLATFORM_NAME))
                        .field("release", Spec::literal(TOOL_VERSION)),
                ),
            )
            .field("version", Spec::literal(TOOL_VERSION))
            .field("statistics", Spec::Object(ObjectSpec::new()))
            .field(
                "profiles",
                Spec::List(vec![Spec::Object(profile_spec(nist_tags))]),
            ),
    )
}

fn profile_spec(nist_tags: &[&str]) -> ObjectSpec {
    ObjectSpec::new()
        .field("name", Spec::literal("Gosec scanner"))
        .field("title", Spec::literal("gosec"))
        .field("version", Spec::path("GosecVersion"))
        .field("supports", Spec::literal(json!([])))
        .field("attributes", Spec::literal(json!([])))
        .field("groups", Spec::literal(json!([])))
        .field("status", Spec::literal("loaded"))
        .field(
            "controls",
            Spec::Array(ArraySpec::keyed("issues", "id", control_spec(nist_tags))),
        )
        .field("sha256", Spec::literal(""))
}

fn control_spec(nist_tags: &[&str]) -> ObjectSpec {
    ObjectSpec::new()
        .field("id", Spec::path("rule_id"))
        .field("title", Spec::path("details"))
        .field("desc", Spec::literal(""))
        .field("impact", Spec::literal(json!(0.5)))
        .field(
            "tags",
            Spec::Object(
                ObjectSpec::new()
                    .field("nist", FieldRule::new("cwe").or_default(json!(nist_tags)))
                    .field("cwe", Spec::path("cwe"))
                    .field("nosec", Spec::path("nosec"))
                    .field("suppressions", Spec::path("suppressions"))
                    .field("severity", Spec::path("severity"))
                    .field("confidence", Spec::path("confidence")),
            ),
        )
        .field("refs", Spec::literal(json!([])))
        .field("source_location", Spec::Object(ObjectSpec::new()))
        .field("results", Spec::List(vec![Spec::Object(result_spec())]))
}

fn result_spec() -> ObjectSpec {
    ObjectSpec::new()
        .field("status", Spec::literal("failed"))
        .field("code_desc", FieldRule::new("code").or_default(""))
        .field("message", Spec::path_with("", format_location))
        .field("start_time", Spec::literal(""))
}

/// `file, line:N, column:M` synthesized from the issue record. Receives the
/// whole issue (empty path); missing pieces render as empty strings.
fn format_location(raw: Option<&Value>) -> Result<Value> {
    let issue = raw.unwrap_or(&Value::Null);
    let part = |name: &str| match issue.get(name) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    };
    Ok(json!(format!(
        "{}, line:{}, column:{}",
        part("file"),
        part("line"),
        part("column")
    )))
}
