//! Conveyor adapter (Assemblyline-style multi-scanner reports).
//!
//! A Conveyor report bundles findings from several sub-scanners into one
//! document, indirects filenames through a content-hash file tree, and
//! scatters the human-readable description of each finding across section
//! fields. Three pure pre-passes normalize that shape before the mapping
//! engine runs:
//!
//! 1. [`filename_index`] resolves the sha256 → filename indirection.
//! 2. [`synthesize_result`] renders one canonical result per report section.
//! 3. [`bucket_by_scanner`] groups the flat result list by sub-scanner.
//!
//! Each bucket then converts as an independent execution, so the adapter
//! returns one execution per sub-scanner.

use anyhow::{Context, Result};
use chrono::DateTime;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;

use super::{DEFAULT_STATIC_ANALYSIS_NIST_TAGS, PLATFORM_NAME, TOOL_VERSION};
use crate::hdf::Execution;
use crate::mapping::{ArraySpec, FieldRule, ObjectSpec, Spec, interpret};
use crate::parse_document;
use crate::path::resolve;

#[derive(Clone, Copy, Debug, Default)]
pub struct Options {
    /// Embed each scanner's scoped document under `passthrough.raw`.
    pub with_raw: bool,
}

pub fn to_hdf(input: &str) -> Result<BTreeMap<String, Execution>> {
    convert(input, Options::default())
}

pub fn convert(input: &str, options: Options) -> Result<BTreeMap<String, Execution>> {
    let doc = parse_document(input).context("parsing conveyor report")?;
    let index = filename_index(&doc);
    let buckets = bucket_by_scanner(&doc, &index);
    let spec = execution_spec(DEFAULT_STATIC_ANALYSIS_NIST_TAGS);

    let mut executions = BTreeMap::new();
    for (scanner, results) in buckets {
        let mut scoped = doc.clone();
        if let Some(api) = scoped.get_mut("api_response").and_then(Value::as_object_mut) {
            api.insert("results".to_string(), Value::Array(results));
        }
        let value = interpret(&spec, &scoped)
            .with_context(|| format!("converting conveyor scanner '{scanner}'"))?;
        let mut execution = Execution::from_value(value)?;
        if options.with_raw {
            execution.passthrough = Some(json!({"raw": scoped}));
        }
        executions.insert(scanner, execution);
    }
    Ok(executions)
}

/// Walk `api_response.file_tree` (children nest recursively under content
/// hashes) and build the sha256 → filename table.
pub fn filename_index(doc: &Value) -> BTreeMap<String, String> {
    let mut index = BTreeMap::new();
    if let Some(tree) = resolve(doc, "api_response.file_tree").and_then(Value::as_object) {
        collect_filenames(tree, &mut index);
    }
    index
}

fn collect_filenames(level: &Map<String, Value>, index: &mut BTreeMap<String, String>) {
    for (sha, node) in level {
        if let Some(name) = resolve(node, "name[0]").and_then(Value::as_str) {
            index.insert(sha.clone(), name.to_string());
        }
        if let Some(children) = node.get("children").and_then(Value::as_object) {
            collect_filenames(children, index);
        }
    }
}

/// Render one canonical result from a report section. A zero score is clean;
/// anything else is a finding. Known scanner families get a readable
/// field-by-field description, everything else falls back to the raw section
/// JSON. `run_time` is milliseconds between the service milestones and is
/// omitted when either timestamp fails to parse.
pub fn synthesize_result(
    section: &Value,
    score: f64,
    start_time: &str,
    scanner: &str,
    end_time: &str,
) -> Value {
    let code_desc = match scanner {
        "Moldy" | "Stigma" => format!(
            "title_text:{}\nbody:{}\nbody_format:{}\nclassification:{}\ndepth:{}\nheuristic_heur_id:{}\nheuristic_score:{}\nheuristic_name:{}",
            section_text(section, "title_text"),
            section_text(section, "body"),
            section_text(section, "body_format"),
            section_text(section, "classification"),
            section_text(section, "depth"),
            section_text(section, "heuristic.heur_id"),
            section_text(section, "heuristic.score"),
            section_text(section, "heuristic.name"),
        ),
        "CodeQuality" => format!(
            "body:{}\nbody_format:{}\nclassification:{}\ndepth:{}\ntitle_text:{}",
            section_text(section, "body"),
            section_text(section, "body_format"),
            section_text(section, "classification"),
            section_text(section, "depth"),
            section_text(section, "title_text"),
        ),
        _ => section.to_string(),
    };

    let mut result = json!({
        "status": status_for_score(score),
        "code_desc": code_desc,
        "start_time": start_time,
    });
    if let Some(ms) = elapsed_ms(start_time, end_time) {
        result["run_time"] = json!(ms);
    }
    result
}

pub fn status_for_score(score: f64) -> &'static str {
    if score == 0.0 { "passed" } else { "failed" }
}

fn elapsed_ms(start: &str, end: &str) -> Option<f64> {
    let start = DateTime::parse_from_rfc3339(start).ok()?;
    let end = DateTime::parse_from_rfc3339(end).ok()?;
    Some((end - start).num_milliseconds() as f64)
}

fn section_text(section: &Value, path: &str) -> String {
    match resolve(section, path) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Flatten `api_response.results`, attach resolved filenames, replace raw
/// sections with synthesized results, and group by sub-scanner name. Results
/// without a `response.service_name` bucket under the empty string rather
/// than being dropped.
pub fn bucket_by_scanner(
    doc: &Value,
    index: &BTreeMap<String, String>,
) -> BTreeMap<String, Vec<Value>> {
    let mut buckets: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    for raw in result_entries(doc) {
        let Some(entry) = raw.as_object() else {
            continue;
        };
        let mut entry = entry.clone();

        let sha = entry
            .get("sha256")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if let Some(filename) = index.get(sha) {
            entry.insert("filename".to_string(), json!(filename));
        }

        let mut scoped = Value::Object(entry);
        let scanner = section_text(&scoped, "response.service_name");
        let score = resolve(&scoped, "result.score")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let started = section_text(&scoped, "response.milestones.service_started");
        let completed = section_text(&scoped, "response.milestones.service_completed");

        let mut synthesized: Vec<Value> = resolve(&scoped, "result.sections")
            .and_then(Value::as_array)
            .map(|sections| {
                sections
                    .iter()
                    .map(|s| synthesize_result(s, score, &started, &scanner, &completed))
                    .collect()
            })
            .unwrap_or_default();
        if synthesized.is_empty() {
            synthesized.push(json!({
                "status": "passed",
                "code_desc": "NA",
                "start_time": started,
            }));
        }

        match scoped.pointer_mut("/result").and_then(Value::as_object_mut) {
            Some(result) => {
                result.insert("sections".to_string(), Value::Array(synthesized));
            }
            None => {
                if let Some(map) = scoped.as_object_mut() {
                    map.insert("result".to_string(), json!({"sections": synthesized}));
                }
            }
        }
        buckets.entry(scanner).or_default().push(scoped);
    }
    buckets
}

fn result_entries(doc: &Value) -> Vec<&Value> {
    match resolve(doc, "api_response.results") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => Vec::new(),
    }
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
            .field("version", FieldRule::new("api_server_version").or_default(""))
            .field("statistics", Spec::Object(ObjectSpec::new()))
            .field(
                "profiles",
                Spec::List(vec![Spec::Object(profile_spec(nist_tags))]),
            ),
    )
}

fn profile_spec(nist_tags: &[&str]) -> ObjectSpec {
    ObjectSpec::new()
        .field(
            "name",
            Spec::path("api_response.results[0].response.service_name"),
        )
        .field(
            "version",
            Spec::path("api_response.results[0].response.service_version"),
        )
        .field("title", Spec::path("api_response.params.description"))
        .field("supports", Spec::literal(json!([])))
        .field("attributes", Spec::literal(json!([])))
        .field("groups", Spec::literal(json!([])))
        .field("status", Spec::literal("loaded"))
        .field(
            "controls",
            Spec::Array(ArraySpec::new("api_response.results", control_spec(nist_tags))),
        )
        .field("sha256", Spec::literal(""))
}

fn control_spec(nist_tags: &[&str]) -> ObjectSpec {
    ObjectSpec::new()
        .field("id", FieldRule::new("sha256").or_default(""))
        .field("title", Spec::path("filename"))
        .field("desc", Spec::literal(""))
        .field("impact", Spec::path_with("result.score", normalize_score))
        .field("refs", Spec::literal(json!([])))
        .field(
            "tags",
            Spec::Object(
                ObjectSpec::new()
                    .field("archive_ts", Spec::path("archive_ts"))
                    .field("classification", Spec::path("classification"))
                    .field("expiry_ts", Spec::path("expiry_ts"))
                    .field("size", Spec::path("size"))
                    .field("type", Spec::path("type"))
                    .field("nist", Spec::literal(json!(nist_tags))),
            ),
        )
        .field(
            "source_location",
            Spec::Object(ObjectSpec::new().field("ref", Spec::literal(""))),
        )
        .field(
            "results",
            Spec::Array(ArraySpec::new("result.sections", result_spec())),
        )
}

fn result_spec() -> ObjectSpec {
    ObjectSpec::new()
        .field("status", FieldRule::new("status").or_default("passed"))
        .field("code_desc", FieldRule::new("code_desc").or_default(""))
        .field("start_time", FieldRule::new("start_time").or_default(""))
        .field("run_time", Spec::path("run_time"))
}

/// Conveyor scores run 0–1000; normalize into the canonical [0, 1] range.
/// Absent or non-numeric scores count as clean (0.0).
fn normalize_score(raw: Option<&Value>) -> Result<Value> {
    let score = raw.and_then(Value::as_f64).unwrap_or(0.0);
    Ok(json!((score / 1000.0).clamp(0.0, 1.0)))
}
