// Library-surface guard rails for the mapping engine: the documented
// properties a spec author can rely on.

use anyhow::{Result, bail};
use hdfconv::{ArraySpec, Execution, ObjectSpec, Spec, interpret, schema};
use serde_json::{Value, json};

fn thousandths(raw: Option<&Value>) -> Result<Value> {
    match raw.and_then(Value::as_f64) {
        Some(score) => Ok(json!(score / 1000.0)),
        None => bail!("expected a numeric score"),
    }
}

#[test]
fn impact_normalization_divides_raw_score() {
    let spec = Spec::Object(ObjectSpec::new().field("impact", Spec::path_with("score", thousandths)));
    let out = interpret(&spec, &json!({"score": 750})).unwrap();
    assert_eq!(out, json!({"impact": 0.75}));
}

#[test]
fn absent_paths_yield_omission_across_the_tree() {
    let spec = Spec::Object(
        ObjectSpec::new()
            .field("kept", Spec::path("present"))
            .field("dropped", Spec::path("missing.branch[3]"))
            .field(
                "records",
                Spec::Array(ArraySpec::new("missing_collection", ObjectSpec::new())),
            ),
    );
    let out = interpret(&spec, &json!({"present": "yes"})).unwrap();
    assert_eq!(out, json!({"kept": "yes", "records": []}));
}

#[test]
fn repeated_interpretation_is_byte_identical() {
    let spec = Spec::Object(
        ObjectSpec::new().field(
            "controls",
            Spec::Array(ArraySpec::keyed(
                "issues",
                "id",
                ObjectSpec::new()
                    .field("id", Spec::path("rule_id"))
                    .field("impact", Spec::path_with("score", thousandths)),
            )),
        ),
    );
    let doc = json!({"issues": [
        {"rule_id": "B", "score": 100},
        {"rule_id": "A", "score": 200},
        {"rule_id": "B", "score": 300}
    ]});
    let first = serde_json::to_string(&interpret(&spec, &doc).unwrap()).unwrap();
    let second = serde_json::to_string(&interpret(&spec, &doc).unwrap()).unwrap();
    assert_eq!(first, second);
}

// The single-control scenario: a minimal spec over one finding must produce a
// profile/control/result chain with the expected identity, tags, and status.
#[test]
fn minimal_one_control_mapping_end_to_end() {
    let control = ObjectSpec::new()
        .field("id", Spec::path("rule_id"))
        .field("title", Spec::path("details"))
        .field("desc", Spec::literal(""))
        .field("impact", Spec::literal(json!(0.5)))
        .field(
            "tags",
            Spec::Object(ObjectSpec::new().field("cwe", Spec::path("cwe"))),
        )
        .field("refs", Spec::literal(json!([])))
        .field("source_location", Spec::Object(ObjectSpec::new()))
        .field(
            "results",
            Spec::List(vec![Spec::Object(
                ObjectSpec::new()
                    .field("status", Spec::literal("failed"))
                    .field("code_desc", Spec::path("code"))
                    .field("start_time", Spec::literal("")),
            )]),
        );
    let spec = Spec::Object(
        ObjectSpec::new()
            .field(
                "platform",
                Spec::Object(
                    ObjectSpec::new()
                        .field("name", Spec::literal("hdfconv"))
                        .field("release", Spec::literal("test")),
                ),
            )
            .field("version", Spec::literal("test"))
            .field("statistics", Spec::Object(ObjectSpec::new()))
            .field(
                "profiles",
                Spec::List(vec![Spec::Object(
                    ObjectSpec::new()
                        .field("name", Spec::literal("scanner"))
                        .field("status", Spec::literal("loaded"))
                        .field("sha256", Spec::literal(""))
                        .field("controls", Spec::Array(ArraySpec::new("issues", control))),
                )]),
            ),
    );

    let doc = json!({
        "issues": [{
            "rule_id": "G101",
            "details": "hardcoded creds",
            "cwe": "CWE-798",
            "code": "pw := \"x\""
        }]
    });

    let out = interpret(&spec, &doc).unwrap();
    assert_eq!(out["profiles"][0]["controls"][0]["id"], json!("G101"));
    assert_eq!(
        out["profiles"][0]["controls"][0]["title"],
        json!("hardcoded creds")
    );
    assert_eq!(
        out["profiles"][0]["controls"][0]["tags"]["cwe"],
        json!("CWE-798")
    );
    let results = &out["profiles"][0]["controls"][0]["results"];
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["status"], json!("failed"));
    assert_eq!(results[0]["code_desc"], json!("pw := \"x\""));

    // The interpreted value also satisfies the canonical contract.
    schema::validate_execution(&out).unwrap();
    let execution = Execution::from_value(out).unwrap();
    assert_eq!(execution.profiles[0].controls[0].id, "G101");
    assert_eq!(execution.profiles[0].controls[0].impact, 0.5);
}
