//! Recursive interpreter for mapping specification trees.
//!
//! `interpret` walks the spec tree, never the input: recursion depth is fixed
//! by the adapter's spec, so arbitrarily deep (or cyclic-looking) input cannot
//! drive unbounded recursion. Conversion is a pure function of
//! (spec, context) with no shared state, so independent conversions can run
//! on separate threads without coordination.

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use super::{ArraySpec, FieldRule, ObjectSpec, Spec};
use crate::path::resolve;

/// Counters surfaced alongside the interpreted value. `dropped_keyless` is
/// the number of expanded records a keyed fold discarded because their key
/// field was absent or non-scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Report {
    pub dropped_keyless: usize,
}

/// Interpret `spec` against `context`. A spec that resolves to nothing at the
/// top level yields `Value::Null`.
pub fn interpret(spec: &Spec, context: &Value) -> Result<Value> {
    Ok(interpret_with_report(spec, context)?.0)
}

/// As [`interpret`], also returning the interpretation [`Report`].
pub fn interpret_with_report(spec: &Spec, context: &Value) -> Result<(Value, Report)> {
    let mut report = Report::default();
    let value = eval(spec, context, &mut report)?.unwrap_or(Value::Null);
    Ok((value, report))
}

/// `None` means "absent": the enclosing object assembler omits the field
/// entirely instead of emitting `null`.
fn eval(spec: &Spec, context: &Value, report: &mut Report) -> Result<Option<Value>> {
    match spec {
        Spec::Literal(value) => Ok(Some(value.clone())),
        Spec::Field(rule) => eval_field(rule, context),
        Spec::Object(object) => Ok(Some(eval_object(object, context, report)?)),
        Spec::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if let Some(value) = eval(item, context, report)? {
                    out.push(value);
                }
            }
            Ok(Some(Value::Array(out)))
        }
        Spec::Array(array) => Ok(Some(eval_array(array, context, report)?)),
    }
}

fn eval_field(rule: &FieldRule, context: &Value) -> Result<Option<Value>> {
    let raw = resolve(context, &rule.path);
    if let Some(transformer) = rule.transformer {
        // Transformers see absence and must handle it; a transformer that
        // cannot is an adapter defect and fails the whole conversion.
        let value = transformer(raw)
            .with_context(|| format!("transformer failed for path '{}'", rule.path))?;
        return Ok(Some(value));
    }
    match raw {
        Some(value) => Ok(Some(value.clone())),
        None => Ok(rule.default.clone()),
    }
}

fn eval_object(spec: &ObjectSpec, context: &Value, report: &mut Report) -> Result<Value> {
    let mut record = Map::new();
    for (name, sub) in &spec.fields {
        if let Some(value) = eval(sub, context, report)? {
            record.insert(name.clone(), value);
        }
    }
    Ok(Value::Object(record))
}

fn eval_array(spec: &ArraySpec, context: &Value, report: &mut Report) -> Result<Value> {
    let members = collection_members(resolve(context, &spec.path));
    match &spec.key {
        None => {
            let mut out = Vec::with_capacity(members.len());
            for member in members {
                out.push(eval_object(&spec.element, member, report)?);
            }
            Ok(Value::Array(out))
        }
        Some(key) => {
            let mut keyed = Map::new();
            for member in members {
                let record = eval_object(&spec.element, member, report)?;
                match record.get(key).and_then(scalar_key) {
                    // Insert unconditionally: on a key collision the record
                    // that appears last in source order wins.
                    Some(rendered) => {
                        keyed.insert(rendered, record);
                    }
                    None => report.dropped_keyless += 1,
                }
            }
            Ok(Value::Object(keyed))
        }
    }
}

/// View a resolved value as a collection: arrays iterate in source order,
/// objects iterate their values in key order, a bare scalar is a one-element
/// collection, and absent or null is empty.
fn collection_members(value: Option<&Value>) -> Vec<&Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        Some(other) => vec![other],
    }
}

fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
