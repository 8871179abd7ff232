//! Format adapters.
//!
//! Each adapter supplies a mapping specification plus whatever pure pre-pass
//! functions its format's irregularities require. Adapters talk to the engine
//! only through the spec tree in [`crate::mapping`]; pre-passes are plain
//! input-to-input transforms with no interpreter dependency so they stay
//! independently testable.

pub mod conveyor;
pub mod gosec;

use serde_json::Value;

/// Platform name stamped into every converted execution.
pub(crate) const PLATFORM_NAME: &str = "hdfconv";

/// Converter release stamped into every converted execution.
pub(crate) const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default NIST tag set for static code analysis tools that carry no
/// compliance mapping of their own. Spec builders take this (or a caller
/// override) as an explicit argument; nothing in the engine reads it
/// ambiently.
pub const DEFAULT_STATIC_ANALYSIS_NIST_TAGS: &[&str] = &["SA-11", "RA-5"];

/// Replace the keyed map at `pointer` with its records in key order. Keyed
/// expansion dedupes sibling records, but the canonical schema wants an array
/// at these positions.
pub(crate) fn keyed_map_to_array(doc: &mut Value, pointer: &str) {
    if let Some(slot) = doc.pointer_mut(pointer) {
        if let Value::Object(map) = slot {
            let records = std::mem::take(map).into_iter().map(|(_, v)| v).collect();
            *slot = Value::Array(records);
        }
    }
}
