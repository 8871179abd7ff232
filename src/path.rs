//! Dotted-path resolution over untyped JSON.
//!
//! Paths are dot-separated segments; a segment may carry one or more bracketed
//! integer indices (`issues[0]`, `matrix[1][2]`, bare `[0]`). Resolution is
//! read-only and total: anything that cannot be walked (a missing field, an
//! index into a non-array, an out-of-bounds index, a malformed bracket)
//! resolves to `None` rather than an error. Absence is a first-class value in
//! the mapping engine, never a failure.

use serde_json::Value;

/// Resolve `path` against `context`. The empty path resolves to the context
/// itself, which lets a field rule hand the whole current node to a
/// transformer.
pub fn resolve<'a>(context: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(context);
    }
    let mut current = context;
    for segment in path.split('.') {
        let (name, indices) = parse_segment(segment)?;
        if !name.is_empty() {
            current = current.as_object()?.get(name)?;
        }
        for index in indices {
            current = current.as_array()?.get(index)?;
        }
    }
    Some(current)
}

/// Split one segment into its field name (possibly empty) and trailing
/// indices. Malformed segments yield `None`.
fn parse_segment(segment: &str) -> Option<(&str, Vec<usize>)> {
    let name_end = segment.find('[').unwrap_or(segment.len());
    let name = &segment[..name_end];
    let mut rest = &segment[name_end..];
    if name.is_empty() && rest.is_empty() {
        // Produced by consecutive dots or a trailing dot.
        return None;
    }
    let mut indices = Vec::new();
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return None;
        }
        let close = rest.find(']')?;
        let index = rest[1..close].parse::<usize>().ok()?;
        indices.push(index);
        rest = &rest[close + 1..];
    }
    Some((name, indices))
}
