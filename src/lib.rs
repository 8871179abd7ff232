//! hdfconv normalizes heterogeneous security/scan-tool output into the
//! canonical HDF execution-result schema (profiles → controls → results).
//!
//! The core is a declarative mapping engine: format adapters describe their
//! conversion as an immutable [`mapping::Spec`] tree plus small pure pre-pass
//! functions, and a single recursive interpreter walks the input document
//! under that tree. The engine does no I/O, keeps no state across calls, and
//! treats absent input branches as first-class values rather than errors, so
//! partial scanner output still converts to a schema-conformant document.

pub mod adapters;
pub mod formats;
pub mod hdf;
pub mod mapping;
pub mod path;
pub mod schema;

pub use formats::{Conversion, ConvertOptions, Format, allowed_format_names, convert};
pub use hdf::{
    Control, ControlResult, ControlResultStatus, Execution, Platform, Profile, SourceLocation,
    Statistics,
};
pub use mapping::{
    ArraySpec, FieldRule, ObjectSpec, Report, Spec, Transformer, interpret, interpret_with_report,
};
pub use path::resolve;

use anyhow::{Context, Result, bail};
use serde_json::Value;

/// Parse one raw scanner document. Parse failures are fatal and
/// non-retryable; adapters attach format context and surface them to the
/// caller.
pub fn parse_document(input: &str) -> Result<Value> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        bail!("no input document provided");
    }
    serde_json::from_str(trimmed).context("parsing input document")
}
