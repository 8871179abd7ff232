//! Declarative mapping specifications.
//!
//! A format adapter describes its conversion as an immutable tree of [`Spec`]
//! nodes built once per adapter; the interpreter in [`interpreter`] walks an
//! input document under that tree. The spec tree is the only API the engine
//! exposes to adapters; none of them reach into interpreter internals.
//!
//! Node kinds:
//! - [`Spec::Literal`]: a fixed value emitted regardless of input.
//! - [`Spec::Field`]: extract the value at a dotted path from the current
//!   context, optionally through a transformer, optionally with a default
//!   when the path is absent.
//! - [`Spec::Object`]: assemble a record field-by-field against the same
//!   context; absent fields are omitted, never emitted as `null`.
//! - [`Spec::List`]: a fixed-length array whose elements are each evaluated
//!   against the same context (literals and extracted values side by side).
//! - [`Spec::Array`]: expand a collection at a path into one record per
//!   element, each evaluated with the element as its context; optionally
//!   folded into a keyed map.

pub mod interpreter;

pub use interpreter::{Report, interpret, interpret_with_report};

use anyhow::Result;
use serde_json::Value;

/// Per-field value transformer. Receives the resolved value (`None` when the
/// path was absent) and produces the value to emit. Errors indicate an
/// adapter defect and abort the conversion rather than being swallowed.
pub type Transformer = fn(Option<&Value>) -> Result<Value>;

/// One node of a mapping specification tree.
#[derive(Clone, Debug)]
pub enum Spec {
    Literal(Value),
    Field(FieldRule),
    Object(ObjectSpec),
    List(Vec<Spec>),
    Array(ArraySpec),
}

impl Spec {
    /// Fixed value, independent of input.
    pub fn literal(value: impl Into<Value>) -> Self {
        Spec::Literal(value.into())
    }

    /// Extract the value at `path`; absent stays absent.
    pub fn path(path: impl Into<String>) -> Self {
        Spec::Field(FieldRule::new(path))
    }

    /// Extract the value at `path` and run it through `transformer`.
    pub fn path_with(path: impl Into<String>, transformer: Transformer) -> Self {
        Spec::Field(FieldRule::new(path).transform(transformer))
    }
}

impl From<FieldRule> for Spec {
    fn from(rule: FieldRule) -> Self {
        Spec::Field(rule)
    }
}

impl From<ObjectSpec> for Spec {
    fn from(spec: ObjectSpec) -> Self {
        Spec::Object(spec)
    }
}

impl From<ArraySpec> for Spec {
    fn from(spec: ArraySpec) -> Self {
        Spec::Array(spec)
    }
}

/// Path extraction rule for a single output field.
#[derive(Clone, Debug)]
pub struct FieldRule {
    pub path: String,
    pub transformer: Option<Transformer>,
    pub default: Option<Value>,
}

impl FieldRule {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            transformer: None,
            default: None,
        }
    }

    pub fn transform(mut self, transformer: Transformer) -> Self {
        self.transformer = Some(transformer);
        self
    }

    /// Value emitted when the path is absent and no transformer is attached.
    pub fn or_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Field list for one output record. Fields evaluate in declaration order;
/// the assembled record stores them in key order, so output is deterministic
/// for a fixed spec and input.
#[derive(Clone, Debug, Default)]
pub struct ObjectSpec {
    pub fields: Vec<(String, Spec)>,
}

impl ObjectSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, spec: impl Into<Spec>) -> Self {
        self.fields.push((name.into(), spec.into()));
        self
    }
}

/// One-to-many expansion over the collection at `path`.
///
/// Without `key` the expansion yields an array in source order. With `key`
/// the records are folded into a map keyed by each record's key field
/// (rendered as a string): last write wins on collision, and records whose
/// key field is absent or non-scalar are dropped and counted in the
/// interpretation [`Report`].
#[derive(Clone, Debug)]
pub struct ArraySpec {
    pub path: String,
    pub key: Option<String>,
    pub element: ObjectSpec,
}

impl ArraySpec {
    pub fn new(path: impl Into<String>, element: ObjectSpec) -> Self {
        Self {
            path: path.into(),
            key: None,
            element,
        }
    }

    pub fn keyed(path: impl Into<String>, key: impl Into<String>, element: ObjectSpec) -> Self {
        Self {
            path: path.into(),
            key: Some(key.into()),
            element,
        }
    }
}
