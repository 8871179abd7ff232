//! Canonical execution-result ("HDF") output types.
//!
//! These structs are the fixed contract every adapter populates: an
//! [`Execution`] holds profiles, profiles hold controls, controls hold
//! results. The interpreter emits untyped JSON; [`Execution::from_value`]
//! bridges it into the typed contract, with serde defaults standing in for
//! mandatory fields a mapping left absent (empty strings, empty arrays,
//! impact `0.0`, status `loaded`/`passed`). Filling defaults instead of
//! rejecting keeps partial scanner output convertible, which it frequently is
//! in practice.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Execution {
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passthrough: Option<Value>,
}

impl Execution {
    /// Shape an interpreted mapping value into the canonical contract.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).context("shaping interpreted output into an execution")
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).context("serializing execution")
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Platform {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub release: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub supports: Vec<Value>,
    #[serde(default)]
    pub attributes: Vec<Value>,
    #[serde(default)]
    pub groups: Vec<Value>,
    #[serde(default = "default_profile_status")]
    pub status: String,
    #[serde(default)]
    pub controls: Vec<Control>,
    #[serde(default)]
    pub sha256: String,
}

fn default_profile_status() -> String {
    "loaded".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Control {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub impact: f64,
    /// Arbitrary key/value tags; the reserved `nist` key holds an array of
    /// compliance tag strings.
    #[serde(default)]
    pub tags: Map<String, Value>,
    #[serde(default)]
    pub refs: Vec<Value>,
    #[serde(default)]
    pub source_location: SourceLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub results: Vec<ControlResult>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControlResult {
    #[serde(default)]
    pub status: ControlResultStatus,
    #[serde(default)]
    pub code_desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_time: Option<f64>,
}

/// Result status. An absent status deserializes as `Passed`: scanners that
/// report nothing for a check are treated as clean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlResultStatus {
    #[default]
    Passed,
    Failed,
    Skipped,
    Error,
}

impl ControlResultStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlResultStatus::Passed => "passed",
            ControlResultStatus::Failed => "failed",
            ControlResultStatus::Skipped => "skipped",
            ControlResultStatus::Error => "error",
        }
    }
}
