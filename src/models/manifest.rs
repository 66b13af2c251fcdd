//! Manifest, Model and Artifact data structures.
//!
//! The manifest is produced by more than one generator over time, so every
//! field is read leniently: wrong JSON types and empty strings are treated
//! as absent instead of failing the whole document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Root manifest document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest schema version written by the generator
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub schema_version: Option<String>,

    /// Coverage hint ("full", ...)
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub coverage: Option<String>,

    /// Source files the manifest was generated from
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub generated_from: Option<String>,

    /// Rule used by the generator to pick `latest` entries
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub latest_rule: Option<String>,

    /// Device models
    #[serde(default, alias = "models", deserialize_with = "lenient::list")]
    pub machines: Vec<Model>,
}

impl Manifest {
    /// Build a manifest from an already parsed JSON value.
    ///
    /// Objects are read as a full manifest and arrays as a bare model list.
    /// Any other top-level value is rejected.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value)?),
            Value::Array(items) => Ok(Self {
                machines: lenient::collect(items),
                ..Self::default()
            }),
            other => Err(AppError::manifest(format!(
                "expected an object or array at top level, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parse a manifest from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Load a manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read(path)?;
        Self::from_slice(&content)
    }

    /// Total number of entries across every model's full history.
    pub fn artifact_count(&self) -> usize {
        self.machines.iter().map(|m| m.artifacts.len()).sum()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One physical device or board family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Display name
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub model: Option<String>,

    /// Grouping key (directory of the checksum file)
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub group_path: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub series: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub collection: Option<String>,

    /// Curated subset, may be empty
    #[serde(default, deserialize_with = "lenient::list")]
    pub latest: Vec<Artifact>,

    /// Full history
    #[serde(default, deserialize_with = "lenient::list")]
    pub artifacts: Vec<Artifact>,
}

impl Model {
    /// Identity used by the model facet: `model`, falling back to `group_path`.
    pub fn identity(&self) -> Option<&str> {
        self.model.as_deref().or(self.group_path.as_deref())
    }

    /// Tags shown on a card, in display order.
    pub fn tags(&self) -> Vec<&str> {
        [&self.series, &self.category, &self.collection]
            .into_iter()
            .filter_map(|t| t.as_deref())
            .collect()
    }

    /// Artifacts considered when ranking this model.
    pub fn candidates(&self) -> &[Artifact] {
        if self.latest.is_empty() {
            &self.artifacts
        } else {
            &self.latest
        }
    }
}

/// One downloadable firmware build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Repository-relative path, also the download suffix
    #[serde(default, deserialize_with = "lenient::string")]
    pub path: String,

    /// Hex SHA-256 of the file
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub sha256: Option<String>,

    /// Highest-priority ordering signal (unix seconds)
    #[serde(default, deserialize_with = "lenient::number")]
    pub timestamp: Option<f64>,

    /// Every other producer field, read through [`crate::models::Field`]
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Artifact {
    /// Create an artifact with the given path and no other fields.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Builder-style helper to set a string attribute.
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attributes
            .insert(key.to_string(), Value::String(value.into()));
        self
    }

    /// Builder-style helper to set the timestamp.
    pub fn with_timestamp(mut self, ts: f64) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Read a raw string field by key.
    ///
    /// Empty strings and non-string values are reported as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        let value = match key {
            "path" => Some(self.path.as_str()),
            "sha256" => self.sha256.as_deref(),
            _ => self.attributes.get(key).and_then(Value::as_str),
        };
        value.filter(|s| !s.is_empty())
    }

    /// Last path segment, used as the download file name.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Deserializers that degrade malformed values to "absent".
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
    }

    pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(opt_string(deserializer)?.unwrap_or_default())
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|n| n.is_finite()))
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => collect(items),
            _ => Vec::new(),
        })
    }

    /// Keep the entries that are objects and deserialize cleanly.
    pub fn collect<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
        items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    log::debug!("Skipping malformed manifest entry: {}", e);
                    None
                }
            })
            .collect()
    }
}
