// src/pipeline/info.rs

//! Manifest summary for the `info` command.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Artifact, Manifest, Messages};

/// Overview of a loaded manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestInfo {
    pub schema_version: Option<String>,
    pub coverage: Option<String>,
    pub generated_from: Option<String>,
    pub latest_rule: Option<String>,
    pub model_count: usize,
    /// Entries across every model's full history
    pub artifact_count: usize,
    /// Entries across every model's curated list
    pub latest_count: usize,
    /// Newest artifact timestamp found in either list
    pub newest: Option<DateTime<Utc>>,
    pub newest_path: Option<String>,
}

impl ManifestInfo {
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let newest = manifest
            .machines
            .iter()
            .flat_map(|m| m.latest.iter().chain(m.artifacts.iter()))
            .filter_map(|a| a.timestamp.map(|ts| (ts, a)))
            .max_by(|(a, _), (b, _)| a.total_cmp(b));

        Self {
            schema_version: manifest.schema_version.clone(),
            coverage: manifest.coverage.clone(),
            generated_from: manifest.generated_from.clone(),
            latest_rule: manifest.latest_rule.clone(),
            model_count: manifest.machines.len(),
            artifact_count: manifest.artifact_count(),
            latest_count: manifest.machines.iter().map(|m| m.latest.len()).sum(),
            newest: newest.and_then(|(ts, _)| to_datetime(ts)),
            newest_path: newest.map(|(_, a): (f64, &Artifact)| a.path.clone()),
        }
    }

    /// Localized `label: value` lines.
    pub fn lines(&self, messages: &Messages) -> Vec<String> {
        let counts = messages
            .info_artifact_counts
            .replace("{count}", &self.artifact_count.to_string())
            .replace("{latest}", &self.latest_count.to_string());
        let newest = match (&self.newest, &self.newest_path) {
            (Some(at), Some(path)) => Some(format!("{} ({})", at.format("%Y-%m-%d %H:%M:%S UTC"), path)),
            _ => None,
        };

        vec![
            messages.row(&messages.info_schema_version, self.schema_version.as_deref()),
            messages.row(&messages.info_coverage, self.coverage.as_deref()),
            messages.row(&messages.info_generated_from, self.generated_from.as_deref()),
            messages.row(&messages.info_latest_rule, self.latest_rule.as_deref()),
            messages.row(&messages.info_models, Some(&self.model_count.to_string())),
            messages.row(&messages.info_artifacts, Some(&counts)),
            messages.row(&messages.info_newest, newest.as_deref()),
        ]
    }
}

fn to_datetime(ts: f64) -> Option<DateTime<Utc>> {
    let secs = ts.floor();
    let nanos = ((ts - secs) * 1e9) as u32;
    DateTime::from_timestamp(secs as i64, nanos)
}
