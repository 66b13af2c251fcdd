// src/view/card.rs

//! Card and artifact views: the display-ready form of a model.

use serde::Serialize;

use crate::models::{Artifact, Field, Messages, Model};
use crate::utils::DownloadLinks;

const UEFI_LABEL: &str = "UEFI";

/// Display-ready artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactView {
    /// `<type> / <board id> <rev> / <BUILD>`
    pub title: String,
    /// Localized `label: value` rows
    pub meta: Vec<String>,
    pub download_label: String,
    pub download_url: String,
    pub sha256: String,
}

/// Firmware type shown in titles: "UEFI" for EDK/UDK baselines, otherwise
/// the declared type, otherwise the baseline itself.
pub fn title_firmware_type(artifact: &Artifact) -> Option<&str> {
    if artifact.is_uefi() {
        return Some(UEFI_LABEL);
    }
    Field::FIRMWARE_TYPE
        .lookup(artifact)
        .or_else(|| Field::EDK_BASELINE.lookup(artifact))
}

/// One-line artifact title.
pub fn title_line(artifact: &Artifact, na: &str) -> String {
    let fw_type = title_firmware_type(artifact).unwrap_or(na);
    let board = match Field::BOARD_ID.lookup(artifact) {
        Some(id) => match Field::BOARD_REV.lookup(artifact) {
            Some(rev) => format!("{id} {rev}"),
            None => id.to_string(),
        },
        None => na.to_string(),
    };
    let left = format!("{fw_type} / {board}");
    match Field::BUILD.lookup(artifact) {
        Some(build) => format!("{left} / {}", build.to_uppercase()),
        None => left,
    }
}

/// Localized metadata rows; absent values render as `N/A`.
pub fn meta_lines(artifact: &Artifact, messages: &Messages) -> Vec<String> {
    let fw_type = if artifact.is_uefi() {
        Some(UEFI_LABEL)
    } else {
        Field::FIRMWARE_TYPE.lookup(artifact)
    };
    let version = artifact.version_full();
    let released = Field::RELEASED
        .lookup(artifact)
        .map(|raw| raw.replacen('T', " ", 1));

    vec![
        messages.row(&messages.board_id, Field::BOARD_ID.lookup(artifact)),
        messages.row(&messages.board_rev, Field::BOARD_REV.lookup(artifact)),
        messages.row(&messages.firmware_type, fw_type),
        messages.row(&messages.edk_baseline, Field::EDK_BASELINE.lookup(artifact)),
        messages.row(&messages.refcode_baseline, Field::REFCODE.lookup(artifact)),
        messages.row(&messages.version, version.as_deref()),
        messages.row(&messages.build, Field::BUILD.lookup(artifact)),
        messages.row(&messages.release_time, released.as_deref()),
    ]
}

impl ArtifactView {
    pub fn build(artifact: &Artifact, messages: &Messages, links: &DownloadLinks) -> Self {
        Self {
            title: title_line(artifact, &messages.na),
            meta: meta_lines(artifact, messages),
            download_label: format!("{} {}", messages.download, artifact.file_name()),
            download_url: links.link(&artifact.path),
            sha256: format!("SHA256: {}", artifact.sha256.as_deref().unwrap_or("unknown")),
        }
    }
}

/// Display-ready model card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// Expand/collapse identity
    pub key: String,
    pub title: String,
    pub tags: Vec<String>,
    pub group_path: Option<String>,
    /// Artifacts currently visible
    pub artifacts: Vec<ArtifactView>,
    /// Size of the displayed list before truncation
    pub total: usize,
    /// "Show more"/"Collapse" label when the list exceeds the default size
    pub toggle: Option<String>,
    /// "No artifacts" message for an empty list
    pub placeholder: Option<String>,
}

/// Stable expand/collapse identity: group path, then model, then position.
pub fn card_key(model: &Model, index: usize) -> String {
    model
        .group_path
        .as_deref()
        .or(model.model.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| index.to_string())
}

/// Card title: model name, then group path, then a localized placeholder.
pub fn card_title(model: &Model, messages: &Messages) -> String {
    model
        .identity()
        .unwrap_or(&messages.unknown_model)
        .to_string()
}
