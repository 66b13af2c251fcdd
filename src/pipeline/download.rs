// src/pipeline/download.rs

//! Artifact download with SHA-256 verification.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use sha2::{Digest, Sha256};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Artifact, Manifest};
use crate::utils::{DownloadLinks, http};

/// Result of a finished download.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
    /// Whether the manifest published a hash to compare against
    pub verified: bool,
}

/// Find an artifact by its repository path in either list.
pub fn find_artifact<'a>(manifest: &'a Manifest, path: &str) -> Result<&'a Artifact> {
    let wanted = path.trim_start_matches('/');
    manifest
        .machines
        .iter()
        .flat_map(|m| m.latest.iter().chain(m.artifacts.iter()))
        .find(|a| a.path == wanted)
        .ok_or_else(|| AppError::not_found(format!("artifact '{wanted}' is not in the manifest")))
}

/// Compare a computed digest with the published one, case-insensitively.
pub fn verify_digest(artifact: &Artifact, actual: &str) -> Result<bool> {
    let Some(expected) = artifact.sha256.as_deref() else {
        return Ok(false);
    };
    if expected.eq_ignore_ascii_case(actual) {
        Ok(true)
    } else {
        Err(AppError::Checksum {
            path: artifact.path.clone(),
            expected: expected.to_ascii_lowercase(),
            actual: actual.to_string(),
        })
    }
}

/// Stream an artifact into `output_dir`, hashing while writing.
///
/// The file is written under a temporary name and renamed only after the
/// digest matches. On any failure the temporary file is removed.
pub async fn download_artifact(
    client: &reqwest::Client,
    links: &DownloadLinks,
    artifact: &Artifact,
    output_dir: &Path,
) -> Result<DownloadOutcome> {
    let url = links.link(&artifact.path);
    log::info!("Downloading {}", url);

    let name = artifact.file_name();
    if name.is_empty() {
        return Err(AppError::validation(format!(
            "artifact path '{}' has no file name",
            artifact.path
        )));
    }
    tokio::fs::create_dir_all(output_dir).await?;
    let target = output_dir.join(name);
    let tmp = output_dir.join(format!("{name}.part"));

    let response = http::get_ok(client, &url).await?;
    let (bytes, sha256, verified) = match finish_transfer(response, artifact, &tmp, &target).await {
        Ok(done) => done,
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not remove {}: {}", tmp.display(), cleanup);
                }
            }
            return Err(e);
        }
    };
    if !verified {
        log::warn!("No published SHA-256 for {}; skipping verification", artifact.path);
    }
    log::info!("Saved {} ({} bytes) to {}", name, bytes, target.display());

    Ok(DownloadOutcome {
        path: target,
        bytes,
        sha256,
        verified,
    })
}

/// Write the body to `tmp`, verify it and move it to `target`.
async fn finish_transfer(
    response: reqwest::Response,
    artifact: &Artifact,
    tmp: &Path,
    target: &Path,
) -> Result<(u64, String, bool)> {
    let mut stream = response.bytes_stream();
    let mut file = tokio::fs::File::create(tmp).await?;
    let mut hasher = Sha256::new();
    let mut bytes = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        hasher.update(&chunk);
        file.write_all(&chunk).await?;
        bytes += chunk.len() as u64;
    }
    file.flush().await?;
    drop(file);

    let sha256 = hex::encode(hasher.finalize());
    let verified = verify_digest(artifact, &sha256)?;
    tokio::fs::rename(tmp, target).await?;
    Ok((bytes, sha256, verified))
}
