// src/pipeline/load.rs

//! Manifest loading from a URL or a local file.

use crate::error::Result;
use crate::models::Manifest;
use crate::utils::{http, is_remote};

/// Load the manifest once. Any failure is terminal for the caller.
pub async fn load_manifest(location: &str, client: &reqwest::Client) -> Result<Manifest> {
    let bytes = if is_remote(location) {
        log::info!("Fetching manifest from {}", location);
        http::fetch_bytes(client, location).await?
    } else {
        log::info!("Reading manifest from {}", location);
        tokio::fs::read(location).await?
    };

    let manifest = Manifest::from_slice(&bytes)?;
    log::info!(
        "Loaded {} models with {} artifacts",
        manifest.machines.len(),
        manifest.artifact_count()
    );
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::HttpConfig;

    fn client() -> reqwest::Client {
        http::create_client(&HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn loads_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        std::fs::write(
            &path,
            r#"{"machines":[{"model":"A","artifacts":[{"path":"a.fd"},{"path":"b.fd"}]}]}"#,
        )
        .unwrap();

        let manifest = load_manifest(path.to_str().unwrap(), &client()).await.unwrap();
        assert_eq!(manifest.machines.len(), 1);
        assert_eq!(manifest.artifact_count(), 2);
    }

    #[tokio::test]
    async fn missing_or_invalid_files_are_load_failures() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_manifest(missing.to_str().unwrap(), &client())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.is_load_failure());

        let scalar = dir.path().join("scalar.json");
        std::fs::write(&scalar, "42").unwrap();
        let err = load_manifest(scalar.to_str().unwrap(), &client())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Manifest(_)));
    }
}
