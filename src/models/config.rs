//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::services::collation::CollationKind;
use crate::services::TagType;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where the manifest and artifacts live
    #[serde(default)]
    pub source: SourceConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Listing behavior
    #[serde(default)]
    pub display: DisplayConfig,

    /// Log filter defaults
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.source.manifest.trim().is_empty() {
            return Err(AppError::validation("source.manifest is empty"));
        }
        url::Url::parse(&self.source.download_base_url).map_err(|e| {
            AppError::validation(format!("source.download_base_url is invalid: {e}"))
        })?;
        if self.http.user_agent.trim().is_empty() {
            return Err(AppError::validation("http.user_agent is empty"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::validation("http.timeout_secs must be > 0"));
        }
        self.display.validate()
    }

    /// Serialize back to TOML, e.g. to print the effective configuration.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Manifest and download locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Manifest location: http(s) URL or local file path
    #[serde(default = "defaults::manifest")]
    pub manifest: String,

    /// Prefix joined with each artifact path to build download links
    #[serde(default = "defaults::download_base_url")]
    pub download_base_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            manifest: defaults::manifest(),
            download_base_url: defaults::download_base_url(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Listing behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Artifacts shown per card before "show more"
    #[serde(default = "defaults::default_visible")]
    pub default_visible: usize,

    /// String collation for tie-breaks and facet sorting
    #[serde(default)]
    pub collation: CollationKind,

    /// Facet type selected when none is given on the command line
    #[serde(default = "defaults::tag_type")]
    pub default_tag_type: TagType,
}

impl DisplayConfig {
    /// Reject settings that would hide every artifact.
    pub fn validate(&self) -> Result<()> {
        if self.default_visible == 0 {
            return Err(AppError::validation("display.default_visible must be > 0"));
        }
        Ok(())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_visible: defaults::default_visible(),
            collation: CollationKind::default(),
            default_tag_type: defaults::tag_type(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is unset
    #[serde(default = "defaults::level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::level(),
        }
    }
}

mod defaults {
    use crate::services::TagType;

    pub fn manifest() -> String {
        "manifest.json".into()
    }
    pub fn download_base_url() -> String {
        "https://raw.githubusercontent.com/loongson/firmware/main/".into()
    }
    pub fn user_agent() -> String {
        concat!("fwhub/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn default_visible() -> usize {
        2
    }
    pub fn tag_type() -> TagType {
        TagType::Series
    }
    pub fn level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.http.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_base_url() {
        let mut config = Config::default();
        config.source.download_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_visible() {
        let mut config = Config::default();
        config.display.default_visible = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [source]
            manifest = "https://example.com/manifest.json"

            [display]
            collation = "ordinal"
            default_tag_type = "collection"
            "#,
        )
        .unwrap();
        assert_eq!(config.source.manifest, "https://example.com/manifest.json");
        assert_eq!(
            config.source.download_base_url,
            "https://raw.githubusercontent.com/loongson/firmware/main/"
        );
        assert_eq!(config.display.default_visible, 2);
        assert_eq!(config.display.collation, CollationKind::Ordinal);
        assert_eq!(config.display.default_tag_type, TagType::Collection);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn round_trips_through_toml() {
        let text = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.display.default_visible, 2);
    }
}
