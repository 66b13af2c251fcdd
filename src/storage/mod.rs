//! Storage abstractions for user preferences.
//!
//! ## Directory Structure
//!
//! ```text
//! {state_dir}/
//! └── preferences.json      # {"fw_lang": "en" | "zh"}
//! ```

pub mod local;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Language;

// Re-export for convenience
pub use local::LocalStorage;

/// Persisted user preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Interface language code as written by the user
    #[serde(rename = "fw_lang", default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Preferences {
    /// Stored language; unknown or missing codes fall back to English.
    pub fn language(&self) -> Language {
        self.language
            .as_deref()
            .and_then(|code| code.parse().ok())
            .unwrap_or_default()
    }
}

/// Trait for preference storage backends.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Load preferences; a missing store yields defaults.
    async fn load(&self) -> Result<Preferences>;

    /// Replace the stored preferences.
    async fn save(&self, preferences: &Preferences) -> Result<()>;

    /// Stored interface language.
    async fn load_language(&self) -> Result<Language> {
        Ok(self.load().await?.language())
    }

    /// Persist the interface language, keeping other preferences.
    async fn save_language(&self, language: Language) -> Result<()> {
        let mut preferences = self.load().await?;
        preferences.language = Some(language.code().to_string());
        self.save(&preferences).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_language_falls_back_to_english() {
        let prefs = Preferences {
            language: Some("fr".into()),
        };
        assert_eq!(prefs.language(), Language::En);
        assert_eq!(Preferences::default().language(), Language::En);

        let prefs: Preferences = serde_json::from_str(r#"{"fw_lang":"zh"}"#).unwrap();
        assert_eq!(prefs.language(), Language::Zh);
    }
}
