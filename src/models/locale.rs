//! Localized message tables.
//!
//! Built-in English and Chinese tables can be overridden from a TOML file
//! with `[en]` / `[zh]` sections. Templates use `{name}` placeholders.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Supported interface languages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(AppError::validation(format!(
                "unsupported language '{other}' (expected en or zh)"
            ))),
        }
    }
}

/// Both language tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "Messages::english")]
    pub en: Messages,

    #[serde(default = "Messages::chinese")]
    pub zh: Messages,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            en: Messages::english(),
            zh: Messages::chinese(),
        }
    }
}

impl LocaleConfig {
    /// Load locale tables from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load locale tables or fall back to the built-in ones.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Locale load failed from {:?}: {}. Using built-in tables.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    pub fn messages(&self, lang: Language) -> &Messages {
        match lang {
            Language::En => &self.en,
            Language::Zh => &self.zh,
        }
    }
}

/// User-facing strings for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Messages {
    pub heading: String,
    pub latest: String,
    pub all: String,
    pub index_by: String,
    pub index_all: String,
    pub index_collection: String,
    pub index_series: String,
    pub index_category: String,
    pub index_tags: String,
    pub index_models: String,
    /// `{models}` and `{artifacts}` placeholders
    pub meta_summary: String,
    pub load_error: String,
    pub firmware_type: String,
    pub edk_baseline: String,
    pub refcode_baseline: String,
    pub board_id: String,
    pub board_rev: String,
    pub version: String,
    pub build: String,
    pub release_time: String,
    pub download: String,
    pub no_artifacts: String,
    /// `{count}` placeholder
    pub expand_more: String,
    pub collapse: String,
    pub unknown_model: String,
    pub info_schema_version: String,
    pub info_coverage: String,
    pub info_generated_from: String,
    pub info_latest_rule: String,
    pub info_models: String,
    pub info_artifacts: String,
    /// `{count}` and `{latest}` placeholders
    pub info_artifact_counts: String,
    pub info_newest: String,
    pub na: String,
    pub colon: String,
}

impl Messages {
    pub fn english() -> Self {
        Self {
            heading: "Downloads Hub".into(),
            latest: "Latest".into(),
            all: "All".into(),
            index_by: "Index by".into(),
            index_all: "All".into(),
            index_collection: "Collection".into(),
            index_series: "Series".into(),
            index_category: "Category".into(),
            index_tags: "Tags".into(),
            index_models: "Models".into(),
            meta_summary: "{models} models, {artifacts} artifacts".into(),
            load_error: "Failed to load manifest.json".into(),
            firmware_type: "Firmware Type".into(),
            edk_baseline: "EDK2 Baseline".into(),
            refcode_baseline: "RefCode Baseline".into(),
            board_id: "Board ID".into(),
            board_rev: "Board Rev".into(),
            version: "Version".into(),
            build: "Build".into(),
            release_time: "Push Time".into(),
            download: "Download".into(),
            no_artifacts: "No artifacts found for this model.".into(),
            expand_more: "Show more ({count})".into(),
            collapse: "Collapse".into(),
            unknown_model: "Unknown model".into(),
            info_schema_version: "Schema version".into(),
            info_coverage: "Coverage".into(),
            info_generated_from: "Generated from".into(),
            info_latest_rule: "Latest rule".into(),
            info_models: "Models".into(),
            info_artifacts: "Artifacts".into(),
            info_artifact_counts: "{count} ({latest} latest)".into(),
            info_newest: "Newest artifact".into(),
            na: "N/A".into(),
            colon: ": ".into(),
        }
    }

    pub fn chinese() -> Self {
        Self {
            heading: "下载中心".into(),
            latest: "最新".into(),
            all: "全部".into(),
            index_by: "索引类型".into(),
            index_all: "全部".into(),
            index_collection: "集合".into(),
            index_series: "系列".into(),
            index_category: "类别".into(),
            index_tags: "标签".into(),
            index_models: "型号".into(),
            meta_summary: "{models} 个机型，{artifacts} 个固件".into(),
            load_error: "manifest.json 加载失败".into(),
            firmware_type: "固件类型".into(),
            edk_baseline: "EDK2 基线".into(),
            refcode_baseline: "RefCode 基线".into(),
            board_id: "主板标识".into(),
            board_rev: "主板版本".into(),
            version: "版本号".into(),
            build: "构建类型".into(),
            release_time: "推送时间".into(),
            download: "下载".into(),
            no_artifacts: "该机型暂无固件。".into(),
            expand_more: "展开更多（{count}）".into(),
            collapse: "收起".into(),
            unknown_model: "未知机型".into(),
            info_schema_version: "清单版本".into(),
            info_coverage: "覆盖范围".into(),
            info_generated_from: "生成来源".into(),
            info_latest_rule: "最新规则".into(),
            info_models: "机型".into(),
            info_artifacts: "固件".into(),
            info_artifact_counts: "{count}（其中最新 {latest}）".into(),
            info_newest: "最新固件".into(),
            na: "N/A".into(),
            colon: "：".into(),
        }
    }

    pub fn summary(&self, models: usize, artifacts: usize) -> String {
        self.meta_summary
            .replace("{models}", &models.to_string())
            .replace("{artifacts}", &artifacts.to_string())
    }

    pub fn show_more(&self, hidden: usize) -> String {
        self.expand_more.replace("{count}", &hidden.to_string())
    }

    /// Format a `label: value` row, substituting `N/A` for missing values.
    pub fn row(&self, label: &str, value: Option<&str>) -> String {
        format!("{}{}{}", label, self.colon, value.unwrap_or(&self.na))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language_codes() {
        assert_eq!("zh".parse::<Language>().unwrap(), Language::Zh);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn templates_fill_placeholders() {
        let en = Messages::english();
        assert_eq!(en.summary(2, 5), "2 models, 5 artifacts");
        assert_eq!(en.show_more(3), "Show more (3)");
        assert_eq!(en.row("Build", None), "Build: N/A");

        let zh = Messages::chinese();
        assert_eq!(zh.summary(1, 0), "1 个机型，0 个固件");
        assert_eq!(zh.row("构建类型", Some("rel")), "构建类型：rel");
    }

    #[test]
    fn toml_override_replaces_one_table() {
        let mut en = Messages::english();
        en.download = "Get".into();
        let text = toml::to_string(&LocaleConfig {
            en,
            zh: Messages::chinese(),
        })
        .unwrap();
        let partial = text.split("[zh]").next().unwrap();

        let locale: LocaleConfig = toml::from_str(partial).unwrap();
        assert_eq!(locale.messages(Language::En).download, "Get");
        assert_eq!(locale.messages(Language::Zh), &Messages::chinese());
    }
}
