// src/services/filter.rs

//! Model filtering: free-text search, tag facet and model facet.
//!
//! The three predicates are independent and combined with AND. Search
//! always covers both the `latest` and `artifacts` lists, whatever list is
//! being displayed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::{Model, SEARCH_KEYS};

/// Facet dimension selectable for tag filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TagType {
    #[default]
    All,
    Collection,
    Series,
    Category,
}

impl TagType {
    pub const ALL: [TagType; 4] = [
        TagType::All,
        TagType::Collection,
        TagType::Series,
        TagType::Category,
    ];

    /// Parse a facet name. Unknown names select [`TagType::All`].
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "collection" => TagType::Collection,
            "series" => TagType::Series,
            "category" => TagType::Category,
            _ => TagType::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TagType::All => "all",
            TagType::Collection => "collection",
            TagType::Series => "series",
            TagType::Category => "category",
        }
    }

    /// The model field this facet reads, `None` for `All`.
    pub fn value_of(self, model: &Model) -> Option<&str> {
        match self {
            TagType::All => None,
            TagType::Collection => model.collection.as_deref(),
            TagType::Series => model.series.as_deref(),
            TagType::Category => model.category.as_deref(),
        }
    }
}

impl FromStr for TagType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for TagType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<TagType> for String {
    fn from(value: TagType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free-text query; matched case-insensitively
    pub query: String,
    pub tag_type: TagType,
    /// Selected tag value; empty means no tag filter
    pub tag_value: String,
    /// Selected model identity; empty means no model filter
    pub model_value: String,
}

impl FilterState {
    /// Whether `model` passes all three predicates.
    pub fn matches(&self, model: &Model) -> bool {
        matches_query(model, &normalize(&self.query))
            && matches_tag(model, self.tag_type, &self.tag_value)
            && matches_model(model, &self.model_value)
    }
}

/// Case-fold a query or haystack fragment.
pub fn normalize(value: &str) -> String {
    value.to_lowercase()
}

/// The lower-cased text searched for a model.
///
/// Covers the model's own descriptive fields plus the raw search keys of
/// every artifact in both lists. Derived labels are not included.
pub fn search_haystack(model: &Model) -> String {
    let model_fields = [
        model.series.as_deref(),
        model.category.as_deref(),
        model.model.as_deref(),
        model.group_path.as_deref(),
    ]
    .into_iter()
    .flatten();

    let artifact_fields = model
        .latest
        .iter()
        .chain(model.artifacts.iter())
        .flat_map(|a| SEARCH_KEYS.iter().filter_map(move |key| a.text(key)));

    model_fields
        .chain(artifact_fields)
        .filter(|s| !s.is_empty())
        .map(normalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text predicate. `query` must already be normalized.
pub fn matches_query(model: &Model, query: &str) -> bool {
    query.is_empty() || search_haystack(model).contains(query)
}

/// Tag-facet predicate: exact equality on the selected facet field.
pub fn matches_tag(model: &Model, tag_type: TagType, tag_value: &str) -> bool {
    if tag_type == TagType::All || tag_value.is_empty() {
        return true;
    }
    tag_type.value_of(model) == Some(tag_value)
}

/// Model-facet predicate: exact equality on the model identity.
pub fn matches_model(model: &Model, model_value: &str) -> bool {
    model_value.is_empty() || model.identity() == Some(model_value)
}

/// Models passing every predicate, in manifest order.
pub fn filter_models<'a>(models: &'a [Model], state: &FilterState) -> Vec<&'a Model> {
    models.iter().filter(|m| state.matches(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Artifact;

    fn board(model: &str, series: &str, category: &str, collection: Option<&str>) -> Model {
        Model {
            model: Some(model.into()),
            group_path: Some(format!("{series}/{category}/{model}")),
            series: Some(series.into()),
            category: Some(category.into()),
            collection: collection.map(Into::into),
            ..Model::default()
        }
    }

    fn sample_models() -> Vec<Model> {
        let mut a = board("XA61200", "3A6000Series", "Desktop", None);
        a.latest = vec![
            Artifact::new("3A6000Series/Desktop/XA61200/UDK2018_XA61200_V1.0_rel.fd")
                .with("edk", "UDK2018")
                .with("edk2_baseline", "UEFI-ONLY-IN-BASELINE")
                .with("build", "rel"),
        ];
        let mut b = board("LS3A5000-7A2000", "3A5000Series", "Server", Some("MultiArchUefiSupport"));
        b.artifacts = vec![
            Artifact::new("MultiArchUefiSupport/3A5000Series/Server/EDK2_LS3A5000_V2.0_dbg.fd")
                .with("edk", "EDK2")
                .with("firmware_type", "UEFI")
                .with("refcode_base", "V4.0.0345_stable2406")
                .with("build", "dbg"),
        ];
        let c = Model {
            group_path: Some("Misc/Tools".into()),
            latest: vec![Artifact::new("Misc/Tools/pmon.bin").with("base", "PMON")],
            ..Model::default()
        };
        vec![a, b, c]
    }

    #[test]
    fn tag_type_parsing_defaults_to_all() {
        assert_eq!(TagType::parse("series"), TagType::Series);
        assert_eq!(TagType::parse("Category"), TagType::Category);
        assert_eq!(TagType::parse("vendor"), TagType::All);
        assert_eq!(TagType::parse(""), TagType::All);
        assert_eq!("collection".parse::<TagType>().unwrap(), TagType::Collection);
    }

    #[test]
    fn empty_query_matches_everything() {
        let models = sample_models();
        assert_eq!(filter_models(&models, &FilterState::default()).len(), 3);
    }

    #[test]
    fn query_is_case_insensitive_substring() {
        let models = sample_models();
        let state = FilterState {
            query: "xa612".into(),
            ..FilterState::default()
        };
        let hits = filter_models(&models, &state);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].identity(), Some("XA61200"));
    }

    #[test]
    fn query_searches_both_lists() {
        let models = sample_models();
        // only present in the full history of the second model
        let state = FilterState {
            query: "STABLE2406".into(),
            ..FilterState::default()
        };
        assert_eq!(filter_models(&models, &state).len(), 1);
        // only present in `latest` of the first model
        let state = FilterState {
            query: "udk2018".into(),
            ..FilterState::default()
        };
        assert_eq!(filter_models(&models, &state).len(), 1);
    }

    #[test]
    fn raw_baseline_matches_but_derived_label_does_not() {
        let model = Model {
            model: Some("Board".into()),
            latest: vec![Artifact::new("x/fw.fd").with("edk", "EDK2")],
            ..Model::default()
        };
        assert!(model.latest[0].is_uefi());
        assert!(matches_query(&model, &normalize("EDK2")));
        assert!(!matches_query(&model, &normalize("UEFI")));
    }

    #[test]
    fn haystack_uses_raw_keys_only() {
        let models = sample_models();
        // edk2_baseline is displayed but never searched
        assert!(!matches_query(&models[0], "uefi-only-in-baseline"));
        // a literal firmware_type value is searched
        assert!(matches_query(&models[1], "uefi"));
        assert!(matches_query(&models[2], "pmon"));
        assert!(matches_query(&models[2], "misc/tools"));
    }

    #[test]
    fn query_does_not_span_field_boundaries_without_space() {
        let model = Model {
            series: Some("abc".into()),
            category: Some("def".into()),
            ..Model::default()
        };
        assert!(matches_query(&model, "abc def"));
        assert!(!matches_query(&model, "abcdef"));
    }

    #[test]
    fn tag_filter_is_exact() {
        let models = sample_models();
        let state = FilterState {
            tag_type: TagType::Series,
            tag_value: "3A6000Series".into(),
            ..FilterState::default()
        };
        assert_eq!(filter_models(&models, &state).len(), 1);

        let partial = FilterState {
            tag_value: "3A6000".into(),
            ..state.clone()
        };
        assert!(filter_models(&models, &partial).is_empty());

        let collection = FilterState {
            tag_type: TagType::Collection,
            tag_value: "MultiArchUefiSupport".into(),
            ..FilterState::default()
        };
        assert_eq!(filter_models(&models, &collection).len(), 1);
    }

    #[test]
    fn tag_filter_ignored_for_all_or_empty_value() {
        let models = sample_models();
        let all = FilterState {
            tag_type: TagType::All,
            tag_value: "3A6000Series".into(),
            ..FilterState::default()
        };
        assert_eq!(filter_models(&models, &all).len(), 3);

        let empty = FilterState {
            tag_type: TagType::Series,
            ..FilterState::default()
        };
        assert_eq!(filter_models(&models, &empty).len(), 3);
    }

    #[test]
    fn model_filter_uses_identity_fallback() {
        let models = sample_models();
        let state = FilterState {
            model_value: "Misc/Tools".into(),
            ..FilterState::default()
        };
        let hits = filter_models(&models, &state);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].model.is_none());
        assert!(state.matches(&models[2]));
    }

    #[test]
    fn restricted_filters_are_subsets() {
        let models = sample_models();
        let queries = ["", "fd", "series", "rel", "zzz"];
        for q in queries {
            let base = FilterState {
                query: q.into(),
                ..FilterState::default()
            };
            let unrestricted = filter_models(&models, &base);
            for tag_type in TagType::ALL {
                for tag_value in ["", "3A6000Series", "Server", "MultiArchUefiSupport"] {
                    for model_value in ["", "XA61200", "Misc/Tools"] {
                        let state = FilterState {
                            query: q.into(),
                            tag_type,
                            tag_value: tag_value.into(),
                            model_value: model_value.into(),
                        };
                        for hit in filter_models(&models, &state) {
                            assert!(unrestricted.iter().any(|m| std::ptr::eq(*m, hit)));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn tag_type_serde_is_lenient() {
        let parsed: TagType = serde_json::from_str("\"nonsense\"").unwrap();
        assert_eq!(parsed, TagType::All);
        assert_eq!(serde_json::to_string(&TagType::Series).unwrap(), "\"series\"");
    }
}
