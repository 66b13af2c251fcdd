// src/services/facets.rs

//! Distinct, sorted values for the tag and model facets.

use std::collections::BTreeSet;

use crate::models::Model;
use crate::services::collation::Collator;
use crate::services::filter::{FilterState, TagType};

fn unique_sorted<'a, I>(values: I, collator: &dyn Collator) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let distinct: BTreeSet<&str> = values.into_iter().filter(|v| !v.is_empty()).collect();
    let mut list: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    list.sort_by(|a, b| collator.compare(a, b));
    list
}

/// Values offered for the given tag facet. Empty for [`TagType::All`].
pub fn tag_values(tag_type: TagType, models: &[Model], collator: &dyn Collator) -> Vec<String> {
    if tag_type == TagType::All {
        return Vec::new();
    }
    unique_sorted(models.iter().filter_map(|m| tag_type.value_of(m)), collator)
}

/// Values offered for the model facet, independent of the tag facet.
pub fn model_values(models: &[Model], collator: &dyn Collator) -> Vec<String> {
    unique_sorted(models.iter().filter_map(Model::identity), collator)
}

/// Keep `selection` only if it is still offered, otherwise clear it.
pub fn reconcile(selection: &str, values: &[String]) -> String {
    if values.iter().any(|v| v == selection) {
        selection.to_string()
    } else {
        String::new()
    }
}

/// Facet options for the current state.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FacetOptions {
    pub tag_type: TagType,
    pub tag_values: Vec<String>,
    pub model_values: Vec<String>,
}

impl FacetOptions {
    pub fn build(tag_type: TagType, models: &[Model], collator: &dyn Collator) -> Self {
        Self {
            tag_type,
            tag_values: tag_values(tag_type, models, collator),
            model_values: model_values(models, collator),
        }
    }
}

impl FilterState {
    /// Drop facet selections that are no longer offered.
    ///
    /// Called after the facet type or the manifest changes. Under
    /// [`TagType::All`] the tag value is always cleared.
    pub fn reconcile(&mut self, options: &FacetOptions) {
        self.tag_value = reconcile(&self.tag_value, &options.tag_values);
        self.model_value = reconcile(&self.model_value, &options.model_values);
    }
}
