//! Presentation layer: turns a filtered, ranked manifest into cards.
//!
//! Expand/collapse state is owned by the caller and passed in; nothing in
//! here keeps state between calls.

mod card;
pub mod text;

use std::collections::HashSet;

use serde::Serialize;

pub use card::{ArtifactView, CardView, card_key, card_title, meta_lines, title_firmware_type, title_line};

use crate::models::{Manifest, Messages, Model};
use crate::services::collation::Collator;
use crate::services::filter::{FilterState, filter_models};
use crate::services::ranking::{rank_models, sort_artifacts_desc};
use crate::utils::DownloadLinks;

/// Which artifact list each card shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Latest,
    All,
}

impl DisplayMode {
    pub fn list(self, model: &Model) -> &[crate::models::Artifact] {
        match self {
            DisplayMode::Latest => &model.latest,
            DisplayMode::All => &model.artifacts,
        }
    }
}

/// Cards whose artifact list is expanded, keyed by [`card_key`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    expanded: HashSet<String>,
    all: bool,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with every card expanded.
    pub fn everything() -> Self {
        Self {
            expanded: HashSet::new(),
            all: true,
        }
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.all || self.expanded.contains(key)
    }
}

impl<S: Into<String>> FromIterator<S> for ExpandState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            expanded: iter.into_iter().map(Into::into).collect(),
            all: false,
        }
    }
}

/// Rendering parameters that are not part of the filter.
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub mode: DisplayMode,
    pub default_visible: usize,
    pub links: DownloadLinks,
}

/// The whole listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    /// Localized "N models, M artifacts" line
    pub summary: String,
    pub model_count: usize,
    /// Sum of displayed list sizes across the filtered models
    pub artifact_count: usize,
    pub mode: DisplayMode,
    pub cards: Vec<CardView>,
}

/// Filter, rank and render the manifest.
pub fn build_catalog(
    manifest: &Manifest,
    state: &FilterState,
    options: &ViewOptions,
    expand: &ExpandState,
    messages: &Messages,
    collator: &dyn Collator,
) -> CatalogView {
    let filtered = filter_models(&manifest.machines, state);
    let artifact_count = filtered
        .iter()
        .map(|m| options.mode.list(m).len())
        .sum();

    let cards: Vec<CardView> = rank_models(filtered.iter().copied(), collator)
        .into_iter()
        .enumerate()
        .map(|(index, ranked)| build_card(ranked.model, index, options, expand, messages, collator))
        .collect();

    log::debug!(
        "Built {} card(s) for query {:?} ({} / {:?})",
        cards.len(),
        state.query,
        state.tag_type,
        state.tag_value
    );

    CatalogView {
        summary: messages.summary(cards.len(), artifact_count),
        model_count: cards.len(),
        artifact_count,
        mode: options.mode,
        cards,
    }
}

fn build_card(
    model: &Model,
    index: usize,
    options: &ViewOptions,
    expand: &ExpandState,
    messages: &Messages,
    collator: &dyn Collator,
) -> CardView {
    let key = card_key(model, index);
    let list = sort_artifacts_desc(options.mode.list(model), collator);
    let total = list.len();
    let expanded = expand.is_expanded(&key);
    let visible = if expanded {
        total
    } else {
        total.min(options.default_visible)
    };

    let toggle = (total > options.default_visible).then(|| {
        if expanded {
            messages.collapse.clone()
        } else {
            messages.show_more(total - options.default_visible)
        }
    });

    CardView {
        title: card_title(model, messages),
        tags: model.tags().into_iter().map(str::to_string).collect(),
        group_path: model.group_path.clone(),
        artifacts: list
            .into_iter()
            .take(visible)
            .map(|a| ArtifactView::build(a, messages, &options.links))
            .collect(),
        total,
        toggle,
        placeholder: (total == 0).then(|| messages.no_artifacts.clone()),
        key,
    }
}
