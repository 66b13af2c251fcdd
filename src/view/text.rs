// src/view/text.rs

//! Plain-text rendering for terminals.

use std::fmt::Write;

use crate::models::Messages;
use crate::services::facets::FacetOptions;
use crate::services::filter::TagType;
use crate::view::{CardView, CatalogView, DisplayMode};

const INDENT: &str = "    ";

/// Render the whole listing.
pub fn render_catalog(view: &CatalogView, messages: &Messages) -> String {
    let mode = match view.mode {
        DisplayMode::Latest => &messages.latest,
        DisplayMode::All => &messages.all,
    };
    let mut out = format!("{} [{}]\n{}\n", messages.heading, mode, view.summary);
    for card in &view.cards {
        out.push('\n');
        render_card(&mut out, card);
    }
    out
}

fn render_card(out: &mut String, card: &CardView) {
    let _ = write!(out, "== {}", card.title);
    if !card.tags.is_empty() {
        let _ = write!(out, " [{}]", card.tags.join(", "));
    }
    out.push('\n');
    if let Some(path) = &card.group_path {
        let _ = writeln!(out, "{INDENT}{path}");
    }
    if let Some(placeholder) = &card.placeholder {
        let _ = writeln!(out, "{INDENT}{placeholder}");
        return;
    }
    for artifact in &card.artifacts {
        let _ = writeln!(out, "{INDENT}- {}", artifact.title);
        for row in &artifact.meta {
            let _ = writeln!(out, "{INDENT}{INDENT}{row}");
        }
        let _ = writeln!(out, "{INDENT}{INDENT}{}: {}", artifact.download_label, artifact.download_url);
        let _ = writeln!(out, "{INDENT}{INDENT}{}", artifact.sha256);
    }
    if let Some(toggle) = &card.toggle {
        let _ = writeln!(out, "{INDENT}({toggle}: --expand {})", card.key);
    }
}

/// Localized label for a facet type.
pub fn tag_type_label(tag_type: TagType, messages: &Messages) -> &str {
    match tag_type {
        TagType::All => &messages.index_all,
        TagType::Collection => &messages.index_collection,
        TagType::Series => &messages.index_series,
        TagType::Category => &messages.index_category,
    }
}

/// Render the facet value lists.
pub fn render_facets(options: &FacetOptions, messages: &Messages) -> String {
    let mut out = format!(
        "{}{}{}\n",
        messages.index_by,
        messages.colon,
        tag_type_label(options.tag_type, messages)
    );

    if options.tag_type != TagType::All {
        let _ = writeln!(out, "{} ({})", messages.index_tags, options.tag_values.len());
        for value in &options.tag_values {
            let _ = writeln!(out, "{INDENT}{value}");
        }
    }

    let _ = writeln!(out, "{} ({})", messages.index_models, options.model_values.len());
    for value in &options.model_values {
        let _ = writeln!(out, "{INDENT}{value}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ArtifactView;

    fn card() -> CardView {
        CardView {
            key: "S/A".into(),
            title: "A".into(),
            tags: vec!["S".into(), "Desktop".into()],
            group_path: Some("S/A".into()),
            artifacts: vec![ArtifactView {
                title: "UEFI / A / REL".into(),
                meta: vec!["Build: rel".into()],
                download_label: "Download a.fd".into(),
                download_url: "https://example.com/S/A/a.fd".into(),
                sha256: "SHA256: ff".into(),
            }],
            total: 3,
            toggle: Some("Show more (2)".into()),
            placeholder: None,
        }
    }

    #[test]
    fn renders_cards_with_toggle_hint() {
        let view = CatalogView {
            summary: "1 models, 3 artifacts".into(),
            model_count: 1,
            artifact_count: 3,
            mode: DisplayMode::Latest,
            cards: vec![card()],
        };
        let text = render_catalog(&view, &Messages::english());
        assert!(text.starts_with("Downloads Hub [Latest]\n1 models, 3 artifacts\n"));
        assert!(text.contains("== A [S, Desktop]\n"));
        assert!(text.contains("- UEFI / A / REL\n"));
        assert!(text.contains("Download a.fd: https://example.com/S/A/a.fd\n"));
        assert!(text.contains("(Show more (2): --expand S/A)"));
    }

    #[test]
    fn renders_placeholder_instead_of_artifacts() {
        let mut empty = card();
        empty.artifacts.clear();
        empty.toggle = None;
        empty.placeholder = Some("No artifacts found for this model.".into());
        let mut out = String::new();
        render_card(&mut out, &empty);
        assert!(out.contains("No artifacts found for this model."));
        assert!(!out.contains("Download"));
    }

    #[test]
    fn facets_hide_tag_list_under_all() {
        let options = FacetOptions {
            tag_type: TagType::All,
            tag_values: Vec::new(),
            model_values: vec!["A".into(), "B".into()],
        };
        let text = render_facets(&options, &Messages::english());
        assert!(text.starts_with("Index by: All\n"));
        assert!(!text.contains("Tags"));
        assert!(text.contains("Models (2)\n    A\n    B\n"));

        let series = FacetOptions {
            tag_type: TagType::Series,
            tag_values: vec!["3A6000Series".into()],
            ..options
        };
        let text = render_facets(&series, &Messages::chinese());
        assert!(text.starts_with("索引类型：系列\n"));
        assert!(text.contains("标签 (1)\n    3A6000Series\n"));
    }
}
