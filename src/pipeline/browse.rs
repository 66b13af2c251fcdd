// src/pipeline/browse.rs

//! Listing and facet commands over a loaded manifest.

use crate::error::Result;
use crate::models::{Config, Manifest, Messages};
use crate::services::facets::FacetOptions;
use crate::services::filter::FilterState;
use crate::utils::DownloadLinks;
use crate::view::{self, CatalogView, DisplayMode, ExpandState, ViewOptions};

/// Everything a `list` invocation selects.
#[derive(Debug, Clone, Default)]
pub struct BrowseRequest {
    pub filter: FilterState,
    pub mode: DisplayMode,
    pub expand: ExpandState,
}

/// Facet options for the request's tag type, with stale selections dropped.
pub fn resolve_facets(manifest: &Manifest, filter: &mut FilterState, config: &Config) -> FacetOptions {
    let collator = config.display.collation.collator();
    let options = FacetOptions::build(filter.tag_type, &manifest.machines, collator);

    let before = (filter.tag_value.clone(), filter.model_value.clone());
    filter.reconcile(&options);
    if !before.0.is_empty() && filter.tag_value.is_empty() {
        log::warn!("Tag '{}' is not offered under {}; ignoring it", before.0, filter.tag_type);
    }
    if !before.1.is_empty() && filter.model_value.is_empty() {
        log::warn!("Model '{}' is not in the manifest; ignoring it", before.1);
    }
    options
}

/// Build the catalog for a `list` request.
pub fn run_list(
    manifest: &Manifest,
    config: &Config,
    mut request: BrowseRequest,
    messages: &Messages,
) -> Result<CatalogView> {
    config.display.validate()?;
    resolve_facets(manifest, &mut request.filter, config);

    let options = ViewOptions {
        mode: request.mode,
        default_visible: config.display.default_visible,
        links: DownloadLinks::new(&config.source.download_base_url)?,
    };
    Ok(view::build_catalog(
        manifest,
        &request.filter,
        &options,
        &request.expand,
        messages,
        config.display.collation.collator(),
    ))
}

/// Render a catalog as text or pretty JSON.
pub fn render_list(catalog: &CatalogView, messages: &Messages, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(catalog)?)
    } else {
        Ok(view::text::render_catalog(catalog, messages))
    }
}
