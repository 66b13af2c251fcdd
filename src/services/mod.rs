//! Service layer for the downloads hub.
//!
//! This module contains the catalog engine:
//! - Date/version key extraction (`keys`)
//! - Artifact sort keys, comparison and model ordering (`ranking`)
//! - Search and facet filtering (`filter`)
//! - Facet value indexing (`facets`)
//! - Injectable string collation (`collation`)
//!
//! Everything here is a pure function of the manifest and the filter state.

pub mod collation;
pub mod facets;
pub mod filter;
pub mod keys;
pub mod ranking;

pub use collation::{CollationKind, Collator, LocaleCollator, OrdinalCollator};
pub use facets::{FacetOptions, model_values, reconcile, tag_values};
pub use filter::{FilterState, TagType, filter_models, matches_model, matches_query, matches_tag};
pub use keys::{DateKey, parse_date_key, version_key};
pub use ranking::{RankedModel, SortKey, best_artifact, compare_keys, rank_models};
