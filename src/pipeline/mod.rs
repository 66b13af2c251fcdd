//! Pipeline entry points for hub commands.
//!
//! - `load_manifest`: Fetch or read the manifest once
//! - `run_list`: Filter, rank and render the catalog
//! - `ManifestInfo`: Counts and newest artifact for `info`
//! - `download_artifact`: Stream and verify one artifact

pub mod browse;
pub mod download;
pub mod info;
pub mod load;

pub use browse::{BrowseRequest, render_list, resolve_facets, run_list};
pub use download::{DownloadOutcome, download_artifact, find_artifact};
pub use info::ManifestInfo;
pub use load::load_manifest;
