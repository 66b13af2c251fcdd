// src/models/mod.rs

//! Domain models for the downloads hub.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod fields;
mod locale;
mod manifest;

// Re-export all public types
pub use config::{Config, DisplayConfig, HttpConfig, LoggingConfig, SourceConfig};
pub use fields::{Field, SEARCH_KEYS};
pub use locale::{Language, LocaleConfig, Messages};
pub use manifest::{Artifact, Manifest, Model};
