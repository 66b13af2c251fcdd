// src/lib.rs

//! Firmware Downloads Hub Library
//!
//! Ranks, filters and indexes the firmware artifacts described by a static
//! JSON manifest.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
pub mod view;
