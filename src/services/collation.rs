// src/services/collation.rs

//! String collation used for tie-breaks and facet sorting.
//!
//! Collation is passed in explicitly so ordering never depends on the
//! process locale.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A total order over strings.
pub trait Collator: Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Plain code-point order.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrdinalCollator;

impl Collator for OrdinalCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// Dictionary-style order: letters compare case-insensitively first, then
/// lower case sorts before upper case, then code points decide.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleCollator;

impl Collator for LocaleCollator {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        let primary = a.chars().flat_map(char::to_lowercase);
        let other = b.chars().flat_map(char::to_lowercase);
        primary
            .cmp(other)
            .then_with(|| case_tier(a).cmp(case_tier(b)))
            .then_with(|| a.cmp(b))
    }
}

/// Per-character case ranks, lower case first.
fn case_tier(s: &str) -> impl Iterator<Item = u8> + '_ {
    s.chars().map(|c| u8::from(c.is_uppercase()))
}

/// Collation selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollationKind {
    #[default]
    Locale,
    Ordinal,
}

impl CollationKind {
    pub fn collator(self) -> &'static dyn Collator {
        match self {
            CollationKind::Locale => &LocaleCollator,
            CollationKind::Ordinal => &OrdinalCollator,
        }
    }
}
