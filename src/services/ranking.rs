// src/services/ranking.rs

//! Artifact sort keys, the artifact comparator and model ordering.

use std::cmp::Ordering;

use serde::Serialize;

use crate::models::{Artifact, Field, Model};
use crate::services::collation::Collator;
use crate::services::keys::{DateKey, parse_date_key, version_key};

/// Composite ranking key derived from one artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SortKey {
    pub ts: f64,
    pub date_key: DateKey,
    pub ver_key: Vec<u64>,
    pub edk: String,
    pub build: String,
}

impl SortKey {
    pub fn from_artifact(artifact: &Artifact) -> Self {
        let refcode = Field::SORT_REFCODE.lookup(artifact);
        let text = format!("{} {}", refcode.unwrap_or(""), artifact.path);
        Self {
            ts: artifact.timestamp.unwrap_or(0.0),
            date_key: parse_date_key(&text).unwrap_or([0, 0, 0]),
            ver_key: version_key(refcode),
            edk: Field::SORT_EDK.lookup(artifact).unwrap_or("").to_string(),
            build: Field::BUILD.lookup(artifact).unwrap_or("").to_string(),
        }
    }
}

/// Compare numeric sequences element-wise, padding the shorter with zeros.
pub fn compare_numbers<T: Ord + Default + Copy>(a: &[T], b: &[T]) -> Ordering {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            let av = a.get(i).copied().unwrap_or_default();
            let bv = b.get(i).copied().unwrap_or_default();
            av.cmp(&bv)
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Total order over sort keys; each tier is consulted only on a tie.
///
/// ts → date key → version key → edk → build.
pub fn compare_keys(a: &SortKey, b: &SortKey, collator: &dyn Collator) -> Ordering {
    a.ts
        .partial_cmp(&b.ts)
        .unwrap_or(Ordering::Equal)
        .then_with(|| compare_numbers(a.date_key.as_slice(), b.date_key.as_slice()))
        .then_with(|| compare_numbers(&a.ver_key, &b.ver_key))
        .then_with(|| collator.compare(&a.edk, &b.edk))
        .then_with(|| collator.compare(&a.build, &b.build))
}

/// Maximum artifact under [`compare_keys`].
///
/// Ties keep the earliest candidate. Returns `None` for an empty list.
pub fn best_artifact<'a>(
    artifacts: &'a [Artifact],
    collator: &dyn Collator,
) -> Option<(&'a Artifact, SortKey)> {
    let mut iter = artifacts.iter();
    let first = iter.next()?;
    let mut best = (first, SortKey::from_artifact(first));
    for artifact in iter {
        let key = SortKey::from_artifact(artifact);
        if compare_keys(&best.1, &key, collator) == Ordering::Less {
            best = (artifact, key);
        }
    }
    Some(best)
}

/// A model paired with its representative artifact key.
#[derive(Debug, Clone)]
pub struct RankedModel<'a> {
    pub model: &'a Model,
    pub best: Option<SortKey>,
}

impl RankedModel<'_> {
    pub fn has_artifacts(&self) -> bool {
        self.best.is_some()
    }

    fn fallback_name(&self) -> String {
        format!(
            "{}-{}-{}",
            self.model.series.as_deref().unwrap_or(""),
            self.model.category.as_deref().unwrap_or(""),
            self.model.model.as_deref().unwrap_or("")
        )
    }
}

/// Display order between two ranked models.
///
/// Models with artifacts come first, newest best artifact first; the rest
/// are ordered by `series-category-model`.
pub fn compare_ranked(a: &RankedModel<'_>, b: &RankedModel<'_>, collator: &dyn Collator) -> Ordering {
    match (&a.best, &b.best) {
        (Some(ak), Some(bk)) => compare_keys(bk, ak, collator),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => collator.compare(&a.fallback_name(), &b.fallback_name()),
    }
}

/// Pair each model with its best candidate key and sort for display.
pub fn rank_models<'a, I>(models: I, collator: &dyn Collator) -> Vec<RankedModel<'a>>
where
    I: IntoIterator<Item = &'a Model>,
{
    let mut ranked: Vec<RankedModel<'a>> = models
        .into_iter()
        .map(|model| RankedModel {
            model,
            best: best_artifact(model.candidates(), collator).map(|(_, key)| key),
        })
        .collect();
    ranked.sort_by(|a, b| compare_ranked(a, b, collator));
    ranked
}

/// Artifacts of a list sorted newest first.
pub fn sort_artifacts_desc<'a>(artifacts: &'a [Artifact], collator: &dyn Collator) -> Vec<&'a Artifact> {
    let mut keyed: Vec<(&Artifact, SortKey)> = artifacts
        .iter()
        .map(|a| (a, SortKey::from_artifact(a)))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_keys(b, a, collator));
    keyed.into_iter().map(|(a, _)| a).collect()
}
