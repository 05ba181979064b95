//! Ranking and filtering by account metrics.
//!
//! Rankings are snapshots: a vector of references into the store, sorted
//! for one query and then dropped. Sorting is stable, so entities with
//! equal metrics keep their store order.

use circle_core::{Entity, QueryError, QueryResult, RecordStore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Numeric attribute to rank or filter by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Follower count.
    Popularity,
    /// Activity score.
    Activity,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Popularity => "popularity",
            Metric::Activity => "activity",
        }
    }

    /// Metric value as a float. Popularity above 2^53 is rounded.
    pub fn value(&self, entity: &Entity) -> f64 {
        match self {
            Metric::Popularity => entity.popularity as f64,
            Metric::Activity => entity.activity,
        }
    }

    /// True when the entity's metric is strictly greater than `min`.
    ///
    /// Popularity is compared exactly, without rounding it to a float.
    pub fn exceeds(&self, entity: &Entity, min: f64) -> bool {
        match self {
            Metric::Popularity => popularity_exceeds(entity.popularity, min),
            Metric::Activity => entity.activity > min,
        }
    }

    /// Orders `a` before `b` when `a` ranks higher.
    fn descending(&self, a: &Entity, b: &Entity) -> Ordering {
        match self {
            Metric::Popularity => b.popularity.cmp(&a.popularity),
            Metric::Activity => b.activity.total_cmp(&a.activity),
        }
    }
}

fn popularity_exceeds(popularity: i64, min: f64) -> bool {
    if min.is_nan() {
        return false;
    }
    if min < i64::MIN as f64 {
        return true;
    }
    if min >= i64::MAX as f64 {
        return false;
    }
    // An integer is above `min` iff it is above floor(min), which fits in i64 here.
    popularity > min.floor() as i64
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Metric {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "popularity" | "followers" => Ok(Metric::Popularity),
            "activity" => Ok(Metric::Activity),
            other => Err(QueryError::InvalidInput(format!(
                "unknown metric '{}' (expected popularity or activity)",
                other
            ))),
        }
    }
}

/// Every entity, highest `metric` first.
pub fn ranked(store: &RecordStore, metric: Metric) -> Vec<&Entity> {
    let mut snapshot: Vec<&Entity> = store.iter().collect();
    snapshot.sort_by(|a, b| metric.descending(a, b));
    snapshot
}

/// The `n` highest-ranked entities.
///
/// `n` must lie in `1..=store.len()`.
pub fn top_by_metric(store: &RecordStore, n: i64, metric: Metric) -> QueryResult<Vec<&Entity>> {
    let count = usize::try_from(n)
        .ok()
        .filter(|&count| count >= 1 && count <= store.len())
        .ok_or_else(|| {
            QueryError::InvalidInput(format!(
                "rank count {} outside 1..={}",
                n,
                store.len()
            ))
        })?;

    let mut snapshot = ranked(store, metric);
    snapshot.truncate(count);
    Ok(snapshot)
}

/// Entities whose category equals `label`, ignoring case, in store order.
pub fn filter_by_category<'a>(store: &'a RecordStore, label: &str) -> Vec<&'a Entity> {
    let label = label.to_lowercase();
    store
        .iter()
        .filter(|e| e.category.to_lowercase() == label)
        .collect()
}

/// Entities whose `metric` is strictly greater than `min`, in store order.
pub fn filter_by_metric_threshold(store: &RecordStore, metric: Metric, min: f64) -> Vec<&Entity> {
    store.iter().filter(|e| metric.exceeds(e, min)).collect()
}

/// The `n` highest-ranked entities within one category.
///
/// `n` is a display bound: fewer results are returned when the category
/// is smaller.
pub fn top_in_category<'a>(
    store: &'a RecordStore,
    label: &str,
    metric: Metric,
    n: usize,
) -> Vec<&'a Entity> {
    let mut snapshot = filter_by_category(store, label);
    snapshot.sort_by(|a, b| metric.descending(a, b));
    snapshot.truncate(n);
    snapshot
}
