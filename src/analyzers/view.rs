//! Assembly of the dashboard payload.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analyzers::types::{CategoryCount, RatingHistogram};
use crate::record::Record;

/// The complete, immutable payload handed to the dashboard renderer.
///
/// Every field is always present: "no data" is an explicit `null` or an
/// empty collection, never an omitted key, so renderers need no defensive
/// branching. The structure carries no timestamps or other nondeterminism,
/// so two runs over the same input serialize byte-for-byte identically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Normalized records in source order, duplicates and all.
    pub records: Vec<Record>,
    pub total_count: usize,
    /// Ascending by count, ties broken by category name.
    pub category_counts: Vec<CategoryCount>,
    /// `null` when every rating in the table is missing.
    pub global_rating_mean: Option<f64>,
    pub rating_histogram: RatingHistogram,
    /// Category names meeting the minimum-sample-size threshold, sorted.
    pub major_categories: Vec<String>,
    /// Reference line for the per-category comparison; `null` when the major
    /// group carries no ratings.
    pub major_category_mean: Option<f64>,
    /// Per-major-category rating multisets, keyed by category name.
    pub ratings_by_category: BTreeMap<String, Vec<f64>>,
}

/// Pure assembly of the pieces the earlier stages computed. No statistic is
/// recomputed here; the only bookkeeping is counting the records it was
/// handed.
pub fn build(
    records: Vec<Record>,
    category_counts: Vec<CategoryCount>,
    global_rating_mean: Option<f64>,
    rating_histogram: RatingHistogram,
    major_categories: Vec<String>,
    major_category_mean: Option<f64>,
    ratings_by_category: BTreeMap<String, Vec<f64>>,
) -> DashboardView {
    DashboardView {
        total_count: records.len(),
        records,
        category_counts,
        global_rating_mean,
        rating_histogram,
        major_categories,
        major_category_mean,
        ratings_by_category,
    }
}
