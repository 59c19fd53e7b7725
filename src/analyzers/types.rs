//! Data types produced by the aggregation pipeline.

use serde::Serialize;

use crate::record::Record;

/// One row of the category tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// A fixed-width histogram bin covering `[start, start + width)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub count: usize,
}

/// Rating histogram over the configured range, plus the tally of ratings that
/// fell outside it. `binned() + overflow` always accounts for every
/// non-missing rating, so totals stay auditable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingHistogram {
    pub bins: Vec<HistogramBin>,
    pub overflow: usize,
}

impl RatingHistogram {
    /// Total number of ratings that landed inside a bin.
    pub fn binned(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }
}

/// The records whose category met the minimum-sample-size threshold, plus
/// the deduplicated category names sorted alphabetically.
///
/// An empty group is a legitimate outcome (no category was large enough),
/// not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct MajorCategories<'a> {
    pub categories: Vec<String>,
    pub records: Vec<&'a Record>,
}

impl MajorCategories<'_> {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
