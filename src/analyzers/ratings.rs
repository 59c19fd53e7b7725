use std::collections::BTreeMap;

use crate::analyzers::types::{HistogramBin, MajorCategories, RatingHistogram};
use crate::analyzers::utility::mean;
use crate::config::HistogramSpec;
use crate::error::{Error, Result};
use crate::record::Record;

/// Bin-index jitter guard. Ratings arrive as one-decimal text, and the
/// division that places them can land a hair under an integer index; the
/// epsilon keeps boundary values in the bin that starts at them.
const BIN_EPSILON: f64 = 1e-6;

/// Arithmetic mean of every non-missing rating. Missing ratings are excluded
/// from both the numerator and the denominator; they are not zeros.
///
/// # Errors
///
/// [`Error::EmptyInput`] when no record carries a rating.
pub fn mean_rating(records: &[Record]) -> Result<f64> {
    let values: Vec<f64> = records.iter().filter_map(|r| r.rating).collect();
    mean(&values).ok_or(Error::EmptyInput("rating"))
}

/// Mean rating across the major-category group, computed once over the whole
/// group. The dashboard draws it as the reference line of the per-category
/// comparison.
///
/// # Errors
///
/// [`Error::EmptyInput`] when the group holds no ratings (including the case
/// of an empty group).
pub fn group_mean_rating(group: &MajorCategories<'_>) -> Result<f64> {
    let values: Vec<f64> = group.records.iter().filter_map(|r| r.rating).collect();
    mean(&values).ok_or(Error::EmptyInput("major-category rating"))
}

/// Buckets every non-missing rating into fixed-width bins over
/// `[spec.start, spec.end]`.
///
/// A value equal to a bin's lower edge belongs to that bin (`1.1` lands in
/// `[1.1, 1.2)`), and `spec.end` itself lands in the final bin. Values
/// outside the range are never dropped silently: they go into the overflow
/// tally, so `binned() + overflow` equals the number of non-missing ratings.
pub fn rating_histogram(records: &[Record], spec: &HistogramSpec) -> RatingHistogram {
    let bin_count = spec.bin_count();
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            start: spec.start + i as f64 * spec.bin_width,
            count: 0,
        })
        .collect();
    let mut overflow = 0;

    for rating in records.iter().filter_map(|r| r.rating) {
        if bins.is_empty() || rating < spec.start || rating > spec.end {
            overflow += 1;
            continue;
        }
        let index = ((rating - spec.start) / spec.bin_width + BIN_EPSILON).floor() as usize;
        bins[index.min(bin_count - 1)].count += 1;
    }

    RatingHistogram { bins, overflow }
}

/// Collects each major category's non-missing ratings, keyed and ordered by
/// category name. Duplicates are preserved; a category whose ratings are all
/// missing still gets an (empty) entry, so consumers never probe for absent
/// keys.
pub fn ratings_by_category(group: &MajorCategories<'_>) -> BTreeMap<String, Vec<f64>> {
    let mut by_category: BTreeMap<String, Vec<f64>> = group
        .categories
        .iter()
        .map(|category| (category.clone(), Vec::new()))
        .collect();

    for record in &group.records {
        if let Some(rating) = record.rating {
            if let Some(values) = by_category.get_mut(&record.category) {
                values.push(rating);
            }
        }
    }

    by_category
}
