//! End-to-end assembly: bytes in, [`DashboardView`] out.
//!
//! Stage order is fixed: load, normalize, then derive every aggregate from
//! the same frozen record set. Aggregates never see half-normalized data.

use std::io::Read;

use tracing::{info, warn};

use crate::analyzers::categories::{count_by_category, filter_by_min_size};
use crate::analyzers::ratings::{
    group_mean_rating, mean_rating, rating_histogram, ratings_by_category,
};
use crate::analyzers::view::{self, DashboardView};
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::loader;
use crate::normalize;

/// Runs the whole pipeline over one CSV source.
///
/// Row-level damage (coercion failures, undecodable rows) is counted and
/// logged but never fails the run; only a broken header or an unreadable
/// source does.
pub fn run(reader: impl Read, config: &PipelineConfig) -> Result<DashboardView> {
    let outcome = loader::load(reader)?;
    let mut records = outcome.records;
    let installs = normalize::normalize_installs(&mut records);

    info!(
        rows = records.len(),
        skipped_rows = outcome.quality.skipped_rows,
        rating_failures = outcome.quality.rating_failures,
        reviews_failures = outcome.quality.reviews_failures,
        type_failures = outcome.quality.type_failures,
        installs_normalized = installs.normalized,
        installs_failures = installs.coercion_failures,
        "source loaded"
    );

    let records = records;
    let category_counts = count_by_category(&records);
    let global_rating_mean = absorb_empty(mean_rating(&records), "global rating mean")?;
    let histogram = rating_histogram(&records, &config.histogram);

    // Borrows of `records` stay inside this block so the records themselves
    // can move into the view afterwards.
    let (major_categories, major_category_mean, by_category) = {
        let major = filter_by_min_size(&records, config.min_category_size);
        let mean = absorb_empty(group_mean_rating(&major), "major-category rating mean")?;
        let by_category = ratings_by_category(&major);
        (major.categories, mean, by_category)
    };

    Ok(view::build(
        records,
        category_counts,
        global_rating_mean,
        histogram,
        major_categories,
        major_category_mean,
        by_category,
    ))
}

/// An aggregate over zero values becomes a null in the view, not a failed
/// run. Everything else propagates.
fn absorb_empty(result: Result<f64>, statistic: &str) -> Result<Option<f64>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::EmptyInput(_)) => {
            warn!(statistic, "no values to aggregate, reporting null");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
