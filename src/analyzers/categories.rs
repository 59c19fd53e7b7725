use std::collections::{BTreeMap, BTreeSet};

use crate::analyzers::types::{CategoryCount, MajorCategories};
use crate::record::Record;

/// Tallies records per category, ordered ascending by count with ties broken
/// by category name. The ordering is computed explicitly so it never depends
/// on map iteration order.
pub fn count_by_category(records: &[Record]) -> Vec<CategoryCount> {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *tally.entry(record.category.as_str()).or_default() += 1;
    }

    let mut counts: Vec<CategoryCount> = tally
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| a.count.cmp(&b.count).then_with(|| a.category.cmp(&b.category)));
    counts
}

/// Keeps the records whose category holds at least `min_size` records.
/// The comparison is inclusive: a category with exactly `min_size` records
/// stays in.
pub fn filter_by_min_size(records: &[Record], min_size: usize) -> MajorCategories<'_> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *totals.entry(record.category.as_str()).or_default() += 1;
    }

    let eligible: BTreeSet<&str> = totals
        .into_iter()
        .filter(|&(_, count)| count >= min_size)
        .map(|(category, _)| category)
        .collect();

    MajorCategories {
        categories: eligible.iter().map(|c| c.to_string()).collect(),
        records: records
            .iter()
            .filter(|r| eligible.contains(r.category.as_str()))
            .collect(),
    }
}
