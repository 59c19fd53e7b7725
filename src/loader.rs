//! CSV ingestion: header validation and tolerant per-field coercion.
//!
//! A missing column is fatal before anything else runs; everything row-level
//! is absorbed, counted, and kept, so one malformed record never blocks the
//! aggregation of the rest.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use tracing::warn;

use crate::error::{Error, Result};
use crate::record::{AppType, Installs, Record, is_missing_text};

/// Everything [`load`] produces: the records in source order plus the
/// data-quality counters observed along the way.
#[derive(Debug)]
pub struct LoadOutcome {
    pub records: Vec<Record>,
    pub quality: LoadQuality,
}

/// Per-field coercion failure counters. A failure means a non-empty value
/// that was not one of the source's missing encodings and still refused to
/// parse; the field became a missing marker and the row was kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadQuality {
    pub rating_failures: usize,
    pub reviews_failures: usize,
    pub type_failures: usize,
    /// Rows whose bytes could not be decoded at all. These are the only rows
    /// ever dropped, and never silently.
    pub skipped_rows: usize,
}

impl LoadQuality {
    pub fn total_failures(&self) -> usize {
        self.rating_failures + self.reviews_failures + self.type_failures
    }
}

/// Positions of the schema columns within the source header.
struct ColumnIndex {
    app: usize,
    category: usize,
    rating: usize,
    reviews: usize,
    size: usize,
    installs: usize,
    app_type: usize,
    price: usize,
    content_rating: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        Ok(Self {
            app: column(headers, &["App"])?,
            category: column(headers, &["Category"])?,
            rating: column(headers, &["Rating"])?,
            reviews: column(headers, &["Reviews"])?,
            size: column(headers, &["Size"])?,
            installs: column(headers, &["Installs"])?,
            app_type: column(headers, &["Type"])?,
            price: column(headers, &["Price"])?,
            // Both spellings of this one exist in the wild.
            content_rating: column(headers, &["Content_Rating", "Content Rating"])?,
        })
    }
}

fn column(headers: &StringRecord, names: &[&str]) -> Result<usize> {
    headers
        .iter()
        .position(|header| names.iter().any(|name| header.trim() == *name))
        .ok_or_else(|| Error::MissingColumn(names[0].to_string()))
}

/// Reads every row of `reader` into typed [`Record`]s, in source order, with
/// no deduplication and no sorting. Short rows are padded with empty fields
/// and kept.
///
/// # Errors
///
/// [`Error::MissingColumn`] when the header lacks a schema column, or the
/// underlying CSV/IO error when the source itself cannot be read.
pub fn load(reader: impl Read) -> Result<LoadOutcome> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut quality = LoadQuality::default();

    for row in rdr.records() {
        match row {
            Ok(row) => records.push(coerce_row(&row, &columns, &mut quality)),
            Err(err) if is_row_local(&err) => {
                quality.skipped_rows += 1;
                warn!(row = records.len() + 1, error = %err, "skipping undecodable row");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(LoadOutcome { records, quality })
}

/// Decode problems confined to one row are absorbed; anything else (I/O,
/// seek failures) aborts the load.
fn is_row_local(err: &csv::Error) -> bool {
    matches!(err.kind(), csv::ErrorKind::Utf8 { .. })
}

fn coerce_row(row: &StringRecord, columns: &ColumnIndex, quality: &mut LoadQuality) -> Record {
    let field = |index: usize| row.get(index).unwrap_or("");

    Record {
        app: field(columns.app).to_string(),
        category: field(columns.category).to_string(),
        rating: coerce_f64(field(columns.rating), &mut quality.rating_failures),
        reviews: coerce_u64(field(columns.reviews), &mut quality.reviews_failures),
        size: field(columns.size).to_string(),
        installs: Installs::Raw(field(columns.installs).to_string()),
        app_type: coerce_type(field(columns.app_type), &mut quality.type_failures),
        price: field(columns.price).to_string(),
        content_rating: field(columns.content_rating).to_string(),
    }
}

/// `None` for the source's missing encodings; anything else that fails to
/// parse is also `None` but counted.
fn coerce_f64(raw: &str, failures: &mut usize) -> Option<f64> {
    let trimmed = raw.trim();
    if is_missing_text(trimmed) {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            *failures += 1;
            None
        }
    }
}

fn coerce_u64(raw: &str, failures: &mut usize) -> Option<u64> {
    let trimmed = raw.trim();
    if is_missing_text(trimmed) {
        return None;
    }
    match trimmed.parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            *failures += 1;
            None
        }
    }
}

fn coerce_type(raw: &str, failures: &mut usize) -> Option<AppType> {
    let trimmed = raw.trim();
    if is_missing_text(trimmed) {
        return None;
    }
    match AppType::parse(trimmed) {
        Some(app_type) => Some(app_type),
        None => {
            *failures += 1;
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "App,Category,Rating,Reviews,Size,Installs,Type,Price,Content_Rating";

    fn load_str(input: &str) -> Result<LoadOutcome> {
        load(input.as_bytes())
    }

    #[test]
    fn test_clean_row_parses() {
        let input = format!("{HEADER}\nMaps,TOOLS,4.3,5000,12M,\"10,000+\",Free,0,Everyone\n");
        let outcome = load_str(&input).unwrap();

        assert_eq!(outcome.records.len(), 1);
        let record = &outcome.records[0];
        assert_eq!(record.app, "Maps");
        assert_eq!(record.category, "TOOLS");
        assert_eq!(record.rating, Some(4.3));
        assert_eq!(record.reviews, Some(5000));
        assert_eq!(record.installs, Installs::Raw("10,000+".to_string()));
        assert_eq!(record.app_type, Some(AppType::Free));
        assert_eq!(record.price, "0");
        assert_eq!(record.content_rating, "Everyone");
        assert_eq!(outcome.quality.total_failures(), 0);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = load_str("App,Category,Rating\nMaps,TOOLS,4.3\n").unwrap_err();
        assert!(matches!(err, Error::MissingColumn(_)));
    }

    #[test]
    fn test_space_spelling_of_content_rating_is_accepted() {
        let header = HEADER.replace("Content_Rating", "Content Rating");
        let input = format!("{header}\nMaps,TOOLS,4.3,5000,12M,500+,Free,0,Everyone\n");
        let outcome = load_str(&input).unwrap();

        assert_eq!(outcome.records[0].content_rating, "Everyone");
    }

    #[test]
    fn test_short_row_is_retained_with_missing_fields() {
        // A row that lost its category: every later field shifts left and the
        // trailing ones vanish entirely.
        let input = format!("{HEADER}\nFrame,1.9,19,3.0M,\"1,000+\",Free,0,Everyone\n");
        let outcome = load_str(&input).unwrap();

        assert_eq!(outcome.records.len(), 1);
        let record = &outcome.records[0];
        assert_eq!(record.app, "Frame");
        assert_eq!(record.category, "1.9");
        assert_eq!(record.rating, Some(19.0));
        assert_eq!(record.reviews, None);
        assert_eq!(record.content_rating, "");
        assert_eq!(outcome.quality.reviews_failures, 1);
        assert_eq!(outcome.quality.type_failures, 1);
        assert_eq!(outcome.quality.skipped_rows, 0);
    }

    #[test]
    fn test_empty_and_nan_fields_are_missing_without_penalty() {
        let input = format!(
            "{HEADER}\nA,TOOLS,,100,1M,500+,Free,0,Everyone\nB,TOOLS,NaN,200,1M,500+,Free,0,Everyone\n"
        );
        let outcome = load_str(&input).unwrap();

        assert_eq!(outcome.records[0].rating, None);
        assert_eq!(outcome.records[1].rating, None);
        assert_eq!(outcome.quality.rating_failures, 0);
    }

    #[test]
    fn test_garbage_numerics_are_counted() {
        let input = format!("{HEADER}\nA,TOOLS,lots,many,1M,500+,Shareware,0,Everyone\n");
        let outcome = load_str(&input).unwrap();

        let record = &outcome.records[0];
        assert_eq!(record.rating, None);
        assert_eq!(record.reviews, None);
        assert_eq!(record.app_type, None);
        assert_eq!(outcome.quality.rating_failures, 1);
        assert_eq!(outcome.quality.reviews_failures, 1);
        assert_eq!(outcome.quality.type_failures, 1);
    }

    #[test]
    fn test_undecodable_row_is_skipped_and_counted() {
        let mut input = format!("{HEADER}\nAlpha,TOOLS,4.0,1,1M,1+,Free,0,Everyone\n").into_bytes();
        input.extend_from_slice(b"Bro\xFF\xFEken,GAME,3.0,1,1M,1+,Free,0,Everyone\n");
        input.extend_from_slice(b"Omega,GAME,3.5,1,1M,1+,Free,0,Everyone\n");

        let outcome = load(input.as_slice()).unwrap();

        assert_eq!(outcome.quality.skipped_rows, 1);
        assert_eq!(outcome.quality.total_failures(), 0);
        // The rows around the bad one survive, in order.
        let names: Vec<&str> = outcome.records.iter().map(|r| r.app.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Omega"]);
    }

    #[test]
    fn test_rows_keep_source_order() {
        let input = format!(
            "{HEADER}\nZebra,TOOLS,4.0,1,1M,1+,Free,0,Everyone\nAardvark,GAME,3.0,1,1M,1+,Free,0,Everyone\n"
        );
        let outcome = load_str(&input).unwrap();

        let names: Vec<&str> = outcome.records.iter().map(|r| r.app.as_str()).collect();
        assert_eq!(names, vec!["Zebra", "Aardvark"]);
    }

    #[test]
    fn test_header_only_input_is_empty_not_error() {
        let outcome = load_str(&format!("{HEADER}\n")).unwrap();
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.quality, LoadQuality::default());
    }
}
