//! Typed rows of the application table.

use serde::Serialize;

/// States of the install-count field.
///
/// The source table encodes installs as display text (`"10,000+"`). Loading
/// keeps the text as [`Installs::Raw`]; the normalizer rewrites every raw
/// value into either a real count or the explicit missing marker, so nothing
/// downstream ever sees raw text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Installs {
    /// Normalized install count. Zero is a legitimate count here.
    Count(u64),
    /// Verbatim text as loaded, not yet normalized.
    Raw(String),
    /// Unparseable or absent. Serializes as `null` and is excluded from
    /// numeric aggregation; deliberately distinct from `Count(0)`.
    Missing,
}

impl Installs {
    /// The normalized count, if one exists.
    pub fn count(&self) -> Option<u64> {
        match self {
            Installs::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Installs::Missing)
    }
}

/// Monetization type of an app (the `Type` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AppType {
    Free,
    Paid,
}

impl AppType {
    /// Parses the `Type` column. Anything other than the two known values
    /// yields `None`.
    pub fn parse(raw: &str) -> Option<AppType> {
        match raw {
            "Free" => Some(AppType::Free),
            "Paid" => Some(AppType::Paid),
            _ => None,
        }
    }
}

/// One application row, in source order. `app` is a display name, not a
/// unique key; the table carries duplicates and they are kept.
///
/// `size`, `price` and `content_rating` pass through verbatim: their units
/// and currency formatting are a rendering concern, not ours. The sequence of
/// records is immutable once the normalizer has run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub app: String,
    pub category: String,
    /// `None` when the source had no rating or the text failed coercion.
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub size: String,
    pub installs: Installs,
    pub app_type: Option<AppType>,
    pub price: String,
    pub content_rating: String,
}

/// Text encodings the source uses for an absent value. These coerce to a
/// missing marker without counting as a data-quality failure.
pub(crate) fn is_missing_text(raw: &str) -> bool {
    raw.is_empty() || raw.eq_ignore_ascii_case("nan")
}
