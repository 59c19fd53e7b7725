use tracing::debug;

use crate::record::{Installs, Record, is_missing_text};

/// Counters reported by [`normalize_installs`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeSummary {
    /// Raw values successfully coerced to a count.
    pub normalized: usize,
    /// Non-empty raw values that failed coercion and became missing.
    pub coercion_failures: usize,
    /// Raw values that were empty or a recognised missing encoding.
    pub absent: usize,
}

/// Rewrites every raw install value in place: strip one trailing `+`, strip
/// the `,` thousand separators, parse as a non-negative integer. Values that
/// still refuse to parse become [`Installs::Missing`]; one bad row never
/// aborts the run, it just gets counted.
///
/// Already-normalized fields pass through untouched, so applying this twice
/// is a no-op. Length and order of `records` are preserved.
pub fn normalize_installs(records: &mut [Record]) -> NormalizeSummary {
    let mut summary = NormalizeSummary::default();

    for record in records.iter_mut() {
        let Installs::Raw(raw) = &record.installs else {
            continue;
        };
        let raw = raw.trim().to_string();

        record.installs = if is_missing_text(&raw) {
            summary.absent += 1;
            Installs::Missing
        } else {
            let cleaned = raw.strip_suffix('+').unwrap_or(&raw).replace(',', "");
            match cleaned.parse::<u64>() {
                Ok(count) => {
                    summary.normalized += 1;
                    Installs::Count(count)
                }
                Err(_) => {
                    summary.coercion_failures += 1;
                    debug!(value = %raw, "install count failed numeric coercion");
                    Installs::Missing
                }
            }
        };
    }

    summary
}
