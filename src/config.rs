/// Minimum number of apps a category must have to join the major-category
/// rating comparison. Categories below this have too few samples to compare.
pub const MAJOR_CATEGORY_MIN_APPS: usize = 170;

/// Lower edge of the rating histogram.
pub const HISTOGRAM_START: f64 = 1.0;

/// Width of each rating histogram bin.
pub const HISTOGRAM_BIN_WIDTH: f64 = 0.1;

/// Upper edge of the rating histogram. Ratings above this are reported in
/// the overflow tally rather than a bin.
pub const HISTOGRAM_END: f64 = 5.0;

/// Fixed-width binning bounds for the rating histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramSpec {
    pub start: f64,
    pub bin_width: f64,
    pub end: f64,
}

impl HistogramSpec {
    /// Number of bins covering `[start, end]`.
    pub fn bin_count(&self) -> usize {
        if self.bin_width <= 0.0 || self.end <= self.start {
            return 0;
        }
        ((self.end - self.start) / self.bin_width).round() as usize
    }
}

impl Default for HistogramSpec {
    fn default() -> Self {
        Self {
            start: HISTOGRAM_START,
            bin_width: HISTOGRAM_BIN_WIDTH,
            end: HISTOGRAM_END,
        }
    }
}

/// Tuning knobs for a pipeline run. The defaults reproduce the dashboard's
/// published numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub min_category_size: usize,
    pub histogram: HistogramSpec,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_category_size: MAJOR_CATEGORY_MIN_APPS,
            histogram: HistogramSpec::default(),
        }
    }
}
