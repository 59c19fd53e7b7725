use thiserror::Error;

/// Failure modes of the ingestion and aggregation pipeline.
///
/// [`Error::MissingColumn`] is the fatal schema failure: it aborts a run
/// before any aggregation happens. [`Error::EmptyInput`] is raised by an
/// individual statistic whose inputs are all missing, so callers decide what
/// "no data" means instead of receiving a disguised zero. Row-level field
/// problems never surface here at all; they become missing-value markers and
/// quality counters.
#[derive(Error, Debug)]
pub enum Error {
    #[error("required column '{0}' is missing from the input header")]
    MissingColumn(String),

    #[error("no non-missing {0} values to aggregate")]
    EmptyInput(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
