//! Source acquisition: a CSV lives either on disk or behind an HTTP(S) URL,
//! and the rest of the pipeline never needs to know which.

use std::fs;

use tracing::debug;

use crate::error::Result;

/// Reads the raw bytes of `source`. Anything starting with `http://` or
/// `https://` is fetched over the network; everything else is a local path.
pub fn read_source(source: &str) -> Result<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_bytes(source)
    } else {
        debug!(path = source, "reading local source");
        Ok(fs::read(source)?)
    }
}

fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    debug!(url, "fetching remote source");
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}
