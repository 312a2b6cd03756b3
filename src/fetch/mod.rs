//! Loading the raw grade dataset from a URL or a local file.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use std::io::Read;

use flate2::read::GzDecoder;
use tracing::{debug, info};

use crate::error::DataError;

pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>, DataError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| DataError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    let req = reqwest::Request::new(reqwest::Method::GET, parsed);

    let fetch_err = |source| DataError::Fetch {
        url: url.to_string(),
        source,
    };

    let resp = client.execute(req).await.map_err(fetch_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DataError::Status {
            url: url.to_string(),
            status,
        });
    }

    Ok(resp.bytes().await.map_err(fetch_err)?.to_vec())
}

/// Loads `source` over HTTP when it looks like a URL, otherwise from disk.
///
/// Sources ending in `.gz` are decompressed.
pub async fn load_source(source: &str) -> Result<Vec<u8>, DataError> {
    load_source_with(&BasicClient::new(), source).await
}

#[tracing::instrument(skip(client), fields(bytes = tracing::field::Empty))]
pub async fn load_source_with<C: HttpClient>(
    client: &C,
    source: &str,
) -> Result<Vec<u8>, DataError> {
    let raw = if is_remote(source) {
        info!("Fetching grade data");
        fetch_bytes(client, source).await?
    } else {
        debug!("Reading grade data from disk");
        std::fs::read(source).map_err(|e| io_error(source, e))?
    };

    let bytes = if source.ends_with(".gz") {
        gunzip(&raw).map_err(|e| io_error(source, e))?
    } else {
        raw
    };

    tracing::Span::current().record("bytes", bytes.len());
    Ok(bytes)
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn gunzip(compressed: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    GzDecoder::new(compressed).read_to_end(&mut out)?;
    Ok(out)
}

fn io_error(source: &str, err: std::io::Error) -> DataError {
    DataError::Io {
        path: source.to_string(),
        source: err,
    }
}
