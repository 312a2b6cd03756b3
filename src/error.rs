//! Error types for loading grade data and answering course queries.

use thiserror::Error;

/// Fatal failures while fetching or parsing the grade dataset.
///
/// Any of these aborts startup; no partial catalog is ever built.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid data source URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to fetch grade data from {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read grade data from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("grade data is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("malformed grade record at line {line}")]
    Malformed {
        line: u64,
        #[source]
        source: csv::Error,
    },
}

/// Rejected query parameters.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("minimum GPA must be within [0, 4], got {0}")]
    GpaOutOfRange(f64),

    #[error("minimum GPA must be a number, got '{0}'")]
    InvalidGpa(String),

    #[error("unknown student level '{0}', expected Undergraduate or Graduate")]
    UnknownLevel(String),
}
