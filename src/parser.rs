//! CSV parser for the per-offering grade dataset.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::courses::types::GradeRecord;
use crate::error::DataError;
use crate::grades::Grade;

/// Identity columns every dataset must carry alongside the grade buckets.
pub const KEY_COLUMNS: [&str; 3] = ["Subject", "Number", "Course Title"];

/// Decodes grade records from CSV bytes.
///
/// # Errors
///
/// [`DataError::MissingColumns`] if any identity or grade column is absent,
/// [`DataError::Malformed`] if a row fails to decode (negative or
/// non-numeric counts included).
pub fn parse_records(bytes: &[u8]) -> Result<Vec<GradeRecord>, DataError> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(bytes);

    let headers = rdr.headers().map_err(malformed)?.clone();
    check_columns(&headers)?;

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: GradeRecord = result.map_err(malformed)?;
        records.push(record);
    }

    debug!(records = records.len(), "Parsed grade records");
    Ok(records)
}

/// Lists every required column missing from `headers`.
pub fn missing_columns(headers: &StringRecord) -> Vec<String> {
    KEY_COLUMNS
        .iter()
        .copied()
        .chain(Grade::ALL.iter().map(|g| g.column()))
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(str::to_string)
        .collect()
}

fn check_columns(headers: &StringRecord) -> Result<(), DataError> {
    let missing = missing_columns(headers);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::MissingColumns(missing))
    }
}

fn malformed(source: csv::Error) -> DataError {
    let line = source.position().map(|p| p.line()).unwrap_or(0);
    DataError::Malformed { line, source }
}
