//! Flat-file persistence for the resource inventory and request list
//!
//! The inventory is one tab-separated line per record, fields in fixed
//! order: repository ID, resource ID, merged identifiers, title, EAD ID.
//! No header row and no escaping; embedded tabs and newlines are defined as
//! absent from legitimate data. The file is fully rewritten on each
//! enumerate run.
//!
//! Parsing is strict: a wrong field count or a malformed integer aborts the
//! load with the offending line number rather than coercing bad data into
//! the export phase.

use crate::domain::{ResourceRecord, Result, StoreError};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Fields per inventory line
const FIELD_COUNT: usize = 5;

/// Writes the inventory, replacing any existing file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_records(path: impl AsRef<Path>, records: &[ResourceRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| file_access(path, &e))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            record.repository_id, record.id, record.identifiers, record.title, record.ead_id
        )
        .map_err(|e| file_access(path, &e))?;
    }

    writer.flush().map_err(|e| file_access(path, &e))?;

    tracing::info!(
        path = %path.display(),
        count = records.len(),
        "Wrote resource inventory"
    );
    Ok(())
}

/// Reads the inventory back into records
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if any line has the
/// wrong field count or a non-integer repository/resource ID.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<ResourceRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| file_access(path, &e))?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| file_access(path, &e))?;
        records.push(parse_line(path, index + 1, &line)?);
    }

    tracing::debug!(
        path = %path.display(),
        count = records.len(),
        "Read resource inventory"
    );
    Ok(records)
}

/// Reads the newline-delimited identifier request list
///
/// Surrounding whitespace is trimmed and blank lines are skipped.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_request_list(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| file_access(path, &e))?;
    let reader = BufReader::new(file);

    let mut identifiers = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| file_access(path, &e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        identifiers.push(trimmed.to_string());
    }

    tracing::debug!(
        path = %path.display(),
        count = identifiers.len(),
        "Read request list"
    );
    Ok(identifiers)
}

fn parse_line(path: &Path, line_no: usize, line: &str) -> Result<ResourceRecord> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != FIELD_COUNT {
        return Err(StoreError::FieldCount {
            path: path.display().to_string(),
            line: line_no,
            expected: FIELD_COUNT,
            found: fields.len(),
        }
        .into());
    }

    let repository_id = parse_u32(path, line_no, "repository ID", fields[0])?;
    let id = parse_u32(path, line_no, "resource ID", fields[1])?;

    Ok(ResourceRecord::new(
        repository_id,
        id,
        fields[2],
        fields[3],
        fields[4],
    ))
}

fn parse_u32(path: &Path, line_no: usize, field: &'static str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| {
        StoreError::InvalidNumber {
            path: path.display().to_string(),
            line: line_no,
            field,
            value: value.to_string(),
        }
        .into()
    })
}

fn file_access(path: &Path, e: &std::io::Error) -> StoreError {
    StoreError::FileAccess {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}
