//! Delimited row input: file when readable, stdin otherwise

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read comma-separated rows from `file`, falling back to stdin when no
/// path is given or the path is unreadable
pub fn read_rows(file: Option<&Path>) -> Result<Vec<Vec<String>>> {
    let raw = match file {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                debug!("cannot read {}: {err}; reading stdin instead", path.display());
                read_stdin()?
            }
        },
        None => read_stdin()?,
    };
    parse_rows(&raw)
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read stdin")?;
    Ok(buf)
}

/// Split raw CSV text into field vectors, dropping blank lines
///
/// Rows may carry differing field counts; the grouper decides what is a
/// revision row.
pub fn parse_rows(raw: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed CSV input")?;
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Drop the leading row when it is the export header
pub fn strip_header(rows: &mut Vec<Vec<String>>) {
    if rows
        .first()
        .and_then(|row| row.first())
        .is_some_and(|field| field == "ID")
    {
        rows.remove(0);
    }
}
