//! Appends flattened readings to a dated CSV file.
//!
//! The pollutant set varies per reading, so the file's columns are the union
//! of all rows seen so far. A reading that introduces a new pollutant forces
//! a rewrite with the extended header, padding earlier rows with empty
//! fields.

use std::{fs::OpenOptions, path::Path};

use anyhow::Result;
use csv::{Reader, Writer};
use serde_json::Value;

/// Appends one flattened reading, creating the file with a header row on
/// first write.
pub fn append_row(path: &Path, row: &[(String, Value)]) -> Result<()> {
    let row_keys: Vec<String> = row.iter().map(|(key, _)| key.clone()).collect();

    if !path.exists() {
        let mut wtr = Writer::from_path(path)?;
        wtr.write_record(&row_keys)?;
        wtr.write_record(align(row, &row_keys))?;
        wtr.flush()?;

        return Ok(());
    }

    let (mut header, records) = read_existing(path)?;
    let new_columns: Vec<String> = row_keys
        .into_iter()
        .filter(|key| !header.contains(key))
        .collect();

    if new_columns.is_empty() {
        let file = OpenOptions::new().append(true).open(path)?;
        let mut wtr = Writer::from_writer(file);
        wtr.write_record(align(row, &header))?;
        wtr.flush()?;

        return Ok(());
    }

    header.extend(new_columns);

    let mut wtr = Writer::from_path(path)?;
    wtr.write_record(&header)?;
    for mut record in records {
        record.resize(header.len(), String::new());
        wtr.write_record(&record)?;
    }
    wtr.write_record(align(row, &header))?;
    wtr.flush()?;

    Ok(())
}

fn read_existing(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut rdr = Reader::from_path(path)?;
    let header = rdr.headers()?.iter().map(String::from).collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record.iter().map(String::from).collect());
    }

    Ok((header, records))
}

// Orders the row's values by the header, leaving empty fields for columns
// the row does not have.
fn align(row: &[(String, Value)], header: &[String]) -> Vec<String> {
    header
        .iter()
        .map(|column| {
            row.iter()
                .find(|(key, _)| key == column)
                .map(|(_, value)| field(value))
                .unwrap_or_default()
        })
        .collect()
}

fn field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// -- Tests -------------------------------------------------------------------
