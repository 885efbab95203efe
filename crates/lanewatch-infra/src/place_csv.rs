//! CSV loader for flat place lists (`name,latitude,longitude`)
//!
//! Used for the curated location reference and for the telemetry
//! dropdown city and landmark lists, which share the same shape.

use std::fs;
use std::path::Path;

use thiserror::Error;

use lanewatch_domain::model::LocationRef;

#[derive(Error, Debug)]
pub enum PlaceCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid number format in row {row}, column {column}: {value}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Load place references from a CSV file
pub fn load_place_refs<P: AsRef<Path>>(path: P) -> Result<Vec<LocationRef>, PlaceCsvError> {
    let content = fs::read_to_string(path)?;
    parse_place_csv(&content)
}

/// Parse place references from CSV text
pub fn parse_place_csv(content: &str) -> Result<Vec<LocationRef>, PlaceCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut places = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let row = result?;
        let row_num = row_idx + 2;

        let name = row.get(0).unwrap_or("").to_string();
        if name.is_empty() {
            continue;
        }
        let latitude = parse_f64(row.get(1).unwrap_or(""), row_num, "latitude")?;
        let longitude = parse_f64(row.get(2).unwrap_or(""), row_num, "longitude")?;
        places.push(LocationRef::new(name, latitude, longitude));
    }

    Ok(places)
}

fn parse_f64(s: &str, row: usize, column: &str) -> Result<f64, PlaceCsvError> {
    s.trim().parse().map_err(|_| PlaceCsvError::InvalidNumber {
        row,
        column: column.to_string(),
        value: s.to_string(),
    })
}
