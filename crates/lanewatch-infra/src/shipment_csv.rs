//! CSV loader for the fleet-tracking shipment export
//!
//! Exports arrive with inconsistent header casing and spacing, and
//! occasionally in Windows-1252 rather than UTF-8. Headers are matched
//! through `normalize_header`; a column the export does not carry
//! yields empty-string fields, never an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::WINDOWS_1252;
use thiserror::Error;
use tracing::warn;

use lanewatch_domain::model::RawShipmentRecord;
use lanewatch_domain::service::normalize_header;

#[derive(Error, Debug)]
pub enum ShipmentCsvError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    CsvError(#[from] csv::Error),
}

/// Accepted header spellings per record field, compared after
/// `normalize_header`
const HEADER_ALIASES: &[(&str, &[&str])] = &[
    ("vehicle_number", &["vehicle number", "vehicle no", "vehicle no."]),
    ("consigner_name", &["consigner name", "consigner"]),
    ("consignee_name", &["consignee name", "consignee"]),
    ("dispatch_date", &["dispatch date", "dispatched on"]),
    ("eta", &["eta", "expected arrival"]),
    ("delay_time", &["delay time", "delay"]),
    ("last_location", &["last location", "current location"]),
    ("last_location_date", &["last location date", "last location time"]),
    ("rps_number", &["rps number", "rps no", "rps no."]),
];

/// Load shipment records from an export CSV file
pub fn load_shipment_records<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<RawShipmentRecord>, ShipmentCsvError> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let decoded = match std::str::from_utf8(&bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(&bytes);
            if had_errors {
                warn!("some export bytes could not be decoded as Windows-1252");
            }
            decoded.into_owned()
        }
    };

    parse_shipment_csv(&decoded)
}

/// Parse shipment records from decoded CSV text
pub fn parse_shipment_csv(content: &str) -> Result<Vec<RawShipmentRecord>, ShipmentCsvError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = map_columns(&headers);

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(RawShipmentRecord {
            vehicle_number: field(&row, &columns, 0),
            consigner_name: field(&row, &columns, 1),
            consignee_name: field(&row, &columns, 2),
            dispatch_date: field(&row, &columns, 3),
            eta: field(&row, &columns, 4),
            delay_time: field(&row, &columns, 5),
            last_location: field(&row, &columns, 6),
            last_location_date: field(&row, &columns, 7),
            rps_number: field(&row, &columns, 8),
        });
    }

    Ok(records)
}

/// Resolve each known field to a column index, `None` when the export
/// lacks the column
fn map_columns(headers: &csv::StringRecord) -> Vec<Option<usize>> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    HEADER_ALIASES
        .iter()
        .map(|(field_name, aliases)| {
            let hit = normalized
                .iter()
                .position(|h| aliases.contains(&h.as_str()));
            if hit.is_none() {
                warn!(field = field_name, "export is missing a column, fields default to empty");
            }
            hit
        })
        .collect()
}

fn field(row: &csv::StringRecord, columns: &[Option<usize>], slot: usize) -> String {
    columns[slot]
        .and_then(|i| row.get(i))
        .unwrap_or("")
        .to_string()
}
