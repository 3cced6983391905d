//! CSV ingestion for AIS track exports.
//!
//! Header names are matched ignoring case, spaces and underscores, so both
//! snake_case exports and the MarineCadastre style (`VesselName`,
//! `BaseDateTime`, `LAT`, `LON`, `SOG`, `COG`) load. Rows that
//! cannot be placed on a track are skipped with a warning; damaged numeric
//! fields are kept as absent and rejected later on access.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDateTime, Utc};
use log::{info, warn};
use serde::Deserialize;

use crate::dataset::record::RawTrackRecord;
use crate::dataset::snapshot::TrackDataset;
use crate::prelude::{CoreError, CoreResult};

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Deserialize)]
struct CsvRow {
    vessel_name: Option<String>,
    timestamp: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
    sog: Option<String>,
    cog: Option<String>,
}

/// Maps a header onto the `CsvRow` field it feeds, ignoring case, spaces
/// and underscores. Unrecognized headers pass through untouched.
fn canonical_header(raw: &str) -> &str {
    let key: String = raw
        .chars()
        .filter(|c| !matches!(c, '_' | ' ' | '-'))
        .collect::<String>()
        .to_lowercase();
    match key.as_str() {
        "vesselname" | "vessel" | "name" | "shipname" => "vessel_name",
        "timestamp" | "basedatetime" | "time" | "datetime" => "timestamp",
        "lat" | "latitude" => "lat",
        "lon" | "lng" | "long" | "longitude" => "lon",
        "sog" | "speed" | "speedoverground" => "sog",
        "cog" | "course" | "courseoverground" => "cog",
        _ => raw,
    }
}

fn canonical_headers(headers: &csv::StringRecord) -> csv::StringRecord {
    headers.iter().map(canonical_header).collect()
}

/// Parses an RFC 3339 instant, or a naive timestamp taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn parse_number(raw: &Option<String>) -> Option<f64> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
}

/// Reads AIS rows from any CSV source.
pub fn read_records<R: Read>(reader: R) -> CoreResult<Vec<RawTrackRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|err| CoreError::Load(format!("reading CSV header: {}", err)))?;
    let headers = canonical_headers(headers);
    csv_reader.set_headers(headers);

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for (line, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                if matches!(err.kind(), csv::ErrorKind::Io(_)) {
                    return Err(CoreError::Load(err.to_string()));
                }
                warn!("row {}: unreadable ({})", line + 1, err);
                skipped += 1;
                continue;
            }
        };

        let Some(vessel_name) = row.vessel_name.filter(|n| !n.trim().is_empty()) else {
            warn!("row {}: missing vessel name", line + 1);
            skipped += 1;
            continue;
        };
        let Some(timestamp) = row.timestamp.as_deref().and_then(parse_timestamp) else {
            warn!("row {}: missing or unparsable timestamp", line + 1);
            skipped += 1;
            continue;
        };

        records.push(RawTrackRecord {
            vessel_name,
            timestamp,
            lat: parse_number(&row.lat),
            lon: parse_number(&row.lon),
            sog: parse_number(&row.sog),
            cog: parse_number(&row.cog),
        });
    }

    if skipped > 0 {
        warn!("{} row(s) could not be placed on a track", skipped);
    }
    Ok(records)
}

/// Loads a CSV file straight into an immutable snapshot.
pub fn load_csv<P: AsRef<Path>>(path: P) -> CoreResult<TrackDataset> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|err| CoreError::Load(format!("opening {}: {}", path.display(), err)))?;
    let records = read_records(file)?;
    let dataset = TrackDataset::from_records(records);
    info!(
        "loaded {} record(s) for {} vessel(s) from {}",
        dataset.record_count(),
        dataset.vessel_count(),
        path.display()
    );
    Ok(dataset)
}
