//! Dataset loading.
//!
//! The dataset is CSV with a header line and the columns
//! `id,name,popularity,activity,category,peers`. The peer column is the
//! rest of the line and holds whitespace-separated ids.
//!
//! A bad row fails the whole load. Peer tokens are the exception: ones
//! that do not parse are dropped quietly.

use crate::config::Config;
use crate::entity::{Entity, RawRecord};
use crate::error::LoadError;
use crate::store::RecordStore;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Number of comma-separated fields before the peer list.
const FIXED_FIELDS: usize = 5;

/// Parses dataset text into raw records, skipping the header line.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, LoadError> {
    let mut records = Vec::new();

    for (offset, line) in text.lines().enumerate().skip(1) {
        let line_no = offset + 1;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        records.push(parse_line(line, line_no)?);
    }

    Ok(records)
}

fn parse_line(line: &str, line_no: usize) -> Result<RawRecord, LoadError> {
    let fields: Vec<&str> = line.splitn(FIXED_FIELDS + 1, ',').collect();
    if fields.len() < FIXED_FIELDS {
        return Err(malformed(
            line_no,
            format!("expected at least {} fields, found {}", FIXED_FIELDS, fields.len()),
        ));
    }

    let id = fields[0]
        .trim()
        .parse()
        .map_err(|_| malformed(line_no, format!("invalid id '{}'", fields[0].trim())))?;
    let popularity = fields[2].trim().parse().map_err(|_| {
        malformed(line_no, format!("invalid popularity '{}'", fields[2].trim()))
    })?;
    let activity = fields[3].trim().parse().map_err(|_| {
        malformed(line_no, format!("invalid activity '{}'", fields[3].trim()))
    })?;

    Ok(RawRecord {
        id,
        name: fields[1].trim().to_string(),
        popularity,
        activity,
        category: fields[4].trim().to_string(),
        peers: fields.get(FIXED_FIELDS).copied().unwrap_or("").to_string(),
    })
}

fn malformed(line: usize, reason: String) -> LoadError {
    LoadError::Malformed { line, reason }
}

/// Builds a record store from raw records under the configured limits.
pub fn build_store(records: Vec<RawRecord>, config: &Config) -> Result<RecordStore, LoadError> {
    let entities = records
        .into_iter()
        .map(|raw| Entity::from_raw(raw, config.max_peers));
    RecordStore::from_entities(entities, config.capacity)
}

/// Reads a dataset file into a record store.
pub fn load_store(path: &Path, config: &Config) -> Result<RecordStore, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = parse_records(&text)?;
    debug!("Parsed {} records from {}", records.len(), path.display());

    let store = build_store(records, config)?;
    info!(
        "Loaded {} entities from {} (capacity {})",
        store.len(),
        path.display(),
        store.capacity()
    );

    Ok(store)
}
