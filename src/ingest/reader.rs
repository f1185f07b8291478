// src/ingest/reader.rs
//! Raw tabular read with an ordered encoding fallback.
//!
//! Each encoding is tried in turn (UTF-8 → EUC-KR/CP949 → Windows-1252); an
//! attempt succeeds only if the bytes decode without replacement AND the
//! decoded text parses as CSV with a header row. The single-byte fallback
//! decodes any byte sequence, so in practice only unparsable tables fail.

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, EUC_KR, UTF_8, WINDOWS_1252};
use tracing::debug;

use crate::errors::IngestError;
use crate::ingest::types::RawTable;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decoded table plus the encoding that produced it.
#[derive(Debug, Clone)]
pub struct DecodedTable {
    pub table: RawTable,
    pub encoding: &'static str,
}

pub fn fallback_encodings() -> [&'static Encoding; 3] {
    [UTF_8, EUC_KR, WINDOWS_1252]
}

/// Read a file fully into memory and decode it.
pub fn read_table_path(path: &Path) -> Result<DecodedTable, IngestError> {
    let bytes = fs::read(path).map_err(|source| IngestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    read_table_bytes(&path.display().to_string(), &bytes)
}

/// Decode in-memory bytes (`id` is only used for error messages / logs).
pub fn read_table_bytes(id: &str, bytes: &[u8]) -> Result<DecodedTable, IngestError> {
    let mut last = String::from("no encodings configured");
    let encodings = fallback_encodings();

    for enc in encodings {
        match decode_and_parse(enc, bytes) {
            Ok(table) => {
                debug!(id, encoding = enc.name(), rows = table.len(), "table decoded");
                return Ok(DecodedTable {
                    table,
                    encoding: enc.name(),
                });
            }
            Err(e) => {
                debug!(id, encoding = enc.name(), error = %e, "decode attempt failed");
                last = format!("{}: {}", enc.name(), e);
            }
        }
    }

    Err(IngestError::Undecodable {
        path: id.to_string(),
        tried: encodings
            .iter()
            .map(|e| e.name())
            .collect::<Vec<_>>()
            .join(", "),
        last,
    })
}

fn decode_and_parse(enc: &'static Encoding, bytes: &[u8]) -> Result<RawTable, String> {
    let body = if enc == UTF_8 {
        bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
    } else {
        bytes
    };
    let text = enc
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| "invalid byte sequence".to_string())?;
    parse_csv(&text)
}

fn parse_csv(text: &str) -> Result<RawTable, String> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| e.to_string())?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err("no columns to parse".to_string());
    }

    let mut table = RawTable::new(headers);
    for rec in rdr.records() {
        let rec = rec.map_err(|e| e.to_string())?;
        let row = rec
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    None
                } else {
                    Some(cell.to_string())
                }
            })
            .collect();
        table.push_row(row);
    }
    Ok(table)
}
