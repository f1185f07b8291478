// src/ingest/mod.rs
pub mod cache;
pub mod dates;
pub mod normalize;
pub mod reader;
pub mod types;

use std::path::Path;

use tracing::info;

use crate::analyze::roles::RoleTaxonomy;
use crate::errors::AnalysisError;
use crate::ingest::normalize::{normalize, NormalizeStats};
use crate::ingest::reader::{read_table_bytes, read_table_path, DecodedTable};
use crate::ingest::types::Corpus;

pub use cache::CorpusCache;
pub use normalize::extract_domain;
pub use types::{ContentType, RawTable, Record};

fn finish(
    id: &str,
    decoded: DecodedTable,
    taxonomy: &RoleTaxonomy,
) -> Result<(Corpus, NormalizeStats), AnalysisError> {
    info!(id, encoding = decoded.encoding, rows = decoded.table.len(), "input decoded");
    Ok(normalize(&decoded.table, taxonomy)?)
}

/// Decode + normalize in-memory bytes.
pub fn build_corpus(
    id: &str,
    bytes: &[u8],
    taxonomy: &RoleTaxonomy,
) -> Result<(Corpus, NormalizeStats), AnalysisError> {
    let decoded = read_table_bytes(id, bytes)?;
    finish(id, decoded, taxonomy)
}

/// Read, decode and normalize a file with the built-in taxonomy. No caching;
/// see `CorpusCache` for repeated loads.
pub fn load_corpus(path: &Path) -> Result<(Corpus, NormalizeStats), AnalysisError> {
    let decoded = read_table_path(path)?;
    finish(&path.display().to_string(), decoded, RoleTaxonomy::builtin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_propagates_through_build() {
        let err = build_corpus("mem", b"Title,Link\nA,http://x\n", RoleTaxonomy::builtin())
            .unwrap_err();
        match err {
            AnalysisError::Schema(e) => assert_eq!(e.missing, vec!["source", "date", "description"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
