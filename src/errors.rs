//! Fatal error taxonomy for the corpus pipeline.
//!
//! Only two things abort an analysis: input that no encoding can decode
//! (`IngestError`) and a table missing required columns (`SchemaError`).
//! Everything else degrades softly and is reported via `NormalizeStats`.

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not decode '{path}' with any of [{tried}]: {last}")]
    Undecodable {
        path: String,
        tried: String,
        last: String,
    },
}

/// One or more canonical columns are absent after case-insensitive matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required column(s): {}", .missing.join(", "))]
pub struct SchemaError {
    pub missing: Vec<String>,
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_missing_columns() {
        let e = SchemaError {
            missing: vec!["date".into(), "link".into()],
        };
        assert_eq!(e.to_string(), "missing required column(s): date, link");
    }

    #[test]
    fn analysis_error_is_transparent() {
        let e: AnalysisError = SchemaError {
            missing: vec!["title".into()],
        }
        .into();
        assert!(e.to_string().contains("title"));
    }
}
