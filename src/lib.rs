// src/lib.rs
// Public library surface for the CLI and integration tests.

pub mod analyze;
pub mod config;
pub mod errors;
pub mod ingest;

// ---- Re-exports for stable public API ----
pub use crate::analyze::{
    classify_role, rising_keywords, rising_keywords_at, top_keywords, triad_pick, CorpusFilter,
    Role, RoleTaxonomy,
};
pub use crate::errors::{AnalysisError, IngestError, SchemaError};
pub use crate::ingest::types::{ContentType, Corpus, Record};
pub use crate::ingest::{build_corpus, load_corpus, CorpusCache};
