// src/ingest/cache.rs
//! Content-fingerprint cache for the ingest + normalize stage.
//!
//! For paths, the file's (mtime, len) is checked first; if unchanged the
//! cached corpus is returned without reading. Otherwise the bytes are read
//! and hashed (SHA-256); an identical fingerprint reuses the cached corpus,
//! anything else rebuilds it. `invalidate()` forces the next load to rebuild.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::analyze::roles::RoleTaxonomy;
use crate::errors::{AnalysisError, IngestError};
use crate::ingest::normalize::NormalizeStats;
use crate::ingest::types::Corpus;
use crate::ingest::build_corpus;

/// Hex SHA-256 of raw input bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

#[derive(Debug, Clone)]
struct Entry {
    fingerprint: String,
    path: Option<PathBuf>,
    file_sig: Option<(SystemTime, u64)>,
    corpus: Arc<Corpus>,
    stats: NormalizeStats,
}

#[derive(Debug)]
pub struct CorpusCache {
    taxonomy: RoleTaxonomy,
    inner: RwLock<Option<Entry>>,
}

impl Default for CorpusCache {
    fn default() -> Self {
        Self::new(RoleTaxonomy::builtin().clone())
    }
}

impl CorpusCache {
    pub fn new(taxonomy: RoleTaxonomy) -> Self {
        Self {
            taxonomy,
            inner: RwLock::new(None),
        }
    }

    pub fn taxonomy(&self) -> &RoleTaxonomy {
        &self.taxonomy
    }

    /// Fingerprint of the cached input, if any.
    pub fn fingerprint(&self) -> Option<String> {
        self.read_entry().map(|e| e.fingerprint)
    }

    /// Stats from the last (re)build.
    pub fn stats(&self) -> Option<NormalizeStats> {
        self.read_entry().map(|e| e.stats)
    }

    /// Drop the cached corpus; the next load rebuilds.
    pub fn invalidate(&self) {
        *self.inner.write().unwrap_or_else(|p| p.into_inner()) = None;
        debug!("corpus cache invalidated");
    }

    /// Invalidate, then load from `path`.
    pub fn reload(&self, path: &Path) -> Result<Arc<Corpus>, AnalysisError> {
        self.invalidate();
        self.load_path(path)
    }

    pub fn load_path(&self, path: &Path) -> Result<Arc<Corpus>, AnalysisError> {
        let sig = fs::metadata(path)
            .ok()
            .and_then(|m| m.modified().ok().map(|t| (t, m.len())));

        // Fast path: same path, same mtime + size.
        if let (Some(sig), Some(e)) = (sig, self.read_entry()) {
            if e.path.as_deref() == Some(path) && e.file_sig == Some(sig) {
                debug!(path = %path.display(), "corpus cache hit (file signature)");
                return Ok(e.corpus);
            }
        }

        let bytes = fs::read(path).map_err(|source| IngestError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.store(&path.display().to_string(), &bytes, Some(path.to_path_buf()), sig)
    }

    pub fn load_bytes(&self, id: &str, bytes: &[u8]) -> Result<Arc<Corpus>, AnalysisError> {
        self.store(id, bytes, None, None)
    }

    fn store(
        &self,
        id: &str,
        bytes: &[u8],
        path: Option<PathBuf>,
        file_sig: Option<(SystemTime, u64)>,
    ) -> Result<Arc<Corpus>, AnalysisError> {
        let fp = fingerprint(bytes);
        let short = &fp[..12];

        let mut guard = self.inner.write().unwrap_or_else(|p| p.into_inner());
        if let Some(e) = guard.as_mut() {
            if e.fingerprint == fp {
                debug!(id, fingerprint = short, "corpus cache hit (fingerprint)");
                e.path = path;
                e.file_sig = file_sig;
                return Ok(Arc::clone(&e.corpus));
            }
        }

        let (corpus, stats) = build_corpus(id, bytes, &self.taxonomy)?;
        let corpus = Arc::new(corpus);
        info!(id, fingerprint = short, records = corpus.len(), "corpus rebuilt");
        *guard = Some(Entry {
            fingerprint: fp,
            path,
            file_sig,
            corpus: Arc::clone(&corpus),
            stats,
        });
        Ok(corpus)
    }

    fn read_entry(&self) -> Option<Entry> {
        self.inner
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &[u8] = b"Title,Source,Date,Description,Link\nA,News,2025-01-01,d,http://a.com/1\n";

    #[test]
    fn fingerprint_is_hex_sha256() {
        let fp = fingerprint(b"abc");
        assert_eq!(fp.len(), 64);
        assert!(fp.starts_with("ba7816bf"));
    }

    #[test]
    fn same_bytes_reuse_corpus() {
        let cache = CorpusCache::default();
        let a = cache.load_bytes("mem", CSV).unwrap();
        let b = cache.load_bytes("mem", CSV).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let cache = CorpusCache::default();
        let a = cache.load_bytes("mem", CSV).unwrap();
        cache.invalidate();
        assert!(cache.fingerprint().is_none());
        let b = cache.load_bytes("mem", CSV).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(*a, *b);
    }
}
