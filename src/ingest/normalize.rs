// src/ingest/normalize.rs
//! Raw table → Corpus.
//!
//! Order: column mapping, type coercion, derived fields (domain, content type,
//! role), drop rows with empty title/link, dedup by link (first wins), period
//! buckets. Only a missing column is fatal.

use std::collections::HashSet;

use metrics::{counter, describe_counter};
use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use serde::Serialize;
use tracing::info;

use crate::analyze::roles::RoleTaxonomy;
use crate::errors::SchemaError;
use crate::ingest::dates::{month_bucket, parse_date, week_bucket};
use crate::ingest::types::{ContentType, Corpus, RawTable, Record, CANONICAL_COLUMNS};

static RE_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z][A-Za-z0-9+.\-]*://([^/\s?#]+)").expect("domain regex")
});

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("corpus_rows_total", "Raw rows seen by the normalizer.");
        describe_counter!("corpus_kept_total", "Records kept after filtering + dedup.");
        describe_counter!(
            "corpus_dropped_empty_total",
            "Rows dropped for empty title or link."
        );
        describe_counter!("corpus_dedup_total", "Rows dropped as duplicate links.");
        describe_counter!("corpus_undated_total", "Kept records without a parsable date.");
    });
}

/// Soft degradations observed while normalizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeStats {
    pub input_rows: usize,
    pub kept: usize,
    pub dropped_empty: usize,
    pub dropped_duplicate: usize,
    pub undated: usize,
}

/// Position of each canonical column in the raw header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    title: usize,
    source: usize,
    date: usize,
    description: usize,
    link: usize,
}

fn map_columns(headers: &[String]) -> Result<ColumnMap, SchemaError> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    };
    let found: Vec<Option<usize>> = CANONICAL_COLUMNS.iter().map(|&c| find(c)).collect();
    let missing: Vec<String> = CANONICAL_COLUMNS
        .iter()
        .zip(&found)
        .filter(|(_, f)| f.is_none())
        .map(|(c, _)| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError { missing });
    }
    let at = |i: usize| found[i].unwrap_or_default();
    Ok(ColumnMap {
        title: at(0),
        source: at(1),
        date: at(2),
        description: at(3),
        link: at(4),
    })
}

/// Host portion of `scheme://host/...`, empty if the link has no such shape.
pub fn extract_domain(link: &str) -> String {
    RE_DOMAIN
        .captures(link)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn cell(row: &[Option<String>], i: usize) -> String {
    row.get(i)
        .and_then(|c| c.as_deref())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Build a corpus from a raw table, classifying roles with `taxonomy`.
pub fn normalize(
    table: &RawTable,
    taxonomy: &RoleTaxonomy,
) -> Result<(Corpus, NormalizeStats), SchemaError> {
    ensure_metrics_described();
    let cols = map_columns(&table.headers)?;

    let mut stats = NormalizeStats {
        input_rows: table.len(),
        ..Default::default()
    };
    let mut seen_links: HashSet<String> = HashSet::new();
    let mut records = Vec::with_capacity(table.len());

    for row in &table.rows {
        let title = cell(row, cols.title);
        let link = cell(row, cols.link);
        if title.is_empty() || link.is_empty() {
            stats.dropped_empty += 1;
            continue;
        }
        if !seen_links.insert(link.clone()) {
            stats.dropped_duplicate += 1;
            continue;
        }

        let source = cell(row, cols.source);
        let description = cell(row, cols.description);
        let date = row
            .get(cols.date)
            .and_then(|c| c.as_deref())
            .and_then(parse_date);
        let role = taxonomy.classify(&title, &description, &source);

        records.push(Record {
            domain: extract_domain(&link),
            content_type: ContentType::from_source(&source),
            role,
            month: date.as_ref().map(month_bucket).unwrap_or_default(),
            week: date.as_ref().map(week_bucket).unwrap_or_default(),
            title,
            source,
            date,
            description,
            link,
        });
    }

    stats.kept = records.len();
    stats.undated = records.iter().filter(|r| r.date.is_none()).count();

    counter!("corpus_rows_total").increment(stats.input_rows as u64);
    counter!("corpus_kept_total").increment(stats.kept as u64);
    counter!("corpus_dropped_empty_total").increment(stats.dropped_empty as u64);
    counter!("corpus_dedup_total").increment(stats.dropped_duplicate as u64);
    counter!("corpus_undated_total").increment(stats.undated as u64);
    info!(
        rows = stats.input_rows,
        kept = stats.kept,
        dropped_empty = stats.dropped_empty,
        dedup = stats.dropped_duplicate,
        undated = stats.undated,
        "corpus normalized"
    );

    Ok((Corpus::from_records(records), stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let mut t = RawTable::new(headers.iter().map(|h| h.to_string()).collect());
        for r in rows {
            t.push_row(
                r.iter()
                    .map(|c| (!c.is_empty()).then(|| c.to_string()))
                    .collect(),
            );
        }
        t
    }

    #[test]
    fn columns_match_case_insensitively_and_trimmed() {
        let t = table(
            &[" LINK", "title ", "Extra", "DATE", "Description", "source"],
            &[&["http://a.com/1", "Hello", "x", "2025-01-01", "d", "TechNews"]],
        );
        let (c, stats) = normalize(&t, RoleTaxonomy::builtin()).unwrap();
        assert_eq!(stats.kept, 1);
        let r = &c.records()[0];
        assert_eq!(r.title, "Hello");
        assert_eq!(r.domain, "a.com");
        assert_eq!(r.month, "2025-01");
        assert_eq!(r.week, "2025-W01");
    }

    #[test]
    fn missing_columns_are_named() {
        let t = table(&["Title", "Source", "Description"], &[]);
        let err = normalize(&t, RoleTaxonomy::builtin()).unwrap_err();
        assert_eq!(err.missing, vec!["date".to_string(), "link".to_string()]);
    }

    #[test]
    fn domain_extraction() {
        assert_eq!(extract_domain("https://arxiv.org/abs/1"), "arxiv.org");
        assert_eq!(extract_domain("http://jobs.com"), "jobs.com");
        assert_eq!(extract_domain("ftp://files.example.net/x"), "files.example.net");
        assert_eq!(extract_domain("not a link"), "");
        assert_eq!(extract_domain(""), "");
    }

    #[test]
    fn empty_title_row_does_not_claim_link() {
        let t = table(
            &["Title", "Source", "Date", "Description", "Link"],
            &[
                &["", "S", "", "", "http://a.com/1"],
                &["Kept", "S", "", "", "http://a.com/1"],
            ],
        );
        let (c, stats) = normalize(&t, RoleTaxonomy::builtin()).unwrap();
        assert_eq!(c.len(), 1);
        assert_eq!(c.records()[0].title, "Kept");
        assert_eq!(stats.dropped_empty, 1);
        assert_eq!(stats.dropped_duplicate, 0);
        assert_eq!(stats.undated, 1);
        assert_eq!(c.records()[0].week, "");
    }
}
