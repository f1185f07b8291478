// src/ingest/types.rs
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::analyze::roles::Role;

/// Canonical column names, in export order.
pub const CANONICAL_COLUMNS: [&str; 5] = ["title", "source", "date", "description", "link"];

/// Untyped table as read from disk: header row + string cells.
/// Empty cells are `None` (null), mirroring a dataframe's missing value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Paper,
    News,
    Job,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Paper, ContentType::News, ContentType::Job];

    /// Derive from the `source` field. "arxiv" is tested before "job" and the
    /// later test overrides, so a source matching both is a job.
    pub fn from_source(source: &str) -> Self {
        let s = source.to_lowercase();
        let mut ct = ContentType::News;
        if s.contains("arxiv") {
            ct = ContentType::Paper;
        }
        if s.contains("job") {
            if ct == ContentType::Paper {
                tracing::warn!(%source, "source matches both arxiv and job; classified as job");
            }
            ct = ContentType::Job;
        }
        ct
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Paper => "paper",
            ContentType::News => "news",
            ContentType::Job => "job",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized item. Immutable once the corpus is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub title: String,
    pub source: String,
    pub date: Option<NaiveDateTime>,
    pub description: String,
    pub link: String,
    pub domain: String,
    pub content_type: ContentType,
    pub role: Role,
    /// `YYYY-MM`, empty when undated.
    pub month: String,
    /// ISO week `YYYY-Www`, empty when undated.
    pub week: String,
}

impl Record {
    /// Short one-line label: `[type] date · title` (title capped at 95 chars).
    pub fn label(&self) -> String {
        let d = self
            .date
            .map(|d| d.date().format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let title: String = self.title.chars().take(95).collect();
        format!("[{}] {} · {}", self.content_type, d, title)
    }

    /// Title and description joined for text analysis.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lowercased.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Ordered, deduplicated collection of records for one analysis session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Borrowed view over every record, the shape filters and analytics take.
    pub fn all(&self) -> Vec<&Record> {
        self.records.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn has_dates(&self) -> bool {
        self.records.iter().any(|r| r.date.is_some())
    }

    /// Render back into the five canonical columns, so the corpus can be
    /// re-exported or fed through normalization again.
    pub fn to_raw_table(&self) -> RawTable {
        let headers = vec![
            "Title".to_string(),
            "Source".to_string(),
            "Date".to_string(),
            "Description".to_string(),
            "Link".to_string(),
        ];
        let mut table = RawTable::new(headers);
        for r in &self.records {
            table.push_row(vec![
                Some(r.title.clone()),
                Some(r.source.clone()),
                // %.f prints nothing for whole seconds, so both shapes re-parse.
                r.date.map(|d| d.format("%Y-%m-%d %H:%M:%S%.f").to_string()),
                Some(r.description.clone()),
                Some(r.link.clone()),
            ]);
        }
        table
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_from_source() {
        assert_eq!(ContentType::from_source("arXiv.org"), ContentType::Paper);
        assert_eq!(ContentType::from_source("JobBoard"), ContentType::Job);
        assert_eq!(ContentType::from_source("TechNews"), ContentType::News);
        assert_eq!(ContentType::from_source(""), ContentType::News);
    }

    #[test]
    fn job_overrides_arxiv_when_both_match() {
        assert_eq!(ContentType::from_source("arxiv-jobs"), ContentType::Job);
    }

    #[test]
    fn raw_table_pads_short_rows() {
        let mut t = RawTable::new(vec!["a".into(), "b".into()]);
        t.push_row(vec![Some("x".into())]);
        assert_eq!(t.rows[0], vec![Some("x".to_string()), None]);
    }

    #[test]
    fn label_shows_type_date_and_clipped_title() {
        let r = Record {
            title: "x".repeat(120),
            source: "arXiv".into(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 3, 4).and_then(|d| d.and_hms_opt(8, 0, 0)),
            description: String::new(),
            link: "http://arxiv.org/1".into(),
            domain: "arxiv.org".into(),
            content_type: ContentType::Paper,
            role: Role::Analyst,
            month: "2025-03".into(),
            week: "2025-W10".into(),
        };
        let label = r.label();
        assert!(label.starts_with("[paper] 2025-03-04 · x"));
        assert_eq!(label.chars().filter(|&c| c == 'x').count(), 95);
    }
}
