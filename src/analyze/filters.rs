//! Corpus filtering: date range, source, content type, domain and keyword.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::ingest::types::{ContentType, Corpus, Record};

/// Every field is optional; an unset field does not restrict. Filters combine
/// with AND.
#[derive(Debug, Clone, Default)]
pub struct CorpusFilter {
    /// Inclusive calendar-date range. When set, undated records are excluded.
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub sources: Option<HashSet<String>>,
    pub content_types: Option<HashSet<ContentType>>,
    /// Empty = any domain.
    pub domains: HashSet<String>,
    /// Case-insensitive substring over title or description.
    pub keyword: Option<String>,
}

impl CorpusFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources = Some(sources.into_iter().map(Into::into).collect());
        self
    }

    pub fn content_types<I>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = ContentType>,
    {
        self.content_types = Some(types.into_iter().collect());
        self
    }

    pub fn domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn matches(&self, r: &Record) -> bool {
        if let Some((start, end)) = self.date_range {
            match r.date.map(|d| d.date()) {
                Some(d) if d >= start && d <= end => {}
                _ => return false,
            }
        }
        if let Some(s) = &self.sources {
            if !s.contains(&r.source) {
                return false;
            }
        }
        if let Some(t) = &self.content_types {
            if !t.contains(&r.content_type) {
                return false;
            }
        }
        if !self.domains.is_empty() && !self.domains.contains(&r.domain) {
            return false;
        }
        if let Some(k) = &self.keyword {
            let k = k.trim().to_lowercase();
            if !k.is_empty() && !r.mentions(&k) {
                return false;
            }
        }
        true
    }

    /// Matching records in corpus order.
    pub fn apply<'a>(&self, corpus: &'a Corpus) -> Vec<&'a Record> {
        corpus.iter().filter(|r| self.matches(r)).collect()
    }
}
