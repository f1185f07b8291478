//! Keyword extraction over record text.
//!
//! Tokens are runs of a Latin letter followed by at least two letters, digits,
//! `-` or `+`, taken from lowercased text. A curated stop-word set (English
//! function words plus domain-generic terms) is removed. Non-Latin text yields
//! no tokens.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::analyze::counts::OrderedCounter;
use crate::ingest::types::Record;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "with", "for", "from", "this", "that", "into", "onto", "over", "under",
        "about", "between", "using", "use", "used", "new", "latest", "toward", "towards", "via",
        "based", "approach", "system", "systems", "paper", "research", "study", "studies",
        "results", "method", "methods", "model", "models", "dataset", "data", "ai", "agent",
        "agents", "llm", "llms", "gpt", "openai", "anthropic", "google", "meta", "microsoft",
        "framework", "tool", "tools", "application", "applications", "analysis", "report",
        "reports", "build", "building", "improve", "improving", "improved", "evaluate",
        "evaluation", "evaluating", "benchmark", "release", "released", "update", "updated",
        "updates", "today", "yesterday", "tomorrow",
    ]
    .into_iter()
    .collect()
});

static RE_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z][a-z0-9+\-]{2,}").expect("token regex"));

pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Significant tokens of `text`, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    RE_TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !is_stop_word(t))
        .map(str::to_string)
        .collect()
}

/// Token → count over some subset of records. Recomputed on demand, never
/// stored alongside the corpus.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    counts: OrderedCounter<String>,
}

impl KeywordIndex {
    pub fn from_text(text: &str) -> Self {
        Self {
            counts: tokenize(text).into_iter().collect(),
        }
    }

    /// Aggregate over `title + description` of each record.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut counts = OrderedCounter::new();
        for r in records {
            for t in tokenize(&r.text()) {
                counts.add(t);
            }
        }
        Self { counts }
    }

    pub fn count(&self, token: &str) -> usize {
        self.counts.get(&token.to_string())
    }

    /// Total token occurrences.
    pub fn total(&self) -> usize {
        self.counts.total()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// (token, count) in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.counts.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        self.counts.most_common(n)
    }
}

/// The `n` most frequent tokens across `records`, ties in first-seen order.
pub fn top_keywords<'a, I>(records: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Record>,
{
    KeywordIndex::from_records(records).top(n)
}

/// Most frequent significant token of one record; seeds a triad lookup.
pub fn suggest_keyword(record: &Record) -> Option<String> {
    KeywordIndex::from_text(&record.text())
        .top(1)
        .into_iter()
        .next()
        .map(|(t, _)| t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_shape() {
        assert_eq!(
            tokenize("GPT-4o and C++ in RAG pipelines: LangGraph v2, e2e-tests"),
            vec!["gpt-4o", "c++", "rag", "pipelines", "langgraph", "e2e-tests"]
        );
    }

    #[test]
    fn short_and_non_latin_tokens_dropped() {
        assert!(tokenize("AI ML 에이전트 on it").is_empty());
    }

    #[test]
    fn stop_words_removed() {
        assert_eq!(
            tokenize("The new Agent framework for Orchestration"),
            vec!["orchestration"]
        );
    }

    #[test]
    fn index_counts_and_total() {
        let idx = KeywordIndex::from_text("rag rag planners rag");
        assert_eq!(idx.count("rag"), 3);
        assert_eq!(idx.count("planners"), 1);
        assert_eq!(idx.count("missing"), 0);
        assert_eq!(idx.total(), 4);
        assert_eq!(idx.top(1), vec![("rag".to_string(), 3)]);
    }
}
