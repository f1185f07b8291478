//! Rising keywords: a recency-delta heuristic.
//!
//! score(token) = recent_count / recent_total − overall_count / overall_total
//!
//! Both tables come from `KeywordIndex`; a zero total is treated as 1. This is
//! a simple signal for exploration, not a statistically tested trend detector.
//! Scores are always within [-1, 1].

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::analyze::keywords::KeywordIndex;
use crate::ingest::types::Record;

pub const DEFAULT_RECENT_DAYS: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RisingKeyword {
    pub token: String,
    pub score: f64,
    pub recent_count: usize,
    pub overall_count: usize,
}

/// Start of the trailing window: midnight of `today - window_days`.
/// A window reaching past the calendar range starts at `NaiveDate::MIN`.
pub fn window_cutoff(today: NaiveDate, window_days: u32) -> NaiveDateTime {
    let start = today
        .checked_sub_days(Days::new(u64::from(window_days)))
        .unwrap_or(NaiveDate::MIN);
    start.and_time(NaiveTime::default())
}

/// Records dated on or after the window cutoff.
pub fn recent_subset<'a>(
    records: &[&'a Record],
    today: NaiveDate,
    window_days: u32,
) -> Vec<&'a Record> {
    let cutoff = window_cutoff(today, window_days);
    records
        .iter()
        .copied()
        .filter(|r| r.date.is_some_and(|d| d >= cutoff))
        .collect()
}

/// Rising keywords relative to today's UTC date.
pub fn rising_keywords(records: &[&Record], window_days: u32, n: usize) -> Vec<RisingKeyword> {
    rising_keywords_at(records, Utc::now().date_naive(), window_days, n)
}

/// Rising keywords with an explicit "today", for reproducible runs.
pub fn rising_keywords_at(
    records: &[&Record],
    today: NaiveDate,
    window_days: u32,
    n: usize,
) -> Vec<RisingKeyword> {
    if !records.iter().any(|r| r.date.is_some()) {
        return Vec::new();
    }
    let recent = recent_subset(records, today, window_days);
    if recent.is_empty() {
        debug!(window_days, %today, "no records in recent window");
        return Vec::new();
    }

    let overall = KeywordIndex::from_records(records.iter().copied());
    let recent_idx = KeywordIndex::from_records(recent.iter().copied());

    let overall_total = overall.total().max(1) as f64;
    let recent_total = recent_idx.total().max(1) as f64;

    let mut scored: Vec<RisingKeyword> = recent_idx
        .iter()
        .map(|(token, rc)| {
            let ac = overall.count(token);
            RisingKeyword {
                token: token.to_string(),
                score: rc as f64 / recent_total - ac as f64 / overall_total,
                recent_count: rc,
                overall_count: ac,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(n);
    debug!(
        window_days,
        recent = recent.len(),
        total = records.len(),
        returned = scored.len(),
        "rising keywords computed"
    );
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutoff_is_midnight_window_days_back() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(
            window_cutoff(today, 30).to_string(),
            "2025-03-01 00:00:00"
        );
        assert_eq!(window_cutoff(today, 0).to_string(), "2025-03-31 00:00:00");
    }

    #[test]
    fn oversized_window_clamps_to_min_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert_eq!(
            window_cutoff(today, 200_000_000),
            NaiveDate::MIN.and_time(NaiveTime::default())
        );
        assert_eq!(window_cutoff(today, u32::MAX).date(), NaiveDate::MIN);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        assert!(rising_keywords_at(&[], today, 30, 10).is_empty());
    }
}
