//! Corpus overview: counts by source/type/domain, weekly flow, and role
//! distributions.

use std::collections::{BTreeMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::analyze::counts::OrderedCounter;
use crate::analyze::roles::Role;
use crate::analyze::trends::recent_subset;
use crate::ingest::types::{ContentType, Record};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyCount {
    pub week: String,
    pub content_type: ContentType,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorpusSummary {
    pub items: usize,
    pub distinct_sources: usize,
    pub distinct_domains: usize,
    pub latest: Option<NaiveDateTime>,
    pub by_source: Vec<(String, usize)>,
    pub by_content_type: Vec<(ContentType, usize)>,
    pub by_domain: Vec<(String, usize)>,
    pub weekly: Vec<WeeklyCount>,
}

pub fn summarize(records: &[&Record]) -> CorpusSummary {
    let by_source: OrderedCounter<String> = records.iter().map(|r| r.source.clone()).collect();
    let by_type: OrderedCounter<ContentType> = records.iter().map(|r| r.content_type).collect();
    let by_domain: OrderedCounter<String> = records
        .iter()
        .filter(|r| !r.domain.is_empty())
        .map(|r| r.domain.clone())
        .collect();

    let mut weekly: BTreeMap<(String, ContentType), usize> = BTreeMap::new();
    for r in records.iter().filter(|r| r.date.is_some()) {
        *weekly.entry((r.week.clone(), r.content_type)).or_default() += 1;
    }

    let distinct_domains = records
        .iter()
        .map(|r| r.domain.as_str())
        .collect::<HashSet<_>>()
        .len();

    CorpusSummary {
        items: records.len(),
        distinct_sources: by_source.len(),
        distinct_domains,
        latest: records.iter().filter_map(|r| r.date).max(),
        by_source: by_source.most_common(usize::MAX),
        by_content_type: by_type.most_common(usize::MAX),
        by_domain: by_domain.most_common(usize::MAX),
        weekly: weekly
            .into_iter()
            .map(|((week, content_type), count)| WeeklyCount {
                week,
                content_type,
                count,
            })
            .collect(),
    }
}

/// Count per role, most frequent first.
pub fn role_distribution(records: &[&Record]) -> Vec<(Role, usize)> {
    records
        .iter()
        .map(|r| r.role)
        .collect::<OrderedCounter<Role>>()
        .most_common(usize::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleComparison {
    pub role: Role,
    pub overall: usize,
    pub recent: usize,
}

/// Per role: overall count vs. count inside the trailing window. Ordered as
/// `role_distribution`.
pub fn role_comparison(
    records: &[&Record],
    today: NaiveDate,
    window_days: u32,
) -> Vec<RoleComparison> {
    let recent: OrderedCounter<Role> = recent_subset(records, today, window_days)
        .into_iter()
        .map(|r| r.role)
        .collect();
    role_distribution(records)
        .into_iter()
        .map(|(role, overall)| RoleComparison {
            role,
            overall,
            recent: recent.get(&role),
        })
        .collect()
}
