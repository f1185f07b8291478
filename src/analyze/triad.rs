//! Triad lookup: one paper, one news item and one job posting around a
//! shared keyword.

use std::collections::BTreeMap;

use crate::ingest::types::{ContentType, Record};

#[derive(Debug, Clone, Default)]
pub struct TriadPick<'a> {
    /// Most recent match per content type; types without a match are absent.
    pub picks: BTreeMap<ContentType, &'a Record>,
    /// Every record whose title or description contains the keyword.
    pub matches: Vec<&'a Record>,
}

impl<'a> TriadPick<'a> {
    pub fn get(&self, ct: ContentType) -> Option<&'a Record> {
        self.picks.get(&ct).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Case-insensitive substring match on title/description, then the latest
/// dated record per content type. Undated records rank below dated ones;
/// among equals the earliest in input order wins. A blank keyword matches
/// nothing.
pub fn triad_pick<'a>(records: &[&'a Record], keyword: &str) -> TriadPick<'a> {
    let key = keyword.trim().to_lowercase();
    if key.is_empty() {
        return TriadPick::default();
    }

    let matches: Vec<&'a Record> = records
        .iter()
        .copied()
        .filter(|r| r.mentions(&key))
        .collect();

    let mut picks: BTreeMap<ContentType, &'a Record> = BTreeMap::new();
    for &r in &matches {
        // Option ordering puts None below Some, so dated beats undated.
        let newer = picks
            .get(&r.content_type)
            .map_or(true, |best| r.date > best.date);
        if newer {
            picks.insert(r.content_type, r);
        }
    }

    TriadPick { picks, matches }
}
