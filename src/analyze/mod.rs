// src/analyze/mod.rs
//! Analytics over a normalized corpus: roles, keywords, rising trends, triad
//! lookup, filtering and summaries. Everything here is a pure function of its
//! inputs; records are only borrowed.

pub mod counts;
pub mod filters;
pub mod keywords;
pub mod roles;
pub mod summary;
pub mod trends;
pub mod triad;

// Re-export convenient types.
pub use crate::analyze::filters::CorpusFilter;
pub use crate::analyze::keywords::{suggest_keyword, tokenize, top_keywords, KeywordIndex};
pub use crate::analyze::roles::{classify_role, Role, RoleTaxonomy, SkillSet};
pub use crate::analyze::summary::{role_comparison, role_distribution, summarize, CorpusSummary};
pub use crate::analyze::trends::{rising_keywords, rising_keywords_at, RisingKeyword};
pub use crate::analyze::triad::{triad_pick, TriadPick};
