// src/config/mod.rs
pub mod analyzer;

pub use analyzer::{AnalyzerConfig, KeywordsConfig, TrendsConfig};
