// src/config/analyzer.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze::trends::DEFAULT_RECENT_DAYS;

pub const ENV_CONFIG_PATH: &str = "ANALYZER_CONFIG_PATH";
pub const ENV_DATA_PATH: &str = "AI_AGENT_CSV_PATH";
pub const DEFAULT_DATA_PATH: &str = "AI_Agents_Ecosystem_2026.csv";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}
fn default_recent_days() -> u32 {
    DEFAULT_RECENT_DAYS
}
fn default_rising_n() -> usize {
    15
}
fn default_top_n() -> usize {
    25
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsConfig {
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,
    #[serde(default = "default_rising_n")]
    pub rising_n: usize,
}

impl Default for TrendsConfig {
    fn default() -> Self {
        Self {
            recent_days: default_recent_days(),
            rising_n: default_rising_n(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordsConfig {
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    #[serde(default)]
    pub trends: TrendsConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            trends: TrendsConfig::default(),
            keywords: KeywordsConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading analyzer config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let mut cfg = parse_config(&content, ext.as_str())?;
        cfg.apply_env();
        Ok(cfg)
    }

    /// Load using env var + fallbacks:
    /// 1) $ANALYZER_CONFIG_PATH
    /// 2) config/analyzer.toml
    /// 3) config/analyzer.json
    /// 4) built-in defaults
    ///
    /// `$AI_AGENT_CSV_PATH` overrides `data_path` in every case.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            } else {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
        }
        for candidate in ["config/analyzer.toml", "config/analyzer.json"] {
            let p = PathBuf::from(candidate);
            if p.exists() {
                return Self::load_from(&p);
            }
        }
        let mut cfg = Self::default();
        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Ok(p) = std::env::var(ENV_DATA_PATH) {
            if !p.trim().is_empty() {
                self.data_path = PathBuf::from(p.trim());
            }
        }
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<AnalyzerConfig> {
    if hint_ext == "json" {
        return serde_json::from_str(s).context("parsing analyzer config as JSON");
    }
    if hint_ext == "toml" {
        return toml::from_str(s).context("parsing analyzer config as TOML");
    }
    // Unknown extension: sniff.
    if let Ok(v) = serde_json::from_str(s) {
        return Ok(v);
    }
    toml::from_str(s).map_err(|_| anyhow!("unsupported analyzer config format"))
}
