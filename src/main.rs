//! Agent trend analyzer CLI entrypoint.
//! Loads the corpus, runs the analytics and prints a JSON report to stdout.
//!
//! Logs go to stderr; filter with `RUST_LOG` (default `agent_trend_analyzer=info,warn`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use agent_trend_analyzer::analyze::summary::RoleComparison;
use agent_trend_analyzer::analyze::{
    rising_keywords_at, role_comparison, role_distribution, summarize, suggest_keyword,
    top_keywords, triad_pick, CorpusSummary, RisingKeyword, Role,
};
use agent_trend_analyzer::config::AnalyzerConfig;
use agent_trend_analyzer::ingest::normalize::NormalizeStats;
use agent_trend_analyzer::{ContentType, CorpusCache, Record};

#[derive(Debug, Parser)]
#[command(name = "agent-trend-analyzer", version, about)]
struct Args {
    /// Input CSV (Title, Source, Date, Description, Link).
    #[arg(long, env = "AI_AGENT_CSV_PATH")]
    path: Option<PathBuf>,

    /// Config file (TOML or JSON).
    #[arg(long, env = "ANALYZER_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Keyword for the triad lookup. Defaults to the top keyword of the most
    /// recent record.
    #[arg(long)]
    keyword: Option<String>,

    /// Recency window for rising keywords, in days.
    #[arg(long)]
    window_days: Option<u32>,

    /// Number of top keywords.
    #[arg(long)]
    top: Option<usize>,

    /// Number of rising keywords.
    #[arg(long)]
    rising: Option<usize>,

    /// Emit JSON logs instead of compact text.
    #[arg(long)]
    log_json: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("agent_trend_analyzer=info,warn"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

#[derive(Serialize)]
struct TriadReport<'a> {
    keyword: String,
    picks: Vec<(ContentType, &'a Record)>,
    matches: usize,
}

#[derive(Serialize)]
struct Report<'a> {
    fingerprint: Option<String>,
    normalize: Option<NormalizeStats>,
    summary: CorpusSummary,
    top_keywords: Vec<(String, usize)>,
    rising_keywords: Vec<RisingKeyword>,
    roles: Vec<(Role, usize)>,
    role_comparison: Vec<RoleComparison>,
    triad: Option<TriadReport<'a>>,
}

fn resolve_config(args: &Args) -> Result<AnalyzerConfig> {
    let mut cfg = match &args.config {
        Some(p) => AnalyzerConfig::load_from(p)?,
        None => AnalyzerConfig::load_default()?,
    };
    if let Some(p) = &args.path {
        cfg.data_path = p.clone();
    }
    if let Some(d) = args.window_days {
        cfg.trends.recent_days = d;
    }
    if let Some(n) = args.top {
        cfg.keywords.top_n = n;
    }
    if let Some(n) = args.rising {
        cfg.trends.rising_n = n;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    init_tracing(args.log_json);

    let cfg = resolve_config(&args)?;
    tracing::info!(path = %cfg.data_path.display(), "loading corpus");

    let cache = CorpusCache::default();
    let corpus = cache
        .load_path(&cfg.data_path)
        .with_context(|| format!("failed to build corpus from {}", cfg.data_path.display()))?;

    let today: NaiveDate = Utc::now().date_naive();
    let all = corpus.all();

    let keyword = args.keyword.clone().or_else(|| {
        all.iter()
            .copied()
            .filter(|r| r.date.is_some())
            .max_by_key(|r| r.date)
            .or_else(|| all.first().copied())
            .and_then(suggest_keyword)
    });
    let triad = keyword.map(|k| {
        let t = triad_pick(&all, &k);
        TriadReport {
            keyword: k,
            picks: t.picks.into_iter().collect(),
            matches: t.matches.len(),
        }
    });

    let report = Report {
        fingerprint: cache.fingerprint(),
        normalize: cache.stats(),
        summary: summarize(&all),
        top_keywords: top_keywords(all.iter().copied(), cfg.keywords.top_n),
        rising_keywords: rising_keywords_at(
            &all,
            today,
            cfg.trends.recent_days,
            cfg.trends.rising_n,
        ),
        roles: role_distribution(&all),
        role_comparison: role_comparison(&all, today, cfg.trends.recent_days),
        triad,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
