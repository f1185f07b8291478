// tests/keywords_trends.rs
use agent_trend_analyzer::analyze::keywords::{is_stop_word, KeywordIndex};
use agent_trend_analyzer::{build_corpus, rising_keywords_at, top_keywords, Corpus, RoleTaxonomy};
use chrono::NaiveDate;

fn corpus(body: &str) -> Corpus {
    let csv = format!("Title,Source,Date,Description,Link\n{body}");
    build_corpus("mem", csv.as_bytes(), RoleTaxonomy::builtin())
        .unwrap()
        .0
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
}

#[test]
fn stop_words_never_surface() {
    let c = corpus(
        "\
The AI agent model for the system,News,2025-06-01,paper research data framework,http://a/1
Agents agents agents LLM tool,News,2025-06-02,evaluation benchmark release update,http://a/2
Memory retrieval for agents,News,2025-06-03,the agent uses memory,http://a/3
",
    );
    let top = top_keywords(c.iter(), 100);
    assert!(!top.is_empty());
    for (t, _) in &top {
        assert!(!is_stop_word(t), "stop word leaked: {t}");
    }
    assert_eq!(top[0], ("memory".to_string(), 2));
}

#[test]
fn counts_use_title_and_description() {
    let c = corpus("Alpha,News,,beta beta,http://a/1\nbeta,News,,gamma,http://a/2\n");
    let idx = KeywordIndex::from_records(c.iter());
    assert_eq!(idx.count("alpha"), 1);
    assert_eq!(idx.count("beta"), 3);
    assert_eq!(idx.total(), 5);
    assert_eq!(
        top_keywords(c.iter(), 2),
        vec![("beta".to_string(), 3), ("alpha".to_string(), 1)]
    );
}

#[test]
fn no_dates_or_empty_window_gives_nothing() {
    let undated = corpus("Retrieval memory,News,,,http://a/1\n");
    assert!(rising_keywords_at(&undated.all(), today(), 30, 10).is_empty());

    let old = corpus("Retrieval memory,News,2020-01-01,,http://a/1\n");
    assert!(rising_keywords_at(&old.all(), today(), 30, 10).is_empty());
}

#[test]
fn scores_bounded_and_emergence_positive() {
    let c = corpus(
        "\
Retrieval pipelines,News,2024-01-01,retrieval retrieval,http://a/1
Retrieval memory,News,2024-02-01,,http://a/2
Swarm coordination,News,2025-06-20,swarm memory,http://a/3
Undated swarm,News,,,http://a/4
",
    );
    let rising = rising_keywords_at(&c.all(), today(), 30, 50);
    assert!(!rising.is_empty());
    for r in &rising {
        assert!((-1.0..=1.0).contains(&r.score), "{r:?}");
        assert!(r.recent_count <= r.overall_count);
    }
    let swarm = rising.iter().find(|r| r.token == "swarm").unwrap();
    assert!(swarm.score > 0.0);
    assert_eq!((swarm.recent_count, swarm.overall_count), (2, 3));

    let coord = rising.iter().find(|r| r.token == "coordination").unwrap();
    assert!(coord.score > 0.0);

    // Ranked descending.
    assert!(rising.windows(2).all(|w| w[0].score >= w[1].score));
}

#[test]
fn identical_distribution_scores_zero() {
    let c = corpus(
        "\
Retrieval memory,News,2025-06-20,,http://a/1
Memory swarm,News,2025-06-25,,http://a/2
",
    );
    let rising = rising_keywords_at(&c.all(), today(), 30, 10);
    assert_eq!(rising.len(), 3);
    assert!(rising.iter().all(|r| r.score.abs() < 1e-12));
}

#[test]
fn result_size_is_capped() {
    let c = corpus("Alpha beta gamma delta,News,2025-06-29,,http://a/1\nOld epsilon,News,2020-01-01,,http://a/2\n");
    assert_eq!(rising_keywords_at(&c.all(), today(), 7, 2).len(), 2);
}

#[test]
fn huge_window_counts_every_dated_record() {
    let c = corpus("Swarm memory,News,2025-06-20,,http://a/1\nOld retrieval,News,1990-01-01,,http://a/2\nUndated swarm,News,,,http://a/3\n");
    let rising = rising_keywords_at(&c.all(), today(), 200_000_000, 10);
    let retrieval = rising.iter().find(|r| r.token == "retrieval").unwrap();
    assert_eq!((retrieval.recent_count, retrieval.overall_count), (1, 1));

    let cmp = agent_trend_analyzer::analyze::role_comparison(&c.all(), today(), u32::MAX);
    assert_eq!(cmp.iter().map(|r| r.recent).sum::<usize>(), 2);
}
