// tests/ingest_encoding.rs
use agent_trend_analyzer::ingest::reader::{read_table_bytes, read_table_path};
use agent_trend_analyzer::{load_corpus, AnalysisError, IngestError};
use encoding_rs::EUC_KR;
use std::fs;

#[test]
fn utf8_is_tried_first() {
    let out = read_table_bytes("mem", "Title,Link\n에이전트,http://x\n".as_bytes()).unwrap();
    assert_eq!(out.encoding, "UTF-8");
    assert_eq!(out.table.rows[0][0].as_deref(), Some("에이전트"));
}

#[test]
fn cp949_bytes_fall_back_to_euc_kr() {
    let (bytes, _, had_errors) = EUC_KR.encode("Title,Link\n에이전트 오케스트레이션,http://x\n");
    assert!(!had_errors);
    let out = read_table_bytes("legacy.csv", &bytes).unwrap();
    assert_eq!(out.encoding, "EUC-KR");
    assert_eq!(
        out.table.rows[0][0].as_deref(),
        Some("에이전트 오케스트레이션")
    );
}

#[test]
fn latin1_is_the_last_resort() {
    let out = read_table_bytes("mem", b"Title,Link\ncaf\xe9,http://x\n").unwrap();
    assert_eq!(out.encoding, "windows-1252");
    assert_eq!(out.table.rows[0][0].as_deref(), Some("café"));
}

#[test]
fn file_path_read_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("feed.csv");
    fs::write(&p, "Title,Source,Date,Description,Link\nA,News,,d,http://a.com/1\n").unwrap();
    let out = read_table_path(&p).unwrap();
    assert_eq!(out.table.len(), 1);

    let missing = dir.path().join("nope.csv");
    match load_corpus(&missing) {
        Err(AnalysisError::Ingest(IngestError::Read { path, .. })) => {
            assert!(path.ends_with("nope.csv"))
        }
        other => panic!("expected read error, got {other:?}"),
    }
}

#[test]
fn undecodable_reports_last_failure() {
    let err = read_table_bytes("blank.csv", b"\n\n").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("blank.csv"));
    assert!(msg.contains("windows-1252"));
}
