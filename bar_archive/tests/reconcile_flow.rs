//! End-to-end reconciliation runs against an in-memory store and a scripted
//! feed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use bar_archive::{
    codec,
    config::ArchiveConfig,
    reconcile::{FetchWindow, Reconciler},
    report::{FailureKind, SymbolOutcome},
    store::{MemoryStore, ObjectStore},
};
use market_data_feed::{
    models::{raw_bar::RawBar, request::FetchRequest},
    providers::{BarFeed, FetchError},
};

/// Feed that replays a canned response per symbol. Symbols with no entry get
/// an empty batch; `Err` entries become API errors.
struct ScriptedFeed {
    responses: HashMap<String, Result<Vec<RawBar>, String>>,
}

impl ScriptedFeed {
    fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    fn with_bars(mut self, symbol: &str, bars: Vec<RawBar>) -> Self {
        self.responses.insert(symbol.to_string(), Ok(bars));
        self
    }

    fn with_error(mut self, symbol: &str, message: &str) -> Self {
        self.responses
            .insert(symbol.to_string(), Err(message.to_string()));
        self
    }
}

#[async_trait]
impl BarFeed for ScriptedFeed {
    async fn fetch_daily(&self, request: &FetchRequest) -> Result<Vec<RawBar>, FetchError> {
        match self.responses.get(&request.symbol) {
            Some(Ok(bars)) => Ok(bars.clone()),
            Some(Err(message)) => Err(FetchError::Api(message.clone())),
            None => Ok(vec![]),
        }
    }
}

fn raw(symbol: &str, date: &str, close: f64) -> RawBar {
    RawBar {
        symbol: symbol.to_string(),
        date: date.to_string(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 5_000.0,
    }
}

fn config(symbols: &[&str]) -> ArchiveConfig {
    ArchiveConfig {
        symbols: symbols.iter().map(|s| s.to_string()).collect(),
        days_to_fetch: 7,
        data_dir: "unused".into(),
        secrets_file: None,
    }
}

fn window() -> FetchWindow {
    FetchWindow {
        start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
    }
}

#[tokio::test]
async fn first_run_writes_a_sorted_artifact() {
    let store = Arc::new(MemoryStore::new());
    let feed = ScriptedFeed::new().with_bars(
        "AAPL",
        // Deliberately unordered; the engine must sort.
        vec![raw("AAPL", "2024-01-03", 101.0), raw("AAPL", "2024-01-02", 100.0)],
    );

    let reconciler = Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]));
    let report = reconciler.run(window()).await.unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(
        report.outcomes()["AAPL"],
        SymbolOutcome::Success {
            rows_before: 0,
            rows_added: 2,
            rows_overwritten: 0,
        }
    );

    let artifact = store.get("AAPL.csv").expect("artifact written");
    let expected = "date,open,high,low,close,volume\n\
                    2024-01-02,99.0000,101.0000,98.0000,100.0000,5000\n\
                    2024-01-03,100.0000,102.0000,99.0000,101.0000,5000\n";
    assert_eq!(std::str::from_utf8(&artifact).unwrap(), expected);
}

#[tokio::test]
async fn rerunning_the_same_batch_is_byte_identical() {
    let store = Arc::new(MemoryStore::new());
    let bars = vec![raw("AAPL", "2024-01-02", 100.0), raw("AAPL", "2024-01-03", 101.0)];

    let feed = ScriptedFeed::new().with_bars("AAPL", bars.clone());
    let reconciler = Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]));

    reconciler.run(window()).await.unwrap();
    let first = store.get("AAPL.csv").unwrap();

    let report = reconciler.run(window()).await.unwrap();
    let second = store.get("AAPL.csv").unwrap();

    assert_eq!(first, second);
    assert_eq!(
        report.outcomes()["AAPL"],
        SymbolOutcome::Success {
            rows_before: 2,
            rows_added: 0,
            rows_overwritten: 2,
        }
    );
}

#[tokio::test]
async fn corrected_bar_overwrites_the_stored_one() {
    let store = Arc::new(MemoryStore::new());

    let feed = ScriptedFeed::new().with_bars("AAPL", vec![raw("AAPL", "2024-01-02", 100.0)]);
    Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]))
        .run(window())
        .await
        .unwrap();

    // The provider resends 2024-01-02 with a settled close.
    let feed = ScriptedFeed::new().with_bars(
        "AAPL",
        vec![raw("AAPL", "2024-01-02", 105.0), raw("AAPL", "2024-01-03", 101.0)],
    );
    Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]))
        .run(window())
        .await
        .unwrap();

    let dataset = codec::decode("AAPL", &store.get("AAPL.csv").unwrap()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.bars()[0].close, 105.0);
}

#[tokio::test]
async fn one_symbol_failing_does_not_stop_the_run() {
    let store = Arc::new(MemoryStore::new());
    let feed = ScriptedFeed::new()
        .with_error("AAPL", "rate limited")
        .with_bars("MSFT", vec![raw("MSFT", "2024-01-02", 370.0)]);

    let reconciler = Reconciler::new(feed, Arc::clone(&store), config(&["AAPL", "MSFT"]));
    let report = reconciler.run(window()).await.unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    match &report.outcomes()["AAPL"] {
        SymbolOutcome::Failed { kind, message } => {
            assert_eq!(*kind, FailureKind::Fetch);
            assert!(message.contains("rate limited"));
        }
        other => panic!("expected AAPL failure, got {other:?}"),
    }
    assert!(store.get("AAPL.csv").is_none());
    assert!(store.get("MSFT.csv").is_some());
}

#[tokio::test]
async fn malformed_batch_leaves_the_artifact_untouched() {
    let store = Arc::new(MemoryStore::new());

    let feed = ScriptedFeed::new().with_bars("AAPL", vec![raw("AAPL", "2024-01-02", 100.0)]);
    Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]))
        .run(window())
        .await
        .unwrap();
    let before = store.get("AAPL.csv").unwrap();

    let mut bad = raw("AAPL", "2024-01-03", 101.0);
    bad.volume = -1.0;
    let feed = ScriptedFeed::new().with_bars("AAPL", vec![bad]);
    let report = Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]))
        .run(window())
        .await
        .unwrap();

    match &report.outcomes()["AAPL"] {
        SymbolOutcome::Failed { kind, .. } => assert_eq!(*kind, FailureKind::Parse),
        other => panic!("expected parse failure, got {other:?}"),
    }
    assert_eq!(store.get("AAPL.csv").unwrap(), before);
}

#[tokio::test]
async fn mismatched_feed_symbol_is_rejected_without_a_write() {
    let store = Arc::new(MemoryStore::new());
    let feed = ScriptedFeed::new().with_bars("AAPL", vec![raw("GOOGL", "2024-01-02", 140.0)]);

    let report = Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]))
        .run(window())
        .await
        .unwrap();

    match &report.outcomes()["AAPL"] {
        SymbolOutcome::Failed { kind, .. } => assert_eq!(*kind, FailureKind::SymbolMismatch),
        other => panic!("expected symbol mismatch, got {other:?}"),
    }
    assert!(store.get("AAPL.csv").is_none());
}

#[tokio::test]
async fn corrupt_stored_artifact_is_skipped_not_repaired() {
    let store = Arc::new(MemoryStore::new());
    let corrupt = b"date,open,high,low,close,volume\n2024-01-02,1.0,2.0\n".to_vec();
    store.write("AAPL.csv", &corrupt).await.unwrap();

    let feed = ScriptedFeed::new().with_bars("AAPL", vec![raw("AAPL", "2024-01-03", 101.0)]);
    let report = Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]))
        .run(window())
        .await
        .unwrap();

    match &report.outcomes()["AAPL"] {
        SymbolOutcome::Failed { kind, .. } => assert_eq!(*kind, FailureKind::CorruptData),
        other => panic!("expected corrupt-data failure, got {other:?}"),
    }
    // The corrupt artifact is surfaced, never rewritten behind the caller's
    // back.
    assert_eq!(store.get("AAPL.csv").unwrap(), corrupt);
}

#[tokio::test]
async fn empty_fetch_window_still_rewrites_identically() {
    let store = Arc::new(MemoryStore::new());

    let feed = ScriptedFeed::new().with_bars("AAPL", vec![raw("AAPL", "2024-01-02", 100.0)]);
    Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]))
        .run(window())
        .await
        .unwrap();
    let before = store.get("AAPL.csv").unwrap();

    // No entry for AAPL means the feed returns an empty batch.
    let feed = ScriptedFeed::new();
    let report = Reconciler::new(feed, Arc::clone(&store), config(&["AAPL"]))
        .run(window())
        .await
        .unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(store.get("AAPL.csv").unwrap(), before);
}
