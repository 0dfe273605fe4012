//! Snapshot replacement and history growth across repeated runs.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tracker::{
    AggregateResult, ExtractError, OutputConfig, Quote, SiteError, SiteOutcome, Snapshot,
    Storage,
};

fn tmp_output(name: &str) -> OutputConfig {
    let mut dir = std::env::temp_dir();
    dir.push(format!("pricewatch_storage_{name}"));
    let _ = fs::remove_dir_all(&dir);
    OutputConfig {
        data_dir: dir,
        ..OutputConfig::default()
    }
}

fn result_with_prices(prices: &[(&str, &str)]) -> AggregateResult {
    let mut result = AggregateResult::new("Samsung Galaxy S23", Utc::now());
    for (site, price) in prices {
        result.record(SiteOutcome::Success(Quote::new(
            *site,
            format!("Galaxy S23 at {site}"),
            *price,
            format!("https://{site}/galaxy-s23"),
        )));
    }
    result
}

#[test]
fn snapshot_holds_only_the_latest_run() {
    let output = tmp_output("snapshot_replace");
    let storage = Storage::new(&output);

    storage
        .persist(&result_with_prices(&[("Amazon.it", "€499,00")]))
        .unwrap();
    storage
        .persist(&result_with_prices(&[
            ("Amazon.it", "€482,00"),
            ("Phoneclick.it", "€485,00"),
        ]))
        .unwrap();

    let raw = fs::read_to_string(output.snapshot_path()).unwrap();
    let snapshot: Snapshot = serde_json::from_str(&raw).unwrap();

    assert_eq!(snapshot.product, "Samsung Galaxy S23");
    assert_eq!(snapshot.prices.len(), 2);
    // Display notation survives in the snapshot, and the first run's
    // €499,00 is gone
    assert_eq!(snapshot.prices[0].price, "€482,00");
    assert_eq!(snapshot.prices[1].price, "€485,00");

    // No temporary sibling left behind
    assert!(!output.snapshot_path().with_extension("json.tmp").exists());
}

#[test]
fn history_accumulates_with_a_single_header() {
    let output = tmp_output("history_growth");
    let storage = Storage::new(&output);

    let runs = [
        result_with_prices(&[("Amazon.it", "€482,00"), ("Phoneclick.it", "€485,00")]),
        result_with_prices(&[("Amazon.it", "€481,00")]),
        result_with_prices(&[("Amazon.it", "€480,00"), ("Phoneclick.it", "€483,00")]),
    ];
    for run in &runs {
        storage.persist(run).unwrap();
    }

    let raw = fs::read_to_string(output.history_path()).unwrap();
    let lines: Vec<&str> = raw.lines().collect();

    assert_eq!(lines[0], "timestamp,site,title,price,url");
    // One header plus 2 + 1 + 2 rows
    assert_eq!(lines.len(), 6);
    assert!(!lines[1..].iter().any(|l| l.starts_with("timestamp,")));
}

#[test]
fn history_rows_use_normalized_prices() {
    let output = tmp_output("history_normalized");
    let storage = Storage::new(&output);

    let report = storage
        .persist(&result_with_prices(&[
            ("Amazon.it", "€482,00"),
            ("Phoneclick.it", "€485,00"),
            ("Teknozone.it", "€1.486,50"),
        ]))
        .unwrap();
    assert_eq!(report.history_rows, 3);

    let raw = fs::read_to_string(output.history_path()).unwrap();
    let mut rows = raw.lines().skip(1);
    assert!(rows.next().unwrap().contains(",482.00,"));
    assert!(rows.next().unwrap().contains(",485.00,"));
    assert!(rows.next().unwrap().contains(",1486.50,"));

    // The display string stays locale-formatted in the snapshot
    let raw = fs::read_to_string(output.snapshot_path()).unwrap();
    assert!(raw.contains("€1.486,50"));
    assert!(!raw.contains("1486.50"));
}

#[test]
fn failed_sites_never_reach_the_history() {
    let output = tmp_output("history_errors");
    let storage = Storage::new(&output);

    let mut result = result_with_prices(&[("Amazon.it", "€482,00"), ("Teknozone.it", "€486,00")]);
    result.record(SiteOutcome::Failure {
        site: "Phoneclick.it".to_string(),
        error: SiteError::Extract(ExtractError::PriceNotFound),
    });

    let report = storage.persist(&result).unwrap();
    assert_eq!(report.history_rows, 2);

    let raw = fs::read_to_string(output.history_path()).unwrap();
    // Header plus one row per quote, none for the failure
    assert_eq!(raw.lines().count(), 3);
    assert!(!raw.contains("Phoneclick.it"));
}

#[test]
fn empty_run_persists_an_empty_snapshot() {
    let output = tmp_output("empty_run");
    let storage = Storage::new(&output);

    storage
        .persist(&AggregateResult::new("Samsung Galaxy S23", Utc::now()))
        .unwrap();

    let raw = fs::read_to_string(output.snapshot_path()).unwrap();
    let snapshot: Snapshot = serde_json::from_str(&raw).unwrap();
    assert!(snapshot.prices.is_empty());
}

#[test]
fn previous_prices_round_trip() {
    let output = tmp_output("previous_prices");
    let storage = Storage::new(&output);

    // Nothing on disk yet: a first run
    assert!(storage.previous_prices().is_empty());

    storage
        .persist(&result_with_prices(&[
            ("Amazon.it", "€482,00"),
            ("Phoneclick.it", "€485,50"),
        ]))
        .unwrap();

    let previous = storage.previous_prices();
    assert_eq!(previous.len(), 2);
    assert_eq!(previous["Amazon.it"], 482.0);
    assert_eq!(previous["Phoneclick.it"], 485.5);
}

#[test]
fn persisting_into_a_file_path_fails_loudly() {
    let mut dir = std::env::temp_dir();
    dir.push("pricewatch_storage_not_a_dir");
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    // Occupy the data directory path with a plain file
    let blocker = dir.join("data");
    fs::write(&blocker, "in the way").unwrap();

    let output = OutputConfig {
        data_dir: blocker,
        ..OutputConfig::default()
    };

    let result = Storage::new(&output).persist(&result_with_prices(&[("Amazon.it", "€482,00")]));
    assert!(result.is_err());
}
