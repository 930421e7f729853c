use std::time::{SystemTime, UNIX_EPOCH};

use kf_backtest::data::results::{read_results_from, write_results_to};
use kf_backtest::data::{read_results, write_results};
use kf_backtest::model::WindowResult;

fn temp_results_path(test_name: &str) -> std::path::PathBuf {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be monotonic")
        .as_nanos();
    std::env::temp_dir()
        .join(format!("kfb-{}-{}", test_name, ts))
        .join("runs")
        .join("results.csv")
}

fn rows() -> Vec<WindowResult> {
    vec![
        WindowResult {
            ticker: "AAPL".to_string(),
            start_idx: 0,
            mae: 0.25,
        },
        WindowResult {
            ticker: "AAPL".to_string(),
            start_idx: 5,
            mae: 0.5,
        },
        WindowResult {
            ticker: "MSFT".to_string(),
            start_idx: 0,
            mae: 0.125,
        },
    ]
}

#[test]
fn table_has_fixed_header_and_one_row_per_window() {
    let mut buf = Vec::new();
    write_results_to(&mut buf, &rows()).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(
        text,
        "ticker,start_idx,mae\nAAPL,0,0.25\nAAPL,5,0.5\nMSFT,0,0.125\n"
    );
}

#[test]
fn empty_table_still_has_header() {
    let mut buf = Vec::new();
    write_results_to(&mut buf, &[]).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "ticker,start_idx,mae\n");
}

#[test]
fn written_table_reads_back_in_order() {
    let mut buf = Vec::new();
    let original = vec![WindowResult {
        ticker: "X".to_string(),
        start_idx: 10,
        mae: 0.03549775982964655,
    }];
    write_results_to(&mut buf, &original).unwrap();
    let loaded = read_results_from(buf.as_slice()).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn read_rejects_table_without_mae_column() {
    let csv = "ticker,start_idx\nAAPL,0\n";
    assert!(read_results_from(csv.as_bytes()).is_err());
}

#[test]
fn write_results_creates_parent_directories() {
    let path = temp_results_path("write");
    write_results(&path, &rows()).expect("results should be written");
    let loaded = read_results(&path).expect("results should load");
    assert_eq!(loaded, rows());
    if let Some(root) = path.parent().and_then(|p| p.parent()) {
        let _ = std::fs::remove_dir_all(root);
    }
}
