use std::path::PathBuf;

use chrono::NaiveDate;
use kf_backtest::config::{Config, DataSource, DEFAULT_ALPACA_DATA_URL};

#[test]
fn parse_csv_config() {
    let toml_str = r#"
[data]
source = "csv"
csv_path = "data/prices.csv"

[forecast]
horizon = 5

[model]
r = 1e-3
q = 1e-5

[output]
results_path = "runs/results.csv"

[logging]
level = "debug"
"#;
    let config = Config::parse(toml_str).unwrap();
    assert_eq!(config.data.source, DataSource::Csv);
    assert_eq!(config.data.csv_path, Some(PathBuf::from("data/prices.csv")));
    assert_eq!(config.forecast.horizon, 5);
    assert!((config.model.r - 1e-3).abs() < f64::EPSILON);
    assert!((config.model.q - 1e-5).abs() < f64::EPSILON);
    assert_eq!(config.output.results_path, PathBuf::from("runs/results.csv"));
    assert_eq!(config.logging.level, "debug");

    let bt = config.backtest().unwrap();
    assert_eq!(bt.horizon(), 5);
}

#[test]
fn parse_alpaca_config_with_defaults() {
    let toml_str = r#"
[data]
source = "alpaca"
tickers = ["aapl", "MSFT", "AAPL"]
start = "2020-01-01"
end = "2024-01-01"

[forecast]
horizon = 10

[model]
r = 0.001
q = 0.00001
"#;
    let config = Config::parse(toml_str).unwrap();
    assert_eq!(config.data.source, DataSource::Alpaca);
    assert_eq!(
        config.data.normalized_tickers(),
        vec!["AAPL".to_string(), "MSFT".to_string()]
    );
    assert_eq!(config.data.start, NaiveDate::from_ymd_opt(2020, 1, 1));
    assert_eq!(config.data.end, NaiveDate::from_ymd_opt(2024, 1, 1));
    assert_eq!(config.data.data_base_url, DEFAULT_ALPACA_DATA_URL);
    assert_eq!(config.output.results_path, PathBuf::from("runs/results.csv"));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn parse_rejects_zero_horizon() {
    let toml_str = r#"
[data]
source = "csv"
csv_path = "p.csv"

[forecast]
horizon = 0

[model]
r = 1e-3
q = 1e-5
"#;
    assert!(Config::parse(toml_str).is_err());
}

#[test]
fn parse_rejects_non_positive_noise() {
    let toml_str = r#"
[data]
source = "csv"
csv_path = "p.csv"

[forecast]
horizon = 5

[model]
r = 0.0
q = 1e-5
"#;
    assert!(Config::parse(toml_str).is_err());
}

#[test]
fn parse_rejects_unknown_source() {
    let toml_str = r#"
[data]
source = "yahoo"

[forecast]
horizon = 5

[model]
r = 1e-3
q = 1e-5
"#;
    assert!(Config::parse(toml_str).is_err());
}

#[test]
fn parse_requires_csv_path_for_csv_source() {
    let toml_str = r#"
[data]
source = "csv"

[forecast]
horizon = 5

[model]
r = 1e-3
q = 1e-5
"#;
    assert!(Config::parse(toml_str).is_err());
}

#[test]
fn parse_requires_ordered_range_for_alpaca() {
    let toml_str = r#"
[data]
source = "alpaca"
tickers = ["AAPL"]
start = "2024-01-01"
end = "2020-01-01"

[forecast]
horizon = 5

[model]
r = 1e-3
q = 1e-5
"#;
    assert!(Config::parse(toml_str).is_err());
}
