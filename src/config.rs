use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::model::BacktestConfig;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
pub const DEFAULT_RESULTS_PATH: &str = "runs/results.csv";
pub const DEFAULT_ALPACA_DATA_URL: &str = "https://data.alpaca.markets";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub forecast: ForecastConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Csv,
    Alpaca,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub source: DataSource,
    #[serde(default)]
    pub csv_path: Option<PathBuf>,
    #[serde(default)]
    pub tickers: Vec<String>,
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
    #[serde(default = "default_data_base_url")]
    pub data_base_url: String,
    #[serde(skip)]
    pub api_key: String,
    #[serde(skip)]
    pub api_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    pub horizon: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub r: f64,
    pub q: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub results_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from(DEFAULT_RESULTS_PATH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

fn default_data_base_url() -> String {
    DEFAULT_ALPACA_DATA_URL.to_string()
}

impl DataConfig {
    /// Upper-cased, de-duplicated tickers in configured order.
    pub fn normalized_tickers(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for t in &self.tickers {
            let s = t.trim().to_ascii_uppercase();
            if !s.is_empty() && !out.contains(&s) {
                out.push(s);
            }
        }
        out
    }

    fn validate(&self) -> Result<()> {
        match self.source {
            DataSource::Csv => {
                if self.csv_path.is_none() {
                    bail!("data.csv_path is required when data.source = \"csv\"");
                }
            }
            DataSource::Alpaca => {
                if self.normalized_tickers().is_empty() {
                    bail!("data.tickers must list at least one ticker when data.source = \"alpaca\"");
                }
                let (Some(start), Some(end)) = (self.start, self.end) else {
                    bail!("data.start and data.end are required when data.source = \"alpaca\"");
                };
                if start >= end {
                    bail!("data.start ({}) must be before data.end ({})", start, end);
                }
            }
        }
        Ok(())
    }
}

impl Config {
    /// Loads `config/default.toml` from the working directory.
    pub fn load() -> Result<Self> {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let mut config = Self::parse(&config_str)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;

        if config.data.source == DataSource::Alpaca {
            config.data.api_key = std::env::var("ALPACA_API_KEY")
                .context("ALPACA_API_KEY not set in .env or environment")?;
            config.data.api_secret = std::env::var("ALPACA_API_SECRET")
                .context("ALPACA_API_SECRET not set in .env or environment")?;
        }

        Ok(config)
    }

    /// Parses and validates a TOML document without touching the environment.
    pub fn parse(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str).context("invalid config TOML")?;
        config.data.validate()?;
        config
            .backtest()
            .context("forecast/model parameters are invalid")?;
        Ok(config)
    }

    pub fn backtest(&self) -> Result<BacktestConfig> {
        Ok(BacktestConfig::new(
            self.forecast.horizon,
            self.model.r,
            self.model.q,
        )?)
    }
}
