pub mod alpaca;
pub mod csv_prices;
pub mod results;

use anyhow::{Context, Result};

use crate::config::{DataConfig, DataSource};
use crate::model::PriceFrame;

pub use alpaca::AlpacaBarsClient;
pub use csv_prices::{load_price_csv, read_price_csv};
pub use results::{read_results, write_results, RESULT_COLUMNS};

/// Loads the configured price table.
pub fn load_prices(cfg: &DataConfig) -> Result<PriceFrame> {
    match cfg.source {
        DataSource::Csv => {
            let path = cfg
                .csv_path
                .as_deref()
                .context("data.csv_path is not set")?;
            let frame = load_price_csv(path)
                .with_context(|| format!("failed to load prices from {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                rows = frame.len(),
                tickers = frame.tickers().len(),
                "Loaded price table"
            );
            Ok(frame)
        }
        DataSource::Alpaca => {
            let (start, end) = cfg
                .start
                .zip(cfg.end)
                .context("data.start and data.end are required for alpaca")?;
            let client = AlpacaBarsClient::new(&cfg.data_base_url, &cfg.api_key, &cfg.api_secret)
                .context("failed to build Alpaca HTTP client")?;
            let tickers = cfg.normalized_tickers();
            let frame = client
                .price_frame(&tickers, start, end)
                .context("failed to fetch daily bars from Alpaca")?;
            tracing::info!(
                url = %cfg.data_base_url,
                %start,
                %end,
                rows = frame.len(),
                tickers = frame.tickers().len(),
                "Fetched price table"
            );
            Ok(frame)
        }
    }
}
