use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::BacktestError;
use crate::model::returns::{ReturnMatrix, ReturnSeries};

/// Date-indexed close prices, one column per ticker. Missing cells are NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceFrame {
    dates: Vec<NaiveDate>,
    tickers: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl PriceFrame {
    pub fn new(
        dates: Vec<NaiveDate>,
        tickers: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Result<Self, BacktestError> {
        if tickers.len() != columns.len() {
            return Err(BacktestError::Data(format!(
                "{} tickers but {} price columns",
                tickers.len(),
                columns.len()
            )));
        }
        for (ticker, col) in tickers.iter().zip(&columns) {
            if col.len() != dates.len() {
                return Err(BacktestError::Data(format!(
                    "column '{}' has {} rows, index has {}",
                    ticker,
                    col.len(),
                    dates.len()
                )));
            }
        }
        for (i, ticker) in tickers.iter().enumerate() {
            if tickers[..i].contains(ticker) {
                return Err(BacktestError::Data(format!("duplicate ticker '{}'", ticker)));
            }
        }
        if let Some(pair) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(BacktestError::Data(format!(
                "dates must be strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
        Ok(Self {
            dates,
            tickers,
            columns,
        })
    }

    /// Aligns per-ticker `(date, close)` points on the union of their dates.
    ///
    /// Dates a ticker has no point for are left as NaN. A later point for the
    /// same ticker and date overwrites an earlier one.
    pub fn from_series(series: Vec<(String, Vec<(NaiveDate, f64)>)>) -> Result<Self, BacktestError> {
        let mut by_ticker: Vec<(String, BTreeMap<NaiveDate, f64>)> = Vec::with_capacity(series.len());
        for (ticker, points) in series {
            by_ticker.push((ticker, points.into_iter().collect()));
        }
        let mut dates: Vec<NaiveDate> = by_ticker
            .iter()
            .flat_map(|(_, points)| points.keys().copied())
            .collect();
        dates.sort_unstable();
        dates.dedup();

        let mut tickers = Vec::with_capacity(by_ticker.len());
        let mut columns = Vec::with_capacity(by_ticker.len());
        for (ticker, points) in by_ticker {
            columns.push(
                dates
                    .iter()
                    .map(|d| points.get(d).copied().unwrap_or(f64::NAN))
                    .collect(),
            );
            tickers.push(ticker);
        }
        Self::new(dates, tickers, columns)
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn column(&self, ticker: &str) -> Option<&[f64]> {
        self.tickers
            .iter()
            .position(|t| t == ticker)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Carries the last defined price forward over missing cells.
    #[must_use]
    pub fn forward_fill(mut self) -> Self {
        for col in &mut self.columns {
            let mut last = f64::NAN;
            for v in col.iter_mut() {
                if v.is_nan() {
                    *v = last;
                } else {
                    last = *v;
                }
            }
        }
        self
    }

    /// `ln(p[t] / p[t-1])` per column; undefined values are dropped per ticker.
    pub fn log_returns(&self) -> ReturnMatrix {
        self.tickers
            .iter()
            .zip(&self.columns)
            .map(|(ticker, col)| (ticker.clone(), log_returns(col)))
            .collect()
    }
}

fn log_returns(prices: &[f64]) -> ReturnSeries {
    prices
        .windows(2)
        .map(|w| {
            if w[0] > 0.0 && w[1] > 0.0 {
                (w[1] / w[0]).ln()
            } else {
                f64::NAN
            }
        })
        .collect()
}
