//! Rolling-window backtest of the Kalman forecaster.
//!
//! Each ticker's return series is cut into consecutive, non-overlapping
//! `(train, test)` pairs of `horizon` points each. Every training slice is
//! filtered by a freshly initialized [`KalmanState`]; nothing is carried from
//! one window to the next or from one ticker to the next.

use crate::error::BacktestError;
use crate::estimator::{run_forecast, KalmanState};
use crate::model::{BacktestConfig, ReturnMatrix, TickerSummary, WindowResult};

/// One train/test split starting at `start_idx`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSplit<'a> {
    pub start_idx: usize,
    pub train: &'a [f64],
    pub test: &'a [f64],
}

/// Iterator over the train/test splits of a series.
///
/// A split starting at `i` is produced while `i + 2 * horizon < len`, so the
/// last full train/test pair that ends exactly at the end of the series is
/// not evaluated, and any trailing partial window is dropped.
#[derive(Debug, Clone)]
pub struct WindowSplits<'a> {
    series: &'a [f64],
    horizon: usize,
    next: usize,
}

impl<'a> WindowSplits<'a> {
    pub fn new(series: &'a [f64], horizon: usize) -> Result<Self, BacktestError> {
        if horizon == 0 {
            return Err(BacktestError::InvalidParameter(
                "horizon must be > 0".to_string(),
            ));
        }
        Ok(Self {
            series,
            horizon,
            next: 0,
        })
    }
}

impl<'a> Iterator for WindowSplits<'a> {
    type Item = WindowSplit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.next;
        let h = self.horizon;
        let end = i.checked_add(h.checked_mul(2)?)?;
        if end >= self.series.len() {
            return None;
        }
        self.next = i + h;
        Some(WindowSplit {
            start_idx: i,
            train: &self.series[i..i + h],
            test: &self.series[i + h..end],
        })
    }
}

/// Mean absolute error between equally long forecast and actual slices.
pub fn mean_absolute_error(forecast: &[f64], actual: &[f64]) -> f64 {
    let n = forecast.len().min(actual.len());
    if n == 0 {
        return 0.0;
    }
    let total: f64 = forecast
        .iter()
        .zip(actual)
        .map(|(f, a)| (f - a).abs())
        .sum();
    total / n as f64
}

/// Scores every window of one ticker's series.
pub fn backtest_series(
    ticker: &str,
    series: &[f64],
    cfg: &BacktestConfig,
) -> Result<Vec<WindowResult>, BacktestError> {
    let mut out = Vec::new();
    for split in WindowSplits::new(series, cfg.horizon())? {
        let state = KalmanState::new(cfg.measure_var(), cfg.process_var())?;
        let run = run_forecast(state, split.train, cfg.horizon());
        out.push(WindowResult {
            ticker: ticker.to_string(),
            start_idx: split.start_idx,
            mae: mean_absolute_error(&run.forecast, split.test),
        });
    }
    Ok(out)
}

/// Runs the rolling backtest over every ticker in `returns`, in ticker order
/// then ascending window start.
pub fn rolling_backtest(
    returns: &ReturnMatrix,
    cfg: &BacktestConfig,
) -> Result<Vec<WindowResult>, BacktestError> {
    let mut results = Vec::new();
    for (ticker, series) in returns.iter() {
        let windows = backtest_series(ticker, series.as_slice(), cfg)?;
        if windows.is_empty() {
            tracing::debug!(
                ticker,
                observations = series.len(),
                horizon = cfg.horizon(),
                "Series too short for a single window"
            );
        }
        results.extend(windows);
    }
    tracing::debug!(
        tickers = returns.len(),
        windows = results.len(),
        "Rolling backtest finished"
    );
    Ok(results)
}

/// Mean MAE per ticker, in first-appearance order.
pub fn summarize(results: &[WindowResult]) -> Vec<TickerSummary> {
    let mut out: Vec<(String, usize, f64)> = Vec::new();
    for r in results {
        match out.iter_mut().find(|(t, _, _)| *t == r.ticker) {
            Some((_, n, sum)) => {
                *n += 1;
                *sum += r.mae;
            }
            None => out.push((r.ticker.clone(), 1, r.mae)),
        }
    }
    out.into_iter()
        .map(|(ticker, windows, sum)| TickerSummary {
            ticker,
            windows,
            mean_mae: sum / windows as f64,
        })
        .collect()
}
