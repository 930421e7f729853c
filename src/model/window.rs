use serde::{Deserialize, Serialize};

use crate::error::BacktestError;

/// One evaluated train/test window. Field names are the result-table columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowResult {
    pub ticker: String,
    pub start_idx: usize,
    pub mae: f64,
}

/// Run-wide backtest parameters, validated on construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BacktestConfig {
    horizon: usize,
    measure_var: f64,
    process_var: f64,
}

impl BacktestConfig {
    /// `horizon` is both the train/test window length and the forecast length.
    /// `measure_var` is R, `process_var` is Q.
    pub fn new(horizon: usize, measure_var: f64, process_var: f64) -> Result<Self, BacktestError> {
        if horizon == 0 {
            return Err(BacktestError::InvalidParameter(
                "horizon must be > 0".to_string(),
            ));
        }
        for (name, v) in [("R", measure_var), ("Q", process_var)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(BacktestError::InvalidParameter(format!(
                    "{} must be > 0, got {}",
                    name, v
                )));
            }
        }
        Ok(Self {
            horizon,
            measure_var,
            process_var,
        })
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn measure_var(&self) -> f64 {
        self.measure_var
    }

    pub fn process_var(&self) -> f64 {
        self.process_var
    }
}

/// Mean MAE over all windows of one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSummary {
    pub ticker: String,
    pub windows: usize,
    pub mean_mae: f64,
}
