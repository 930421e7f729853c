pub mod backtest;
pub mod config;
pub mod data;
pub mod error;
pub mod estimator;
pub mod input;
pub mod model;
pub mod ui;

pub use backtest::{rolling_backtest, summarize};
pub use error::BacktestError;
pub use estimator::{run_forecast, ForecastRun, KalmanState};
pub use model::{BacktestConfig, PriceFrame, ReturnMatrix, ReturnSeries, WindowResult};
