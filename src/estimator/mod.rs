pub mod kalman;

pub use kalman::{run_forecast, ForecastRun, KalmanState};
