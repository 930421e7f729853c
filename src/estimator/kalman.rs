//! Scalar Kalman filter over a random-walk return level.
//!
//! State model: `x[t] = x[t-1] + w`, `w ~ N(0, Q)`.
//! Observation model: `z[t] = x[t] + v`, `v ~ N(0, R)`.
//!
//! Transition and observation coefficients are both fixed at 1, so every
//! quantity stays scalar and the update needs no matrix inversion.

use crate::error::BacktestError;

const INITIAL_MEAN: f64 = 0.0;
const INITIAL_VARIANCE: f64 = 1.0;

/// Gaussian belief `(x, P)` plus the fixed model parameters.
///
/// Transitions are by value: `predict` and `update` return a new state and
/// leave the receiver untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanState {
    x: f64,
    p: f64,
    process_var: f64,
    measure_var: f64,
}

impl KalmanState {
    /// Fresh state with mean 0 and variance 1.
    ///
    /// `measure_var` is R, `process_var` is Q. Both must be finite and > 0.
    pub fn new(measure_var: f64, process_var: f64) -> Result<Self, BacktestError> {
        if !(measure_var.is_finite() && measure_var > 0.0) {
            return Err(BacktestError::InvalidParameter(format!(
                "observation noise R must be > 0, got {}",
                measure_var
            )));
        }
        if !(process_var.is_finite() && process_var > 0.0) {
            return Err(BacktestError::InvalidParameter(format!(
                "process noise Q must be > 0, got {}",
                process_var
            )));
        }
        Ok(Self {
            x: INITIAL_MEAN,
            p: INITIAL_VARIANCE,
            process_var,
            measure_var,
        })
    }

    pub fn mean(&self) -> f64 {
        self.x
    }

    pub fn variance(&self) -> f64 {
        self.p
    }

    pub fn process_var(&self) -> f64 {
        self.process_var
    }

    pub fn measure_var(&self) -> f64 {
        self.measure_var
    }

    pub fn transition(&self) -> f64 {
        1.0
    }

    pub fn observation(&self) -> f64 {
        1.0
    }

    /// Random-walk prediction: mean unchanged, variance grows by Q.
    #[must_use]
    pub fn predict(self) -> Self {
        Self {
            p: self.p + self.process_var,
            ..self
        }
    }

    /// Blend the prior with observation `z` using gain `K = P / (P + R)`.
    #[must_use]
    pub fn update(self, z: f64) -> Self {
        let k = self.gain();
        Self {
            x: self.x + k * (z - self.x),
            p: (1.0 - k) * self.p,
            ..self
        }
    }

    pub fn gain(&self) -> f64 {
        self.p / (self.p + self.measure_var)
    }
}

/// Filtered trace plus the constant-hold forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRun {
    pub estimates: Vec<f64>,
    pub forecast: Vec<f64>,
}

/// Runs predict + update over `observations` and holds the final mean for
/// `steps_ahead` steps.
///
/// With an identity transition the filter has no dynamics past the last
/// observation, so every forecast step equals the last filtered mean (or the
/// initial mean when there are no observations).
pub fn run_forecast(state: KalmanState, observations: &[f64], steps_ahead: usize) -> ForecastRun {
    let mut estimates = Vec::with_capacity(observations.len());
    let last = observations.iter().fold(state, |st, &z| {
        let next = st.predict().update(z);
        estimates.push(next.mean());
        next
    });
    ForecastRun {
        estimates,
        forecast: vec![last.mean(); steps_ahead],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_non_positive_noise() {
        assert!(KalmanState::new(0.0, 1e-5).is_err());
        assert!(KalmanState::new(1e-3, -1.0).is_err());
        assert!(KalmanState::new(f64::NAN, 1e-5).is_err());
        assert!(KalmanState::new(1e-3, f64::INFINITY).is_err());
    }

    #[test]
    fn predict_does_not_touch_receiver() {
        let st = KalmanState::new(1e-3, 1e-5).unwrap();
        let _ = st.predict();
        assert_eq!(st.variance(), 1.0);
    }

    #[test]
    fn gain_is_one_when_observation_noise_is_negligible() {
        let st = KalmanState::new(1e-300, 1e-5).unwrap();
        let next = st.predict().update(0.25);
        assert!((next.mean() - 0.25).abs() < 1e-12);
    }
}
