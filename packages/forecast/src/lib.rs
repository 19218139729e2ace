#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! AQI forecasting for the command-panel chart.
//!
//! Callers depend on the [`Forecaster`] trait only. Three models ship with
//! the crate: [`TrendForecaster`] (random drift with per-step noise, the
//! dashboard default), [`FlatForecaster`] (repeats the current value, used
//! when nothing better is available) and [`LinearForecaster`] (least-squares
//! fit over recent samples).

pub mod chart;

use std::sync::Mutex;

use rand::{Rng, SeedableRng as _, rngs::StdRng};
use thiserror::Error;

pub use chart::{ChartPoint, HISTORY_POINTS, forecast_chart};

/// Hours forecast by default.
pub const DEFAULT_HORIZON: usize = 24;

/// Errors that can occur while preparing a forecaster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForecastError {
    /// Not enough samples to fit the model.
    #[error("Need at least {needed} samples to fit, got {got}")]
    InsufficientData {
        /// Minimum sample count.
        needed: usize,
        /// Samples supplied.
        got: usize,
    },
}

/// Produces future AQI samples from the current value.
pub trait Forecaster: Send + Sync {
    /// Short identifier for logging.
    fn name(&self) -> &'static str;

    /// Returns `steps` hourly samples following `current`. Every sample is
    /// non-negative and rounded.
    fn forecast(&self, current: f64, steps: usize) -> Vec<u32>;
}

/// Repeats the current value.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatForecaster;

impl Forecaster for FlatForecaster {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn forecast(&self, current: f64, steps: usize) -> Vec<u32> {
        vec![to_sample(current); steps]
    }
}

/// Random-walk forecaster.
///
/// Each call draws one drift `(U - 0.3) × 5`, biased upward, then adds it
/// plus fresh noise `(U - 0.5) × 10` at every step.
#[derive(Debug)]
pub struct TrendForecaster {
    rng: Mutex<StdRng>,
}

impl TrendForecaster {
    /// Creates a forecaster seeded from system entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a forecaster with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for TrendForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster for TrendForecaster {
    fn name(&self) -> &'static str {
        "trend"
    }

    fn forecast(&self, current: f64, steps: usize) -> Vec<u32> {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let trend = (rng.gen_range(0.0..1.0) - 0.3) * 5.0;
        let mut last = current;

        (0..steps)
            .map(|_| {
                let noise = (rng.gen_range(0.0..1.0) - 0.5) * 10.0;
                last = (last + trend + noise).max(0.0);
                to_sample(last)
            })
            .collect()
    }
}

/// Ordinary least-squares line through recent samples, extrapolated from
/// the current value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearForecaster {
    slope: f64,
}

impl LinearForecaster {
    /// Minimum number of samples [`LinearForecaster::fit`] accepts.
    pub const MIN_SAMPLES: usize = 2;

    /// Fits a line to hourly `samples`, oldest first.
    ///
    /// # Errors
    ///
    /// * [`ForecastError::InsufficientData`] if fewer than two samples are given
    pub fn fit(samples: &[f64]) -> Result<Self, ForecastError> {
        if samples.len() < Self::MIN_SAMPLES {
            return Err(ForecastError::InsufficientData {
                needed: Self::MIN_SAMPLES,
                got: samples.len(),
            });
        }

        #[allow(clippy::cast_precision_loss)]
        let n = samples.len() as f64;
        let mean_x = (n - 1.0) / 2.0;
        let mean_y = samples.iter().sum::<f64>() / n;

        let mut num = 0.0;
        let mut den = 0.0;
        for (i, y) in samples.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let dx = i as f64 - mean_x;
            num += dx * (y - mean_y);
            den += dx * dx;
        }

        let slope = num / den;
        log::debug!("Fitted linear forecaster on {n} samples: slope {slope:.3}");

        Ok(Self { slope })
    }

    /// Change per hour.
    #[must_use]
    pub const fn slope(&self) -> f64 {
        self.slope
    }
}

impl Forecaster for LinearForecaster {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn forecast(&self, current: f64, steps: usize) -> Vec<u32> {
        (1..=steps)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let step = i as f64;
                to_sample(self.slope.mul_add(step, current))
            })
            .collect()
    }
}

/// Picks a linear fit when `history` supports one, otherwise the flat model.
#[must_use]
pub fn from_history(history: &[f64]) -> Box<dyn Forecaster> {
    match LinearForecaster::fit(history) {
        Ok(model) => Box::new(model),
        Err(e) => {
            log::debug!("Falling back to flat forecast: {e}");
            Box::new(FlatForecaster)
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_sample(value: f64) -> u32 {
    value.max(0.0).round() as u32
}
