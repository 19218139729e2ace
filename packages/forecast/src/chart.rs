//! Series backing the command-panel pollution chart.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::Forecaster;

/// Mock history points shown before "Now".
pub const HISTORY_POINTS: usize = 24;

/// Half-width of the mock history scatter around the current value.
const HISTORY_SPREAD: f64 = 25.0;

/// One x-axis position of the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// Axis label.
    pub time: String,
    /// Observed value, for history and "Now".
    pub actual: Option<u32>,
    /// Forecast value, for "Now" and the future.
    pub predicted: Option<u32>,
}

/// Builds the chart series: 24 mock history points scattered around
/// `current`, a "Now" point carrying `current` on both lines, then
/// `horizon` forecast points.
pub fn forecast_chart(
    rng: &mut impl Rng,
    forecaster: &dyn Forecaster,
    current: u32,
    horizon: usize,
) -> Vec<ChartPoint> {
    let base = f64::from(current);
    let mut points = Vec::with_capacity(HISTORY_POINTS + 1 + horizon);

    for hour in 0..HISTORY_POINTS {
        let value = base + rng.gen_range(-HISTORY_SPREAD..HISTORY_SPREAD);
        points.push(ChartPoint {
            time: format!("{hour}:00"),
            actual: Some(round_non_negative(value)),
            predicted: None,
        });
    }

    points.push(ChartPoint {
        time: "Now".to_string(),
        actual: Some(current),
        predicted: Some(current),
    });

    for (hour, value) in forecaster.forecast(base, horizon).into_iter().enumerate() {
        points.push(ChartPoint {
            time: format!("{hour}:00 (+1d)"),
            actual: None,
            predicted: Some(value),
        });
    }

    points
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_non_negative(value: f64) -> u32 {
    value.max(0.0).round() as u32
}
