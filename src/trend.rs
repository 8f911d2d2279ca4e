//! Least-squares trend fitting and short-horizon projection
//!
//! The projection feeds the "prediction" line of the progress chart. By
//! default it never dips below the last known value: a forward-looking
//! chart shows flat or rising strength, never a decline. That is a display
//! policy, not a claim about how strength actually develops.

use serde::{Deserialize, Serialize};

/// Only the most recent sessions shape the projection
pub const REGRESSION_WINDOW: usize = 6;

// ---------------------------------------------------------------------------
/// Linear Fit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub x: f64,
    pub y: f64,
}

impl TrendPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Slope and intercept of a fitted line. Both are NaN when the fit is
/// undefined; check `is_defined` before using them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub const UNDEFINED: LinearFit = LinearFit {
        slope: f64::NAN,
        intercept: f64::NAN,
    };

    pub fn is_defined(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }

    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least-squares fit in closed form.
///
/// Fewer than two points, or points that all share one x, give
/// `LinearFit::UNDEFINED` rather than an error.
pub fn fit_linear_trend(points: &[TrendPoint]) -> LinearFit {
    let n = points.len();
    if n < 2 {
        return LinearFit::UNDEFINED;
    }

    let (sum_x, sum_y, sum_xy, sum_x2) = points.iter().fold(
        (0.0, 0.0, 0.0, 0.0),
        |(sx, sy, sxy, sx2), p| (sx + p.x, sy + p.y, sxy + p.x * p.y, sx2 + p.x * p.x),
    );
    let n = n as f64;

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator == 0.0 {
        return LinearFit::UNDEFINED;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    LinearFit { slope, intercept }
}

// ---------------------------------------------------------------------------
/// Projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionPolicy {
    /// Each projected value is at least the one before it
    #[default]
    MonotonicFloor,
    /// Values straight off the fitted line
    RawFit,
}

/// Project `horizon` values past the end of `history` with the default
/// monotonic floor.
pub fn project_future(history: &[f64], horizon: usize) -> Vec<Option<f64>> {
    project_future_with(history, horizon, ProjectionPolicy::default())
}

/// Project `horizon` values past the end of `history`.
///
/// The fit uses the last `REGRESSION_WINDOW` values at x = 0, 1, ...; older
/// history has no influence. Every slot is `None` when fewer than two
/// values are available.
pub fn project_future_with(history: &[f64], horizon: usize, policy: ProjectionPolicy) -> Vec<Option<f64>> {
    if history.len() < 2 {
        return vec![None; horizon];
    }

    let window = &history[history.len().saturating_sub(REGRESSION_WINDOW)..];
    let points: Vec<TrendPoint> = window
        .iter()
        .enumerate()
        .map(|(i, y)| TrendPoint::new(i as f64, *y))
        .collect();

    let fit = fit_linear_trend(&points);
    if !fit.is_defined() {
        return vec![None; horizon];
    }

    let last_index = (points.len() - 1) as f64;
    let mut previous = history[history.len() - 1];

    (1..=horizon)
        .map(|i| {
            let mut predicted = fit.at(last_index + i as f64);
            if policy == ProjectionPolicy::MonotonicFloor {
                predicted = predicted.max(previous);
            }
            previous = predicted;
            Some(predicted)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
