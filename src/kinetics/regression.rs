//! Ordinary least-squares fit of `y` on `x`, used by both estimators.

use super::types::EstimatorFailure;
use super::validation::QualifiedPoint;

/// Variance of `x` below this is treated as zero (all samples on one day).
const MIN_X_SPREAD: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Days elapsed since the first point, as `f64`.
pub fn elapsed_days(points: &[QualifiedPoint]) -> Vec<f64> {
    let Some(first) = points.first() else {
        return Vec::new();
    };
    points
        .iter()
        .map(|p| (p.date - first.date).num_days() as f64)
        .collect()
}

/// Fit `y = slope * x + intercept` by least squares (centred sums).
pub fn least_squares(xs: &[f64], ys: &[f64]) -> Result<LinearFit, EstimatorFailure> {
    if xs.len() != ys.len() {
        return Err(EstimatorFailure::DegenerateFit(format!(
            "length mismatch: {} x values, {} y values",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < 2 {
        return Err(EstimatorFailure::InsufficientData {
            required: 2,
            available: xs.len(),
        });
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }

    if sxx < MIN_X_SPREAD {
        return Err(EstimatorFailure::DegenerateFit(
            "all samples share the same date".into(),
        ));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(EstimatorFailure::DegenerateFit("non-finite fit".into()));
    }

    Ok(LinearFit { slope, intercept })
}
