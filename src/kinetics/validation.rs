use chrono::NaiveDate;

use crate::models::Measurement;

use super::types::{EstimatorFailure, SeriesError};

/// Minimum positive points for the log-linear doubling-time fit.
pub const MIN_POINTS_DOUBLING_TIME: usize = 3;
/// Minimum positive points for the velocity fit.
pub const MIN_POINTS_VELOCITY: usize = 2;

/// A measurement that passed qualification (value strictly positive).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualifiedPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Reject series that are not ascending by date or carry NaN/infinite values.
/// Equal dates are allowed.
pub fn check_series(series: &[Measurement]) -> Result<(), SeriesError> {
    for (index, m) in series.iter().enumerate() {
        if !m.value.is_finite() {
            return Err(SeriesError::NonFiniteValue { index });
        }
        if index > 0 {
            let previous = series[index - 1].timestamp;
            if m.timestamp < previous {
                return Err(SeriesError::OutOfOrder {
                    index,
                    previous,
                    current: m.timestamp,
                });
            }
        }
    }
    Ok(())
}

/// Keep only strictly positive measurements, preserving order.
pub fn qualify(series: &[Measurement]) -> Vec<QualifiedPoint> {
    series
        .iter()
        .filter(|m| m.is_quantifiable())
        .map(|m| QualifiedPoint {
            date: m.timestamp,
            value: m.value,
        })
        .collect()
}

/// Points available to the estimators. A non-positive latest reading means
/// the series has fallen below detection, so no growth kinetics are reported
/// from the older positive values.
pub fn estimation_points<'a>(
    latest: &Measurement,
    points: &'a [QualifiedPoint],
) -> Result<&'a [QualifiedPoint], EstimatorFailure> {
    if !latest.is_quantifiable() {
        return Err(EstimatorFailure::LatestNotQuantifiable);
    }
    Ok(points)
}

/// Gate an estimator on its minimum point count.
pub fn require(points: &[QualifiedPoint], required: usize) -> Result<&[QualifiedPoint], EstimatorFailure> {
    if points.len() < required {
        return Err(EstimatorFailure::InsufficientData {
            required,
            available: points.len(),
        });
    }
    Ok(points)
}
