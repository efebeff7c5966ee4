use super::regression::{elapsed_days, least_squares};
use super::types::EstimatorFailure;
use super::validation::{require, QualifiedPoint, MIN_POINTS_DOUBLING_TIME, MIN_POINTS_VELOCITY};

/// Average days per month for the doubling-time conversion.
/// Scheduling uses a flat 30-day month instead; the two are independent.
pub const DAYS_PER_MONTH_AVG: f64 = 30.44;

/// Days per year for annualizing velocity.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Doubling time in months from a log-linear fit of value against elapsed days.
///
/// Requires at least 3 positive points. A flat or falling series has no
/// doubling time and yields [`EstimatorFailure::NotIncreasing`].
pub fn doubling_time_months(points: &[QualifiedPoint]) -> Result<f64, EstimatorFailure> {
    let points = require(points, MIN_POINTS_DOUBLING_TIME)?;

    let days = elapsed_days(points);
    let log_values: Vec<f64> = points.iter().map(|p| p.value.ln()).collect();
    let fit = least_squares(&days, &log_values)?;

    if fit.slope <= 0.0 {
        return Err(EstimatorFailure::NotIncreasing);
    }

    let doubling_days = std::f64::consts::LN_2 / fit.slope;
    let months = round_to(doubling_days / DAYS_PER_MONTH_AVG, 1);
    if !months.is_finite() {
        return Err(EstimatorFailure::DegenerateFit(
            "doubling time overflow".into(),
        ));
    }
    Ok(months)
}

/// Annualized linear rate of change (value units per year), two decimals.
pub fn velocity_per_year(points: &[QualifiedPoint]) -> Result<f64, EstimatorFailure> {
    let points = require(points, MIN_POINTS_VELOCITY)?;

    let days = elapsed_days(points);
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let fit = least_squares(&days, &values)?;

    Ok(round_to(fit.slope * DAYS_PER_YEAR, 2))
}
