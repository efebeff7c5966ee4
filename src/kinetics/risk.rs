//! Worst-case combination of independent risk checks.
//!
//! Each check may raise the level and add one alert; no check lowers it.
//! A metric that is `None` contributes nothing.

use crate::models::RiskLevel;

use super::messages::MessageTemplates;

pub const DOUBLING_TIME_HIGH_RISK_MONTHS: f64 = 6.0;
pub const DOUBLING_TIME_MODERATE_RISK_MONTHS: f64 = 12.0;
pub const VELOCITY_THRESHOLD_PER_YEAR: f64 = 2.0;
/// Latest value above this is high risk regardless of kinetics.
/// Also drives follow-up visit priority.
pub const ABSOLUTE_VALUE_THRESHOLD: f64 = 10.0;

/// Inputs to stratification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskSignals {
    pub doubling_time_months: Option<f64>,
    pub velocity_per_year: Option<f64>,
    pub current_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub alerts: Vec<String>,
}

/// Absolute-value rule shared with follow-up prioritisation.
pub fn exceeds_absolute_threshold(value: f64) -> bool {
    value > ABSOLUTE_VALUE_THRESHOLD
}

pub fn stratify(signals: &RiskSignals) -> RiskAssessment {
    let mut level = RiskLevel::Low;
    let mut alerts = Vec::new();

    if let Some(dt) = signals.doubling_time_months {
        if dt < DOUBLING_TIME_HIGH_RISK_MONTHS {
            level = level.max(RiskLevel::High);
            alerts.push(MessageTemplates::doubling_time_high(
                DOUBLING_TIME_HIGH_RISK_MONTHS,
            ));
        } else if dt < DOUBLING_TIME_MODERATE_RISK_MONTHS {
            level = level.max(RiskLevel::Moderate);
            alerts.push(MessageTemplates::doubling_time_moderate(
                DOUBLING_TIME_MODERATE_RISK_MONTHS,
            ));
        }
    }

    if let Some(velocity) = signals.velocity_per_year {
        if velocity > VELOCITY_THRESHOLD_PER_YEAR {
            level = level.max(RiskLevel::Moderate);
            alerts.push(MessageTemplates::velocity_high(VELOCITY_THRESHOLD_PER_YEAR));
        }
    }

    if exceeds_absolute_threshold(signals.current_value) {
        level = RiskLevel::High;
        alerts.push(MessageTemplates::absolute_value_high(
            ABSOLUTE_VALUE_THRESHOLD,
        ));
    }

    RiskAssessment { level, alerts }
}
