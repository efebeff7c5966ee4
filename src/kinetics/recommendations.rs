use crate::models::RiskLevel;

use super::messages::MessageTemplates;

/// Doubling time below this adds the urgent-intervention line at any risk level.
pub const URGENT_DOUBLING_TIME_MONTHS: f64 = 3.0;

/// Ordered clinical actions for a risk level.
pub fn generate_recommendations(level: RiskLevel, doubling_time_months: Option<f64>) -> Vec<String> {
    let mut recommendations: Vec<String> = match level {
        RiskLevel::High => MessageTemplates::recommendations_high()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        RiskLevel::Moderate => MessageTemplates::recommendations_moderate()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        RiskLevel::Low => MessageTemplates::recommendations_low()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    if doubling_time_months.is_some_and(|dt| dt < URGENT_DOUBLING_TIME_MONTHS) {
        recommendations.push(MessageTemplates::rapid_rise_override().to_string());
    }

    recommendations
}
