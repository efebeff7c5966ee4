/// Message template builder for alerts, recommendations and notices.
/// Wording stays clinical and short; thresholds are always named.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Doubling time under the high-risk threshold.
    pub fn doubling_time_high(threshold_months: f64) -> String {
        format!(
            "Doubling time < {} months - high risk of recurrence",
            threshold_months
        )
    }

    /// Doubling time under the moderate-risk threshold.
    pub fn doubling_time_moderate(threshold_months: f64) -> String {
        format!(
            "Doubling time < {} months - close monitoring needed",
            threshold_months
        )
    }

    pub fn velocity_high(threshold_per_year: f64) -> String {
        format!(
            "Velocity > {:.1} units/year - further evaluation needed",
            threshold_per_year
        )
    }

    pub fn absolute_value_high(threshold: f64) -> String {
        format!("Current value > {:.1} - intervention needed", threshold)
    }

    // ── Recommendations ─────────────────────────────────────

    pub fn recommendations_high() -> [&'static str; 4] {
        [
            "Urgent follow-up visit within 2-4 weeks",
            "Consider PSMA-PET or MRI re-imaging",
            "Refer to oncology specialist",
            "Consider therapeutic intervention",
        ]
    }

    pub fn recommendations_moderate() -> [&'static str; 4] {
        [
            "Follow-up visit within 4-6 weeks",
            "Repeat biomarker test in 1 month",
            "Consider imaging",
            "Close monitoring",
        ]
    }

    pub fn recommendations_low() -> [&'static str; 3] {
        [
            "Continue routine biomarker monitoring",
            "Follow up as scheduled",
            "Maintain a healthy lifestyle",
        ]
    }

    pub fn rapid_rise_override() -> &'static str {
        "Very rapid rise - urgent intervention required"
    }

    // ── Insufficient data ───────────────────────────────────

    pub fn insufficient_data(required: usize, available: usize) -> String {
        format!(
            "At least {} positive measurements are needed for analysis ({} available)",
            required, available
        )
    }

    pub fn insufficient_data_recommendation() -> &'static str {
        "Continue periodic biomarker monitoring"
    }

    // ── Notices ─────────────────────────────────────────────

    /// Short urgency label for an escalated analysis.
    pub fn urgency_label(high: bool) -> &'static str {
        if high {
            "URGENT"
        } else {
            "Needs monitoring"
        }
    }

    /// One-paragraph summary of an escalated analysis.
    pub fn escalation_summary(
        urgency: &str,
        current_value: f64,
        trend: &str,
        doubling_time_months: Option<f64>,
        velocity_per_year: Option<f64>,
    ) -> String {
        let doubling = doubling_time_months
            .map(|v| format!("{} months", v))
            .unwrap_or_else(|| "n/a".to_string());
        let velocity = velocity_per_year
            .map(|v| format!("{} units/year", v))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "Biomarker alert ({}): current value {:.1}, trend {}, doubling time {}, velocity {}. \
             Please contact the treating physician.",
            urgency, current_value, trend, doubling, velocity,
        )
    }

    /// Follow-up reminder text.
    pub fn followup_reminder(date: &str, reason: &str, interval: &str, priority: &str) -> String {
        format!(
            "Follow-up visit recommended on {} ({}; interval {}; priority {}). \
             Please confirm the appointment.",
            date, reason, interval, priority,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alerts_name_their_thresholds() {
        assert!(MessageTemplates::doubling_time_high(6.0).contains("< 6 months"));
        assert!(MessageTemplates::doubling_time_moderate(12.0).contains("< 12 months"));
        assert!(MessageTemplates::velocity_high(2.0).contains("> 2.0"));
        assert!(MessageTemplates::absolute_value_high(10.0).contains("> 10.0"));
    }

    #[test]
    fn summary_marks_missing_metrics() {
        let text = MessageTemplates::escalation_summary("URGENT", 12.34, "rising_significant", None, Some(3.1));
        assert!(text.contains("12.3"));
        assert!(text.contains("doubling time n/a"));
        assert!(text.contains("3.1 units/year"));
    }
}
