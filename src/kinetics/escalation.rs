use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::followup::FollowUpPlan;
use crate::models::{FollowUpPriority, RiskLevel, Trend};

use super::messages::MessageTemplates;
use super::types::{AnalysisResult, KineticsError};

/// Turns elevated analyses into notices for the care team.
pub struct EscalationProtocol;

impl EscalationProtocol {
    /// Notice for a successful analysis at moderate or high risk.
    /// Low risk, insufficient data and errors produce nothing.
    pub fn evaluate(subject_id: &str, result: &AnalysisResult) -> Option<EscalationNotice> {
        let report = result.report()?;
        if report.risk_level < RiskLevel::Moderate {
            return None;
        }

        let urgency = MessageTemplates::urgency_label(report.risk_level == RiskLevel::High);
        let summary = MessageTemplates::escalation_summary(
            urgency,
            report.current_value,
            report.trend.as_str(),
            report.doubling_time_months,
            report.velocity_per_year,
        );

        Some(EscalationNotice {
            id: Uuid::new_v4(),
            subject_id: subject_id.to_string(),
            risk_level: report.risk_level,
            urgency: urgency.to_string(),
            current_value: report.current_value,
            trend: report.trend,
            alerts: report.alerts.clone(),
            recommendations: report.recommendations.clone(),
            summary,
            created_at: chrono::Local::now().naive_local(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationNotice {
    pub id: Uuid,
    pub subject_id: String,
    pub risk_level: RiskLevel,
    /// "URGENT" for high risk, "Needs monitoring" for moderate.
    pub urgency: String,
    pub current_value: f64,
    pub trend: Trend,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
    pub summary: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUpReminder {
    pub id: Uuid,
    pub subject_id: String,
    pub next_date: NaiveDate,
    pub priority: FollowUpPriority,
    pub message: String,
}

impl FollowUpReminder {
    pub fn from_plan(subject_id: &str, plan: &FollowUpPlan) -> Self {
        let date = plan.next_date.format("%Y-%m-%d").to_string();
        Self {
            id: Uuid::new_v4(),
            subject_id: subject_id.to_string(),
            next_date: plan.next_date,
            priority: plan.priority,
            message: MessageTemplates::followup_reminder(
                &date,
                &plan.reason,
                &plan.interval_label,
                plan.priority.as_str(),
            ),
        }
    }
}

/// Delivery channel for notices (messaging gateway, email, queue).
pub trait NotificationSink {
    fn deliver_escalation(&self, notice: &EscalationNotice) -> Result<(), KineticsError>;

    fn deliver_reminder(&self, reminder: &FollowUpReminder) -> Result<(), KineticsError>;
}

/// Sink that only records deliveries in the log.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver_escalation(&self, notice: &EscalationNotice) -> Result<(), KineticsError> {
        tracing::warn!(
            subject_id = %notice.subject_id,
            risk_level = notice.risk_level.as_str(),
            urgency = %notice.urgency,
            "{}",
            notice.summary
        );
        Ok(())
    }

    fn deliver_reminder(&self, reminder: &FollowUpReminder) -> Result<(), KineticsError> {
        tracing::info!(
            subject_id = %reminder.subject_id,
            next_date = %reminder.next_date,
            priority = reminder.priority.as_str(),
            "{}",
            reminder.message
        );
        Ok(())
    }
}
