//! Next-visit planning from treatment history.
//!
//! Each treatment kind has a table of cumulative month offsets since the
//! treatment date. The planner picks the first offset past the months already
//! elapsed. Months here are a flat 30 days, unlike the 30.44-day month used
//! for doubling time.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kinetics::risk::exceeds_absolute_threshold;
use crate::models::{FollowUpPriority, RiskLevel, TreatmentKind, TreatmentRecord};

// ═══════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════

/// Flat scheduling month.
pub const DAYS_PER_SCHEDULING_MONTH: i64 = 30;

/// Interval added to the last observation when there is no treatment history.
pub const SURVEILLANCE_INTERVAL_DAYS: i64 = 180;

/// Added to elapsed months once a schedule table is exhausted.
pub const EXHAUSTED_SCHEDULE_EXTENSION_MONTHS: i64 = 12;

/// Latest value above this raises priority to at least moderate.
pub const MODERATE_PRIORITY_VALUE: f64 = 4.0;

const SURGERY_SCHEDULE: &[i64] = &[1, 3, 6, 12, 18, 24];
const RADIATION_SCHEDULE: &[i64] = &[1, 3, 6, 9, 12, 18, 24];
const HORMONE_THERAPY_SCHEDULE: &[i64] = &[3, 6, 9, 12, 15, 18, 21, 24];
const CHEMOTHERAPY_SCHEDULE: &[i64] = &[1, 2, 3, 6, 9, 12];
pub const SURVEILLANCE_SCHEDULE: &[i64] = &[6, 12, 18, 24, 30, 36];

const SURVEILLANCE_REASON: &str = "routine surveillance";

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpPlan {
    pub next_date: NaiveDate,
    pub interval_label: String,
    pub reason: String,
    pub priority: FollowUpPriority,
}

impl FollowUpPlan {
    /// Raise priority to reflect an analysis risk level. Never lowers it.
    pub fn escalated(mut self, risk: RiskLevel) -> Self {
        self.priority = self.priority.max(FollowUpPriority::from(risk));
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    #[error("Treatment dated {treatment_date} is after today ({today})")]
    TreatmentInFuture {
        treatment_date: NaiveDate,
        today: NaiveDate,
    },

    #[error("Next visit {days} days after {anchor} is outside the supported calendar")]
    DateOutOfRange { anchor: NaiveDate, days: i64 },
}

// ═══════════════════════════════════════════════════════════
// Schedules
// ═══════════════════════════════════════════════════════════

/// Cumulative month offsets for a treatment kind.
/// Systemic therapy follows the chemotherapy table.
pub fn schedule_for(kind: TreatmentKind) -> &'static [i64] {
    match kind {
        TreatmentKind::Surgery => SURGERY_SCHEDULE,
        TreatmentKind::Radiation => RADIATION_SCHEDULE,
        TreatmentKind::HormoneTherapy => HORMONE_THERAPY_SCHEDULE,
        TreatmentKind::Chemotherapy | TreatmentKind::SystemicTherapy => CHEMOTHERAPY_SCHEDULE,
    }
}

/// Priority before the latest value is considered.
fn baseline_priority(kind: Option<TreatmentKind>) -> FollowUpPriority {
    match kind {
        Some(TreatmentKind::Surgery)
        | Some(TreatmentKind::Chemotherapy)
        | Some(TreatmentKind::SystemicTherapy) => FollowUpPriority::Moderate,
        _ => FollowUpPriority::Routine,
    }
}

/// Priority from the latest value, falling back to the treatment baseline.
pub fn assess_priority(latest_value: Option<f64>, kind: Option<TreatmentKind>) -> FollowUpPriority {
    match latest_value {
        Some(v) if exceeds_absolute_threshold(v) => FollowUpPriority::High,
        Some(v) if v > MODERATE_PRIORITY_VALUE => FollowUpPriority::Moderate,
        _ => baseline_priority(kind),
    }
}

/// First offset strictly after `elapsed_months`, or `elapsed_months + 12`
/// when the table is exhausted.
pub fn next_offset(schedule: &[i64], elapsed_months: i64) -> i64 {
    schedule
        .iter()
        .copied()
        .find(|&offset| offset > elapsed_months)
        .unwrap_or(elapsed_months + EXHAUSTED_SCHEDULE_EXTENSION_MONTHS)
}

fn add_days(anchor: NaiveDate, days: i64) -> Result<NaiveDate, PlanError> {
    anchor
        .checked_add_signed(Duration::days(days))
        .ok_or(PlanError::DateOutOfRange { anchor, days })
}

fn interval_label(months: i64) -> String {
    if months == 1 {
        "1 month".to_string()
    } else {
        format!("{} months", months)
    }
}

// ═══════════════════════════════════════════════════════════
// Planning
// ═══════════════════════════════════════════════════════════

/// Compute the next recommended visit.
///
/// Without a treatment record the visit is 180 days after `last_observation`
/// (or `today` when nothing has been observed). Its priority still follows the
/// latest value, so an untreated subject above 10.0 is planned as high rather
/// than routine.
pub fn plan_followup(
    treatment: Option<&TreatmentRecord>,
    today: NaiveDate,
    latest_value: Option<f64>,
    last_observation: Option<NaiveDate>,
) -> Result<FollowUpPlan, PlanError> {
    let Some(treatment) = treatment else {
        let anchor = last_observation.unwrap_or(today);
        return Ok(FollowUpPlan {
            next_date: add_days(anchor, SURVEILLANCE_INTERVAL_DAYS)?,
            interval_label: interval_label(SURVEILLANCE_INTERVAL_DAYS / DAYS_PER_SCHEDULING_MONTH),
            reason: SURVEILLANCE_REASON.to_string(),
            priority: assess_priority(latest_value, None),
        });
    };

    let days_since = (today - treatment.date).num_days();
    if days_since < 0 {
        return Err(PlanError::TreatmentInFuture {
            treatment_date: treatment.date,
            today,
        });
    }

    let elapsed_months = days_since / DAYS_PER_SCHEDULING_MONTH;
    let offset = next_offset(schedule_for(treatment.kind), elapsed_months);

    Ok(FollowUpPlan {
        next_date: add_days(treatment.date, offset * DAYS_PER_SCHEDULING_MONTH)?,
        interval_label: interval_label(offset),
        reason: format!("follow-up after {}", treatment.kind.display_name()),
        priority: assess_priority(latest_value, Some(treatment.kind)),
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
