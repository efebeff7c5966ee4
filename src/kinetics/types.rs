use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::followup::{FollowUpPlan, PlanError};
use crate::models::{Measurement, RiskLevel, TreatmentRecord, Trend};

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

/// Outcome of one kinetics analysis.
///
/// Serializes flat, with the variant carried in a `status` field:
/// `{"status":"success","current_value":...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    Success(KineticsReport),
    InsufficientData(InsufficientData),
    Error(AnalysisFailure),
}

impl AnalysisResult {
    pub fn status(&self) -> &'static str {
        match self {
            Self::Success(_) => "success",
            Self::InsufficientData(_) => "insufficient_data",
            Self::Error(_) => "error",
        }
    }

    pub fn report(&self) -> Option<&KineticsReport> {
        match self {
            Self::Success(report) => Some(report),
            _ => None,
        }
    }

    /// Risk level of a successful analysis; `None` otherwise.
    pub fn risk_level(&self) -> Option<RiskLevel> {
        self.report().map(|r| r.risk_level)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Metrics and classification for a series that could be analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KineticsReport {
    pub current_value: f64,
    pub previous_value: Option<f64>,
    pub doubling_time_months: Option<f64>,
    pub velocity_per_year: Option<f64>,
    pub trend: Trend,
    pub risk_level: RiskLevel,
    pub alerts: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsufficientData {
    pub message: String,
    pub recommendation: String,
    pub available: usize,
    pub required: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFailure {
    pub message: String,
}

// ---------------------------------------------------------------------------
// SubjectAssessment
// ---------------------------------------------------------------------------

/// Combined output for one subject: the kinetics result and the next visit,
/// with the visit priority already raised to reflect the analysis risk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectAssessment {
    pub analysis: AnalysisResult,
    pub followup: FollowUpPlan,
}

/// Input bundle for one subject, as supplied by the record store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectHistory {
    pub subject_id: String,
    pub series: Vec<Measurement>,
    #[serde(default)]
    pub treatments: Vec<TreatmentRecord>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a single estimator produced no value. Never aborts the analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorFailure {
    #[error("Need at least {required} positive measurements, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Biomarker is stable or declining; doubling time undefined")]
    NotIncreasing,

    #[error("Latest measurement is not positive; series is below detection")]
    LatestNotQuantifiable,

    #[error("Regression failed: {0}")]
    DegenerateFit(String),
}

/// Malformed series input. Surfaced as the `error` analysis status.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Measurement {index} ({current}) is dated before the preceding one ({previous})")]
    OutOfOrder {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },

    #[error("Measurement {index} has a non-finite value")]
    NonFiniteValue { index: usize },
}

#[derive(Error, Debug)]
pub enum KineticsError {
    #[error("Follow-up planning failed: {0}")]
    Plan(#[from] PlanError),

    #[error("Notification delivery failed: {0}")]
    Notification(String),

    #[error("Background task failed: {0}")]
    Task(String),

    #[error("Internal lock failed")]
    LockFailed,
}

// ---------------------------------------------------------------------------
// KineticsEngine trait
// ---------------------------------------------------------------------------

/// Entry points used by the surrounding application.
pub trait KineticsEngine {
    /// Analyze a chronologically ordered series. Never fails: problems are
    /// reported through the result status.
    fn analyze(&self, series: &[Measurement]) -> AnalysisResult;

    /// Analyze with caching keyed by subject id.
    fn analyze_subject(
        &self,
        subject_id: &str,
        series: &[Measurement],
    ) -> Result<AnalysisResult, KineticsError>;

    /// Compute the next recommended visit.
    fn plan_followup(
        &self,
        treatment: Option<&TreatmentRecord>,
        today: NaiveDate,
        latest_value: Option<f64>,
        last_observation: Option<NaiveDate>,
    ) -> Result<FollowUpPlan, KineticsError>;

    /// Analysis and follow-up plan for one subject, with the visit priority
    /// raised to match the analysis risk.
    fn assess(
        &self,
        history: &SubjectHistory,
        today: NaiveDate,
    ) -> Result<SubjectAssessment, KineticsError>;

    /// Drop any cached result for a subject.
    fn invalidate(&self, subject_id: &str) -> Result<(), KineticsError>;
}
