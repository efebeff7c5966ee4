//! Biomarker kinetics: doubling time, velocity, trend and risk.
//!
//! The pipeline for one series is
//! 1. validation: ordering and finiteness checks, positive-value filter
//! 2. estimators: log-linear doubling time and linear velocity
//! 3. trend: percent change between the last two values
//! 4. risk: banded thresholds, highest severity wins
//! 5. recommendations: per-level actions plus the rapid-rise override
//!
//! `engine` ties these together and adds caching, logging and escalation.

pub mod batch;
pub mod engine;
pub mod escalation;
pub mod estimators;
pub mod messages;
pub mod recommendations;
pub mod regression;
pub mod risk;
pub mod store;
pub mod trend;
pub mod types;
pub mod validation;

pub use batch::analyze_batch;
pub use engine::{analyze_series, DefaultKineticsEngine};
pub use escalation::{EscalationNotice, EscalationProtocol, FollowUpReminder, LogSink, NotificationSink};
pub use store::{AnalysisCache, CacheStatus};
pub use types::{
    AnalysisFailure, AnalysisResult, EstimatorFailure, InsufficientData, KineticsEngine,
    KineticsError, KineticsReport, SeriesError, SubjectAssessment, SubjectHistory,
};
