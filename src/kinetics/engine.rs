use std::time::Instant;

use chrono::NaiveDate;

use crate::config::EngineConfig;
use crate::followup::{self, FollowUpPlan};
use crate::models::{latest_treatment, Measurement, TreatmentRecord};

use super::escalation::{EscalationNotice, EscalationProtocol, FollowUpReminder, NotificationSink};
use super::estimators::{doubling_time_months, velocity_per_year};
use super::messages::MessageTemplates;
use super::recommendations::generate_recommendations;
use super::risk::{stratify, RiskSignals};
use super::store::{series_fingerprint, AnalysisCache, CacheStatus};
use super::trend::classify_trend;
use super::types::{
    AnalysisFailure, AnalysisResult, EstimatorFailure, InsufficientData, KineticsEngine,
    KineticsError, KineticsReport, SubjectAssessment, SubjectHistory,
};
use super::validation::{check_series, estimation_points, qualify, MIN_POINTS_VELOCITY};

/// Run the full analysis on one series. Pure; never panics on input.
pub fn analyze_series(series: &[Measurement]) -> AnalysisResult {
    if let Err(e) = check_series(series) {
        tracing::warn!(error = %e, "Rejecting malformed series");
        return AnalysisResult::Error(AnalysisFailure {
            message: e.to_string(),
        });
    }

    // Qualifying points gate the status; current/previous are the raw readings.
    let points = qualify(series);
    let insufficient = || {
        AnalysisResult::InsufficientData(InsufficientData {
            message: MessageTemplates::insufficient_data(MIN_POINTS_VELOCITY, points.len()),
            recommendation: MessageTemplates::insufficient_data_recommendation().to_string(),
            available: points.len(),
            required: MIN_POINTS_VELOCITY,
        })
    };
    if points.len() < MIN_POINTS_VELOCITY {
        return insufficient();
    }
    let [.., previous, current] = series else {
        return insufficient();
    };
    let current_value = current.value;
    let previous_value = Some(previous.value);

    // Estimators are independent; a failure in one leaves the others intact.
    let estimable = estimation_points(current, &points);
    let doubling_time = settle(
        "doubling_time_months",
        estimable.clone().and_then(doubling_time_months),
    );
    let velocity = settle("velocity_per_year", estimable.and_then(velocity_per_year));
    let trend = classify_trend(current_value, previous_value);

    let risk = stratify(&RiskSignals {
        doubling_time_months: doubling_time,
        velocity_per_year: velocity,
        current_value,
    });
    let recommendations = generate_recommendations(risk.level, doubling_time);

    AnalysisResult::Success(KineticsReport {
        current_value,
        previous_value,
        doubling_time_months: doubling_time,
        velocity_per_year: velocity,
        trend,
        risk_level: risk.level,
        alerts: risk.alerts,
        recommendations,
    })
}

fn settle(metric: &'static str, outcome: Result<f64, EstimatorFailure>) -> Option<f64> {
    match outcome {
        Ok(value) => Some(value),
        Err(reason) => {
            tracing::debug!(metric, reason = %reason, "Metric unavailable");
            None
        }
    }
}

/// Default implementation of the kinetics engine.
/// Wraps the pure analysis with logging, an optional per-subject cache and
/// follow-up planning.
pub struct DefaultKineticsEngine {
    pub(crate) cache: AnalysisCache,
    config: EngineConfig,
}

impl DefaultKineticsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cache: AnalysisCache::new(config.cache_capacity, config.cache_ttl),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache_status(&self) -> Result<CacheStatus, KineticsError> {
        self.cache.status()
    }

    pub fn clear_cache(&self) -> Result<(), KineticsError> {
        self.cache.clear()
    }

    /// Analyze a subject and hand an escalation notice to `sink` when the
    /// risk warrants one. Returns the notice that was delivered, if any.
    pub fn check_and_escalate(
        &self,
        subject_id: &str,
        series: &[Measurement],
        sink: &dyn NotificationSink,
    ) -> Result<Option<EscalationNotice>, KineticsError> {
        let result = self.analyze_subject(subject_id, series)?;
        let Some(notice) = EscalationProtocol::evaluate(subject_id, &result) else {
            tracing::debug!(subject_id, status = result.status(), "No escalation needed");
            return Ok(None);
        };

        sink.deliver_escalation(&notice)?;
        tracing::info!(
            subject_id,
            notice_id = %notice.id,
            risk_level = notice.risk_level.as_str(),
            "Escalation notice delivered"
        );
        Ok(Some(notice))
    }

    /// Plan the next visit for a subject and hand a reminder to `sink`.
    pub fn send_followup_reminder(
        &self,
        history: &SubjectHistory,
        today: NaiveDate,
        sink: &dyn NotificationSink,
    ) -> Result<FollowUpReminder, KineticsError> {
        let assessment = self.assess(history, today)?;
        let reminder = FollowUpReminder::from_plan(&history.subject_id, &assessment.followup);
        sink.deliver_reminder(&reminder)?;
        Ok(reminder)
    }
}

impl Default for DefaultKineticsEngine {
    /// Reads `ONCOTRACK_CACHE_*` overrides from the environment.
    fn default() -> Self {
        Self::new(EngineConfig::from_env())
    }
}

impl KineticsEngine for DefaultKineticsEngine {
    fn analyze(&self, series: &[Measurement]) -> AnalysisResult {
        let start = Instant::now();
        let result = analyze_series(series);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            status = result.status(),
            risk_level = result.risk_level().map(|l| l.as_str()).unwrap_or("n/a"),
            alerts = result.report().map(|r| r.alerts.len()).unwrap_or(0),
            measurements = series.len(),
            processing_ms = processing_time_ms,
            "Kinetics analysis complete"
        );

        result
    }

    fn analyze_subject(
        &self,
        subject_id: &str,
        series: &[Measurement],
    ) -> Result<AnalysisResult, KineticsError> {
        if !self.config.cache_enabled {
            return Ok(self.analyze(series));
        }

        let fingerprint = series_fingerprint(series);
        if let Some(hit) = self.cache.get(subject_id, fingerprint)? {
            tracing::debug!(subject_id, "Using cached analysis");
            return Ok(hit);
        }

        let result = self.analyze(series);
        self.cache.insert(subject_id, fingerprint, result.clone())?;
        Ok(result)
    }

    fn plan_followup(
        &self,
        treatment: Option<&TreatmentRecord>,
        today: NaiveDate,
        latest_value: Option<f64>,
        last_observation: Option<NaiveDate>,
    ) -> Result<FollowUpPlan, KineticsError> {
        let plan = followup::plan_followup(treatment, today, latest_value, last_observation)
            .inspect_err(|e| tracing::warn!(error = %e, "Follow-up planning rejected"))?;

        tracing::info!(
            treatment = treatment.map(|t| t.kind.as_str()).unwrap_or("none"),
            next_date = %plan.next_date,
            interval = %plan.interval_label,
            priority = plan.priority.as_str(),
            "Follow-up planned"
        );

        Ok(plan)
    }

    fn assess(
        &self,
        history: &SubjectHistory,
        today: NaiveDate,
    ) -> Result<SubjectAssessment, KineticsError> {
        let analysis = self.analyze_subject(&history.subject_id, &history.series)?;

        let last = history.series.last();
        let latest_value = last.map(|m| m.value).filter(|v| v.is_finite());
        let last_observation = last.map(|m| m.timestamp);
        let treatment = latest_treatment(&history.treatments);

        let plan = self.plan_followup(treatment, today, latest_value, last_observation)?;
        let followup = match analysis.risk_level() {
            Some(level) => plan.escalated(level),
            None => plan,
        };

        Ok(SubjectAssessment { analysis, followup })
    }

    fn invalidate(&self, subject_id: &str) -> Result<(), KineticsError> {
        self.cache.invalidate(subject_id)
    }
}
