use std::cell::RefCell;

use chrono::{Duration, NaiveDate};
use oncotrack::kinetics::{
    EscalationNotice, FollowUpReminder, KineticsError, NotificationSink, SubjectHistory,
};
use oncotrack::models::{FollowUpPriority, Measurement, RiskLevel, TreatmentKind, TreatmentRecord};
use oncotrack::{analyze, plan_followup, AnalysisResult, DefaultKineticsEngine, KineticsEngine};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn parse_series(rows: &[(&str, f64)]) -> Vec<Measurement> {
    rows.iter()
        .map(|(d, v)| Measurement::parse(d, *v).unwrap())
        .collect()
}

#[derive(Default)]
struct Outbox {
    escalations: RefCell<Vec<EscalationNotice>>,
    reminders: RefCell<Vec<FollowUpReminder>>,
}

impl NotificationSink for Outbox {
    fn deliver_escalation(&self, notice: &EscalationNotice) -> Result<(), KineticsError> {
        self.escalations.borrow_mut().push(notice.clone());
        Ok(())
    }

    fn deliver_reminder(&self, reminder: &FollowUpReminder) -> Result<(), KineticsError> {
        self.reminders.borrow_mut().push(reminder.clone());
        Ok(())
    }
}

#[test]
fn post_surgery_rise_is_flagged_and_scheduled() {
    oncotrack::init_tracing();
    let engine = DefaultKineticsEngine::default();
    let history = SubjectHistory {
        subject_id: "subject-42".into(),
        series: parse_series(&[
            ("2024-03-01", 0.4),
            ("2024-05-01", 0.7),
            ("2024-07-01", 1.3),
            ("2024-09-01", 2.4),
        ]),
        treatments: vec![
            TreatmentRecord::new(TreatmentKind::Radiation, date(2023, 6, 1)),
            TreatmentRecord::new(TreatmentKind::Surgery, date(2024, 1, 10)),
        ],
    };
    let today = date(2024, 9, 15);

    let assessment = engine.assess(&history, today).unwrap();
    let report = assessment.analysis.report().unwrap();
    assert!(report.doubling_time_months.unwrap() < 6.0);
    assert_eq!(report.risk_level, RiskLevel::High);
    assert!(!report.alerts.is_empty());

    // surgery on 2024-01-10, 249 days elapsed → 8 months → offset 12
    assert_eq!(assessment.followup.reason, "follow-up after surgery");
    assert_eq!(assessment.followup.interval_label, "12 months");
    assert_eq!(assessment.followup.next_date, date(2024, 1, 10) + Duration::days(360));
    assert_eq!(assessment.followup.priority, FollowUpPriority::High);

    let outbox = Outbox::default();
    let notice = engine
        .check_and_escalate(&history.subject_id, &history.series, &outbox)
        .unwrap()
        .unwrap();
    assert_eq!(notice.urgency, "URGENT");
    engine.send_followup_reminder(&history, today, &outbox).unwrap();
    assert_eq!(outbox.escalations.borrow().len(), 1);
    assert_eq!(outbox.reminders.borrow().len(), 1);
}

#[test]
fn success_json_has_flat_shape() {
    let series = parse_series(&[("2025-01-01", 5.0), ("2025-06-30", 10.0)]);
    let value = serde_json::to_value(analyze(&series)).unwrap();

    assert_eq!(value["status"], "success");
    assert_eq!(value["current_value"], 10.0);
    assert_eq!(value["previous_value"], 5.0);
    assert!(value["doubling_time_months"].is_null());
    assert!(value["velocity_per_year"].as_f64().unwrap() > 10.0);
    assert_eq!(value["trend"], "rising_significant");
    assert!(value["risk_level"] == "moderate" || value["risk_level"] == "high");
    assert_eq!(value.as_object().unwrap().len(), 9);
}

#[test]
fn insufficient_data_round_trips_through_json() {
    let series = parse_series(&[("2025-01-01", 0.0), ("2025-02-01", 1.1)]);
    let result = analyze(&series);
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"status\":\"insufficient_data\""));
    let back: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn series_accepts_date_key_from_json() {
    let json = r#"[{"date":"2025-01-01","value":1.0},{"date":"2025-04-01","value":1.0},{"date":"2025-07-01","value":1.0}]"#;
    let series: Vec<Measurement> = serde_json::from_str(json).unwrap();
    let result = analyze(&series);
    let report = result.report().unwrap();
    assert_eq!(report.doubling_time_months, None);
    assert_eq!(report.risk_level, RiskLevel::Low);
}

#[test]
fn impossible_date_is_rejected_at_parse() {
    assert!(Measurement::parse("2025-02-30", 1.0).is_err());
}

#[test]
fn hormone_therapy_plan_without_values() {
    let treated = date(2025, 1, 1);
    let record = TreatmentRecord::new(TreatmentKind::HormoneTherapy, treated);
    let plan = plan_followup(Some(&record), treated + Duration::days(100), None, None).unwrap();
    assert_eq!(plan.interval_label, "6 months");
    assert_eq!(plan.next_date, treated + Duration::days(180));
    assert_eq!(plan.priority, FollowUpPriority::Routine);
}
