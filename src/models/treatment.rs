use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::TreatmentKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    pub kind: TreatmentKind,
    pub date: NaiveDate,
}

impl TreatmentRecord {
    pub fn new(kind: TreatmentKind, date: NaiveDate) -> Self {
        Self { kind, date }
    }
}

/// Most recent treatment across all kinds.
/// On equal dates the record appearing first in `records` wins.
pub fn latest_treatment(records: &[TreatmentRecord]) -> Option<&TreatmentRecord> {
    records.iter().fold(None, |best: Option<&TreatmentRecord>, rec| match best {
        Some(b) if b.date >= rec.date => Some(b),
        _ => Some(rec),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_history_has_no_latest() {
        assert!(latest_treatment(&[]).is_none());
    }

    #[test]
    fn picks_most_recent_date() {
        let records = [
            TreatmentRecord::new(TreatmentKind::Surgery, date(2024, 1, 10)),
            TreatmentRecord::new(TreatmentKind::HormoneTherapy, date(2024, 6, 1)),
            TreatmentRecord::new(TreatmentKind::Radiation, date(2024, 3, 5)),
        ];
        let latest = latest_treatment(&records).unwrap();
        assert_eq!(latest.kind, TreatmentKind::HormoneTherapy);
    }

    #[test]
    fn tie_keeps_first_record() {
        let records = [
            TreatmentRecord::new(TreatmentKind::Radiation, date(2024, 3, 5)),
            TreatmentRecord::new(TreatmentKind::HormoneTherapy, date(2024, 3, 5)),
        ];
        assert_eq!(
            latest_treatment(&records).unwrap().kind,
            TreatmentKind::Radiation
        );
    }
}
