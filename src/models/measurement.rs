use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ModelError;

/// One biomarker reading for a subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    #[serde(alias = "date")]
    pub timestamp: NaiveDate,
    pub value: f64,
}

impl Measurement {
    pub fn new(timestamp: NaiveDate, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Build a measurement from an ISO `YYYY-MM-DD` date string.
    /// Impossible calendar dates (e.g. `2025-02-30`) are rejected.
    pub fn parse(date: &str, value: f64) -> Result<Self, ModelError> {
        let timestamp = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
            ModelError::InvalidDate {
                value: date.to_string(),
            }
        })?;
        Ok(Self { timestamp, value })
    }

    /// Only strictly positive values take part in kinetics estimation.
    pub fn is_quantifiable(&self) -> bool {
        self.value > 0.0
    }
}
