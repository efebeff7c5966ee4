pub mod enums;
pub mod measurement;
pub mod treatment;

pub use enums::{FollowUpPriority, RiskLevel, TreatmentKind, Trend};
pub use measurement::Measurement;
pub use treatment::{latest_treatment, TreatmentRecord};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },
}
