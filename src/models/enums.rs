use serde::{Deserialize, Serialize};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(TreatmentKind {
    Surgery => "surgery",
    Radiation => "radiation",
    HormoneTherapy => "hormone_therapy",
    Chemotherapy => "chemotherapy",
    SystemicTherapy => "systemic_therapy",
});

impl TreatmentKind {
    /// Human-readable treatment name used in plan reasons.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Surgery => "surgery",
            Self::Radiation => "radiation therapy",
            Self::HormoneTherapy => "hormone therapy",
            Self::Chemotherapy => "chemotherapy",
            Self::SystemicTherapy => "systemic therapy",
        }
    }
}

str_enum!(Trend {
    RisingSignificant => "rising_significant",
    RisingModerate => "rising_moderate",
    Stable => "stable",
    DecliningModerate => "declining_moderate",
    DecliningSignificant => "declining_significant",
});

// ---------------------------------------------------------------------------
// Ordinal enums (severity ordering matters, so no macro)
// ---------------------------------------------------------------------------

/// Ordinal risk classification. Ordering is severity: `Low < Moderate < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "moderate" => Ok(Self::Moderate),
            "high" => Ok(Self::High),
            _ => Err(ModelError::InvalidEnum {
                field: "RiskLevel".into(),
                value: s.into(),
            }),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visit priority. Ordering is urgency: `Routine < Low < Moderate < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpPriority {
    #[default]
    Routine,
    Low,
    Moderate,
    High,
}

impl FollowUpPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Routine => "routine",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

impl From<RiskLevel> for FollowUpPriority {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Low => Self::Low,
            RiskLevel::Moderate => Self::Moderate,
            RiskLevel::High => Self::High,
        }
    }
}

impl std::fmt::Display for FollowUpPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
