pub mod config;
pub mod followup; // next-visit scheduling after treatment
pub mod kinetics; // doubling time, velocity, trend, risk
pub mod models;

pub use followup::{plan_followup, FollowUpPlan, PlanError};
pub use kinetics::{analyze_series as analyze, AnalysisResult, DefaultKineticsEngine, KineticsEngine};

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Reads `RUST_LOG`, falling back to
/// `config::default_log_filter()`. Safe to call more than once.
pub fn init_tracing() {
    let initialised = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if initialised {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}
