use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Oncotrack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result cache defaults (5 minutes, bounded).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

const ENV_CACHE_ENABLED: &str = "ONCOTRACK_CACHE_ENABLED";
const ENV_CACHE_CAPACITY: &str = "ONCOTRACK_CACHE_CAPACITY";
const ENV_CACHE_TTL_SECS: &str = "ONCOTRACK_CACHE_TTL_SECS";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "oncotrack=info"
}

/// Engine settings. Clinical thresholds are fixed and not part of this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub cache_enabled: bool,
    pub cache_capacity: usize,
    pub cache_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

impl EngineConfig {
    /// Read overrides from the environment; unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (environment, test map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cache_enabled = parse_or(&lookup, ENV_CACHE_ENABLED, defaults.cache_enabled);
        let cache_capacity = parse_or(&lookup, ENV_CACHE_CAPACITY, defaults.cache_capacity);
        let ttl_secs = parse_or(&lookup, ENV_CACHE_TTL_SECS, defaults.cache_ttl.as_secs());

        Self {
            cache_enabled,
            cache_capacity,
            cache_ttl: Duration::from_secs(ttl_secs),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring unparsable config value");
                default
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = EngineConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn overrides_are_applied() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("ONCOTRACK_CACHE_ENABLED", "false"),
            ("ONCOTRACK_CACHE_CAPACITY", "16"),
            ("ONCOTRACK_CACHE_TTL_SECS", " 60 "),
        ]));
        assert!(!config.cache_enabled);
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
    }

    #[test]
    fn bad_values_fall_back() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            ("ONCOTRACK_CACHE_CAPACITY", "lots"),
            ("ONCOTRACK_CACHE_TTL_SECS", "-5"),
        ]));
        assert_eq!(config.cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert_eq!(config.cache_ttl, Duration::from_secs(DEFAULT_CACHE_TTL_SECS));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn log_filter_targets_crate() {
        assert!(default_log_filter().starts_with("oncotrack"));
    }
}
