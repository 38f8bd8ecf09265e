use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

pub const MAX_FAILURE_RATE_ENV: &str = "OCIS_LOADTEST_MAX_FAILURE_RATE";
pub const MAX_AVG_RESPONSE_ENV: &str = "OCIS_LOADTEST_MAX_AVG_RESPONSE_MS";
pub const REPORT_JSON_ENV: &str = "OCIS_LOADTEST_REPORT_JSON";

/// Per-virtual-user session settings, applied when the scenario is built and
/// when each user starts.
#[derive(Debug, Clone, Copy)]
pub struct UserProfile {
    pub wait_min: Duration,
    pub wait_max: Duration,
    pub verify_tls: bool,
}

impl UserProfile {
    pub const DEFAULT: UserProfile = UserProfile {
        wait_min: Duration::from_secs(1),
        wait_max: Duration::from_secs(3),
        verify_tls: true,
    };
}

/// Pass/fail limits evaluated at run end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    pub max_failure_rate_pct: f64,
    pub max_avg_response_ms: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            max_failure_rate_pct: 5.0,
            max_avg_response_ms: 3000.0,
        }
    }
}

impl Thresholds {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Override the defaults from an environment-style lookup. Unparseable
    /// values are ignored with a warning rather than aborting a load run.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut thresholds = Thresholds::default();
        if let Some(raw) = lookup(MAX_FAILURE_RATE_ENV) {
            match raw.parse::<f64>() {
                Ok(value) if value >= 0.0 => thresholds.max_failure_rate_pct = value,
                _ => warn!(%raw, "{MAX_FAILURE_RATE_ENV} is not a percentage, keeping default"),
            }
        }
        if let Some(raw) = lookup(MAX_AVG_RESPONSE_ENV) {
            match raw.parse::<f64>() {
                Ok(value) if value >= 0.0 => thresholds.max_avg_response_ms = value,
                _ => warn!(%raw, "{MAX_AVG_RESPONSE_ENV} is not a duration in ms, keeping default"),
            }
        }
        thresholds
    }
}

/// Optional path for a machine-readable copy of the verdict report.
pub fn report_json_path() -> Option<PathBuf> {
    env::var_os(REPORT_JSON_ENV).map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.max_failure_rate_pct, 5.0);
        assert_eq!(thresholds.max_avg_response_ms, 3000.0);
    }

    #[test]
    fn lookup_overrides_both_limits() {
        let thresholds = Thresholds::from_lookup(|key| match key {
            MAX_FAILURE_RATE_ENV => Some("2.5".to_string()),
            MAX_AVG_RESPONSE_ENV => Some("1500".to_string()),
            _ => None,
        });
        assert_eq!(thresholds.max_failure_rate_pct, 2.5);
        assert_eq!(thresholds.max_avg_response_ms, 1500.0);
    }

    #[test]
    fn garbage_values_keep_the_defaults() {
        let thresholds = Thresholds::from_lookup(|key| match key {
            MAX_FAILURE_RATE_ENV => Some("lots".to_string()),
            MAX_AVG_RESPONSE_ENV => Some("-3".to_string()),
            _ => None,
        });
        assert_eq!(thresholds, Thresholds::default());
    }

    #[test]
    fn default_profile_waits_between_one_and_three_seconds() {
        let profile = UserProfile::DEFAULT;
        assert_eq!(profile.wait_min, Duration::from_secs(1));
        assert_eq!(profile.wait_max, Duration::from_secs(3));
        assert!(profile.verify_tls);
    }
}
