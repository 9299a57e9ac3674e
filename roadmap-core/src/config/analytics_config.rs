//! Analytics configuration.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which series velocity is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VelocityUnit {
    /// Completed story points per sprint.
    #[default]
    StoryPoints,
    /// Completed item count per sprint; every feature weighs 1 until done.
    ItemCount,
}

/// A keyword pattern that marks a feature as externally blocked.
/// Patterns are matched case-insensitively against feature notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalPattern {
    /// Regular expression source.
    pub pattern: String,
    /// Escalates matches to high severity instead of the default medium.
    #[serde(default)]
    pub high_severity: bool,
}

impl ExternalPattern {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            high_severity: false,
        }
    }

    pub fn high(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            high_severity: true,
        }
    }
}

/// Configuration for the analytics engine.
/// All fields are optional; `effective_*` accessors supply the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Series velocity is measured in. Default: story points.
    pub velocity_unit: Option<VelocityUnit>,
    /// Days without activity before an in-progress feature counts as stale.
    /// Default: 7.
    pub stale_days: Option<u32>,
    /// Days blocked above which a stale blocker is high severity. Default: 14.
    pub stale_high_days: Option<u32>,
    /// Days blocked above which a stale blocker is critical. Default: 21.
    pub stale_critical_days: Option<u32>,
    /// Calendar days per sprint. Default: 14.
    pub sprint_duration_days: Option<u32>,
    /// Working days per sprint; when set, sprint length is scaled to
    /// calendar days at 7/5 before date arithmetic.
    pub working_days_per_sprint: Option<u32>,
    /// Floor for the conservative velocity estimate. Default: 0.1.
    pub conservative_floor: Option<f64>,
    /// Trailing window for cumulative-flow bottleneck detection. Default: 5.
    pub bottleneck_window_days: Option<u32>,
    /// Relative gap growth over the window that flags a bottleneck.
    /// Default: 0.20.
    pub bottleneck_ratio: Option<f64>,
    /// Keyword patterns that mark a feature as externally blocked.
    /// Empty means the built-in set.
    #[serde(default)]
    pub external_patterns: Vec<ExternalPattern>,
}

impl AnalyticsConfig {
    /// Returns the effective velocity unit, defaulting to story points.
    pub fn effective_velocity_unit(&self) -> VelocityUnit {
        self.velocity_unit.unwrap_or_default()
    }

    /// Returns the effective staleness threshold in days, defaulting to 7.
    pub fn effective_stale_days(&self) -> u32 {
        self.stale_days.unwrap_or(7)
    }

    /// Returns the high-severity staleness threshold, defaulting to 14.
    pub fn effective_stale_high_days(&self) -> u32 {
        self.stale_high_days.unwrap_or(14)
    }

    /// Returns the critical staleness threshold, defaulting to 21.
    pub fn effective_stale_critical_days(&self) -> u32 {
        self.stale_critical_days.unwrap_or(21)
    }

    /// Returns the sprint length in calendar days.
    /// A working-days override is scaled by 7/5 and rounded up.
    pub fn effective_sprint_calendar_days(&self) -> f64 {
        match self.working_days_per_sprint {
            Some(working) => (f64::from(working) * 7.0 / 5.0).ceil(),
            None => f64::from(self.sprint_duration_days.unwrap_or(14)),
        }
    }

    /// Returns the conservative velocity floor, defaulting to 0.1.
    pub fn effective_conservative_floor(&self) -> f64 {
        self.conservative_floor.unwrap_or(0.1)
    }

    /// Returns the bottleneck window in days, defaulting to 5.
    pub fn effective_bottleneck_window_days(&self) -> u32 {
        self.bottleneck_window_days.unwrap_or(5)
    }

    /// Returns the bottleneck growth ratio, defaulting to 0.20.
    pub fn effective_bottleneck_ratio(&self) -> f64 {
        self.bottleneck_ratio.unwrap_or(0.20)
    }

    /// Returns the configured external-blocker patterns, or the built-in set
    /// when none are configured.
    pub fn effective_external_patterns(&self) -> Vec<ExternalPattern> {
        if self.external_patterns.is_empty() {
            default_external_patterns()
        } else {
            self.external_patterns.clone()
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(days) = self.sprint_duration_days {
            if days == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "sprint_duration_days".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(working) = self.working_days_per_sprint {
            if working == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "working_days_per_sprint".to_string(),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        if let Some(floor) = self.conservative_floor {
            if floor <= 0.0 || !floor.is_finite() {
                return Err(ConfigError::ValidationFailed {
                    field: "conservative_floor".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        if let Some(ratio) = self.bottleneck_ratio {
            if ratio <= 0.0 || !ratio.is_finite() {
                return Err(ConfigError::ValidationFailed {
                    field: "bottleneck_ratio".to_string(),
                    message: "must be a positive finite number".to_string(),
                });
            }
        }
        let stale = self.effective_stale_days();
        let high = self.effective_stale_high_days();
        let critical = self.effective_stale_critical_days();
        if !(stale < high && high < critical) {
            return Err(ConfigError::ValidationFailed {
                field: "stale_days".to_string(),
                message: format!(
                    "thresholds must increase: stale ({stale}) < high ({high}) < critical ({critical})"
                ),
            });
        }
        Ok(())
    }
}

/// Built-in external-blocker patterns.
pub fn default_external_patterns() -> Vec<ExternalPattern> {
    vec![
        ExternalPattern::new("pending approval"),
        ExternalPattern::new("waiting on"),
        ExternalPattern::new("blocked by"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.effective_velocity_unit(), VelocityUnit::StoryPoints);
        assert_eq!(config.effective_stale_days(), 7);
        assert_eq!(config.effective_stale_high_days(), 14);
        assert_eq!(config.effective_stale_critical_days(), 21);
        assert_eq!(config.effective_sprint_calendar_days(), 14.0);
        assert_eq!(config.effective_bottleneck_window_days(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_working_days_scale_to_calendar() {
        let config = AnalyticsConfig {
            working_days_per_sprint: Some(10),
            ..Default::default()
        };
        // 10 working days is two weeks of calendar time.
        assert_eq!(config.effective_sprint_calendar_days(), 14.0);
    }

    #[test]
    fn test_invalid_stale_ordering_rejected() {
        let config = AnalyticsConfig {
            stale_days: Some(20),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_sprint_duration_rejected() {
        let config = AnalyticsConfig {
            sprint_duration_days: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builtin_patterns_used_when_unset() {
        let config = AnalyticsConfig::default();
        let patterns = config.effective_external_patterns();
        assert_eq!(patterns.len(), 3);
        assert!(patterns.iter().all(|p| !p.high_severity));
    }
}
