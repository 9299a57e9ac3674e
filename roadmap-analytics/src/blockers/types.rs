//! Blocker types and severity.

use std::fmt;

use serde::{Deserialize, Serialize};

use roadmap_core::config::AnalyticsConfig;

/// How serious a blocker is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Classify a stale duration against the configured thresholds.
    /// Anything at or under the staleness threshold is not a blocker.
    pub fn from_stale_days(days_blocked: i64, config: &AnalyticsConfig) -> Option<Self> {
        if days_blocked > i64::from(config.effective_stale_critical_days()) {
            Some(Self::Critical)
        } else if days_blocked > i64::from(config.effective_stale_high_days()) {
            Some(Self::High)
        } else if days_blocked > i64::from(config.effective_stale_days()) {
            Some(Self::Medium)
        } else {
            None
        }
    }

    /// Rank for ordering; higher is more severe.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Critical => 3,
            Self::High => 2,
            Self::Medium => 1,
            Self::Low => 0,
        }
    }

    /// Severity name as string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a feature is blocked. A tagged union so new causes never touch the
/// ranking or impact logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BlockerKind {
    /// In progress with no recorded activity past the staleness threshold.
    Stale,
    /// Waiting on prerequisites that are not done.
    Dependency { unmet: Vec<String> },
    /// The feature's notes flag a wait on an outside party.
    External { pattern: String },
}

impl BlockerKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stale => "stale",
            Self::Dependency { .. } => "dependency",
            Self::External { .. } => "external",
        }
    }
}

impl fmt::Display for BlockerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One detected blocker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blocker {
    /// The blocked feature.
    pub feature_id: String,
    pub kind: BlockerKind,
    pub severity: Severity,
    /// Days since the feature's last recorded activity; for stale blockers
    /// this is what tripped the threshold.
    pub days_blocked: i64,
    /// The feature itself plus every transitive dependent, feature first.
    pub affected_feature_ids: Vec<String>,
    /// Remaining work stuck behind the feature, in the configured unit.
    pub points_blocked: f64,
    /// Milestones whose members intersect the affected set, sorted by id.
    pub milestones_at_risk: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_ladder_with_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(Severity::from_stale_days(7, &config), None);
        assert_eq!(
            Severity::from_stale_days(10, &config),
            Some(Severity::Medium)
        );
        assert_eq!(Severity::from_stale_days(14, &config), Some(Severity::Medium));
        assert_eq!(Severity::from_stale_days(15, &config), Some(Severity::High));
        assert_eq!(Severity::from_stale_days(21, &config), Some(Severity::High));
        assert_eq!(
            Severity::from_stale_days(22, &config),
            Some(Severity::Critical)
        );
    }

    #[test]
    fn test_rank_orders_severities() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }
}
