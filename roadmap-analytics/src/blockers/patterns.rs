//! External-blocker keyword matching.
//!
//! All configured patterns compile into a single `RegexSet` so feature notes
//! are scanned in one pass, case-insensitively.

use regex::{Regex, RegexSetBuilder};

use roadmap_core::config::ExternalPattern;
use roadmap_core::errors::ConfigError;

use super::types::Severity;

/// A compiled set of external-blocker patterns.
#[derive(Debug)]
pub struct BlockerPatternSet {
    regex_set: regex::RegexSet,
    sources: Vec<String>,
    severities: Vec<Severity>,
}

/// Which pattern matched, and at what severity.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternMatch {
    pub pattern: String,
    pub severity: Severity,
}

impl BlockerPatternSet {
    /// Compile the configured patterns.
    pub fn compile(patterns: &[ExternalPattern]) -> Result<Self, ConfigError> {
        let sources: Vec<String> = patterns.iter().map(|p| p.pattern.clone()).collect();
        let severities = patterns
            .iter()
            .map(|p| {
                if p.high_severity {
                    Severity::High
                } else {
                    Severity::Medium
                }
            })
            .collect();

        match RegexSetBuilder::new(&sources).case_insensitive(true).build() {
            Ok(regex_set) => Ok(Self {
                regex_set,
                sources,
                severities,
            }),
            Err(e) => {
                // Recompile individually to name the offending pattern.
                let culprit = patterns
                    .iter()
                    .find(|p| Regex::new(&p.pattern).is_err())
                    .map(|p| p.pattern.clone())
                    .unwrap_or_default();
                Err(ConfigError::InvalidPattern {
                    pattern: culprit,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Match feature notes against every pattern in one pass.
    ///
    /// When several patterns match, a high-severity pattern wins over a
    /// medium one; ties go to the earliest configured pattern.
    pub fn match_notes(&self, notes: &str) -> Option<PatternMatch> {
        let mut best: Option<usize> = None;
        for index in self.regex_set.matches(notes) {
            let better = match best {
                None => true,
                Some(current) => {
                    self.severities[index].rank() > self.severities[current].rank()
                }
            };
            if better {
                best = Some(index);
            }
        }
        best.map(|index| PatternMatch {
            pattern: self.sources[index].clone(),
            severity: self.severities[index],
        })
    }

    pub fn pattern_count(&self) -> usize {
        self.sources.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadmap_core::config::default_external_patterns;

    #[test]
    fn test_builtin_patterns_compile() {
        let set = BlockerPatternSet::compile(&default_external_patterns()).unwrap();
        assert_eq!(set.pattern_count(), 3);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let set = BlockerPatternSet::compile(&default_external_patterns()).unwrap();
        let matched = set.match_notes("Waiting On legal review").unwrap();
        assert_eq!(matched.pattern, "waiting on");
        assert_eq!(matched.severity, Severity::Medium);
    }

    #[test]
    fn test_no_match_for_plain_notes() {
        let set = BlockerPatternSet::compile(&default_external_patterns()).unwrap();
        assert!(set.match_notes("all clear, shipping friday").is_none());
    }

    #[test]
    fn test_high_severity_pattern_wins() {
        let patterns = vec![
            ExternalPattern::new("waiting on"),
            ExternalPattern::high("blocked by vendor"),
        ];
        let set = BlockerPatternSet::compile(&patterns).unwrap();
        let matched = set
            .match_notes("waiting on legal, blocked by vendor outage")
            .unwrap();
        assert_eq!(matched.severity, Severity::High);
        assert_eq!(matched.pattern, "blocked by vendor");
    }

    #[test]
    fn test_invalid_pattern_is_named_in_the_error() {
        let patterns = vec![
            ExternalPattern::new("waiting on"),
            ExternalPattern::new("broken("),
        ];
        match BlockerPatternSet::compile(&patterns) {
            Err(ConfigError::InvalidPattern { pattern, .. }) => {
                assert_eq!(pattern, "broken(");
            }
            other => panic!("expected invalid pattern error, got {other:?}"),
        }
    }
}
