//! Blocker detection and impact analysis.
//!
//! Flags features that are stuck (stale, waiting on prerequisites, or
//! waiting on something outside the roadmap) and sizes the downstream
//! work each one holds up.

mod detector;
mod impact;
mod patterns;
mod types;

pub use detector::detect;
pub use impact::{compute_impact, BlockerImpact};
pub use patterns::{BlockerPatternSet, PatternMatch};
pub use types::{Blocker, BlockerKind, Severity};
