//! The roadmap snapshot data model.

pub mod feature;
pub mod milestone;
pub mod snapshot;
pub mod sprint;
pub mod transition;

pub use feature::{Feature, FeatureStatus};
pub use milestone::Milestone;
pub use snapshot::RoadmapSnapshot;
pub use sprint::SprintRecord;
pub use transition::StatusTransition;
