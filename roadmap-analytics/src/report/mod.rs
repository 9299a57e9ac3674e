//! Full-report orchestration.

mod engine;

pub use engine::{AnalyticsEngine, MilestoneProgress, ReportDiagnostics, RoadmapReport};
