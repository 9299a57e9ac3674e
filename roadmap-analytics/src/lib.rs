//! Roadmap analytics: velocity, dependency analysis, forecasting, blocker
//! detection, and flow series over an immutable roadmap snapshot.
//!
//! Every analysis is a pure synchronous function of a snapshot and a
//! configuration; [`report::AnalyticsEngine`] runs them all and assembles
//! one report.

pub mod blockers;
pub mod critical_path;
pub mod flow;
pub mod forecast;
pub mod graph;
pub mod report;
pub mod velocity;

pub use report::{AnalyticsEngine, RoadmapReport};
