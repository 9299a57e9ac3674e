//! Dependency graph — petgraph StableDiGraph, prerequisite → dependent.
//!
//! Cycles are detected at build time and reported as warnings; every
//! downstream pass runs on the acyclic remainder.

pub mod builder;
pub mod cycles;
pub mod topo;
pub mod types;

pub use builder::build;
pub use topo::topological_order;
pub use types::{DependencyGraph, EdgeKind, GraphStats, GraphWarning, NodeKind, WorkNode};
