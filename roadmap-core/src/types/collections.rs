//! Collection type aliases.
//!
//! Analysis passes are hash-heavy and never see adversarial keys, so the
//! whole workspace uses the Fx hasher.

pub use rustc_hash::{FxHashMap, FxHashSet};
