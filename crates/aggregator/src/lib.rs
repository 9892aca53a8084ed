//! Sliding-window aggregation crate.
//!
//! Owns the shared number window and the per-request orchestration.

pub mod engine;
pub mod store;

pub use engine::Aggregator;
pub use store::{MergeReport, WindowStore};
