//! Shopping cart service over a relational product catalog.
//!
//! Cart lines are added (merging duplicates into quantity increments), listed
//! with per-line totals, re-quantified, removed, or cleared in bulk.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;
pub mod telemetry;

// Re-export commonly used types
pub use modules::cart;
