//! # Tradebook Analytics Engine
//!
//! This crate derives every number the journal displays or exports from a
//! snapshot of the trade store. It acts as the "unbiased judge" of the
//! journal: it never mutates anything and never reads ambient state.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** Every function takes the trade slice as a parameter
//!   and depends only on `core-types`. The current time, where needed for
//!   report metadata, is passed in by the caller.
//! - **Round Once:** Aggregation runs at full `Decimal` precision;
//!   fixed-precision rounding happens a single time, on the output fields.
//!
//! ## Public API
//!
//! - `compute_stats` / `Stats`: the aggregate metrics block.
//! - `breakdown`: per-dimension aggregation, streaks, monthly buckets and
//!   risk/reward.
//! - `build_report` / `ReportDocument`: the full structured report.
//! - `AnalyticsError`: the specific error types this crate can return.

pub mod breakdown;
pub mod engine;
pub mod error;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{compute_stats, cumulative_pnl, Stats};
pub use error::AnalyticsError;
pub use report::{build_report, AnalysisSection, PerformanceSection, ReportDocument, ReportMetadata};
