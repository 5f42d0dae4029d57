//! Medicare-supplement quote aggregation library.
//!
//! [`quotes`] holds the deterministic aggregation engine and its HTTP router;
//! [`config`], [`telemetry`], and [`error`] carry the service plumbing shared
//! with the API binary.

pub mod config;
pub mod error;
pub mod quotes;
pub mod telemetry;
