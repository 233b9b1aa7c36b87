//! Core library for landfall
//!
//! This crate implements the **Functional Core** of the landfall application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`landfall_core`** (this crate): Pure transformation functions with zero I/O
//! - **`landfall`**: API client, terminal rendering, HTTP server (the Imperative Shell)
//!
//! The shell fetches raw JSON collections of cores, landpads, and launches and
//! hands them to this crate. Everything here is deterministic and takes its
//! input by reference; no function mutates its input or keeps state between
//! calls.
//!
//! # Module Organization
//!
//! - [`records`]: Raw API shapes and their normalization into domain types
//! - [`fleet`]: Fleet-wide booster statistics and reuse views
//! - [`landpads`]: Per-pad landing success rates
//! - [`launches`]: Recovery attempts flattened out of launch history
//! - [`trends`]: Yearly and per-landing-type breakdowns of recovery attempts
//! - [`ranking`]: Percentages, stable ranking, and "last N" helpers
//! - [`report`]: Dashboard and analysis snapshots built from the above
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use landfall_core::launches::extract_recoveries;
//! use landfall_core::records::parse_launches;
//! use landfall_core::trends::yearly_trend;
//!
//! let launches = parse_launches(serde_json::json!([
//!     {
//!         "name": "ORBCOMM-2",
//!         "date_utc": "2015-12-22T01:29:00.000Z",
//!         "cores": [{ "landing_attempt": true, "landing_success": true, "landing_type": "RTLS" }]
//!     }
//! ]))?;
//!
//! let trend = yearly_trend(&extract_recoveries(&launches));
//! assert_eq!(trend[0].year, 2015);
//! assert_eq!(trend[0].success_rate, 100.0);
//! ```

pub mod error;
pub mod fleet;
pub mod landpads;
pub mod launches;
pub mod ranking;
pub mod records;
pub mod report;
pub mod trends;

pub use error::{MalformedReason, RecordKind, RecoveryError};
