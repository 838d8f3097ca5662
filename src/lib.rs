//! # shared-utils
//!
//! Small shared helpers for data projects.
//!
//! ## Modules
//!
//! - [`numeric`] — Arithmetic, descriptive statistics, normalization,
//!   distances, covariance/correlation and percentiles
//! - [`text`] — Case conversion and string cleaning
//! - [`config`] — `.env`-aware settings and the data directory layout
//! - [`logging`] — Named loggers with console and size-rotating file output
//! - [`pipelines`] — Saving records as CSV into raw/processed data folders
//!
//! ## Design Philosophy
//!
//! - **Total numeric functions**: degenerate input (empty samples, zero
//!   variance, zero divisors) maps to documented sentinels, never a panic
//! - **No global state**: loggers and paths are built from explicit config
//! - **Property-based testing**: mathematical invariants verified via proptest

pub mod config;
pub mod error;
pub mod logging;
pub mod numeric;
pub mod pipelines;
pub mod text;

pub use error::{Error, Result};
