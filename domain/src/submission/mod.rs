//! Submission preparation and failure reporting.
//!
//! - [`sanitizer`]: free-text hygiene before transmission
//! - [`payload`]: the wire payload and the normalizer that builds it
//! - [`failure`]: classified delivery failures
//! - [`classifier`]: user-facing messages for surfaced failures

pub mod classifier;
pub mod failure;
pub mod payload;
pub mod sanitizer;
