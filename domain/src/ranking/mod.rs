//! Rank assignment: per-question option marks and the exclusivity rule.

pub mod label;
pub mod store;
