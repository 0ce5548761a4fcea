//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod delivery_logger;
pub mod delivery_progress;
pub mod submission_transport;
