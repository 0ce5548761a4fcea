//! Application-level configuration.
//!
//! - [`DeliveryPolicy`]: attempt limit, per-attempt timeout and backoff step

pub mod delivery_policy;

pub use delivery_policy::DeliveryPolicy;
