//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod deliver_payload;
pub mod delivery_stream;
pub mod gate;
pub mod submit_survey;
