//! Delivery progress display

pub mod reporter;
