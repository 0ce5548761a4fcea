//! HTTP adapter for the submission transport port.

mod transport;

pub use transport::HttpSubmissionTransport;
