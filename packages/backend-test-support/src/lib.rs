//! Shared helpers for classroom-server integration tests.
//!
//! Kept free of any dependency on the server crate so test binaries can
//! assert against the wire contract rather than internal types.

pub mod ids;
pub mod logging;
pub mod problem;
