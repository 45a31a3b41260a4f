//! Background jobs that run alongside the HTTP server.

pub mod reaper;

pub use reaper::ReapJob;
