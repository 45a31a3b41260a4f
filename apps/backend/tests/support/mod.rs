#![allow(dead_code)]

pub mod server;

pub use app_builder::create_test_app;
pub use server::start_test_server;
