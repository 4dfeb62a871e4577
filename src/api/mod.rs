//! HTTP API module
//!
//! REST surface over the analysis pipeline. Run with `insight-server`.

pub mod handlers;
pub mod server;

pub use server::run_api_server;
