//! Resilient client for the job tracker backend services, plus the gateway
//! and CLI built on top of it.

pub mod cli;
pub mod clients;
pub mod core;
pub mod error;
pub mod types;
pub mod web;

#[cfg(test)]
pub mod test_support;

pub use crate::core::{AppConfig, RetryPolicy, ServiceClient, ServiceName, ServiceRegistry};
pub use error::{ClientError, ConfigurationError};
pub use web::start_web_server;
