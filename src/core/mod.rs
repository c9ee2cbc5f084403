// src/core/mod.rs
//! Service plumbing: configuration, registry, retry policy and the HTTP client

pub mod config_manager;
pub mod retry;
pub mod service_client;
pub mod service_registry;
pub mod transport;

pub use config_manager::AppConfig;
pub use retry::{AttemptFailure, MutationRetry, RetryPolicy};
pub use service_client::ServiceClient;
pub use service_registry::{Endpoint, ServiceName, ServiceRegistry};
pub use transport::{HttpTransport, MultipartPayload, OutgoingRequest, RawResponse, ReqwestTransport};
