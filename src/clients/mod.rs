// src/clients/mod.rs
//! Typed domain operations, one module per backend concern.
//!
//! Each module adds methods to [`ServiceClient`](crate::core::ServiceClient):
//! resolve the endpoint, send through the retrying client, parse the typed
//! wire shape and map it for the dashboard.

pub mod applications;
pub mod ats;
pub mod jobs;
pub mod profile;
pub mod resumes;
