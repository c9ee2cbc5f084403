// src/core/service_registry.rs
//! Static mapping from logical backend services to their base URLs

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceName {
    UserService,
    AtsService,
    AgentOrchestrationService,
    ResumeService,
}

impl ServiceName {
    pub const ALL: [ServiceName; 4] = [
        ServiceName::UserService,
        ServiceName::AtsService,
        ServiceName::AgentOrchestrationService,
        ServiceName::ResumeService,
    ];

    /// Registry key, e.g. `USER_SERVICE`.
    pub fn key(self) -> &'static str {
        match self {
            ServiceName::UserService => "USER_SERVICE",
            ServiceName::AtsService => "ATS_SERVICE",
            ServiceName::AgentOrchestrationService => "AGENT_ORCHESTRATION_SERVICE",
            ServiceName::ResumeService => "RESUME_SERVICE",
        }
    }

    /// Environment variable holding the base URL.
    pub fn env_var(self) -> &'static str {
        match self {
            ServiceName::UserService => "USER_SERVICE_URL",
            ServiceName::AtsService => "ATS_SERVICE_URL",
            ServiceName::AgentOrchestrationService => "AGENT_ORCHESTRATION_SERVICE_URL",
            ServiceName::ResumeService => "RESUME_SERVICE_URL",
        }
    }

    /// Local development fallback used when nothing else is configured.
    pub fn default_url(self) -> &'static str {
        match self {
            ServiceName::UserService => "http://localhost:8000",
            ServiceName::AtsService => "http://localhost:8001",
            ServiceName::AgentOrchestrationService => "http://localhost:8002",
            ServiceName::ResumeService => "http://localhost:8003",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ServiceName {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceName::ALL
            .into_iter()
            .find(|name| name.key() == s)
            .ok_or_else(|| ConfigurationError::UnknownService(s.to_string()))
    }
}

/// A logical operation's location: which service, which path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub service: ServiceName,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn new(service: ServiceName, path: &'static str) -> Self {
        Self { service, path }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRegistry {
    base_urls: BTreeMap<ServiceName, String>,
}

impl ServiceRegistry {
    pub fn new(base_urls: BTreeMap<ServiceName, String>) -> Self {
        Self { base_urls }
    }

    /// Registry pointing every service at its localhost fallback.
    pub fn with_defaults() -> Self {
        Self::new(
            ServiceName::ALL
                .into_iter()
                .map(|name| (name, name.default_url().to_string()))
                .collect(),
        )
    }

    pub fn base_url(&self, service: ServiceName) -> Result<&str, ConfigurationError> {
        self.base_urls
            .get(&service)
            .map(String::as_str)
            .ok_or_else(|| ConfigurationError::MissingServiceUrl(service.key().to_string()))
    }

    /// Base URL followed by `path`, verbatim. Callers supply the leading slash.
    pub fn resolve(&self, service: ServiceName, path: &str) -> Result<String, ConfigurationError> {
        Ok(format!("{}{}", self.base_url(service)?, path))
    }

    /// Same as [`resolve`](Self::resolve) but keyed by the registry name
    /// (`"USER_SERVICE"`); unknown names fail before any I/O happens.
    pub fn resolve_endpoint(&self, service_name: &str, path: &str) -> Result<String, ConfigurationError> {
        let service = service_name.parse::<ServiceName>()?;
        self.resolve(service, path)
    }

    pub fn entries(&self) -> impl Iterator<Item = (ServiceName, &str)> {
        self.base_urls.iter().map(|(name, url)| (*name, url.as_str()))
    }
}
