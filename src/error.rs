// src/error.rs
//! Error taxonomy shared by the registry, the fetch client and the domain clients

use std::time::Duration;
use thiserror::Error;

/// Problems with the process-wide service configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("No base URL configured for service {0}")]
    MissingServiceUrl(String),

    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read configuration file: {0}")]
    File(String),
}

/// Every failure a domain client can surface.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Network error calling {url}: {message}")]
    Network { url: String, message: String },

    #[error("Request to {url} timed out after {}ms", .after.as_millis())]
    Timeout { url: String, after: Duration },

    /// `message` is extracted from the response body (`detail`/`message`)
    /// and falls back to the status text.
    #[error("{message}")]
    Http {
        url: String,
        status: u16,
        status_text: String,
        message: String,
    },

    #[error("Failed to parse response from {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Invalid input: {0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status of the upstream response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Stable machine-readable code used by the gateway error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Configuration(_) => "CONFIGURATION_ERROR",
            ClientError::Network { .. } => "NETWORK_ERROR",
            ClientError::Timeout { .. } => "TIMEOUT",
            ClientError::Http { .. } => "UPSTREAM_ERROR",
            ClientError::Parse { .. } => "INVALID_UPSTREAM_RESPONSE",
            ClientError::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_extracted_message_only() {
        let err = ClientError::Http {
            url: "http://localhost:8000/profile".to_string(),
            status: 404,
            status_text: "Not Found".to_string(),
            message: "Not found".to_string(),
        };
        assert_eq!(err.to_string(), "Not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.code(), "UPSTREAM_ERROR");
    }

    #[test]
    fn configuration_error_names_missing_key() {
        let err: ClientError = ConfigurationError::UnknownService("NOT_A_SERVICE".to_string()).into();
        assert_eq!(err.to_string(), "Unknown service: NOT_A_SERVICE");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn timeout_reports_milliseconds() {
        let err = ClientError::Timeout {
            url: "http://x".to_string(),
            after: Duration::from_millis(1500),
        };
        assert_eq!(err.to_string(), "Request to http://x timed out after 1500ms");
    }
}
