// src/core/config_manager.rs
//! Process-wide configuration, built once at startup and then read-only

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::core::retry::{
    MutationRetry, RetryPolicy, DEFAULT_ATTEMPT_TIMEOUT_MS, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_DELAY_MS,
};
use crate::core::service_registry::{ServiceName, ServiceRegistry};
use crate::error::ConfigurationError;

pub const DEFAULT_GATEWAY_PORT: u16 = 8080;
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub attempt_timeout: Option<Duration>,
    pub mutations: MutationRetry,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            attempt_timeout: Some(Duration::from_millis(DEFAULT_ATTEMPT_TIMEOUT_MS)),
            mutations: MutationRetry::default(),
        }
    }
}

impl FetchSettings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_delay)
            .with_attempt_timeout(self.attempt_timeout)
            .with_mutations(self.mutations)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub environment: String,
    pub services: BTreeMap<ServiceName, String>,
    pub fetch: FetchSettings,
    pub gateway_port: u16,
}

/// One environment section of `config.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileSection {
    #[serde(default)]
    pub services: HashMap<String, String>,
    #[serde(default)]
    pub fetch: FileFetch,
    pub gateway_port: Option<u16>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileFetch {
    pub max_retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
    pub attempt_timeout_ms: Option<u64>,
    pub mutation_retry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl AppConfig {
    /// `.env`, then `config.yaml` (if any), then process environment.
    pub fn load() -> Result<Self, ConfigurationError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading configuration for environment: {}", environment);

        let section = Self::read_file_section(Path::new(CONFIG_FILE), &environment)?;
        Self::from_sources(&environment, section.as_ref(), |key| std::env::var(key).ok())
    }

    fn read_file_section(
        path: &Path,
        environment: &str,
    ) -> Result<Option<FileSection>, ConfigurationError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::File(format!("{}: {}", path.display(), e)))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .map_err(|e| ConfigurationError::File(format!("{}: {}", path.display(), e)))?;

        info!("Using {}", path.display());
        Ok(Some(match environment {
            "production" => file.production,
            "local" => file.local,
            other => {
                warn!("No '{}' section in {}, using 'local'", other, path.display());
                file.local
            }
        }))
    }

    /// Builds the configuration from an optional file section and a variable
    /// lookup. Variables win over the file; the file wins over fallbacks.
    pub fn from_sources<F>(
        environment: &str,
        section: Option<&FileSection>,
        lookup: F,
    ) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let empty = FileSection::default();
        let section = section.unwrap_or(&empty);
        // Blank variables (`KEY=` in .env) count as unset.
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        for key in section.services.keys() {
            key.parse::<ServiceName>()?;
        }

        let services = ServiceName::ALL
            .into_iter()
            .map(|name| {
                let url = var(name.env_var())
                    .or_else(|| section.services.get(name.key()).cloned())
                    .unwrap_or_else(|| name.default_url().to_string());
                (name, url)
            })
            .collect();

        let defaults = FetchSettings::default();
        let max_retries = match var("FETCH_MAX_RETRIES") {
            Some(raw) => parse_value("FETCH_MAX_RETRIES", &raw)?,
            None => section.fetch.max_retries.unwrap_or(defaults.max_retries),
        };
        let retry_delay_ms = match var("FETCH_RETRY_DELAY_MS") {
            Some(raw) => parse_value("FETCH_RETRY_DELAY_MS", &raw)?,
            None => section.fetch.retry_delay_ms.unwrap_or(DEFAULT_RETRY_DELAY_MS),
        };
        let attempt_timeout_ms: u64 = match var("FETCH_ATTEMPT_TIMEOUT_MS") {
            Some(raw) => parse_value("FETCH_ATTEMPT_TIMEOUT_MS", &raw)?,
            None => section
                .fetch
                .attempt_timeout_ms
                .unwrap_or(DEFAULT_ATTEMPT_TIMEOUT_MS),
        };
        let mutations = match var("FETCH_MUTATION_RETRY").or_else(|| section.fetch.mutation_retry.clone()) {
            Some(raw) => raw.parse::<MutationRetry>()?,
            None => defaults.mutations,
        };
        let gateway_port = match var("GATEWAY_PORT") {
            Some(raw) => parse_value("GATEWAY_PORT", &raw)?,
            None => section.gateway_port.unwrap_or(DEFAULT_GATEWAY_PORT),
        };

        Ok(Self {
            environment: environment.to_string(),
            services,
            fetch: FetchSettings {
                max_retries,
                retry_delay: Duration::from_millis(retry_delay_ms),
                // 0 disables the per-attempt timeout.
                attempt_timeout: (attempt_timeout_ms > 0)
                    .then(|| Duration::from_millis(attempt_timeout_ms)),
                mutations,
            },
            gateway_port,
        })
    }

    pub fn registry(&self) -> ServiceRegistry {
        ServiceRegistry::new(self.services.clone())
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigurationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigurationError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_localhost_defaults() {
        let config = AppConfig::from_sources("local", None, lookup_from(&[])).unwrap();
        assert_eq!(config.services[&ServiceName::UserService], "http://localhost:8000");
        assert_eq!(config.services[&ServiceName::ResumeService], "http://localhost:8003");
        assert_eq!(config.fetch, FetchSettings::default());
        assert_eq!(config.gateway_port, DEFAULT_GATEWAY_PORT);
    }

    #[test]
    fn environment_overrides_file_which_overrides_defaults() {
        let section: FileSection = serde_yaml::from_str(
            r#"
services:
  USER_SERVICE: http://users.from-file
  ATS_SERVICE: http://ats.from-file
fetch:
  max_retries: 5
  retry_delay_ms: 250
"#,
        )
        .unwrap();
        let config = AppConfig::from_sources(
            "local",
            Some(&section),
            lookup_from(&[("USER_SERVICE_URL", "http://users.from-env"), ("FETCH_MAX_RETRIES", "1")]),
        )
        .unwrap();

        assert_eq!(config.services[&ServiceName::UserService], "http://users.from-env");
        assert_eq!(config.services[&ServiceName::AtsService], "http://ats.from-file");
        assert_eq!(config.fetch.max_retries, 1);
        assert_eq!(config.fetch.retry_delay, Duration::from_millis(250));
    }

    #[test]
    fn unknown_service_in_file_fails_fast() {
        let section: FileSection = serde_yaml::from_str("services:\n  BILLING_SERVICE: http://x\n").unwrap();
        let err = AppConfig::from_sources("local", Some(&section), lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownService("BILLING_SERVICE".to_string()));
    }

    #[test]
    fn invalid_numbers_are_reported_with_their_key() {
        let err = AppConfig::from_sources("local", None, lookup_from(&[("FETCH_RETRY_DELAY_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidValue { ref key, .. } if key == "FETCH_RETRY_DELAY_MS"));
    }

    #[test]
    fn zero_attempt_timeout_disables_it() {
        let config = AppConfig::from_sources("local", None, lookup_from(&[("FETCH_ATTEMPT_TIMEOUT_MS", "0")]))
            .unwrap();
        assert_eq!(config.fetch.attempt_timeout, None);
        assert_eq!(config.fetch.retry_policy().attempt_timeout, None);
    }

    fn write_config(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("jobtrack-config-{}.yaml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path
    }

    const TWO_SECTIONS: &str = r#"
local:
  services:
    USER_SERVICE: http://localhost:9000
production:
  services:
    USER_SERVICE: https://users.example.com
  fetch:
    max_retries: 5
  gateway_port: 9090
"#;

    #[test]
    fn environment_picks_the_config_file_section() {
        let path = write_config(TWO_SECTIONS);

        let section = AppConfig::read_file_section(&path, "production").unwrap().unwrap();
        let config = AppConfig::from_sources("production", Some(&section), lookup_from(&[])).unwrap();
        assert_eq!(config.services[&ServiceName::UserService], "https://users.example.com");
        assert_eq!(config.fetch.max_retries, 5);
        assert_eq!(config.gateway_port, 9090);

        let local = AppConfig::read_file_section(&path, "local").unwrap().unwrap();
        assert_eq!(local.services["USER_SERVICE"], "http://localhost:9000");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unknown_environment_falls_back_to_local_section() {
        let path = write_config(TWO_SECTIONS);

        let section = AppConfig::read_file_section(&path, "staging").unwrap().unwrap();
        assert_eq!(section.services["USER_SERVICE"], "http://localhost:9000");
        assert_eq!(section.gateway_port, None);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_config_file_is_a_file_error() {
        let path = write_config("local: [this is: not a section");

        let err = AppConfig::read_file_section(&path, "local").unwrap_err();
        assert!(matches!(err, ConfigurationError::File(ref message) if message.contains("jobtrack-config-")));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let path = std::env::temp_dir().join(format!("jobtrack-absent-{}.yaml", uuid::Uuid::new_v4()));
        assert!(AppConfig::read_file_section(&path, "local").unwrap().is_none());
    }

    #[test]
    fn blank_numeric_variables_count_as_unset() {
        let config = AppConfig::from_sources(
            "local",
            None,
            lookup_from(&[
                ("FETCH_MAX_RETRIES", ""),
                ("FETCH_RETRY_DELAY_MS", "  "),
                ("GATEWAY_PORT", ""),
                ("FETCH_MUTATION_RETRY", ""),
            ]),
        )
        .unwrap();
        assert_eq!(config.fetch, FetchSettings::default());
        assert_eq!(config.gateway_port, DEFAULT_GATEWAY_PORT);
    }

    #[test]
    fn registry_reflects_configured_urls() {
        let config = AppConfig::from_sources(
            "production",
            None,
            lookup_from(&[("ATS_SERVICE_URL", "https://ats.example.com")]),
        )
        .unwrap();
        assert_eq!(
            config.registry().resolve_endpoint("ATS_SERVICE", "/v1/ats-score").unwrap(),
            "https://ats.example.com/v1/ats-score"
        );
    }
}
