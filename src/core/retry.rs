// src/core/retry.rs
//! Retry policy for outgoing service requests

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;

use crate::error::ConfigurationError;

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
pub const DEFAULT_ATTEMPT_TIMEOUT_MS: u64 = 30_000;

/// Why a single attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptFailure {
    /// Connection refused, reset, DNS failure, body read failure.
    Network,
    /// The per-attempt timeout elapsed.
    Timeout,
    /// A response arrived with a non-2xx status.
    Status(u16),
}

pub type RetryPredicate = Arc<dyn Fn(&AttemptFailure) -> bool + Send + Sync>;

/// How POST/PUT/PATCH/DELETE requests are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationRetry {
    /// Retried exactly like reads.
    #[default]
    Retry,
    /// Retried, with one `Idempotency-Key` shared by every attempt.
    RetryWithIdempotencyKey,
    /// A single attempt.
    Never,
}

impl FromStr for MutationRetry {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retry" => Ok(MutationRetry::Retry),
            "idempotency-key" | "idempotency_key" => Ok(MutationRetry::RetryWithIdempotencyKey),
            "never" | "none" => Ok(MutationRetry::Never),
            _ => Err(ConfigurationError::InvalidValue {
                key: "FETCH_MUTATION_RETRY".to_string(),
                value: s.to_string(),
                reason: "expected retry, idempotency-key or never".to_string(),
            }),
        }
    }
}

pub fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

/// Every failure is retryable: network errors and any non-2xx status alike.
pub fn retry_all(_failure: &AttemptFailure) -> bool {
    true
}

/// Network errors, timeouts and 5xx only; 4xx fails fast.
pub fn retry_transient(failure: &AttemptFailure) -> bool {
    match failure {
        AttemptFailure::Network | AttemptFailure::Timeout => true,
        AttemptFailure::Status(status) => *status >= 500,
    }
}

#[derive(Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Constant wait between two attempts.
    pub retry_delay: Duration,
    pub attempt_timeout: Option<Duration>,
    pub mutations: MutationRetry,
    retry_predicate: RetryPredicate,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            attempt_timeout: Some(Duration::from_millis(DEFAULT_ATTEMPT_TIMEOUT_MS)),
            mutations: MutationRetry::default(),
            retry_predicate: Arc::new(retry_all),
        }
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("attempt_timeout", &self.attempt_timeout)
            .field("mutations", &self.mutations)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
            ..Self::default()
        }
    }

    pub fn no_retries() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn with_attempt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.attempt_timeout = timeout;
        self
    }

    pub fn with_mutations(mut self, mutations: MutationRetry) -> Self {
        self.mutations = mutations;
        self
    }

    pub fn with_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&AttemptFailure) -> bool + Send + Sync + 'static,
    {
        self.retry_predicate = Arc::new(predicate);
        self
    }

    /// Shorthand for [`retry_transient`] as the predicate.
    pub fn transient_only(self) -> Self {
        self.with_predicate(retry_transient)
    }

    pub fn is_retryable(&self, failure: &AttemptFailure) -> bool {
        (self.retry_predicate)(failure)
    }

    /// Total attempts allowed for `method`, first attempt included.
    pub fn max_attempts(&self, method: &Method) -> u32 {
        if is_mutating(method) && self.mutations == MutationRetry::Never {
            1
        } else {
            self.max_retries.saturating_add(1)
        }
    }

    /// `attempt` is zero-based: attempt 0 is the first request.
    pub fn should_retry(&self, method: &Method, failure: &AttemptFailure, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts(method) && self.is_retryable(failure)
    }

    pub fn wants_idempotency_key(&self, method: &Method) -> bool {
        is_mutating(method) && self.mutations == MutationRetry::RetryWithIdempotencyKey
    }
}
