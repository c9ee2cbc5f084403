// src/test_support.rs
//! Scripted transport used by the unit tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::time::Instant;

use crate::core::retry::RetryPolicy;
use crate::core::service_client::ServiceClient;
use crate::core::service_registry::ServiceRegistry;
use crate::core::transport::{HttpTransport, OutgoingRequest, RawResponse, TransportError};

#[derive(Debug, Clone)]
pub enum Scripted {
    Respond(RawResponse),
    Fail(String),
    /// Never completes; only a timeout ends the attempt.
    Hang,
}

pub fn json_response(status: u16, body: serde_json::Value) -> Scripted {
    Scripted::Respond(RawResponse::new(status, body.to_string()))
}

pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    repeat: Option<Scripted>,
    /// Outcomes picked by URL suffix, for concurrent callers.
    routes: Vec<(String, Scripted)>,
    seen: Mutex<Vec<(OutgoingRequest, Instant)>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            repeat: None,
            routes: Vec::new(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn always(outcome: Scripted) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            repeat: Some(outcome),
            routes: Vec::new(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn routed(routes: Vec<(&str, Scripted)>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(VecDeque::new()),
            repeat: None,
            routes: routes
                .into_iter()
                .map(|(suffix, outcome)| (suffix.to_string(), outcome))
                .collect(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn attempts(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<OutgoingRequest> {
        self.seen.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn attempt_times(&self) -> Vec<Instant> {
        self.seen.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: &OutgoingRequest) -> Result<RawResponse, TransportError> {
        self.seen.lock().unwrap().push((request.clone(), Instant::now()));

        let routed = self
            .routes
            .iter()
            .find(|(suffix, _)| request.url.ends_with(suffix.as_str()))
            .map(|(_, outcome)| outcome.clone());
        let next = routed
            .or_else(|| self.script.lock().unwrap().pop_front())
            .or_else(|| self.repeat.clone());

        match next {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Fail(message)) => Err(TransportError(message)),
            Some(Scripted::Hang) => std::future::pending().await,
            None => Err(TransportError("script exhausted".to_string())),
        }
    }
}

pub fn client_with(transport: Arc<ScriptedTransport>, policy: RetryPolicy) -> ServiceClient {
    ServiceClient::new(transport, Arc::new(ServiceRegistry::with_defaults()), policy)
}
