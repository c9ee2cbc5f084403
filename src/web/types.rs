// src/web/types.rs
//! Response envelopes, upload forms and shared state for the gateway

use std::sync::Arc;

use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::serde::Serialize;

use crate::core::{AppConfig, ServiceClient};

pub struct GatewayState {
    pub client: ServiceClient,
    pub config: Arc<AppConfig>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Action,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub action: String,
}

/// Everything the dashboard needs to show a dismissable error.
#[derive(Serialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_status: Option<u16>,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl ActionResponse {
    pub fn success(message: String, action: &str) -> Self {
        Self {
            response_type: ResponseType::Action,
            success: true,
            message,
            action: action.to_string(),
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: &str, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code: error_code.to_string(),
            suggestions,
            upstream_status: None,
        }
    }

    pub fn with_upstream_status(mut self, status: Option<u16>) -> Self {
        self.upstream_status = status;
        self
    }
}

#[derive(FromForm)]
pub struct AtsScoreForm<'f> {
    pub resume: TempFile<'f>,
    pub job_description: String,
}

#[derive(FromForm)]
pub struct ResumeUploadForm<'f> {
    pub file: TempFile<'f>,
    pub user_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ServiceInfo {
    pub name: String,
    pub url: String,
}
