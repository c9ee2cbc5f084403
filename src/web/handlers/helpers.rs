// src/web/handlers/helpers.rs
//! Error mapping and upload handling shared by the handlers

use std::path::Path;

use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::serde::json::Json;
use tracing::{error, warn};

use crate::error::ClientError;
use crate::types::resume::{content_type_for, ResumeFile, MAX_RESUME_BYTES};
use crate::web::types::StandardErrorResponse;

pub type ApiError = (Status, Json<StandardErrorResponse>);
pub type ApiResult<T> = Result<Json<T>, ApiError>;

/// The only place a [`ClientError`] turns into something a user reads.
pub fn error_response(err: &ClientError) -> ApiError {
    let (status, suggestions) = match err {
        ClientError::Validation(_) => (
            Status::BadRequest,
            vec!["Check the form fields and try again".to_string()],
        ),
        ClientError::Configuration(_) => (
            Status::InternalServerError,
            vec!["Check the service URL configuration".to_string()],
        ),
        ClientError::Network { .. } => (
            Status::BadGateway,
            vec![
                "Check that the backend service is running".to_string(),
                "Try again in a few moments".to_string(),
            ],
        ),
        ClientError::Timeout { .. } => (
            Status::GatewayTimeout,
            vec!["The service is slow to respond, try again later".to_string()],
        ),
        ClientError::Http { status, .. } if (400..500).contains(status) => (
            Status::from_code(*status).unwrap_or(Status::BadRequest),
            vec!["Review the request and try again".to_string()],
        ),
        ClientError::Http { .. } | ClientError::Parse { .. } => (
            Status::BadGateway,
            vec![
                "Try again in a few moments".to_string(),
                "Contact support if the problem persists".to_string(),
            ],
        ),
    };

    if status.code >= 500 {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    (
        status,
        Json(
            StandardErrorResponse::new(err.to_string(), err.code(), suggestions)
                .with_upstream_status(err.status()),
        ),
    )
}

pub fn validation_error(message: &str) -> ApiError {
    error_response(&ClientError::Validation(message.to_string()))
}

/// Reads an uploaded resume into memory, keeping the original extension so
/// the MIME type can be derived from it.
pub async fn read_resume_upload(file: &mut TempFile<'_>) -> Result<ResumeFile, ClientError> {
    if file.len() == 0 {
        return Err(ClientError::Validation("Select a resume file to upload".to_string()));
    }
    if file.len() > MAX_RESUME_BYTES as u64 {
        return Err(ClientError::Validation("File size exceeds 10MB limit".to_string()));
    }

    let file_name = upload_file_name(file);
    content_type_for(&file_name)?;

    let temp_path = std::env::temp_dir().join(format!("resume_upload_{}", uuid::Uuid::new_v4()));
    file.copy_to(&temp_path)
        .await
        .map_err(|e| ClientError::Validation(format!("Failed to store upload: {}", e)))?;

    let bytes = tokio::fs::read(&temp_path).await;
    if let Err(e) = tokio::fs::remove_file(&temp_path).await {
        warn!("Failed to remove {}: {}", temp_path.display(), e);
    }
    let bytes = bytes.map_err(|e| ClientError::Validation(format!("Failed to read upload: {}", e)))?;

    ResumeFile::new(&file_name, bytes)
}

fn upload_file_name(file: &TempFile<'_>) -> String {
    let stem = file
        .name()
        .filter(|n| !n.is_empty())
        .unwrap_or("resume")
        .to_string();

    // `name()` is sanitised and drops the extension; recover it from the raw name.
    let extension = file
        .raw_name()
        .and_then(|raw| {
            Path::new(raw.dangerous_unsafe_unsanitized_raw().as_str())
                .extension()
                .and_then(|ext| ext.to_str())
                .map(str::to_lowercase)
        })
        .or_else(|| {
            file.content_type()
                .filter(|ct| ct.is_pdf())
                .map(|_| "pdf".to_string())
        });

    match extension {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn upstream_client_errors_keep_their_status() {
        let (status, body) = error_response(&ClientError::Http {
            url: "http://x".into(),
            status: 404,
            status_text: "Not Found".into(),
            message: "Not found".into(),
        });
        assert_eq!(status, Status::NotFound);
        assert_eq!(body.error, "Not found");
        assert_eq!(body.upstream_status, Some(404));
        assert!(!body.success);
    }

    #[test]
    fn upstream_server_errors_become_bad_gateway() {
        let (status, body) = error_response(&ClientError::Http {
            url: "http://x".into(),
            status: 503,
            status_text: "Service Unavailable".into(),
            message: "Service Unavailable".into(),
        });
        assert_eq!(status, Status::BadGateway);
        assert_eq!(body.error_code, "UPSTREAM_ERROR");
    }

    #[test]
    fn every_error_carries_suggestions() {
        let errors = vec![
            ClientError::Validation("x".into()),
            ClientError::Network { url: "u".into(), message: "m".into() },
            ClientError::Timeout { url: "u".into(), after: Duration::from_secs(1) },
            ClientError::Parse { url: "u".into(), message: "m".into() },
        ];
        for err in &errors {
            let (_, body) = error_response(err);
            assert!(!body.suggestions.is_empty(), "{} has no suggestions", err);
        }
    }
}
