// src/types/resume.rs
//! Resume files sent as multipart uploads

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// 10MB, same ceiling the upload forms enforce.
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Result<Self, ClientError> {
        if bytes.is_empty() {
            return Err(ClientError::Validation(format!("{} is empty", file_name)));
        }
        if bytes.len() > MAX_RESUME_BYTES {
            return Err(ClientError::Validation(
                "File size exceeds 10MB limit".to_string(),
            ));
        }

        Ok(Self {
            file_name: file_name.to_string(),
            content_type: content_type_for(file_name)?,
            bytes,
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::Validation(format!("Invalid file path: {}", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            ClientError::Validation(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::new(&file_name, bytes)
    }
}

/// MIME type from the file extension. Only resume formats are accepted.
pub fn content_type_for(file_name: &str) -> Result<&'static str, ClientError> {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        Ok("application/pdf")
    } else if lower_name.ends_with(".docx") {
        Ok("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
    } else if lower_name.ends_with(".doc") {
        Ok("application/msword")
    } else if lower_name.ends_with(".txt") {
        Ok("text/plain")
    } else {
        Err(ClientError::Validation(format!(
            "Unsupported file format: {}",
            file_name
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeUpload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}
