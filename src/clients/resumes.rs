// src/clients/resumes.rs
use reqwest::Method;
use tracing::{info, instrument};

use crate::core::{Endpoint, MultipartPayload, ServiceClient, ServiceName};
use crate::error::ClientError;
use crate::types::resume::{ResumeFile, ResumeUpload};

const UPLOAD_RESUME_ENDPOINT: Endpoint =
    Endpoint::new(ServiceName::AgentOrchestrationService, "/v1/upload-resume");

impl ServiceClient {
    #[instrument(skip(self, resume), fields(file = %resume.file_name))]
    pub async fn upload_resume(
        &self,
        resume: &ResumeFile,
        user_id: Option<i64>,
    ) -> Result<ResumeUpload, ClientError> {
        let url = self.url(UPLOAD_RESUME_ENDPOINT)?;

        let mut form = MultipartPayload::new().file(
            "file",
            &resume.file_name,
            resume.content_type,
            resume.bytes.clone(),
        );
        if let Some(user_id) = user_id {
            form = form.text("user_id", user_id.to_string());
        }

        let upload: ResumeUpload = self
            .send_json(self.request(Method::POST, url).multipart(form))
            .await?;

        info!("Uploaded {}: {}", resume.file_name, upload.message);
        Ok(upload)
    }
}
