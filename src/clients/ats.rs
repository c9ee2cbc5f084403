// src/clients/ats.rs
use reqwest::Method;
use tracing::{info, instrument};

use crate::core::{Endpoint, MultipartPayload, ServiceClient, ServiceName};
use crate::error::ClientError;
use crate::types::ats::{AtsScoreResult, RawAtsScore};
use crate::types::resume::ResumeFile;

const ATS_SCORE_ENDPOINT: Endpoint = Endpoint::new(ServiceName::AtsService, "/v1/ats-score");

impl ServiceClient {
    /// Scores `resume` against `job_description` on the ATS service.
    #[instrument(skip(self, resume, job_description), fields(file = %resume.file_name))]
    pub async fn check_ats_score(
        &self,
        resume: &ResumeFile,
        job_description: &str,
    ) -> Result<AtsScoreResult, ClientError> {
        let url = self.url(ATS_SCORE_ENDPOINT)?;

        let form = MultipartPayload::new()
            .file("resume", &resume.file_name, resume.content_type, resume.bytes.clone())
            .text("job_description", job_description);

        let raw: RawAtsScore = self
            .send_json(self.request(Method::POST, url).multipart(form))
            .await?;

        let result = AtsScoreResult::from(raw);
        info!("ATS score for {}: {} ({})", resume.file_name, result.score, result.grade);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::{MultipartPart, RequestBody};
    use crate::core::RetryPolicy;
    use crate::test_support::{client_with, json_response, Scripted, ScriptedTransport};
    use serde_json::json;
    use std::time::Duration;

    fn resume() -> ResumeFile {
        ResumeFile::new("cv.pdf", b"%PDF-1.7".to_vec()).unwrap()
    }

    #[tokio::test]
    async fn sends_resume_and_description_as_multipart() {
        let transport = ScriptedTransport::new(vec![json_response(
            200,
            json!({"score": 88, "grade": "A", "skillsMatch": 90, "keywordsMatch": 85, "suggestions": [], "skillsAnalysis": []}),
        )]);
        let client = client_with(transport.clone(), RetryPolicy::no_retries());

        let result = client.check_ats_score(&resume(), "Senior Rust engineer").await.unwrap();
        assert_eq!(result.score, 88.0);
        assert_eq!(result.grade, "A");

        let requests = transport.requests();
        let sent = &requests[0];
        assert_eq!(sent.url, "http://localhost:8001/v1/ats-score");
        let RequestBody::Multipart(form) = &sent.body else {
            panic!("expected multipart body");
        };
        assert_eq!(form.text_value("job_description"), Some("Senior Rust engineer"));
        assert!(form.parts.iter().any(|p| matches!(
            p,
            MultipartPart::File { name, mime, .. } if name == "resume" && mime == "application/pdf"
        )));
    }

    #[tokio::test]
    async fn missing_scores_default_to_zero() {
        let transport = ScriptedTransport::new(vec![json_response(200, json!({"grade": "C"}))]);
        let client = client_with(transport, RetryPolicy::no_retries());

        let result = client.check_ats_score(&resume(), "anything").await.unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.skills_match, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn multipart_body_is_resent_on_retry() {
        let transport = ScriptedTransport::new(vec![
            Scripted::Fail("connection reset".into()),
            json_response(200, json!({"score": 50})),
        ]);
        let client = client_with(transport.clone(), RetryPolicy::new(1, Duration::from_millis(500)));

        client.check_ats_score(&resume(), "desc").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].body, requests[1].body);
    }
}
