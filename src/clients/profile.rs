// src/clients/profile.rs
//! User profile (user service) and its resume sections (resume service)

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::{Endpoint, ServiceClient, ServiceName};
use crate::error::ClientError;
use crate::types::profile::{ProfileRecord, ProfileSection, UserProfile};

const PROFILE_ENDPOINT: Endpoint = Endpoint::new(ServiceName::UserService, "/profile");

fn section_path(section: ProfileSection, id: Option<i64>) -> String {
    match id {
        Some(id) => format!("/v1/resume/{}/{}", section.as_str(), id),
        None => format!("/v1/resume/{}", section.as_str()),
    }
}

impl ServiceClient {
    #[instrument(skip(self))]
    pub async fn fetch_profile(&self) -> Result<UserProfile, ClientError> {
        let url = self.url(PROFILE_ENDPOINT)?;
        self.send_json(self.request(Method::GET, url)).await
    }

    #[instrument(skip(self, profile))]
    pub async fn update_profile(&self, profile: &UserProfile) -> Result<UserProfile, ClientError> {
        let url = self.url(PROFILE_ENDPOINT)?;
        let request = self.request(Method::PUT, url).json(profile)?;
        self.send_json(request).await
    }

    /// Creates the record when it has no id, updates it otherwise.
    /// Returns the stored record, server id included.
    pub async fn save_profile_record<R>(&self, record: &R) -> Result<R, ClientError>
    where
        R: ProfileRecord + Serialize + DeserializeOwned,
    {
        let (method, path) = match record.id() {
            Some(id) => (Method::PUT, section_path(R::SECTION, Some(id))),
            None => (Method::POST, section_path(R::SECTION, None)),
        };
        debug!("Saving {} record via {}", R::SECTION.as_str(), method);

        let url = self.url_for(ServiceName::ResumeService, &path)?;
        let request = self.request(method, url).json(record)?;
        self.send_json(request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_profile_record(&self, section: ProfileSection, id: i64) -> Result<(), ClientError> {
        let url = self.url_for(ServiceName::ResumeService, &section_path(section, Some(id)))?;
        self.send_unit(self.request(Method::DELETE, url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RetryPolicy;
    use crate::test_support::{client_with, json_response, ScriptedTransport};
    use crate::types::profile::{Education, Skill};
    use serde_json::json;

    #[tokio::test]
    async fn fetches_profile_from_user_service() {
        let transport = ScriptedTransport::new(vec![json_response(
            200,
            json!({
                "id": 1,
                "full_name": "Grace Hopper",
                "email": "grace@example.com",
                "skills": [{"id": 4, "name": "COBOL"}]
            }),
        )]);
        let client = client_with(transport.clone(), RetryPolicy::no_retries());

        let profile = client.fetch_profile().await.unwrap();
        assert_eq!(profile.full_name, "Grace Hopper");
        assert_eq!(profile.skills[0].id, Some(4));
        assert_eq!(transport.requests()[0].url, "http://localhost:8000/profile");
    }

    #[tokio::test]
    async fn new_record_is_posted_to_the_section() {
        let transport = ScriptedTransport::new(vec![json_response(
            201,
            json!({"id": 11, "institution": "MIT", "degree": "BSc"}),
        )]);
        let client = client_with(transport.clone(), RetryPolicy::no_retries());

        let education = Education {
            institution: "MIT".into(),
            degree: "BSc".into(),
            ..Default::default()
        };
        let saved = client.save_profile_record(&education).await.unwrap();

        assert_eq!(saved.id, Some(11));
        let requests = transport.requests();
        let sent = &requests[0];
        assert_eq!(sent.method, Method::POST);
        assert_eq!(sent.url, "http://localhost:8003/v1/resume/education");
    }

    #[tokio::test]
    async fn existing_record_is_put_to_its_id() {
        let transport = ScriptedTransport::new(vec![json_response(
            200,
            json!({"id": 4, "name": "Rust", "level": "expert"}),
        )]);
        let client = client_with(transport.clone(), RetryPolicy::no_retries());

        let skill = Skill {
            id: Some(4),
            name: "Rust".into(),
            level: Some("expert".into()),
        };
        client.save_profile_record(&skill).await.unwrap();

        let requests = transport.requests();
        let sent = &requests[0];
        assert_eq!(sent.method, Method::PUT);
        assert_eq!(sent.url, "http://localhost:8003/v1/resume/skills/4");
    }

    #[tokio::test]
    async fn update_error_uses_message_field() {
        let transport = ScriptedTransport::new(vec![json_response(422, json!({"message": "email is invalid"}))]);
        let client = client_with(transport, RetryPolicy::no_retries());

        let err = client.update_profile(&UserProfile::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "email is invalid");
        assert_eq!(err.status(), Some(422));
    }
}
