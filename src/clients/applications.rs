// src/clients/applications.rs
//! Job applications, stored by the agent orchestration service

use reqwest::Method;
use tracing::{info, instrument};

use crate::core::{ServiceClient, ServiceName};
use crate::error::ClientError;
use crate::types::application::{Application, ApplicationUpdate, NewApplication, RawApiApplication};

fn applications_path(id: i64) -> String {
    format!("/v1/applications/{}", id)
}

impl ServiceClient {
    /// All applications belonging to `user_id`, in dashboard shape.
    #[instrument(skip(self))]
    pub async fn fetch_applications(&self, user_id: i64) -> Result<Vec<Application>, ClientError> {
        let url = self.url_for(ServiceName::AgentOrchestrationService, &applications_path(user_id))?;
        let raw: Vec<RawApiApplication> = self.send_json(self.request(Method::GET, url)).await?;

        info!("Fetched {} applications for user {}", raw.len(), user_id);
        Ok(raw.into_iter().map(Application::from).collect())
    }

    #[instrument(skip(self, application), fields(company = %application.company))]
    pub async fn create_application(
        &self,
        user_id: i64,
        application: &NewApplication,
    ) -> Result<Application, ClientError> {
        let url = self.url_for(ServiceName::AgentOrchestrationService, &applications_path(user_id))?;
        let request = self.request(Method::POST, url).json(&application.to_wire())?;

        let raw: RawApiApplication = self.send_json(request).await?;
        info!("Created application {} for user {}", raw.id, user_id);
        Ok(raw.into())
    }

    #[instrument(skip(self, update))]
    pub async fn update_application(
        &self,
        application_id: i64,
        update: &ApplicationUpdate,
    ) -> Result<Application, ClientError> {
        if update.is_empty() {
            return Err(ClientError::Validation("Nothing to update".to_string()));
        }

        let url = self.url_for(ServiceName::AgentOrchestrationService, &applications_path(application_id))?;
        let request = self.request(Method::PUT, url).json(update)?;

        let raw: RawApiApplication = self.send_json(request).await?;
        Ok(raw.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_application(&self, application_id: i64) -> Result<(), ClientError> {
        let url = self.url_for(ServiceName::AgentOrchestrationService, &applications_path(application_id))?;
        self.send_unit(self.request(Method::DELETE, url)).await?;

        info!("Deleted application {}", application_id);
        Ok(())
    }
}
