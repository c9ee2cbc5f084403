// src/clients/jobs.rs
use reqwest::Method;
use tracing::instrument;

use crate::core::{Endpoint, ServiceClient, ServiceName};
use crate::error::ClientError;
use crate::types::job::{JobListing, JobSearch, RawJobListing};

const JOBS_ENDPOINT: Endpoint = Endpoint::new(ServiceName::AgentOrchestrationService, "/v1/jobs");

impl ServiceClient {
    #[instrument(skip(self))]
    pub async fn search_jobs(&self, search: &JobSearch) -> Result<Vec<JobListing>, ClientError> {
        let url = self.url(JOBS_ENDPOINT)?;

        let mut request = self.request(Method::GET, url).query("query", search.query.trim());
        if let Some(location) = search.location.as_deref().filter(|l| !l.trim().is_empty()) {
            request = request.query("location", location.trim());
        }
        if let Some(limit) = search.limit {
            request = request.query("limit", limit.to_string());
        }

        let raw: Vec<RawJobListing> = self.send_json(request).await?;
        Ok(raw.into_iter().map(JobListing::from).collect())
    }
}
