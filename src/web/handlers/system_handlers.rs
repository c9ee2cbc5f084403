// src/web/handlers/system_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use super::helpers::{error_response, validation_error, ApiResult};
use crate::types::job::{JobListing, JobSearch};
use crate::web::types::{DataResponse, GatewayState, ServiceInfo, TextResponse};
use crate::web::ForwardedAuth;

pub async fn health_handler(state: &State<GatewayState>) -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success(format!(
        "OK ({} environment)",
        state.config.environment
    )))
}

pub async fn services_handler(state: &State<GatewayState>) -> Json<DataResponse<Vec<ServiceInfo>>> {
    let services: Vec<ServiceInfo> = state
        .client
        .registry()
        .entries()
        .map(|(name, url)| ServiceInfo {
            name: name.key().to_string(),
            url: url.to_string(),
        })
        .collect();

    Json(DataResponse::success(
        format!("{} backend services configured", services.len()),
        services,
    ))
}

pub async fn search_jobs_handler(
    query: Option<String>,
    location: Option<String>,
    limit: Option<u32>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Vec<JobListing>>> {
    let query = query.unwrap_or_default();
    if query.trim().is_empty() {
        return Err(validation_error("Enter a keyword to search for jobs"));
    }

    let search = JobSearch {
        query,
        location,
        limit,
    };
    let jobs = auth
        .client(state)
        .search_jobs(&search)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(DataResponse::success(
        format!("{} jobs found", jobs.len()),
        jobs,
    )))
}
