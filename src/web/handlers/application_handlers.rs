// src/web/handlers/application_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use super::helpers::{error_response, validation_error, ApiResult};
use crate::types::application::{Application, ApplicationUpdate, NewApplication};
use crate::types::dashboard::{ApplicationStats, DashboardSummary};
use crate::web::types::{ActionResponse, DataResponse, GatewayState};
use crate::web::ForwardedAuth;

pub async fn list_applications_handler(
    user_id: i64,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Vec<Application>>> {
    let client = auth.client(state);

    let applications = client
        .fetch_applications(user_id)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(DataResponse::success(
        format!("{} applications", applications.len()),
        applications,
    )))
}

pub async fn create_application_handler(
    user_id: i64,
    request: Json<NewApplication>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Application>> {
    if request.position.trim().is_empty() || request.company.trim().is_empty() {
        return Err(validation_error("Position and company are required"));
    }

    let created = auth
        .client(state)
        .create_application(user_id, &request)
        .await
        .map_err(|e| error_response(&e))?;

    info!("Application {} created for user {}", created.id, user_id);
    Ok(Json(DataResponse::success(
        format!("Application to {} saved", created.company),
        created,
    )))
}

pub async fn update_application_handler(
    application_id: i64,
    request: Json<ApplicationUpdate>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Application>> {
    let updated = auth
        .client(state)
        .update_application(application_id, &request)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(DataResponse::success(
        "Application updated".to_string(),
        updated,
    )))
}

pub async fn delete_application_handler(
    application_id: i64,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<ActionResponse> {
    auth.client(state)
        .delete_application(application_id)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ActionResponse::success(
        format!("Application {} deleted", application_id),
        "deleted",
    )))
}

/// Profile and applications are fetched concurrently; the summary is only
/// built once both have settled.
pub async fn dashboard_handler(
    user_id: i64,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<DashboardSummary>> {
    let client = auth.client(state);

    let (profile, applications) =
        tokio::join!(client.fetch_profile(), client.fetch_applications(user_id));
    let profile = profile.map_err(|e| error_response(&e))?;
    let applications = applications.map_err(|e| error_response(&e))?;

    let stats = ApplicationStats::from_applications(&applications);
    Ok(Json(DataResponse::success(
        format!("Dashboard for {}", profile.full_name),
        DashboardSummary {
            profile,
            applications,
            stats,
        },
    )))
}
