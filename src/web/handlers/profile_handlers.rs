// src/web/handlers/profile_handlers.rs
use rocket::serde::json::Json;
use rocket::State;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::helpers::{error_response, validation_error, ApiResult};
use crate::types::profile::{ProfileRecord, ProfileSection, UserProfile};
use crate::web::types::{ActionResponse, DataResponse, GatewayState};
use crate::web::ForwardedAuth;

pub async fn get_profile_handler(
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<UserProfile>> {
    let profile = auth
        .client(state)
        .fetch_profile()
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(DataResponse::success("Profile loaded".to_string(), profile)))
}

pub async fn update_profile_handler(
    request: Json<UserProfile>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<UserProfile>> {
    if request.full_name.trim().is_empty() {
        return Err(validation_error("Full name is required"));
    }
    if !request.email.contains('@') {
        return Err(validation_error("A valid email address is required"));
    }

    let profile = auth
        .client(state)
        .update_profile(&request)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(DataResponse::success("Profile updated".to_string(), profile)))
}

/// Shared by the education, experience and skill routes.
pub async fn save_record_handler<R>(
    record: Json<R>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<R>>
where
    R: ProfileRecord + Serialize + DeserializeOwned,
{
    let created = record.is_new();
    let saved = auth
        .client(state)
        .save_profile_record(&record.into_inner())
        .await
        .map_err(|e| error_response(&e))?;

    let verb = if created { "added" } else { "updated" };
    Ok(Json(DataResponse::success(
        format!("{} entry {}", R::SECTION.as_str(), verb),
        saved,
    )))
}

pub async fn delete_record_handler(
    section: &str,
    id: i64,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<ActionResponse> {
    let Some(section) = ProfileSection::parse(section) else {
        return Err(validation_error("Section must be education, experience or skills"));
    };

    auth.client(state)
        .delete_profile_record(section, id)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(ActionResponse::success(
        format!("{} entry {} deleted", section.as_str(), id),
        "deleted",
    )))
}
