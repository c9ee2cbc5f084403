// src/web/handlers/upload_handlers.rs
//! ATS score checks and resume uploads, both multipart

use rocket::form::Form;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use super::helpers::{error_response, read_resume_upload, validation_error, ApiResult};
use crate::types::ats::AtsScoreResult;
use crate::types::resume::ResumeUpload;
use crate::web::types::{AtsScoreForm, DataResponse, GatewayState, ResumeUploadForm};
use crate::web::ForwardedAuth;

pub async fn ats_score_handler(
    mut upload: Form<AtsScoreForm<'_>>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<AtsScoreResult>> {
    let job_description = upload.job_description.trim().to_string();
    if job_description.is_empty() {
        return Err(validation_error("Paste the job description to score against"));
    }

    let resume = read_resume_upload(&mut upload.resume)
        .await
        .map_err(|e| error_response(&e))?;

    info!(
        file = %resume.file_name,
        size = resume.bytes.len(),
        "Scoring resume against {} chars of job description",
        job_description.len()
    );

    let result = auth
        .client(state)
        .check_ats_score(&resume, &job_description)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(DataResponse::success(
        format!("ATS score: {}", result.score),
        result,
    )))
}

pub async fn upload_resume_handler(
    mut upload: Form<ResumeUploadForm<'_>>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<ResumeUpload>> {
    let user_id = upload.user_id;
    let resume = read_resume_upload(&mut upload.file)
        .await
        .map_err(|e| error_response(&e))?;

    let stored = auth
        .client(state)
        .upload_resume(&resume, user_id)
        .await
        .map_err(|e| error_response(&e))?;

    Ok(Json(DataResponse::success(stored.message.clone(), stored)))
}
