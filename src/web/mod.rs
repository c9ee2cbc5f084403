// src/web/mod.rs
//! Gateway the dashboard pages talk to. Every route delegates to a domain
//! client and reports failures as a `StandardErrorResponse`.

pub mod handlers;
pub mod types;

pub use handlers::helpers::{ApiError, ApiResult};
pub use types::*;

use std::convert::Infallible;
use std::sync::Arc;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::http::{Header, Status};
use rocket::request::{FromRequest, Outcome};
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, post, put, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::core::{AppConfig, ServiceClient};
use crate::types::application::{Application, ApplicationUpdate, NewApplication};
use crate::types::ats::AtsScoreResult;
use crate::types::dashboard::DashboardSummary;
use crate::types::job::JobListing;
use crate::types::profile::{Education, Experience, Skill, UserProfile};
use crate::types::resume::ResumeUpload;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        // Credentialed requests need the caller's origin echoed back; browsers
        // reject `*` together with `Allow-Credentials`.
        match request.headers().get_one("Origin") {
            Some(origin) => {
                response.set_header(Header::new("Access-Control-Allow-Origin", origin.to_string()));
                response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
                response.set_header(Header::new("Vary", "Origin"));
            }
            None => {
                response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
            }
        }
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "GET, POST, PUT, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "Authorization, Content-Type"));
    }
}

/// Bearer token issued by the auth provider, passed through untouched.
pub struct ForwardedAuth(pub Option<String>);

impl ForwardedAuth {
    pub fn client(&self, state: &GatewayState) -> ServiceClient {
        state.client.with_bearer_token(self.0.clone())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ForwardedAuth {
    type Error = Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let token = req
            .headers()
            .get_one("Authorization")
            .and_then(|header| header.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Outcome::Success(ForwardedAuth(token))
    }
}

#[get("/health")]
pub async fn health(state: &State<GatewayState>) -> Json<TextResponse> {
    handlers::health_handler(state).await
}

#[get("/config/services")]
pub async fn services(state: &State<GatewayState>) -> Json<DataResponse<Vec<ServiceInfo>>> {
    handlers::services_handler(state).await
}

#[get("/dashboard/<user_id>")]
pub async fn dashboard(
    user_id: i64,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<DashboardSummary>> {
    handlers::dashboard_handler(user_id, auth, state).await
}

#[get("/applications/<user_id>")]
pub async fn list_applications(
    user_id: i64,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Vec<Application>>> {
    handlers::list_applications_handler(user_id, auth, state).await
}

#[post("/applications/<user_id>", data = "<request>")]
pub async fn create_application(
    user_id: i64,
    request: Json<NewApplication>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Application>> {
    handlers::create_application_handler(user_id, request, auth, state).await
}

#[put("/applications/<application_id>", data = "<request>")]
pub async fn update_application(
    application_id: i64,
    request: Json<ApplicationUpdate>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Application>> {
    handlers::update_application_handler(application_id, request, auth, state).await
}

#[delete("/applications/<application_id>")]
pub async fn delete_application(
    application_id: i64,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<ActionResponse> {
    handlers::delete_application_handler(application_id, auth, state).await
}

#[get("/profile")]
pub async fn get_profile(
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<UserProfile>> {
    handlers::get_profile_handler(auth, state).await
}

#[put("/profile", data = "<request>")]
pub async fn update_profile(
    request: Json<UserProfile>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<UserProfile>> {
    handlers::update_profile_handler(request, auth, state).await
}

#[post("/profile/education", data = "<record>")]
pub async fn save_education(
    record: Json<Education>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Education>> {
    handlers::save_record_handler(record, auth, state).await
}

#[post("/profile/experience", data = "<record>")]
pub async fn save_experience(
    record: Json<Experience>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Experience>> {
    handlers::save_record_handler(record, auth, state).await
}

#[post("/profile/skills", data = "<record>")]
pub async fn save_skill(
    record: Json<Skill>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Skill>> {
    handlers::save_record_handler(record, auth, state).await
}

#[delete("/profile/<section>/<id>")]
pub async fn delete_profile_record(
    section: &str,
    id: i64,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<ActionResponse> {
    handlers::delete_record_handler(section, id, auth, state).await
}

#[post("/ats-score", data = "<upload>")]
pub async fn ats_score(
    upload: Form<AtsScoreForm<'_>>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<AtsScoreResult>> {
    handlers::ats_score_handler(upload, auth, state).await
}

#[post("/upload-resume", data = "<upload>")]
pub async fn upload_resume(
    upload: Form<ResumeUploadForm<'_>>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<ResumeUpload>> {
    handlers::upload_resume_handler(upload, auth, state).await
}

#[get("/jobs?<query>&<location>&<limit>")]
pub async fn search_jobs(
    query: Option<String>,
    location: Option<String>,
    limit: Option<u32>,
    auth: ForwardedAuth,
    state: &State<GatewayState>,
) -> ApiResult<DataResponse<Vec<JobListing>>> {
    handlers::search_jobs_handler(query, location, limit, auth, state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST",
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Route not found".to_string(),
        "NOT_FOUND",
        vec!["Check the URL".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected shape".to_string(),
        "UNPROCESSABLE_ENTITY",
        vec!["Verify field names and types".to_string()],
    ))
}

#[rocket::catch(413)]
pub fn payload_too_large() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "File size exceeds 10MB limit".to_string(),
        "PAYLOAD_TOO_LARGE",
        vec!["Upload a smaller resume file".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR",
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

pub fn build_rocket(state: GatewayState) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", state.config.gateway_port))
        .merge((
            "limits",
            Limits::default()
                .limit("file", 10.mebibytes())
                .limit("data-form", 11.mebibytes()),
        ));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, payload_too_large, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                health,
                services,
                dashboard,
                list_applications,
                create_application,
                update_application,
                delete_application,
                get_profile,
                update_profile,
                save_education,
                save_experience,
                save_skill,
                delete_profile_record,
                ats_score,
                upload_resume,
                search_jobs,
                options,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    let client = ServiceClient::from_config(&config)?;

    info!("Starting job tracker gateway on port {}", config.gateway_port);
    for (name, url) in client.registry().entries() {
        info!("{} -> {}", name, url);
    }
    info!("Fetch policy: {:?}", client.policy());

    let state = GatewayState {
        client,
        config: Arc::new(config),
    };

    build_rocket(state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Gateway stopped with error: {}", e))?;

    Ok(())
}
