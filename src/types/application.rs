// src/types/application.rs
//! Job application records: backend wire shape and dashboard shape

use serde::{Deserialize, Serialize};

pub const MISSING_TEXT: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawJob {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub url: Option<String>,
}

/// As returned by the agent orchestration service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawApiApplication {
    pub id: i64,
    pub job: RawJob,
    pub status: String,
    pub applied_at: String,
    #[serde(default)]
    pub ats_score: Option<f64>,
    #[serde(default)]
    pub job_match_score: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Flattened shape consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    pub position: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub status: String,
    pub applied_date: String,
    pub ats_score: f64,
    pub job_match_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<RawApiApplication> for Application {
    /// Missing location and salary become `"N/A"`, missing scores `0`.
    fn from(raw: RawApiApplication) -> Self {
        Self {
            id: raw.id,
            position: raw.job.title,
            company: raw.job.company,
            location: text_or_missing(raw.job.location),
            salary: text_or_missing(raw.job.salary),
            status: raw.status,
            applied_date: raw.applied_at,
            ats_score: raw.ats_score.unwrap_or(0.0),
            job_match_score: raw.job_match_score.unwrap_or(0.0),
            url: raw.job.url,
            notes: raw.notes,
        }
    }
}

pub(crate) fn text_or_missing(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| MISSING_TEXT.to_string())
}

/// Payload for creating an application; serialised in the wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApplication {
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_status() -> String {
    "applied".to_string()
}

#[derive(Debug, Serialize)]
pub(crate) struct NewApplicationWire<'a> {
    pub job: RawJobRef<'a>,
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RawJobRef<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: Option<&'a str>,
    pub salary: Option<&'a str>,
    pub url: Option<&'a str>,
}

impl NewApplication {
    pub(crate) fn to_wire(&self) -> NewApplicationWire<'_> {
        NewApplicationWire {
            job: RawJobRef {
                title: &self.position,
                company: &self.company,
                location: self.location.as_deref(),
                salary: self.salary.as_deref(),
                url: self.url.as_deref(),
            },
            status: &self.status,
            notes: self.notes.as_deref(),
        }
    }
}

/// Partial update; absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ApplicationUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none()
    }
}
