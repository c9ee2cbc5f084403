// src/types/job.rs
use serde::{Deserialize, Serialize};

use super::application::text_or_missing;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawJobListing {
    pub id: i64,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub posted_at: Option<String>,
    #[serde(default)]
    pub match_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    pub match_score: f64,
}

impl From<RawJobListing> for JobListing {
    fn from(raw: RawJobListing) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            company: raw.company,
            location: text_or_missing(raw.location),
            salary: text_or_missing(raw.salary),
            url: raw.url,
            description: raw.description.unwrap_or_default(),
            posted_date: raw.posted_at,
            match_score: raw.match_score.unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSearch {
    pub query: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_defaults_match_applications() {
        let raw: RawJobListing = serde_json::from_value(json!({
            "id": 9, "title": "Rust Dev", "company": "Ferrous"
        }))
        .unwrap();
        let job = JobListing::from(raw);
        assert_eq!(job.location, "N/A");
        assert_eq!(job.salary, "N/A");
        assert_eq!(job.match_score, 0.0);
        assert_eq!(job.description, "");
    }
}
