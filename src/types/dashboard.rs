// src/types/dashboard.rs
use std::collections::BTreeMap;

use serde::Serialize;

use super::application::Application;
use super::profile::UserProfile;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    /// Mean over applications that have been scored; 0 when none have.
    pub average_ats_score: f64,
}

impl ApplicationStats {
    pub fn from_applications(applications: &[Application]) -> Self {
        let mut by_status = BTreeMap::new();
        for app in applications {
            *by_status.entry(app.status.to_lowercase()).or_insert(0) += 1;
        }

        let scored: Vec<f64> = applications
            .iter()
            .map(|app| app.ats_score)
            .filter(|score| *score > 0.0)
            .collect();
        let average_ats_score = if scored.is_empty() {
            0.0
        } else {
            scored.iter().sum::<f64>() / scored.len() as f64
        };

        Self {
            total: applications.len(),
            by_status,
            average_ats_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub profile: UserProfile,
    pub applications: Vec<Application>,
    pub stats: ApplicationStats,
}
