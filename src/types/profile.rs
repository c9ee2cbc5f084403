// src/types/profile.rs
//! User profile and the resume sections edited from the profile page

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field_of_study: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>, // None means current
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub level: Option<String>,
}

/// A profile section stored server-side one record at a time.
pub trait ProfileRecord {
    /// Path segment under the resume service, e.g. `education`.
    const SECTION: ProfileSection;

    fn id(&self) -> Option<i64>;

    /// `true` when the record has no server id yet and must be created.
    fn is_new(&self) -> bool {
        self.id().is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSection {
    Education,
    Experience,
    Skills,
}

impl ProfileSection {
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileSection::Education => "education",
            ProfileSection::Experience => "experience",
            ProfileSection::Skills => "skills",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "education" => Some(ProfileSection::Education),
            "experience" => Some(ProfileSection::Experience),
            "skills" => Some(ProfileSection::Skills),
            _ => None,
        }
    }
}

impl ProfileRecord for Education {
    const SECTION: ProfileSection = ProfileSection::Education;

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl ProfileRecord for Experience {
    const SECTION: ProfileSection = ProfileSection::Experience;

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl ProfileRecord for Skill {
    const SECTION: ProfileSection = ProfileSection::Skills;

    fn id(&self) -> Option<i64> {
        self.id
    }
}
