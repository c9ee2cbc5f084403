// src/types/ats.rs
use serde::{Deserialize, Serialize};

/// ATS service body. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAtsScore {
    pub score: Option<f64>,
    pub grade: Option<String>,
    pub skills_match: Option<f64>,
    pub keywords_match: Option<f64>,
    #[serde(default)]
    pub suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub skills_analysis: Option<Vec<SkillAnalysis>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAnalysis {
    pub skill: String,
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub importance: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreResult {
    pub score: f64,
    pub grade: String,
    pub skills_match: f64,
    pub keywords_match: f64,
    pub suggestions: Vec<String>,
    pub skills_analysis: Vec<SkillAnalysis>,
}

impl From<RawAtsScore> for AtsScoreResult {
    /// Missing numbers become `0`, a missing grade `"N/A"`.
    fn from(raw: RawAtsScore) -> Self {
        Self {
            score: raw.score.unwrap_or(0.0),
            grade: super::application::text_or_missing(raw.grade),
            skills_match: raw.skills_match.unwrap_or(0.0),
            keywords_match: raw.keywords_match.unwrap_or(0.0),
            suggestions: raw.suggestions.unwrap_or_default(),
            skills_analysis: raw.skills_analysis.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_response_maps_verbatim() {
        let raw: RawAtsScore = serde_json::from_value(json!({
            "score": 78,
            "grade": "B+",
            "skillsMatch": 70.5,
            "keywordsMatch": 66,
            "suggestions": ["Add metrics"],
            "skillsAnalysis": [{"skill": "Rust", "found": true, "importance": "high"}]
        }))
        .unwrap();

        let result = AtsScoreResult::from(raw);
        assert_eq!(result.score, 78.0);
        assert_eq!(result.grade, "B+");
        assert_eq!(result.skills_match, 70.5);
        assert_eq!(result.skills_analysis[0].skill, "Rust");
        assert!(result.skills_analysis[0].found);
    }

    #[test]
    fn empty_response_gets_zero_scores() {
        let raw: RawAtsScore = serde_json::from_value(json!({})).unwrap();
        let result = AtsScoreResult::from(raw);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.keywords_match, 0.0);
        assert_eq!(result.grade, "N/A");
        assert!(result.suggestions.is_empty());
    }
}
