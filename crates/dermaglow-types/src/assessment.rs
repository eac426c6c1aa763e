//! Skin assessment types.
//!
//! An [`Assessment`] is the questionnaire snapshot captured when a
//! consultation session starts. It is embedded in the session and never
//! mutated afterwards; every field is optional because the intake form
//! allows skipping questions.

use serde::{Deserialize, Serialize};

/// Questionnaire snapshot embedded in a consultation session.
///
/// All fields are free-text answers from the intake form. Absent fields
/// render as a fixed placeholder when the assessment is turned into a
/// prompt, so `None` and "question skipped" are the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Assessment {
    pub skin_type: Option<String>,
    pub main_concern: Option<String>,
    pub additional_skin_concerns: Option<String>,
    /// Multi-select list; empty means none reported.
    pub specific_skin_issues: Vec<String>,
    pub current_routine: Option<String>,
    pub sunscreen_usage: Option<String>,
    pub climate_type: Option<String>,
    pub work_environment: Option<String>,
    pub product_usage_frequency: Option<String>,
    pub skin_texture_description: Option<String>,
    pub diet_type: Option<String>,
    pub exercise_frequency: Option<String>,
    pub stress_level: Option<String>,
    pub sun_exposure: Option<String>,
    pub water_intake: Option<String>,
    pub alcohol_consumption: Option<String>,
}

impl Assessment {
    /// Joined specific issues, or `None` when the list is empty.
    pub fn specific_issues_text(&self) -> Option<String> {
        if self.specific_skin_issues.is_empty() {
            None
        } else {
            Some(self.specific_skin_issues.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_default_is_all_absent() {
        let assessment = Assessment::default();
        assert!(assessment.skin_type.is_none());
        assert!(assessment.main_concern.is_none());
        assert!(assessment.specific_skin_issues.is_empty());
        assert!(assessment.specific_issues_text().is_none());
    }

    #[test]
    fn test_assessment_camel_case_wire_format() {
        let json = r#"{
            "skinType": "Oily",
            "mainConcern": "Acne",
            "specificSkinIssues": ["Blackheads", "Large pores"]
        }"#;
        let assessment: Assessment = serde_json::from_str(json).unwrap();
        assert_eq!(assessment.skin_type.as_deref(), Some("Oily"));
        assert_eq!(assessment.main_concern.as_deref(), Some("Acne"));
        assert_eq!(
            assessment.specific_issues_text().as_deref(),
            Some("Blackheads, Large pores")
        );

        let back = serde_json::to_string(&assessment).unwrap();
        assert!(back.contains("\"skinType\":\"Oily\""));
        assert!(back.contains("\"specificSkinIssues\""));
    }

    #[test]
    fn test_assessment_unknown_subset_deserializes() {
        // Partial forms are the norm, not the exception.
        let json = r#"{"stressLevel": "High"}"#;
        let assessment: Assessment = serde_json::from_str(json).unwrap();
        assert_eq!(assessment.stress_level.as_deref(), Some("High"));
        assert!(assessment.skin_type.is_none());
    }
}
