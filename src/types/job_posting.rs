//! Job posting data structures

use serde::{Deserialize, Deserializer, Serialize};

/// Value used for a categorical field that is missing or empty
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// A job posting submitted for fraud analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    /// Job title
    pub title: String,

    /// Company profile text
    #[serde(default)]
    pub company_profile: Option<String>,

    /// Job description
    pub description: String,

    /// Candidate requirements
    #[serde(default)]
    pub requirements: Option<String>,

    /// Offered benefits
    #[serde(default)]
    pub benefits: Option<String>,

    /// Remote position flag (0/1)
    #[serde(default, deserialize_with = "flag")]
    pub telecommuting: Option<i64>,

    /// Posting shows a company logo (0/1)
    #[serde(default, deserialize_with = "flag")]
    pub has_company_logo: Option<i64>,

    /// Posting has screening questions (0/1)
    #[serde(default, deserialize_with = "flag")]
    pub has_questions: Option<i64>,

    /// Full-time, Part-time, Contract, ...
    #[serde(default)]
    pub employment_type: Option<String>,

    /// Entry level, Mid-Senior level, ...
    #[serde(default)]
    pub required_experience: Option<String>,

    /// Bachelor's Degree, High School or equivalent, ...
    #[serde(default)]
    pub required_education: Option<String>,
}

impl JobPosting {
    /// Create a posting with only the required fields set
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Free-text fields joined in training order:
    /// title, company_profile, description, requirements, benefits.
    pub fn combined_text(&self) -> String {
        [
            self.title.as_str(),
            self.company_profile.as_deref().unwrap_or(""),
            self.description.as_str(),
            self.requirements.as_deref().unwrap_or(""),
            self.benefits.as_deref().unwrap_or(""),
        ]
        .join(" ")
    }

    /// Categorical fields in encoder order, empty or missing values mapped to "Unknown"
    pub fn categorical_values(&self) -> [&str; 3] {
        [
            category_or_unknown(&self.employment_type),
            category_or_unknown(&self.required_experience),
            category_or_unknown(&self.required_education),
        ]
    }

    /// Numeric flags in training order, missing values mapped to 0
    pub fn numeric_values(&self) -> [f32; 3] {
        [
            self.telecommuting.unwrap_or(0) as f32,
            self.has_company_logo.unwrap_or(0) as f32,
            self.has_questions.unwrap_or(0) as f32,
        ]
    }
}

fn category_or_unknown(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => UNKNOWN_CATEGORY,
    }
}

/// Accepts integers, booleans and null for the binary flag fields.
fn flag<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Int(i64),
        Bool(bool),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Int(v)) => Some(v),
        Some(Flag::Bool(b)) => Some(b as i64),
        None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let job: JobPosting =
            serde_json::from_str(r#"{"title": "Engineer", "description": "Build things"}"#)
                .unwrap();

        assert_eq!(job.combined_text(), "Engineer  Build things  ");
        assert_eq!(job.categorical_values(), ["Unknown"; 3]);
        assert_eq!(job.numeric_values(), [0.0; 3]);
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let result = serde_json::from_str::<JobPosting>(r#"{"title": "Engineer"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_nulls_and_empty_categories() {
        let job: JobPosting = serde_json::from_str(
            r#"{
                "title": "Clerk",
                "description": "Filing",
                "company_profile": null,
                "telecommuting": true,
                "has_questions": null,
                "employment_type": "",
                "required_education": "Bachelor's Degree"
            }"#,
        )
        .unwrap();

        assert_eq!(
            job.categorical_values(),
            ["Unknown", "Unknown", "Bachelor's Degree"]
        );
        assert_eq!(job.numeric_values(), [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_wrong_flag_type_rejected() {
        let result = serde_json::from_str::<JobPosting>(
            r#"{"title": "a", "description": "b", "telecommuting": "yes"}"#,
        );
        assert!(result.is_err());
    }
}
