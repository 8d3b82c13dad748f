use serde::{Deserialize, Serialize};

/// Job seeker profile with the skill and experience data used for matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeekerProfile {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: Option<String>,
    /// Comma-separated skill list as entered by the seeker
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl SeekerProfile {
    /// Minimal profile carrying only the matching fields
    pub fn new(user_id: i64, experience_level: Option<&str>, skills: Option<&str>) -> Self {
        Self {
            user_id,
            experience_level: experience_level.map(str::to_string),
            skills: skills.map(str::to_string),
            title: None,
            summary: None,
            first_name: None,
            last_name: None,
            email: None,
        }
    }

    /// Experience level, treating a blank value as absent
    pub fn level(&self) -> Option<&str> {
        non_blank(self.experience_level.as_deref())
    }
}

/// Posting status. Anything other than `open` is treated as closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Open,
    #[serde(other)]
    Closed,
}

impl JobStatus {
    pub fn from_db(value: &str) -> Self {
        if value.eq_ignore_ascii_case("open") {
            JobStatus::Open
        } else {
            JobStatus::Closed
        }
    }
}

/// Employer-created job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: i64,
    #[serde(rename = "companyId")]
    pub company_id: i64,
    pub title: String,
    #[serde(rename = "companyName", default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(rename = "experienceLevel", default)]
    pub experience_level: Option<String>,
    /// Comma-separated required skills
    #[serde(default)]
    pub skills: Option<String>,
    pub status: JobStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "jobType", default)]
    pub job_type: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl JobPosting {
    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }

    /// Experience level, treating a blank value as absent
    pub fn level(&self) -> Option<&str> {
        non_blank(self.experience_level.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// A recommended job or candidate with its match annotation
///
/// Serialized with the entity's own fields flattened alongside
/// `matchPercentage` and `matchingSkills`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult<T> {
    #[serde(flatten)]
    pub entity: T,
    #[serde(rename = "matchPercentage")]
    pub match_percentage: u8,
    #[serde(rename = "matchingSkills")]
    pub matching_skills: Vec<String>,
}

/// Blend weights for ranking jobs for a seeker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobMatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub recency: f64,
}

impl Default for JobMatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            recency: 0.2,
        }
    }
}

/// Blend weights for ranking candidates for a job
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateMatchWeights {
    pub skills: f64,
    pub experience: f64,
}

impl Default for CandidateMatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.7,
            experience: 0.3,
        }
    }
}

/// Both weight sets used by the engine
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoringWeights {
    pub jobs: JobMatchWeights,
    pub candidates: CandidateMatchWeights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_status_is_closed() {
        let status: JobStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, JobStatus::Closed);
        assert_eq!(JobStatus::from_db("OPEN"), JobStatus::Open);
        assert_eq!(JobStatus::from_db("draft"), JobStatus::Closed);
    }

    #[test]
    fn test_blank_level_is_absent() {
        let profile = SeekerProfile::new(1, Some("  "), None);
        assert_eq!(profile.level(), None);

        let profile = SeekerProfile::new(1, Some("Senior"), None);
        assert_eq!(profile.level(), Some("Senior"));
    }

    #[test]
    fn test_match_result_flattens_entity() {
        let result = MatchResult {
            entity: SeekerProfile::new(7, Some("Junior"), Some("rust")),
            match_percentage: 85,
            matching_skills: vec!["rust".to_string()],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["matchPercentage"], 85);
        assert_eq!(json["matchingSkills"][0], "rust");
    }
}
