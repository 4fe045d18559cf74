use serde::{Deserialize, Deserializer, Serialize};
use crate::models::domain::{CandidateProfile, RecordId, ScoringStrategy};

/// Request to rank opportunities for a student
///
/// `student_profile` and `opportunities` are both optional; whatever is
/// missing is fetched from the upstream services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(alias = "studentUserId")]
    pub student_user_id: RecordId,
    #[serde(default, alias = "studentProfile")]
    pub student_profile: Option<CandidateProfile>,
    /// Raw records so that a single malformed entry can be skipped
    #[serde(default)]
    pub opportunities: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    pub strategy: Option<ScoringStrategy>,
}

/// Query string of `GET /match/simple`; list fields are comma separated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleMatchQuery {
    #[serde(deserialize_with = "query_record_id")]
    pub student_user_id: RecordId,
    pub gpa: Option<f64>,
    pub skills: Option<String>,
    pub goals: Option<String>,
    pub strengths: Option<String>,
    pub interests: Option<String>,
    pub location: Option<String>,
    pub research_fields: Option<String>,
    pub strategy: Option<ScoringStrategy>,
}

impl SimpleMatchQuery {
    pub fn to_profile(&self) -> CandidateProfile {
        CandidateProfile {
            user_id: Some(self.student_user_id.clone()),
            skills: split_tags(self.skills.as_deref()),
            gpa: self.gpa,
            location: self
                .location
                .as_deref()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
            research_fields: split_tags(self.research_fields.as_deref()),
            goals: split_tags(self.goals.as_deref()),
            strengths: split_tags(self.strengths.as_deref()),
            interests: split_tags(self.interests.as_deref()),
        }
    }
}

/// Query values always arrive as text; numeric ids are restored to numbers
fn query_record_id<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RecordId::deserialize(deserializer)? {
        RecordId::Text(raw) => match raw.trim().parse::<i64>() {
            Ok(n) => RecordId::Number(n),
            Err(_) => RecordId::Text(raw),
        },
        id => id,
    })
}

/// Split a comma separated list, dropping blank entries
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
