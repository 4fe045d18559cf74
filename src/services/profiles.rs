use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use crate::models::{split_tags, CandidateProfile, RecordId};
use crate::services::upstream::{build_http_client, join_url, UpstreamError};

/// Student profile as stored by the user service
///
/// List-like fields are stored as comma separated strings there.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentProfileRecord {
    pub user_id: RecordId,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub research_interests: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub thesis_topic: Option<String>,
}

impl From<StudentProfileRecord> for CandidateProfile {
    fn from(record: StudentProfileRecord) -> Self {
        let research = split_tags(record.research_interests.as_deref());

        let mut interests = research.clone();
        interests.extend(
            [record.major, record.thesis_topic]
                .into_iter()
                .flatten()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        );

        CandidateProfile {
            user_id: Some(record.user_id),
            skills: split_tags(record.skills.as_deref()),
            gpa: record.gpa,
            location: None,
            research_fields: research,
            goals: Vec::new(),
            strengths: Vec::new(),
            interests,
        }
    }
}

/// Client for the user service's student profiles
pub struct ProfileClient {
    base_url: String,
    client: Client,
}

impl ProfileClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, UpstreamError> {
        Ok(Self {
            base_url,
            client: build_http_client(timeout)?,
        })
    }

    /// Fetch a student's profile and map it into a candidate profile
    pub async fn get_student_profile(&self, user_id: &RecordId) -> Result<CandidateProfile, UpstreamError> {
        let url = join_url(&self.base_url, &format!("/api/student/profile/{}", user_id));

        tracing::debug!("Fetching student profile for user: {}", user_id);

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(format!("Profile not found for user {}", user_id)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
            return Err(UpstreamError::ApiError(format!("Failed to fetch profile: {}", status)));
        }

        let json: Value = response.json().await?;

        // the user service answers `null` for students without a profile
        if json.is_null() {
            return Err(UpstreamError::NotFound(format!("Profile not found for user {}", user_id)));
        }

        let record: StudentProfileRecord = serde_json::from_value(json)
            .map_err(|e| UpstreamError::InvalidResponse(format!("Failed to parse profile: {}", e)))?;

        Ok(record.into())
    }
}
