use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

/// Opaque identifier as sent by the upstream services (numeric or text)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Candidate (student) profile being matched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct CandidateProfile {
    #[serde(default, alias = "userId")]
    pub user_id: Option<RecordId>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "researchFields", deserialize_with = "null_as_default")]
    pub research_fields: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub goals: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
}

/// Kind of opportunity published by a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    Scholarship,
    ResearchLab,
    Program,
}

impl OpportunityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpportunityType::Scholarship => "scholarship",
            OpportunityType::ResearchLab => "research_lab",
            OpportunityType::Program => "program",
        }
    }
}

impl fmt::Display for OpportunityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Eligibility criteria attached to an opportunity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpportunityCriteria {
    #[serde(
        default,
        alias = "skills",
        alias = "requiredSkills",
        deserialize_with = "null_as_default"
    )]
    pub required_skills: Vec<String>,
    #[serde(default, alias = "gpa_min", alias = "minGpa")]
    pub min_gpa: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, alias = "researchFields", deserialize_with = "null_as_default")]
    pub research_fields: Vec<String>,
    #[serde(default, alias = "requiredDocuments", deserialize_with = "null_as_default")]
    pub required_documents: Vec<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub deadline: Option<DateTime<Utc>>,
}

/// Scholarship, research lab or program listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Opportunity {
    pub id: RecordId,
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "type", alias = "opportunityType")]
    pub opportunity_type: OpportunityType,
    #[serde(default, alias = "providerUserId")]
    pub provider_user_id: Option<RecordId>,
    #[serde(default)]
    pub criteria: Option<OpportunityCriteria>,
}

impl Opportunity {
    /// Required skills, empty when the opportunity carries no criteria
    pub fn required_skills(&self) -> &[String] {
        self.criteria
            .as_ref()
            .map(|c| c.required_skills.as_slice())
            .unwrap_or(&[])
    }

    pub fn min_gpa(&self) -> Option<f64> {
        self.criteria.as_ref().and_then(|c| c.min_gpa)
    }

    pub fn location(&self) -> Option<&str> {
        self.criteria.as_ref().and_then(|c| c.location.as_deref())
    }

    pub fn research_fields(&self) -> &[String] {
        self.criteria
            .as_ref()
            .map(|c| c.research_fields.as_slice())
            .unwrap_or(&[])
    }
}

/// Ranked opportunity returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub opportunity_id: RecordId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub opportunity_type: OpportunityType,
    pub score: f64,
    #[serde(rename = "match_reasons", alias = "reasons")]
    pub reasons: Vec<String>,
}

/// Weights of the default five-factor model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skills: f64,
    pub gpa: f64,
    pub interests: f64,
    pub goals: f64,
    pub strengths: f64,
}

impl ScoringWeights {
    pub fn components(&self) -> [f64; 5] {
        [self.skills, self.gpa, self.interests, self.goals, self.strengths]
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.30,
            gpa: 0.20,
            interests: 0.20,
            goals: 0.15,
            strengths: 0.15,
        }
    }
}

/// Weights of the legacy four-factor model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LegacyWeights {
    pub skills: f64,
    pub gpa: f64,
    pub location: f64,
    pub research: f64,
}

impl LegacyWeights {
    pub fn components(&self) -> [f64; 4] {
        [self.skills, self.gpa, self.location, self.research]
    }
}

impl Default for LegacyWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            gpa: 0.2,
            location: 0.1,
            research: 0.2,
        }
    }
}

/// Named scoring strategy, selectable from config or per request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringStrategy {
    #[default]
    #[serde(alias = "five_factor")]
    Weighted,
    #[serde(alias = "four_factor")]
    Legacy,
}

/// Treat an explicit JSON `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deadlines arrive as RFC 3339, naive date-times or plain dates.
/// Anything else is dropped since the deadline is never scored.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_timestamp))
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
