use serde::Serialize;
use crate::core::error::MatchError;
use crate::core::factors::{
    goals_score, gpa_score, interests_score, legacy_gpa_score, location_score, overlap_score,
    shared_tags, skills_score, strengths_score,
};
use crate::core::normalize::round4;
use crate::models::{CandidateProfile, LegacyWeights, Opportunity, ScoringStrategy, ScoringWeights};

/// Reason emitted when no specific reason applies
pub const FALLBACK_REASON: &str = "Good overall fit for your profile";

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// A single scoring dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Skills,
    Gpa,
    Interests,
    Goals,
    Strengths,
    Location,
    Research,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScore {
    pub factor: Factor,
    pub value: f64,
    pub weight: f64,
}

/// Full scorer output for one candidate/opportunity pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub score: f64,
    pub reasons: Vec<String>,
    pub factors: Vec<FactorScore>,
}

impl ScoreCard {
    /// Sub-score of a factor, `None` if the model does not use it
    pub fn factor(&self, factor: Factor) -> Option<f64> {
        self.factors
            .iter()
            .find(|f| f.factor == factor)
            .map(|f| f.value)
    }

    fn from_factors(factors: Vec<FactorScore>, mut reasons: Vec<String>) -> Self {
        let total: f64 = factors.iter().map(|f| f.value * f.weight).sum();

        if reasons.is_empty() {
            reasons.push(FALLBACK_REASON.to_string());
        }

        Self {
            score: round4(total.clamp(0.0, 1.0)),
            reasons,
            factors,
        }
    }
}

/// Scoring model with its weights injected at construction
///
/// Weights can only be set through [`Scorer::weighted`] and
/// [`Scorer::legacy`], which validate them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scorer {
    model: Model,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Model {
    /// Five-factor model: skills, GPA, interests, goals, strengths
    Weighted(ScoringWeights),
    /// Four-factor model: skills, GPA, location, research fields
    Legacy(LegacyWeights),
}

impl Scorer {
    pub fn weighted(weights: ScoringWeights) -> Result<Self, MatchError> {
        validate_weights("weighted", &weights.components())?;
        Ok(Self { model: Model::Weighted(weights) })
    }

    pub fn legacy(weights: LegacyWeights) -> Result<Self, MatchError> {
        validate_weights("legacy", &weights.components())?;
        Ok(Self { model: Model::Legacy(weights) })
    }

    /// Scorer with the built-in weights of a strategy
    pub fn with_default_weights(strategy: ScoringStrategy) -> Self {
        let model = match strategy {
            ScoringStrategy::Weighted => Model::Weighted(ScoringWeights::default()),
            ScoringStrategy::Legacy => Model::Legacy(LegacyWeights::default()),
        };
        Self { model }
    }

    pub fn strategy(&self) -> ScoringStrategy {
        match self.model {
            Model::Weighted(_) => ScoringStrategy::Weighted,
            Model::Legacy(_) => ScoringStrategy::Legacy,
        }
    }

    pub fn score(&self, candidate: &CandidateProfile, opportunity: &Opportunity) -> ScoreCard {
        match &self.model {
            Model::Weighted(weights) => calculate_match_score(candidate, opportunity, weights),
            Model::Legacy(weights) => calculate_legacy_score(candidate, opportunity, weights),
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::with_default_weights(ScoringStrategy::Weighted)
    }
}

/// Reject negative weights and weight sets that do not sum to 1.0
pub fn validate_weights(model: &'static str, components: &[f64]) -> Result<(), MatchError> {
    if let Some(w) = components.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(MatchError::InvalidWeights {
            model,
            reason: format!("weight {} is not a non-negative number", w),
        });
    }

    let sum: f64 = components.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        return Err(MatchError::InvalidWeights {
            model,
            reason: format!("weights sum to {:.4}, expected 1.0", sum),
        });
    }

    Ok(())
}

/// Calculate the five-factor match score (0-1) and its reasons
///
/// Scoring formula:
/// score = (
///     skills_score * 0.30 +        # Jaccard over required skills
///     gpa_score * 0.20 +           # Meets minimum GPA, partial credit below
///     interests_score * 0.20 +     # Interests mentioned in the description
///     goals_score * 0.15 +         # Research / industry goal alignment
///     strengths_score * 0.15       # Strengths in description or required skills
/// )
pub fn calculate_match_score(
    candidate: &CandidateProfile,
    opportunity: &Opportunity,
    weights: &ScoringWeights,
) -> ScoreCard {
    let mut reasons = Vec::new();
    let required_skills = opportunity.required_skills();
    let description = opportunity.description.as_str();

    let gpa = gpa_score(candidate.gpa, opportunity.min_gpa());
    if let Some(min) = opportunity.min_gpa().filter(|m| *m > 0.0) {
        if gpa >= 1.0 {
            reasons.push(format!("Meets GPA requirement (min {:.2})", min));
        } else if gpa >= 0.7 {
            reasons.push(format!(
                "GPA near threshold ({:.2}/{:.2})",
                candidate.gpa.unwrap_or_default(),
                min
            ));
        }
    }

    let skills = skills_score(&candidate.skills, required_skills);
    if skills > 0.7 {
        let matched = shared_tags(&candidate.skills, required_skills);
        if !matched.is_empty() {
            let listed: Vec<&str> = matched.iter().take(3).map(String::as_str).collect();
            reasons.push(format!("Matching skills: {}", listed.join(", ")));
        }
    } else if skills > 0.3 {
        reasons.push("Some of your skills match".to_string());
    }

    let interests = interests_score(&candidate.interests, description);
    if interests > 0.5 {
        reasons.push("Matches your interests".to_string());
    }

    let goals = goals_score(&candidate.goals, opportunity.opportunity_type, description);
    if goals > 0.5 {
        let listed: Vec<&str> = candidate
            .goals
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .take(2)
            .collect();
        reasons.push(format!("Aligned with your goals ({})", listed.join(", ")));
    }

    let strengths = strengths_score(&candidate.strengths, description, required_skills);
    if strengths > 0.6 {
        reasons.push("Strengths align with requirements".to_string());
    }

    let factors = vec![
        FactorScore { factor: Factor::Skills, value: skills, weight: weights.skills },
        FactorScore { factor: Factor::Gpa, value: gpa, weight: weights.gpa },
        FactorScore { factor: Factor::Interests, value: interests, weight: weights.interests },
        FactorScore { factor: Factor::Goals, value: goals, weight: weights.goals },
        FactorScore { factor: Factor::Strengths, value: strengths, weight: weights.strengths },
    ];

    ScoreCard::from_factors(factors, reasons)
}

/// Calculate the legacy four-factor score (0-1)
///
/// score = skills * 0.5 + gpa * 0.2 + location * 0.1 + research * 0.2
pub fn calculate_legacy_score(
    candidate: &CandidateProfile,
    opportunity: &Opportunity,
    weights: &LegacyWeights,
) -> ScoreCard {
    let mut reasons = Vec::new();
    let required_skills = opportunity.required_skills();

    let skills = overlap_score(&candidate.skills, required_skills);
    let matched = shared_tags(&candidate.skills, required_skills);
    if !matched.is_empty() {
        let listed: Vec<&str> = matched.iter().take(3).map(String::as_str).collect();
        reasons.push(format!("Matching skills: {}", listed.join(", ")));
    }

    let gpa = legacy_gpa_score(candidate.gpa, opportunity.min_gpa());
    if opportunity.min_gpa().is_some() && gpa >= 1.0 {
        reasons.push("Meets GPA requirement".to_string());
    }

    let location = location_score(candidate.location.as_deref(), opportunity.location());
    if location >= 1.0 {
        reasons.push("Location matches".to_string());
    }

    let research = overlap_score(&candidate.research_fields, opportunity.research_fields());
    let shared_fields = shared_tags(&candidate.research_fields, opportunity.research_fields());
    if !shared_fields.is_empty() {
        reasons.push(format!("Shared research fields: {}", shared_fields.join(", ")));
    }

    let factors = vec![
        FactorScore { factor: Factor::Skills, value: skills, weight: weights.skills },
        FactorScore { factor: Factor::Gpa, value: gpa, weight: weights.gpa },
        FactorScore { factor: Factor::Location, value: location, weight: weights.location },
        FactorScore { factor: Factor::Research, value: research, weight: weights.research },
    ];

    ScoreCard::from_factors(factors, reasons)
}
