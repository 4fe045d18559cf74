use serde::Deserialize;
use serde_json::Value;
use validator::Validate;
use crate::core::error::MatchError;
use crate::core::scoring::{ScoreCard, Scorer};
use crate::models::{CandidateProfile, LegacyWeights, MatchResult, Opportunity, ScoringStrategy, ScoringWeights};

/// Result of ranking a batch of raw opportunity records
#[derive(Debug)]
pub struct MatchOutcome {
    pub results: Vec<MatchResult>,
    /// Number of opportunities actually scored
    pub total_opportunities: usize,
    pub rejected: Vec<MatchError>,
}

impl MatchOutcome {
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }
}

/// Ranks opportunities for a candidate
///
/// Holds both weight sets so a request can switch strategy without
/// touching shared state. Scoring is pure, so one `Matcher` is shared by
/// every worker.
#[derive(Debug, Clone)]
pub struct Matcher {
    weighted: Scorer,
    legacy: Scorer,
    strategy: ScoringStrategy,
}

impl Matcher {
    pub fn new(
        weights: ScoringWeights,
        legacy_weights: LegacyWeights,
        strategy: ScoringStrategy,
    ) -> Result<Self, MatchError> {
        Ok(Self {
            weighted: Scorer::weighted(weights)?,
            legacy: Scorer::legacy(legacy_weights)?,
            strategy,
        })
    }

    pub fn with_default_weights() -> Self {
        Self {
            weighted: Scorer::with_default_weights(ScoringStrategy::Weighted),
            legacy: Scorer::with_default_weights(ScoringStrategy::Legacy),
            strategy: ScoringStrategy::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: ScoringStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> ScoringStrategy {
        self.strategy
    }

    /// Scorer for a strategy, falling back to the configured default
    pub fn scorer(&self, strategy: Option<ScoringStrategy>) -> &Scorer {
        match strategy.unwrap_or(self.strategy) {
            ScoringStrategy::Weighted => &self.weighted,
            ScoringStrategy::Legacy => &self.legacy,
        }
    }

    /// Score a single opportunity with the default strategy
    pub fn score(&self, candidate: &CandidateProfile, opportunity: &Opportunity) -> ScoreCard {
        self.scorer(None).score(candidate, opportunity)
    }

    /// Rank opportunities with the default strategy
    pub fn rank(&self, candidate: &CandidateProfile, opportunities: Vec<Opportunity>) -> Vec<MatchResult> {
        self.rank_with(None, candidate, opportunities)
    }

    /// Rank opportunities by score, highest first
    ///
    /// The sort is stable: opportunities with equal scores keep their
    /// input order. Nothing is filtered or truncated.
    pub fn rank_with(
        &self,
        strategy: Option<ScoringStrategy>,
        candidate: &CandidateProfile,
        opportunities: Vec<Opportunity>,
    ) -> Vec<MatchResult> {
        let scorer = self.scorer(strategy);

        let mut results: Vec<MatchResult> = opportunities
            .into_iter()
            .map(|opportunity| {
                let card = scorer.score(candidate, &opportunity);
                tracing::debug!(
                    "Scored opportunity {}: {} {:?}",
                    opportunity.id,
                    card.score,
                    card.factors
                );

                MatchResult {
                    opportunity_id: opportunity.id,
                    title: opportunity.title,
                    description: opportunity.description,
                    opportunity_type: opportunity.opportunity_type,
                    score: card.score,
                    reasons: card.reasons,
                }
            })
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        results
    }

    /// Validate raw records one by one and rank the valid ones
    ///
    /// A malformed record is logged and skipped; it never aborts the batch.
    pub fn rank_records(
        &self,
        strategy: Option<ScoringStrategy>,
        candidate: &CandidateProfile,
        records: &[Value],
    ) -> MatchOutcome {
        let mut opportunities = Vec::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, record) in records.iter().enumerate() {
            match parse_opportunity(index, record) {
                Ok(opportunity) => opportunities.push(opportunity),
                Err(e) => {
                    tracing::warn!("Skipping opportunity record: {}", e);
                    rejected.push(e);
                }
            }
        }

        let total_opportunities = opportunities.len();
        let results = self.rank_with(strategy, candidate, opportunities);

        MatchOutcome {
            results,
            total_opportunities,
            rejected,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

/// Parse and validate one opportunity record
pub fn parse_opportunity(index: usize, record: &Value) -> Result<Opportunity, MatchError> {
    let opportunity = Opportunity::deserialize(record)
        .map_err(|e| MatchError::MalformedOpportunity { index, reason: e.to_string() })?;

    opportunity
        .validate()
        .map_err(|e| MatchError::MalformedOpportunity { index, reason: e.to_string() })?;

    if opportunity.title.trim().is_empty() {
        return Err(MatchError::MalformedOpportunity {
            index,
            reason: "title is blank".to_string(),
        });
    }

    Ok(opportunity)
}
