//! Scholar Match - opportunity matching service for the scholarship platform
//!
//! This library provides the ranking engine used by the matching service:
//! a weighted multi-factor scorer that compares a student profile with
//! scholarships, research labs and programs, and a ranker that orders
//! them by score.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchError, ScoreCard, Scorer};
pub use crate::models::{CandidateProfile, MatchResult, Opportunity, OpportunityCriteria, OpportunityType, ScoringStrategy, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        let results = matcher.rank(&CandidateProfile::default(), vec![]);
        assert!(results.is_empty());
    }
}
