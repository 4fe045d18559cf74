// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateProfile, LegacyWeights, MatchResult, Opportunity, OpportunityCriteria,
    OpportunityType, RecordId, ScoringStrategy, ScoringWeights,
};
pub use requests::{split_tags, MatchRequest, SimpleMatchQuery};
pub use responses::{CacheStats, ErrorResponse, HealthResponse, MatchResponse, ServiceInfo};
