// Core algorithm exports
pub mod error;
pub mod factors;
pub mod matcher;
pub mod normalize;
pub mod scoring;

pub use error::MatchError;
pub use factors::{goals_score, gpa_score, interests_score, skills_score, strengths_score};
pub use matcher::{parse_opportunity, MatchOutcome, Matcher};
pub use normalize::{jaccard, normalize_set, normalize_text, round4};
pub use scoring::{calculate_legacy_score, calculate_match_score, Factor, ScoreCard, Scorer};
