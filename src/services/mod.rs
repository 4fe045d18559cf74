// Service exports
pub mod cache;
pub mod opportunities;
pub mod profiles;
pub mod upstream;

pub use cache::{CacheKey, OpportunityCache, OpportunityList};
pub use opportunities::OpportunityClient;
pub use profiles::{ProfileClient, StudentProfileRecord};
pub use upstream::UpstreamError;
