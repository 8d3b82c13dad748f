// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CandidateMatchWeights, JobMatchWeights, JobPosting, JobStatus, MatchResult, ScoringWeights,
    SeekerProfile,
};
pub use requests::RecommendationQuery;
pub use responses::{ErrorResponse, HealthResponse};
