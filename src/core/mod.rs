// Core algorithm exports
pub mod matcher;
pub mod scoring;
pub mod skills;

pub use matcher::{MatchEngine, MatchError, DEFAULT_RESULT_LIMIT};
pub use scoring::{score_candidate_for_job, score_job_for_seeker, MatchBreakdown};
pub use skills::{matching_skills, normalize_skills, SkillQuery};
