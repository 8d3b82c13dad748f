use std::sync::Arc;
use thiserror::Error;

use crate::core::scoring::{score_candidate_for_job, score_job_for_seeker};
use crate::core::skills::SkillQuery;
use crate::models::{JobPosting, MatchResult, ScoringWeights, SeekerProfile};
use crate::services::store::{JobStore, ProfileStore, StoreError};

/// Default cap on recommendations per call
pub const DEFAULT_RESULT_LIMIT: usize = 10;

/// Errors surfaced to callers of the engine
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("lookup failed: {0}")]
    LookupFailed(#[from] StoreError),
}

/// Recommendation engine ranking jobs for seekers and seekers for jobs
///
/// # Pipeline
/// 1. Load the subject (seeker profile or job); missing subject yields no results
/// 2. Normalize its skills into a query
/// 3. Ask the job store for eligible candidates, already ordered by relevance
/// 4. Score each candidate, keeping the store's order and the result cap
///
/// Holds no state between calls; clones share the same stores.
#[derive(Clone)]
pub struct MatchEngine {
    profiles: Arc<dyn ProfileStore>,
    jobs: Arc<dyn JobStore>,
    weights: ScoringWeights,
    limit: usize,
}

impl MatchEngine {
    pub fn new(profiles: Arc<dyn ProfileStore>, jobs: Arc<dyn JobStore>) -> Self {
        Self {
            profiles,
            jobs,
            weights: ScoringWeights::default(),
            limit: DEFAULT_RESULT_LIMIT,
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Recommend open jobs for a seeker
    ///
    /// A job is eligible when it shares a skill with the seeker, has the same
    /// experience level, or belongs to an industry the seeker has applied in.
    pub async fn recommend_jobs_for_seeker(
        &self,
        seeker_id: i64,
    ) -> Result<Vec<MatchResult<JobPosting>>, MatchError> {
        let profile = match self.profiles.get_seeker_profile(seeker_id).await? {
            Some(profile) => profile,
            None => {
                tracing::debug!("No seeker profile for user {}, nothing to recommend", seeker_id);
                return Ok(Vec::new());
            }
        };

        let skills = SkillQuery::parse(profile.skills.as_deref());
        let level = profile.level();
        let industries = self.profiles.get_application_industries(seeker_id).await?;

        let candidates = self
            .jobs
            .find_candidate_jobs(&skills, level, &industries, self.limit)
            .await?;

        tracing::debug!(
            "Found {} candidate jobs for seeker {} ({} skills, {} industries)",
            candidates.len(),
            seeker_id,
            skills.len(),
            industries.len()
        );

        let results = candidates
            .into_iter()
            .filter(JobPosting::is_open)
            .take(self.limit)
            .map(|job| {
                let score = score_job_for_seeker(skills.tokens(), level, &job, &self.weights.jobs);
                MatchResult {
                    entity: job,
                    match_percentage: score.overall,
                    matching_skills: score.matching_skills,
                }
            })
            .collect();

        Ok(results)
    }

    /// Recommend seekers for a job
    ///
    /// Only seekers sharing at least one skill with the job are considered;
    /// a matching experience level alone does not qualify a seeker.
    pub async fn recommend_candidates_for_job(
        &self,
        job_id: i64,
    ) -> Result<Vec<MatchResult<SeekerProfile>>, MatchError> {
        let job = match self.jobs.get_job_by_id(job_id).await? {
            Some(job) => job,
            None => {
                tracing::debug!("Job {} not found, nothing to recommend", job_id);
                return Ok(Vec::new());
            }
        };

        let skills = SkillQuery::parse(job.skills.as_deref());
        let level = job.level();

        let candidates = self
            .jobs
            .find_candidate_seekers(&skills, level, self.limit)
            .await?;

        tracing::debug!(
            "Found {} candidate seekers for job {} ({} required skills)",
            candidates.len(),
            job_id,
            skills.len()
        );

        let results = candidates
            .into_iter()
            .take(self.limit)
            .map(|candidate| {
                let score =
                    score_candidate_for_job(skills.tokens(), level, &candidate, &self.weights.candidates);
                MatchResult {
                    entity: candidate,
                    match_percentage: score.overall,
                    matching_skills: score.matching_skills,
                }
            })
            .collect();

        Ok(results)
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("weights", &self.weights)
            .field("limit", &self.limit)
            .finish()
    }
}
