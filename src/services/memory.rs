use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use crate::core::scoring::levels_equal;
use crate::core::skills::SkillQuery;
use crate::models::{JobPosting, SeekerProfile};
use crate::services::store::{JobStore, ProfileStore, StoreError, EXPERIENCE_RELEVANCE_BONUS};

/// In-process store holding fixed sets of profiles, postings and applications
///
/// Applies the same eligibility rules and relevance ordering as the
/// PostgreSQL store, so the engine behaves identically on either backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    profiles: Vec<SeekerProfile>,
    jobs: Vec<JobPosting>,
    applications: HashMap<i64, Vec<i64>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, profile: SeekerProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    pub fn with_job(mut self, job: JobPosting) -> Self {
        self.jobs.push(job);
        self
    }

    /// Record that `user_id` applied to `job_id`
    pub fn with_application(mut self, user_id: i64, job_id: i64) -> Self {
        self.applications.entry(user_id).or_default().push(job_id);
        self
    }

    fn job_relevance(job: &JobPosting, skills: &SkillQuery, level: Option<&str>) -> usize {
        let bonus = if levels_equal(job.level(), level) {
            EXPERIENCE_RELEVANCE_BONUS
        } else {
            0
        };
        skills.relevance(job.skills.as_deref()) + bonus
    }

    fn seeker_relevance(profile: &SeekerProfile, skills: &SkillQuery, level: Option<&str>) -> usize {
        let bonus = if levels_equal(profile.level(), level) {
            EXPERIENCE_RELEVANCE_BONUS
        } else {
            0
        };
        skills.relevance(profile.skills.as_deref()) + bonus
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn get_seeker_profile(&self, user_id: i64) -> Result<Option<SeekerProfile>, StoreError> {
        Ok(self.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn get_application_industries(
        &self,
        user_id: i64,
    ) -> Result<BTreeSet<String>, StoreError> {
        let applied = match self.applications.get(&user_id) {
            Some(ids) => ids,
            None => return Ok(BTreeSet::new()),
        };

        Ok(self
            .jobs
            .iter()
            .filter(|job| applied.contains(&job.id))
            .filter_map(|job| job.industry.clone())
            .collect())
    }
}

#[async_trait]
impl JobStore for InMemoryStore {
    async fn find_candidate_jobs(
        &self,
        skills: &SkillQuery,
        experience_level: Option<&str>,
        industries: &BTreeSet<String>,
        limit: usize,
    ) -> Result<Vec<JobPosting>, StoreError> {
        let mut eligible: Vec<(usize, &JobPosting)> = self
            .jobs
            .iter()
            .filter(|job| job.is_open())
            .filter(|job| {
                skills.matches_text(job.skills.as_deref())
                    || levels_equal(job.level(), experience_level)
                    || job
                        .industry
                        .as_ref()
                        .is_some_and(|industry| industries.contains(industry))
            })
            .map(|job| (Self::job_relevance(job, skills, experience_level), job))
            .collect();

        // Relevance descending, then newest first, then id
        eligible.sort_by_key(|(relevance, job)| (Reverse(*relevance), Reverse(job.created_at), job.id));
        eligible.truncate(limit);

        Ok(eligible.into_iter().map(|(_, job)| job.clone()).collect())
    }

    async fn find_candidate_seekers(
        &self,
        skills: &SkillQuery,
        experience_level: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SeekerProfile>, StoreError> {
        let mut eligible: Vec<(usize, &SeekerProfile)> = self
            .profiles
            .iter()
            .filter(|profile| skills.matches_text(profile.skills.as_deref()))
            .map(|profile| (Self::seeker_relevance(profile, skills, experience_level), profile))
            .collect();

        eligible.sort_by_key(|(relevance, profile)| (Reverse(*relevance), profile.user_id));
        eligible.truncate(limit);

        Ok(eligible.into_iter().map(|(_, profile)| profile.clone()).collect())
    }

    async fn get_job_by_id(&self, job_id: i64) -> Result<Option<JobPosting>, StoreError> {
        Ok(self.jobs.iter().find(|job| job.id == job_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobStatus;
    use chrono::{Duration, TimeZone, Utc};

    fn create_job(id: i64, skills: &str, level: &str, industry: &str, age_days: i64) -> JobPosting {
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        JobPosting {
            id,
            company_id: 1,
            title: format!("Job {}", id),
            company_name: Some("Acme".to_string()),
            industry: Some(industry.to_string()),
            experience_level: Some(level.to_string()),
            skills: Some(skills.to_string()),
            status: JobStatus::Open,
            location: None,
            job_type: None,
            created_at: base - Duration::days(age_days),
        }
    }

    #[tokio::test]
    async fn test_jobs_ordered_by_relevance_then_recency() {
        let store = InMemoryStore::new()
            .with_job(create_job(1, "rust", "Junior", "Software", 1))
            .with_job(create_job(2, "rust, sql", "Junior", "Software", 5))
            .with_job(create_job(3, "rust", "Junior", "Software", 0))
            .with_job(create_job(4, "cobol", "Senior", "Banking", 10));

        let query = SkillQuery::parse(Some("rust, sql"));
        let jobs = store
            .find_candidate_jobs(&query, Some("Senior"), &BTreeSet::new(), 10)
            .await
            .unwrap();

        let ids: Vec<i64> = jobs.iter().map(|j| j.id).collect();
        // 2 and 4 tie at relevance 2 (4 via level bonus), 2 is newer; 3 and 1 tie at 1
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[tokio::test]
    async fn test_closed_jobs_excluded() {
        let mut closed = create_job(1, "rust", "Junior", "Software", 0);
        closed.status = JobStatus::Closed;
        let store = InMemoryStore::new().with_job(closed);

        let jobs = store
            .find_candidate_jobs(&SkillQuery::parse(Some("rust")), Some("Junior"), &BTreeSet::new(), 10)
            .await
            .unwrap();
        assert!(jobs.is_empty());
    }

    #[tokio::test]
    async fn test_application_industries() {
        let store = InMemoryStore::new()
            .with_job(create_job(1, "rust", "Junior", "Software", 0))
            .with_job(create_job(2, "excel", "Junior", "Finance", 0))
            .with_application(9, 2);

        let industries = store.get_application_industries(9).await.unwrap();
        assert_eq!(industries.into_iter().collect::<Vec<_>>(), vec!["Finance"]);
        assert!(store.get_application_industries(10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_seekers_require_skill_overlap() {
        let store = InMemoryStore::new()
            .with_profile(SeekerProfile::new(1, Some("Senior"), Some("python")))
            .with_profile(SeekerProfile::new(2, Some("Junior"), Some("rust")))
            .with_profile(SeekerProfile::new(3, Some("Senior"), Some("rust, tokio")));

        let seekers = store
            .find_candidate_seekers(&SkillQuery::parse(Some("rust, tokio")), Some("Senior"), 10)
            .await
            .unwrap();

        let ids: Vec<i64> = seekers.iter().map(|s| s.user_id).collect();
        assert_eq!(ids, vec![3, 2]);
    }
}
