use async_trait::async_trait;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::core::skills::SkillQuery;
use crate::models::{JobPosting, SeekerProfile};

/// Errors raised by the profile and job stores
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A row did not have the expected columns or types
    #[error("Malformed record: {0}")]
    Malformed(String),

    /// The backend could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. }
            | sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_) => StoreError::Malformed(err.to_string()),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
            other => StoreError::Database(other),
        }
    }
}

/// Read access to seeker profiles and their application history
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_seeker_profile(&self, user_id: i64) -> Result<Option<SeekerProfile>, StoreError>;

    /// Industries of every job the seeker has applied to
    async fn get_application_industries(&self, user_id: i64)
        -> Result<BTreeSet<String>, StoreError>;
}

/// Read access to job postings and candidate lookups
///
/// Implementations own the relevance ordering of both `find_*` methods:
/// skill relevance plus an experience bonus, descending, then newest first
/// for jobs. Callers keep that order as-is.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Open postings sharing a skill with `skills`, at `experience_level`,
    /// or in one of `industries`
    async fn find_candidate_jobs(
        &self,
        skills: &SkillQuery,
        experience_level: Option<&str>,
        industries: &BTreeSet<String>,
        limit: usize,
    ) -> Result<Vec<JobPosting>, StoreError>;

    /// Seeker profiles whose skills contain at least one of `skills`.
    /// `experience_level` only affects ordering.
    async fn find_candidate_seekers(
        &self,
        skills: &SkillQuery,
        experience_level: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SeekerProfile>, StoreError>;

    async fn get_job_by_id(&self, job_id: i64) -> Result<Option<JobPosting>, StoreError>;
}

/// Relevance bonus a store adds when experience levels are equal
pub const EXPERIENCE_RELEVANCE_BONUS: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_errors_classified() {
        let err = StoreError::from(sqlx::Error::ColumnNotFound("status".to_string()));
        assert!(matches!(err, StoreError::Malformed(ref msg) if msg.contains("status")));

        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(_)));

        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }
}
