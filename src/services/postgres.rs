use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::BTreeSet;
use std::time::Duration;

use crate::core::skills::SkillQuery;
use crate::models::{JobPosting, JobStatus, SeekerProfile};
use crate::services::store::{JobStore, ProfileStore, StoreError};

/// PostgreSQL-backed profile and job store
///
/// Owns its pool handle; there is no process-wide connection.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool and run migrations
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::new(pool))
    }

    /// Create a store from optional settings values
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::connect(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn job_from_row(row: &PgRow) -> Result<JobPosting, StoreError> {
    let status: String = row.try_get("status")?;

    Ok(JobPosting {
        id: row.try_get("id")?,
        company_id: row.try_get("company_id")?,
        title: row.try_get("title")?,
        company_name: row.try_get("company_name")?,
        industry: row.try_get("industry")?,
        experience_level: row.try_get("experience_level")?,
        skills: row.try_get("skills")?,
        status: JobStatus::from_db(&status),
        location: row.try_get("location")?,
        job_type: row.try_get("job_type")?,
        created_at: row.try_get("created_at")?,
    })
}

fn profile_from_row(row: &PgRow) -> Result<SeekerProfile, StoreError> {
    Ok(SeekerProfile {
        user_id: row.try_get("user_id")?,
        experience_level: row.try_get("experience_level")?,
        skills: row.try_get("skills")?,
        title: row.try_get("title")?,
        summary: row.try_get("summary")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
    })
}

#[async_trait]
impl ProfileStore for PostgresStore {
    async fn get_seeker_profile(&self, user_id: i64) -> Result<Option<SeekerProfile>, StoreError> {
        let query = r#"
            SELECT p.user_id, p.experience_level, p.skills, p.title, p.summary,
                   u.first_name, u.last_name, u.email
            FROM job_seeker_profiles p
            LEFT JOIN users u ON p.user_id = u.id
            WHERE p.user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn get_application_industries(
        &self,
        user_id: i64,
    ) -> Result<BTreeSet<String>, StoreError> {
        let query = r#"
            SELECT DISTINCT c.industry
            FROM applications a
            JOIN jobs j ON a.job_id = j.id
            JOIN companies c ON j.company_id = c.id
            WHERE a.job_seeker_id = $1
              AND c.industry IS NOT NULL
        "#;

        let rows = sqlx::query(query).bind(user_id).fetch_all(&self.pool).await?;

        let industries = rows
            .iter()
            .map(|row| row.try_get::<String, _>("industry"))
            .collect::<Result<BTreeSet<_>, _>>()?;

        tracing::debug!("User {} applied in {} industries", user_id, industries.len());

        Ok(industries)
    }
}

#[async_trait]
impl JobStore for PostgresStore {
    async fn find_candidate_jobs(
        &self,
        skills: &SkillQuery,
        experience_level: Option<&str>,
        industries: &BTreeSet<String>,
        limit: usize,
    ) -> Result<Vec<JobPosting>, StoreError> {
        let query = r#"
            WITH scored AS (
                SELECT j.id, j.company_id, j.title, c.company_name, c.industry,
                       j.experience_level, j.skills, j.status, j.location, j.job_type,
                       j.created_at,
                       (SELECT COUNT(*)
                          FROM unnest($1::text[]) AS s(token)
                         WHERE strpos(lower(coalesce(j.skills, '')), s.token) > 0
                       ) AS skill_match_score,
                       CASE WHEN j.experience_level = $2 THEN 2 ELSE 0 END AS experience_match_score
                FROM jobs j
                JOIN companies c ON j.company_id = c.id
                WHERE lower(j.status) = 'open'
            )
            SELECT *
            FROM scored
            WHERE skill_match_score > 0
               OR experience_match_score > 0
               OR industry = ANY($3)
            ORDER BY (skill_match_score + experience_match_score) DESC, created_at DESC, id ASC
            LIMIT $4
        "#;

        let industries: Vec<String> = industries.iter().cloned().collect();

        let rows = sqlx::query(query)
            .bind(skills.tokens())
            .bind(experience_level)
            .bind(industries)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(job_from_row).collect()
    }

    async fn find_candidate_seekers(
        &self,
        skills: &SkillQuery,
        experience_level: Option<&str>,
        limit: usize,
    ) -> Result<Vec<SeekerProfile>, StoreError> {
        let query = r#"
            WITH scored AS (
                SELECT p.user_id, p.experience_level, p.skills, p.title, p.summary,
                       u.first_name, u.last_name, u.email,
                       (SELECT COUNT(*)
                          FROM unnest($1::text[]) AS s(token)
                         WHERE strpos(lower(coalesce(p.skills, '')), s.token) > 0
                       ) AS skill_match_score,
                       CASE WHEN p.experience_level = $2 THEN 2 ELSE 0 END AS experience_match_score
                FROM job_seeker_profiles p
                JOIN users u ON p.user_id = u.id
                WHERE u.role = 'job_seeker'
            )
            SELECT *
            FROM scored
            WHERE skill_match_score > 0
            ORDER BY (skill_match_score + experience_match_score) DESC, user_id ASC
            LIMIT $3
        "#;

        let rows = sqlx::query(query)
            .bind(skills.tokens())
            .bind(experience_level)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(profile_from_row).collect()
    }

    async fn get_job_by_id(&self, job_id: i64) -> Result<Option<JobPosting>, StoreError> {
        let query = r#"
            SELECT j.id, j.company_id, j.title, c.company_name, c.industry,
                   j.experience_level, j.skills, j.status, j.location, j.job_type,
                   j.created_at
            FROM jobs j
            LEFT JOIN companies c ON j.company_id = c.id
            WHERE j.id = $1
        "#;

        let row = sqlx::query(query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(job_from_row).transpose()
    }
}
