//! Data-access seam for the matching engine.
//!
//! The engine only reads snapshots through `MatchDataSource`; `PgMatchSource`
//! is the production backend. Tests plug in an in-memory source instead.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::candidate::{CandidateRecord, CandidateSkillRow, CandidateSummary};
use crate::models::job::{JobRecord, JobSkillRow, JobSummary};

pub const OPEN_JOB_STATUS: &str = "open";
pub const JOB_SEEKER_ROLE: &str = "job_seeker";

/// Read-only access to jobs and candidate profiles.
///
/// Lookups by id return `Ok(None)` when nothing matches; the engine turns that
/// into `AppError::NotFound`. Backend failures are returned as-is, never retried.
#[async_trait]
pub trait MatchDataSource: Send + Sync {
    async fn job(&self, job_id: Uuid) -> Result<Option<JobRecord>, AppError>;

    async fn job_skills(&self, job_id: Uuid) -> Result<Vec<JobSkillRow>, AppError>;

    async fn candidate(&self, seeker_id: Uuid) -> Result<Option<CandidateRecord>, AppError>;

    async fn candidate_skills(&self, seeker_id: Uuid) -> Result<Vec<CandidateSkillRow>, AppError>;

    /// Jobs with status `open`, in a stable order.
    async fn list_open_jobs(&self) -> Result<Vec<JobSummary>, AppError>;

    /// Profiles whose user has the job-seeker role, in a stable order.
    async fn list_job_seeker_candidates(&self) -> Result<Vec<CandidateSummary>, AppError>;
}

pub struct PgMatchSource {
    pool: PgPool,
}

impl PgMatchSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchDataSource for PgMatchSource {
    async fn job(&self, job_id: Uuid) -> Result<Option<JobRecord>, AppError> {
        let job = sqlx::query_as::<_, JobRecord>(
            r#"
            SELECT id,
                   COALESCE(years_of_experience_required, 0)::INT AS years_required,
                   location,
                   salary_min::BIGINT AS salary_min,
                   salary_max::BIGINT AS salary_max,
                   status
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(job)
    }

    async fn job_skills(&self, job_id: Uuid) -> Result<Vec<JobSkillRow>, AppError> {
        let skills = sqlx::query_as::<_, JobSkillRow>(
            "SELECT skill_name, COALESCE(is_required, FALSE) AS is_required FROM job_skills WHERE job_id = $1",
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(skills)
    }

    async fn candidate(&self, seeker_id: Uuid) -> Result<Option<CandidateRecord>, AppError> {
        let candidate = sqlx::query_as::<_, CandidateRecord>(
            r#"
            SELECT id,
                   COALESCE(years_of_experience, 0)::INT AS years_of_experience,
                   location,
                   desired_salary_min::BIGINT AS desired_salary_min,
                   desired_salary_max::BIGINT AS desired_salary_max
            FROM job_seeker_profiles
            WHERE id = $1
            "#,
        )
        .bind(seeker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(candidate)
    }

    async fn candidate_skills(&self, seeker_id: Uuid) -> Result<Vec<CandidateSkillRow>, AppError> {
        let skills = sqlx::query_as::<_, CandidateSkillRow>(
            "SELECT skill_name, proficiency_level FROM seeker_skills WHERE seeker_id = $1",
        )
        .bind(seeker_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(skills)
    }

    async fn list_open_jobs(&self) -> Result<Vec<JobSummary>, AppError> {
        let jobs = sqlx::query_as::<_, JobSummary>(
            r#"
            SELECT j.id,
                   j.job_title,
                   c.company_name,
                   j.location,
                   j.salary_min::BIGINT AS salary_min,
                   j.salary_max::BIGINT AS salary_max
            FROM jobs j
            LEFT JOIN companies c ON j.company_id = c.id
            WHERE j.status = $1
            ORDER BY j.id
            "#,
        )
        .bind(OPEN_JOB_STATUS)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    async fn list_job_seeker_candidates(&self) -> Result<Vec<CandidateSummary>, AppError> {
        let candidates = sqlx::query_as::<_, CandidateSummary>(
            r#"
            SELECT p.id, p.user_id, u.full_name, p.location
            FROM job_seeker_profiles p
            JOIN users u ON p.user_id = u.id
            WHERE u.role = $1
            ORDER BY p.id
            "#,
        )
        .bind(JOB_SEEKER_ROLE)
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }
}
