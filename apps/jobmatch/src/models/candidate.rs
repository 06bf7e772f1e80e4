use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// The scoring-relevant columns of a `job_seeker_profiles` row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRecord {
    pub id: Uuid,
    pub years_of_experience: i32,
    pub location: Option<String>,
    pub desired_salary_min: Option<i64>,
    pub desired_salary_max: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateSkillRow {
    pub skill_name: String,
    pub proficiency_level: Option<String>,
}

/// A job seeker as listed for candidate ranking.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub location: Option<String>,
}
