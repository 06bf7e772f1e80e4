//! Test-only builders and an in-memory `MatchDataSource`.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::profile::{CandidateProfile, JobPosting};
use crate::matching::source::{MatchDataSource, OPEN_JOB_STATUS};
use crate::models::candidate::{CandidateRecord, CandidateSkillRow, CandidateSummary};
use crate::models::job::{JobRecord, JobSkillRow, JobSummary};

pub struct JobFixture {
    pub title: &'static str,
    pub required: Vec<&'static str>,
    pub optional: Vec<&'static str>,
    pub years: i32,
    pub location: Option<&'static str>,
    pub salary: (Option<i64>, Option<i64>),
    pub status: &'static str,
}

impl Default for JobFixture {
    fn default() -> Self {
        Self {
            title: "Software Engineer",
            required: vec![],
            optional: vec![],
            years: 0,
            location: None,
            salary: (None, None),
            status: OPEN_JOB_STATUS,
        }
    }
}

#[derive(Default)]
pub struct CandidateFixture {
    pub name: &'static str,
    pub skills: Vec<&'static str>,
    pub years: i32,
    pub location: Option<&'static str>,
    pub salary: (Option<i64>, Option<i64>),
}

#[derive(Default)]
pub struct MemorySource {
    jobs: HashMap<Uuid, JobRecord>,
    job_skills: HashMap<Uuid, Vec<JobSkillRow>>,
    job_listing: Vec<(JobSummary, String)>,
    candidates: HashMap<Uuid, CandidateRecord>,
    candidate_skills: HashMap<Uuid, Vec<CandidateSkillRow>>,
    candidate_listing: Vec<CandidateSummary>,
    failing: HashSet<Uuid>,
}

impl MemorySource {
    pub fn add_job(&mut self, fixture: JobFixture) -> Uuid {
        let id = Uuid::new_v4();
        let location = fixture.location.map(str::to_string);
        self.jobs.insert(
            id,
            JobRecord {
                id,
                years_required: fixture.years,
                location: location.clone(),
                salary_min: fixture.salary.0,
                salary_max: fixture.salary.1,
                status: fixture.status.to_string(),
            },
        );

        let skills = fixture
            .required
            .iter()
            .map(|s| (s, true))
            .chain(fixture.optional.iter().map(|s| (s, false)))
            .map(|(name, is_required)| JobSkillRow {
                skill_name: name.to_string(),
                is_required,
            })
            .collect();
        self.job_skills.insert(id, skills);

        self.job_listing.push((
            JobSummary {
                id,
                job_title: fixture.title.to_string(),
                company_name: Some("Acme".to_string()),
                location,
                salary_min: fixture.salary.0,
                salary_max: fixture.salary.1,
            },
            fixture.status.to_string(),
        ));
        id
    }

    pub fn add_candidate(&mut self, fixture: CandidateFixture) -> Uuid {
        let id = Uuid::new_v4();
        let location = fixture.location.map(str::to_string);
        self.candidates.insert(
            id,
            CandidateRecord {
                id,
                years_of_experience: fixture.years,
                location: location.clone(),
                desired_salary_min: fixture.salary.0,
                desired_salary_max: fixture.salary.1,
            },
        );
        self.candidate_skills.insert(
            id,
            fixture
                .skills
                .iter()
                .map(|s| CandidateSkillRow {
                    skill_name: s.to_string(),
                    proficiency_level: Some("intermediate".to_string()),
                })
                .collect(),
        );
        self.candidate_listing.push(CandidateSummary {
            id,
            user_id: Uuid::new_v4(),
            full_name: fixture.name.to_string(),
            location,
        });
        id
    }

    /// Drops the record but leaves it listed, as if deleted mid-request.
    pub fn delete_record(&mut self, id: Uuid) {
        self.jobs.remove(&id);
        self.candidates.remove(&id);
    }

    /// Makes every read touching `id` fail as a backend error.
    pub fn fail_reads_for(&mut self, id: Uuid) {
        self.failing.insert(id);
    }

    fn check(&self, id: Uuid) -> Result<(), AppError> {
        if self.failing.contains(&id) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl MatchDataSource for MemorySource {
    async fn job(&self, job_id: Uuid) -> Result<Option<JobRecord>, AppError> {
        self.check(job_id)?;
        Ok(self.jobs.get(&job_id).cloned())
    }

    async fn job_skills(&self, job_id: Uuid) -> Result<Vec<JobSkillRow>, AppError> {
        self.check(job_id)?;
        Ok(self.job_skills.get(&job_id).cloned().unwrap_or_default())
    }

    async fn candidate(&self, seeker_id: Uuid) -> Result<Option<CandidateRecord>, AppError> {
        self.check(seeker_id)?;
        Ok(self.candidates.get(&seeker_id).cloned())
    }

    async fn candidate_skills(&self, seeker_id: Uuid) -> Result<Vec<CandidateSkillRow>, AppError> {
        self.check(seeker_id)?;
        Ok(self
            .candidate_skills
            .get(&seeker_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_open_jobs(&self) -> Result<Vec<JobSummary>, AppError> {
        Ok(self
            .job_listing
            .iter()
            .filter(|(_, status)| status == OPEN_JOB_STATUS)
            .map(|(job, _)| job.clone())
            .collect())
    }

    async fn list_job_seeker_candidates(&self) -> Result<Vec<CandidateSummary>, AppError> {
        Ok(self.candidate_listing.clone())
    }
}

/// Wraps a `MemorySource` and records the peak number of per-entity record reads
/// (`job`, `candidate`) in flight at once.
pub struct TrackedSource {
    inner: MemorySource,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl TrackedSource {
    pub fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    async fn tracked<T>(&self, read: impl Future<Output = T>) -> T {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        // let sibling reads start before this one finishes
        tokio::task::yield_now().await;
        let result = read.await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl MatchDataSource for TrackedSource {
    async fn job(&self, job_id: Uuid) -> Result<Option<JobRecord>, AppError> {
        self.tracked(self.inner.job(job_id)).await
    }

    async fn job_skills(&self, job_id: Uuid) -> Result<Vec<JobSkillRow>, AppError> {
        self.inner.job_skills(job_id).await
    }

    async fn candidate(&self, seeker_id: Uuid) -> Result<Option<CandidateRecord>, AppError> {
        self.tracked(self.inner.candidate(seeker_id)).await
    }

    async fn candidate_skills(&self, seeker_id: Uuid) -> Result<Vec<CandidateSkillRow>, AppError> {
        self.inner.candidate_skills(seeker_id).await
    }

    async fn list_open_jobs(&self) -> Result<Vec<JobSummary>, AppError> {
        self.inner.list_open_jobs().await
    }

    async fn list_job_seeker_candidates(&self) -> Result<Vec<CandidateSummary>, AppError> {
        self.inner.list_job_seeker_candidates().await
    }
}

pub fn job_with_skills(required: &[&str], optional: &[&str]) -> JobPosting {
    let skills = required
        .iter()
        .map(|s| (s, true))
        .chain(optional.iter().map(|s| (s, false)))
        .map(|(name, is_required)| JobSkillRow {
            skill_name: name.to_string(),
            is_required,
        })
        .collect();
    JobPosting::from_rows(
        JobRecord {
            id: Uuid::new_v4(),
            years_required: 0,
            location: None,
            salary_min: None,
            salary_max: None,
            status: OPEN_JOB_STATUS.to_string(),
        },
        skills,
    )
}

pub fn candidate_with_skills(skills: &[&str]) -> CandidateProfile {
    CandidateProfile::from_rows(
        CandidateRecord {
            id: Uuid::new_v4(),
            years_of_experience: 0,
            location: None,
            desired_salary_min: None,
            desired_salary_max: None,
        },
        skills
            .iter()
            .map(|s| CandidateSkillRow {
                skill_name: s.to_string(),
                proficiency_level: None,
            })
            .collect(),
    )
}
