//! Weighted aggregation of the four component calculators into a `MatchScore`.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::profile::{CandidateProfile, JobPosting};
use crate::matching::score::{ComponentScore, Explanation, MatchScore};
use crate::matching::source::MatchDataSource;
use crate::matching::weights::MatchWeights;
use crate::matching::{experience, location, salary, skills};

/// Shared signature of every criterion calculator.
pub type Calculator = fn(&JobPosting, &CandidateProfile) -> ComponentScore;

/// Applied in this order; it is also the explanation order.
pub const CALCULATORS: [Calculator; 4] = [
    skills::score,
    experience::score,
    location::score,
    salary::score,
];

/// Computes match scores from snapshots read through a `MatchDataSource`.
///
/// Stateless apart from the injected source and default weights, so one
/// instance is shared across requests behind an `Arc`.
pub struct MatchEngine {
    source: Arc<dyn MatchDataSource>,
    weights: MatchWeights,
}

impl MatchEngine {
    pub fn new(source: Arc<dyn MatchDataSource>, weights: MatchWeights) -> Self {
        Self { source, weights }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn source(&self) -> &dyn MatchDataSource {
        self.source.as_ref()
    }

    /// Scores one candidate against one job.
    ///
    /// `weights` overrides the engine defaults for this call only and must sum to 1.0.
    /// Fails with `NotFound` if either entity is missing; never returns a partial score.
    pub async fn compute_match_score(
        &self,
        job_id: Uuid,
        seeker_id: Uuid,
        weights: Option<&MatchWeights>,
    ) -> Result<MatchScore, AppError> {
        let weights = weights.unwrap_or(&self.weights);
        weights.validate()?;
        require_id("job_id", job_id)?;
        require_id("seeker_id", seeker_id)?;

        let (job, candidate) =
            tokio::try_join!(self.load_job(job_id), self.load_candidate(seeker_id))?;

        Ok(score_pair(&job, &candidate, weights))
    }

    pub async fn load_job(&self, job_id: Uuid) -> Result<JobPosting, AppError> {
        let (record, skills) =
            tokio::try_join!(self.source.job(job_id), self.source.job_skills(job_id))?;
        let record = record.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
        Ok(JobPosting::from_rows(record, skills))
    }

    pub async fn load_candidate(&self, seeker_id: Uuid) -> Result<CandidateProfile, AppError> {
        let (record, skills) = tokio::try_join!(
            self.source.candidate(seeker_id),
            self.source.candidate_skills(seeker_id)
        )?;
        let record = record
            .ok_or_else(|| AppError::NotFound(format!("Candidate {seeker_id} not found")))?;
        Ok(CandidateProfile::from_rows(record, skills))
    }
}

/// Runs every calculator over an already-resolved pair and aggregates the result.
pub fn score_pair(job: &JobPosting, candidate: &CandidateProfile, weights: &MatchWeights) -> MatchScore {
    let components: Vec<ComponentScore> = CALCULATORS
        .iter()
        .map(|calculate| calculate(job, candidate))
        .collect();
    aggregate(job.id, candidate.id, components, weights)
}

fn aggregate(
    job_id: Uuid,
    seeker_id: Uuid,
    components: Vec<ComponentScore>,
    weights: &MatchWeights,
) -> MatchScore {
    let total: f64 = components
        .iter()
        .map(|c| c.score * weights.weight(c.criterion))
        .sum();
    let overall_score = total.round().clamp(0.0, 100.0) as u8;

    let breakdown: BTreeMap<_, _> = components
        .iter()
        .map(|c| (c.criterion, c.rounded()))
        .collect();

    let explanation = components
        .into_iter()
        .flat_map(|c| {
            let criterion = c.criterion;
            c.notes
                .into_iter()
                .map(move |message| Explanation { criterion, message })
        })
        .collect();

    debug!(
        job_id = %job_id,
        seeker_id = %seeker_id,
        overall_score,
        ?breakdown,
        "computed match score"
    );

    MatchScore::new(job_id, seeker_id, overall_score, breakdown, explanation)
}

fn require_id(name: &str, id: Uuid) -> Result<(), AppError> {
    if id.is_nil() {
        return Err(AppError::Validation(format!("{name} is required")));
    }
    Ok(())
}
