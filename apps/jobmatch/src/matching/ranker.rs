//! Ranking of many candidates against one job, or many open jobs against one candidate.
//!
//! The anchor entity is resolved once; a missing anchor fails the whole call.
//! Per-entity reads run through an ordered buffer bounded by `concurrency`, so results
//! come back in retrieval order and the stable sort keeps that order among equal scores.
//! An entity whose read fails (deleted mid-request, backend hiccup) is logged and
//! skipped; the count of skipped entities is returned alongside the ranking. When every
//! entity fails and at least one failure came from the backend, the call fails with that
//! error instead of returning an empty ranking.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::engine::{score_pair, MatchEngine};
use crate::matching::score::MatchScore;
use crate::models::candidate::CandidateSummary;
use crate::models::job::JobSummary;

/// Recommendations below this overall score are dropped.
pub const RECOMMENDATION_THRESHOLD: u8 = 50;

#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub candidate: CandidateSummary,
    pub match_score: MatchScore,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedJob {
    pub job: JobSummary,
    pub match_score: MatchScore,
}

#[derive(Debug, Clone, Serialize)]
pub struct Ranking<T> {
    pub entries: Vec<T>,
    /// Entities left out because their data could not be read.
    pub skipped: usize,
}

pub struct Ranker {
    engine: Arc<MatchEngine>,
    concurrency: usize,
}

impl Ranker {
    pub fn new(engine: Arc<MatchEngine>, concurrency: usize) -> Self {
        Self {
            engine,
            concurrency: concurrency.max(1),
        }
    }

    /// All job seekers scored against `job_id`, best first, at most `limit` entries.
    pub async fn top_candidates_for_job(
        &self,
        job_id: Uuid,
        limit: usize,
    ) -> Result<Ranking<RankedCandidate>, AppError> {
        require_limit(limit)?;
        let engine = self.engine.as_ref();

        let job = engine.load_job(job_id).await?;
        let candidates = engine.source().list_job_seeker_candidates().await?;
        let total = candidates.len();

        let loaded: Vec<_> = stream::iter(candidates)
            .map(|candidate| async move {
                let profile = engine.load_candidate(candidate.id).await;
                (candidate, profile)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut skips = Skips::default();
        let mut entries = Vec::with_capacity(loaded.len());
        for (candidate, profile) in loaded {
            match profile {
                Ok(profile) => entries.push(RankedCandidate {
                    match_score: score_pair(&job, &profile, engine.weights()),
                    candidate,
                }),
                Err(e) => {
                    warn!(job_id = %job_id, seeker_id = %candidate.id, error = %e, "skipping candidate");
                    skips.record(e);
                }
            }
        }

        let skipped = skips.into_result(total)?;
        let entries = rank(entries, |e| e.match_score.overall_score(), limit);
        info!(
            job_id = %job_id,
            total,
            skipped,
            returned = entries.len(),
            "ranked candidates for job"
        );
        Ok(Ranking { entries, skipped })
    }

    /// Open jobs scored against `seeker_id`, best first, only those scoring at least
    /// `RECOMMENDATION_THRESHOLD`, at most `limit` entries.
    pub async fn recommended_jobs_for_seeker(
        &self,
        seeker_id: Uuid,
        limit: usize,
    ) -> Result<Ranking<RankedJob>, AppError> {
        require_limit(limit)?;
        let engine = self.engine.as_ref();

        let candidate = engine.load_candidate(seeker_id).await?;
        let jobs = engine.source().list_open_jobs().await?;
        let total = jobs.len();

        let loaded: Vec<_> = stream::iter(jobs)
            .map(|job| async move {
                let posting = engine.load_job(job.id).await;
                (job, posting)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut skips = Skips::default();
        let mut entries = Vec::with_capacity(loaded.len());
        for (job, posting) in loaded {
            match posting {
                Ok(posting) => {
                    let match_score = score_pair(&posting, &candidate, engine.weights());
                    if match_score.overall_score() >= RECOMMENDATION_THRESHOLD {
                        entries.push(RankedJob { job, match_score });
                    }
                }
                Err(e) => {
                    warn!(seeker_id = %seeker_id, job_id = %job.id, error = %e, "skipping job");
                    skips.record(e);
                }
            }
        }

        let skipped = skips.into_result(total)?;
        let entries = rank(entries, |e| e.match_score.overall_score(), limit);
        info!(
            seeker_id = %seeker_id,
            total,
            skipped,
            returned = entries.len(),
            "ranked job recommendations"
        );
        Ok(Ranking { entries, skipped })
    }
}

/// Per-entity failures seen during one ranking pass.
#[derive(Default)]
struct Skips {
    count: usize,
    backend_error: Option<AppError>,
}

impl Skips {
    fn record(&mut self, error: AppError) {
        self.count += 1;
        if self.backend_error.is_none() && !matches!(error, AppError::NotFound(_)) {
            self.backend_error = Some(error);
        }
    }

    /// Skipped count, or the backend error if nothing in a non-empty batch could be read.
    fn into_result(self, total: usize) -> Result<usize, AppError> {
        match self.backend_error {
            Some(error) if total > 0 && self.count == total => Err(error),
            _ => Ok(self.count),
        }
    }
}

/// Descending by score; `sort_by` is stable so ties keep their input order.
fn rank<T>(mut entries: Vec<T>, score: impl Fn(&T) -> u8, limit: usize) -> Vec<T> {
    entries.sort_by(|a, b| score(b).cmp(&score(a)));
    entries.truncate(limit);
    entries
}

fn require_limit(limit: usize) -> Result<(), AppError> {
    if limit == 0 {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }
    Ok(())
}
