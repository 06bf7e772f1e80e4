//! Location match: exact city match, remote/flexible, or a flat fallback.

use crate::matching::profile::{CandidateProfile, JobPosting};
use crate::matching::score::{ComponentScore, Criterion};

const MISSING_SCORE: f64 = 50.0;
const DIFFERENT_SCORE: f64 = 60.0;

pub fn score(job: &JobPosting, candidate: &CandidateProfile) -> ComponentScore {
    let (score, note) = location_score(job.location.as_deref(), candidate.location.as_deref());
    ComponentScore::new(Criterion::Location, score, vec![note])
}

fn location_score(job_location: Option<&str>, candidate_location: Option<&str>) -> (f64, String) {
    let job_location = job_location.map(str::trim).unwrap_or_default();
    let candidate_location = candidate_location.map(str::trim).unwrap_or_default();

    if job_location.is_empty() || candidate_location.is_empty() {
        return (
            MISSING_SCORE,
            "Location not specified; candidate may need to relocate".to_string(),
        );
    }

    let normalized_job = job_location.to_lowercase();
    let normalized_candidate = candidate_location.to_lowercase();

    if normalized_job == normalized_candidate {
        (100.0, format!("Candidate is in {candidate_location}"))
    } else if normalized_job.contains("remote") || normalized_candidate.contains("any") {
        (100.0, "Job is remote or candidate is flexible".to_string())
    } else {
        (DIFFERENT_SCORE, "Different location but manageable".to_string())
    }
}
