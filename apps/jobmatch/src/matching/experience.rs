//! Experience match: candidate years against the job's required years.

use crate::matching::profile::{CandidateProfile, JobPosting};
use crate::matching::score::{ComponentScore, Criterion};

const NEAR_MISS_SCORE: f64 = 80.0;

pub fn score(job: &JobPosting, candidate: &CandidateProfile) -> ComponentScore {
    let (score, note) = experience_score(job.years_required, candidate.years_of_experience);
    ComponentScore::new(Criterion::Experience, score, vec![note])
}

fn experience_score(required: u32, years: u32) -> (f64, String) {
    if required == 0 {
        return (100.0, "No experience requirement".to_string());
    }

    if years >= required {
        (
            100.0,
            format!("{years} years experience meets or exceeds requirement of {required}"),
        )
    } else if u64::from(years) * 5 >= u64::from(required) * 4 {
        // within 80% of the requirement, compared in integers
        (
            NEAR_MISS_SCORE,
            format!("{years} years experience slightly below requirement of {required}"),
        )
    } else {
        (
            (f64::from(years) / f64::from(required) * 100.0).max(0.0),
            format!("{years} years experience below requirement of {required}"),
        )
    }
}
