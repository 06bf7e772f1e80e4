//! Salary match: overlap between the job's range and the candidate's desired range.

use crate::matching::profile::{CandidateProfile, JobPosting, SalaryRange};
use crate::matching::score::{ComponentScore, Criterion};

const NEAR_SCORE: f64 = 75.0;
const GAP_SCORE: f64 = 50.0;

pub fn score(job: &JobPosting, candidate: &CandidateProfile) -> ComponentScore {
    let (score, note) = salary_score(job.salary, candidate.desired_salary);
    ComponentScore::new(Criterion::Salary, score, vec![note])
}

fn salary_score(job: SalaryRange, desired: SalaryRange) -> (f64, String) {
    // i128 keeps the unbounded sentinel safe under the ×10 comparison below
    let job_min = i128::from(job.floor());
    let job_max = i128::from(job.ceiling());
    let seek_min = i128::from(desired.floor());
    let seek_max = i128::from(desired.ceiling());

    if job_max >= seek_min && seek_max >= job_min {
        (100.0, "Salary expectations align".to_string())
    } else if job_max * 10 >= seek_min * 9 {
        // job ceiling within 10% of the candidate's floor
        let note = if job_min > seek_max {
            "Salary range above candidate expectations"
        } else {
            "Salary slightly below expectations"
        };
        (NEAR_SCORE, note.to_string())
    } else {
        (GAP_SCORE, "Significant salary gap".to_string())
    }
}
