//! Skill match: share of required skills the candidate holds, topped up by
//! optional skills at half weight.

use std::collections::BTreeSet;

use crate::matching::profile::{CandidateProfile, JobPosting};
use crate::matching::score::{ComponentScore, Criterion};

/// Optional skills contribute at most this much before normalisation.
const OPTIONAL_CEILING: f64 = 50.0;
/// Brings required (≤100) plus optional (≤50) back toward a 100 scale.
const NORMALIZER: f64 = 1.5;

pub fn score(job: &JobPosting, candidate: &CandidateProfile) -> ComponentScore {
    let required = &job.required_skills;
    let optional = &job.optional_skills;

    if required.is_empty() && optional.is_empty() {
        return ComponentScore::new(
            Criterion::Skills,
            100.0,
            vec!["No specific skills required".to_string()],
        );
    }

    let matched_required = count_matched(required, candidate);
    let matched_optional = count_matched(optional, candidate);

    let required_score = if required.is_empty() {
        100.0
    } else {
        matched_required as f64 / required.len() as f64 * 100.0
    };
    let optional_score = if optional.is_empty() {
        0.0
    } else {
        matched_optional as f64 / optional.len() as f64 * OPTIONAL_CEILING
    };
    let score = ((required_score + optional_score) / NORMALIZER).min(100.0);

    let mut notes = Vec::with_capacity(2);
    if required.is_empty() {
        notes.push("No required skills listed".to_string());
    } else if matched_required == required.len() {
        notes.push(format!("All {} required skills matched", required.len()));
    } else {
        notes.push(format!(
            "{matched_required}/{} required skills matched",
            required.len()
        ));
    }
    if matched_optional > 0 {
        notes.push(format!(
            "{matched_optional}/{} optional skills matched",
            optional.len()
        ));
    }

    ComponentScore::new(Criterion::Skills, score, notes)
}

fn count_matched(skills: &BTreeSet<String>, candidate: &CandidateProfile) -> usize {
    skills.iter().filter(|s| candidate.has_skill(s)).count()
}
