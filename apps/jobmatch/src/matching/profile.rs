//! Scoring snapshots of a job posting and a candidate profile.
//!
//! Built from the rows the data source returns; skill names are normalised
//! (trimmed, lower-cased) once here so the calculators compare plain strings.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use crate::models::candidate::{CandidateRecord, CandidateSkillRow};
use crate::models::job::{JobRecord, JobSkillRow};

/// Stand-in for a missing salary ceiling.
pub const UNBOUNDED_SALARY: i64 = i64::MAX;

pub fn normalize_skill(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A salary range whose bounds may each be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalaryRange {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl SalaryRange {
    pub fn new(min: Option<i64>, max: Option<i64>) -> Self {
        Self { min, max }
    }

    /// Lower bound, 0 when unset.
    pub fn floor(&self) -> i64 {
        self.min.unwrap_or(0)
    }

    /// Upper bound, unbounded when unset.
    pub fn ceiling(&self) -> i64 {
        self.max.unwrap_or(UNBOUNDED_SALARY)
    }
}

#[derive(Debug, Clone)]
pub struct JobPosting {
    pub id: Uuid,
    pub required_skills: BTreeSet<String>,
    pub optional_skills: BTreeSet<String>,
    pub years_required: u32,
    pub location: Option<String>,
    pub salary: SalaryRange,
}

impl JobPosting {
    /// A skill listed as both required and optional counts as required.
    pub fn from_rows(record: JobRecord, skills: Vec<JobSkillRow>) -> Self {
        let mut required_skills = BTreeSet::new();
        let mut optional_skills = BTreeSet::new();

        for skill in skills {
            let name = normalize_skill(&skill.skill_name);
            if name.is_empty() {
                continue;
            }
            if skill.is_required {
                required_skills.insert(name);
            } else {
                optional_skills.insert(name);
            }
        }
        optional_skills.retain(|s| !required_skills.contains(s));

        Self {
            id: record.id,
            required_skills,
            optional_skills,
            years_required: non_negative(record.years_required),
            location: record.location,
            salary: SalaryRange::new(record.salary_min, record.salary_max),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub id: Uuid,
    /// Normalised skill name → declared proficiency.
    pub skills: BTreeMap<String, Option<String>>,
    pub years_of_experience: u32,
    pub location: Option<String>,
    pub desired_salary: SalaryRange,
}

impl CandidateProfile {
    pub fn from_rows(record: CandidateRecord, skills: Vec<CandidateSkillRow>) -> Self {
        let skills = skills
            .into_iter()
            .map(|s| (normalize_skill(&s.skill_name), s.proficiency_level))
            .filter(|(name, _)| !name.is_empty())
            .collect();

        Self {
            id: record.id,
            skills,
            years_of_experience: non_negative(record.years_of_experience),
            location: record.location,
            desired_salary: SalaryRange::new(
                record.desired_salary_min,
                record.desired_salary_max,
            ),
        }
    }

    /// `skill` must already be normalised.
    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains_key(skill)
    }
}

fn non_negative(years: i32) -> u32 {
    u32::try_from(years).unwrap_or(0)
}
