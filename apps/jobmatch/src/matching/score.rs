//! Match result types: criteria, raw component scores and the aggregated `MatchScore`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The four scored dimensions, in explanation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    Skills,
    Experience,
    Location,
    Salary,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Skills,
        Criterion::Experience,
        Criterion::Location,
        Criterion::Salary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Skills => "skills",
            Criterion::Experience => "experience",
            Criterion::Location => "location",
            Criterion::Salary => "salary",
        }
    }
}

/// Raw (pre-weight) result of one calculator. `score` is kept in [0, 100].
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentScore {
    pub criterion: Criterion,
    pub score: f64,
    pub notes: Vec<String>,
}

impl ComponentScore {
    pub fn new(criterion: Criterion, score: f64, notes: Vec<String>) -> Self {
        let score = if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            criterion,
            score,
            notes,
        }
    }

    pub fn rounded(&self) -> u8 {
        self.score.round() as u8
    }
}

/// One human-readable line of a match explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub criterion: Criterion,
    pub message: String,
}

/// Compatibility of one candidate with one job. Built once by the aggregator and
/// read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct MatchScore {
    job_id: Uuid,
    seeker_id: Uuid,
    overall_score: u8,
    breakdown: BTreeMap<Criterion, u8>,
    explanation: Vec<Explanation>,
    computed_at: DateTime<Utc>,
}

impl MatchScore {
    pub(crate) fn new(
        job_id: Uuid,
        seeker_id: Uuid,
        overall_score: u8,
        breakdown: BTreeMap<Criterion, u8>,
        explanation: Vec<Explanation>,
    ) -> Self {
        Self {
            job_id,
            seeker_id,
            overall_score,
            breakdown,
            explanation,
            computed_at: Utc::now(),
        }
    }

    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub fn seeker_id(&self) -> Uuid {
        self.seeker_id
    }

    pub fn overall_score(&self) -> u8 {
        self.overall_score
    }

    pub fn breakdown(&self) -> &BTreeMap<Criterion, u8> {
        &self.breakdown
    }

    pub fn component(&self, criterion: Criterion) -> Option<u8> {
        self.breakdown.get(&criterion).copied()
    }

    pub fn explanation(&self) -> &[Explanation] {
        &self.explanation
    }

    /// Display form of the explanation, e.g. joined with `"; "`.
    pub fn explanation_text(&self, separator: &str) -> String {
        self.explanation
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(separator)
    }
}
