//! Criterion weights for the aggregator, injected per engine or per call.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::score::Criterion;

/// Tolerance on the weight sum; weights are rejected, never renormalised.
const SUM_TOLERANCE: f64 = 1e-6;

pub const DEFAULT_WEIGHTS: MatchWeights = MatchWeights {
    skills: 0.50,
    experience: 0.20,
    location: 0.15,
    salary: 0.15,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub salary: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.location + self.salary
    }

    pub fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Skills => self.skills,
            Criterion::Experience => self.experience,
            Criterion::Location => self.location,
            Criterion::Salary => self.salary,
        }
    }

    /// Each weight finite and non-negative, total 1.0.
    pub fn validate(&self) -> Result<(), AppError> {
        for criterion in Criterion::ALL {
            let w = self.weight(criterion);
            if !w.is_finite() || w < 0.0 {
                return Err(AppError::Validation(format!(
                    "weight for {} must be a non-negative number, got {w}",
                    criterion.as_str()
                )));
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(AppError::Validation(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}
