//! Per-session assessment results.
//!
//! A [`ResultsMapping`] belongs to exactly one interactive session and is passed explicitly to
//! the responders. It is never persisted.

use crate::scoring::Assessment;
use ccm_types::{Condition, RiskTier};
use serde::Serialize;

/// Latest result for one condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConditionResult {
    pub condition: Condition,
    pub tier: RiskTier,
    pub score: f64,
}

impl From<Assessment> for ConditionResult {
    fn from(assessment: Assessment) -> Self {
        Self {
            condition: assessment.condition,
            tier: assessment.tier,
            score: assessment.score,
        }
    }
}

/// Condition results keyed by condition, iterated in first-submission order.
///
/// Resubmitting a condition overwrites its result in place; the condition keeps its original
/// position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultsMapping {
    entries: Vec<ConditionResult>,
}

impl ResultsMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a result, returning the one it replaced.
    pub fn record(&mut self, result: impl Into<ConditionResult>) -> Option<ConditionResult> {
        let result = result.into();
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.condition == result.condition)
        {
            Some(existing) => Some(std::mem::replace(existing, result)),
            None => {
                self.entries.push(result);
                None
            }
        }
    }

    pub fn get(&self, condition: Condition) -> Option<&ConditionResult> {
        self.entries
            .iter()
            .find(|entry| entry.condition == condition)
    }

    pub fn tier(&self, condition: Condition) -> Option<RiskTier> {
        self.get(condition).map(|entry| entry.tier)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConditionResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a ResultsMapping {
    type Item = &'a ConditionResult;
    type IntoIter = std::slice::Iter<'a, ConditionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
