use super::{RiskModel, ScoringProfile, Thresholds};
use crate::constants::{AGE_RANGE, CHOLESTEROL_RANGE, SYSTOLIC_BP_RANGE};
use crate::validation::FieldChecker;
use crate::CareResult;
use ccm_types::Condition;
use serde::Deserialize;

/// Cardiovascular risk inputs.
///
/// `score = 0.1·age + 0.05·systolic_bp + 10·smoker + 0.02·cholesterol`, identical in both
/// profiles.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardiovascularInputs {
    /// Years.
    pub age: f64,
    /// mmHg.
    pub systolic_bp: f64,
    pub smoker: bool,
    /// Total cholesterol, mg/dL.
    pub cholesterol: f64,
}

impl RiskModel for CardiovascularInputs {
    const CONDITION: Condition = Condition::Cardiovascular;
    const THRESHOLDS: Thresholds = Thresholds::new(10.0, 15.0);

    fn risk_score(&self, _profile: ScoringProfile) -> f64 {
        let smoking = if self.smoker { 10.0 } else { 0.0 };
        self.age * 0.1 + self.systolic_bp * 0.05 + smoking + self.cholesterol * 0.02
    }

    fn validate(&self, _profile: ScoringProfile, strict: bool) -> CareResult<()> {
        FieldChecker::new(strict)
            .field("age", self.age, AGE_RANGE)?
            .field("systolic_bp", self.systolic_bp, SYSTOLIC_BP_RANGE)?
            .field("cholesterol", self.cholesterol, CHOLESTEROL_RANGE)?;
        Ok(())
    }
}
