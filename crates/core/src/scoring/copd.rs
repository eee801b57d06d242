use super::{RiskModel, ScoringProfile, Thresholds};
use crate::constants::{AGE_RANGE, EXACERBATIONS_RANGE, FEV1_RANGE, SMOKING_YEARS_RANGE};
use crate::validation::FieldChecker;
use crate::CareResult;
use ccm_types::Condition;
use serde::Deserialize;

/// COPD risk inputs.
///
/// `score = 0.5·smoking_years + 0.2·age − 0.1·fev1`, plus `5·exacerbations_last_year` under the
/// extended profile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopdInputs {
    pub smoking_years: f64,
    pub age: f64,
    /// Percent of predicted.
    pub fev1: f64,
    /// Required by the extended profile, ignored by baseline.
    #[serde(default)]
    pub exacerbations_last_year: Option<f64>,
}

impl RiskModel for CopdInputs {
    const CONDITION: Condition = Condition::Copd;
    const THRESHOLDS: Thresholds = Thresholds::new(15.0, 25.0);

    fn risk_score(&self, profile: ScoringProfile) -> f64 {
        let base = self.smoking_years * 0.5 + self.age * 0.2 - self.fev1 * 0.1;
        if profile.is_extended() {
            base + self.exacerbations_last_year.unwrap_or(0.0) * 5.0
        } else {
            base
        }
    }

    fn validate(&self, profile: ScoringProfile, strict: bool) -> CareResult<()> {
        let checker = FieldChecker::new(strict);
        checker
            .field("smoking_years", self.smoking_years, SMOKING_YEARS_RANGE)?
            .field("age", self.age, AGE_RANGE)?
            .field("fev1", self.fev1, FEV1_RANGE)?;
        if profile.is_extended() {
            checker.extended_field(
                "exacerbations_last_year",
                self.exacerbations_last_year,
                EXACERBATIONS_RANGE,
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccm_types::RiskTier;

    #[test]
    fn never_smoker_with_good_lung_function_is_low() {
        let inputs = CopdInputs {
            smoking_years: 0.0,
            age: 30.0,
            fev1: 80.0,
            exacerbations_last_year: Some(0.0),
        };
        // 6 - 8 = -2
        assert!(inputs.risk_score(ScoringProfile::Baseline) < 0.0);
        assert_eq!(inputs.tier(ScoringProfile::Extended), RiskTier::Low);
    }

    #[test]
    fn exacerbations_move_long_term_smoker_to_high() {
        let inputs = CopdInputs {
            smoking_years: 20.0,
            age: 60.0,
            fev1: 50.0,
            exacerbations_last_year: Some(2.0),
        };
        assert!((inputs.risk_score(ScoringProfile::Baseline) - 17.0).abs() < 1e-9);
        assert_eq!(inputs.tier(ScoringProfile::Baseline), RiskTier::Moderate);
        assert!((inputs.risk_score(ScoringProfile::Extended) - 27.0).abs() < 1e-9);
        assert_eq!(inputs.tier(ScoringProfile::Extended), RiskTier::High);
    }

    #[test]
    fn better_fev1_never_raises_tier() {
        let mut previous = RiskTier::High;
        for fev1 in (20..=100).step_by(5) {
            let tier = CopdInputs {
                smoking_years: 30.0,
                age: 65.0,
                fev1: fev1 as f64,
                exacerbations_last_year: Some(0.0),
            }
            .tier(ScoringProfile::Baseline);
            assert!(tier <= previous, "tier rose at fev1 {fev1}");
            previous = tier;
        }
    }

    #[test]
    fn extended_validation_bounds_exacerbations() {
        let inputs = CopdInputs {
            smoking_years: 10.0,
            age: 50.0,
            fev1: 70.0,
            exacerbations_last_year: Some(12.0),
        };
        inputs
            .validate(ScoringProfile::Baseline, true)
            .expect("exacerbations unused by baseline");
        assert!(inputs.validate(ScoringProfile::Extended, true).is_err());
    }

    #[test]
    fn extended_validation_requires_exacerbations() {
        let inputs = CopdInputs {
            smoking_years: 10.0,
            age: 50.0,
            fev1: 70.0,
            exacerbations_last_year: None,
        };
        inputs
            .validate(ScoringProfile::Baseline, true)
            .expect("baseline never reads exacerbations");
        let err = inputs
            .validate(ScoringProfile::Extended, true)
            .expect_err("extended needs exacerbations");
        assert!(err.to_string().contains("exacerbations_last_year is required"));
    }
}
