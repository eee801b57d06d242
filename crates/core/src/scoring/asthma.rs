use super::{RiskModel, ScoringProfile, Thresholds};
use crate::constants::{DAYS_PER_WEEK_RANGE, EOSINOPHIL_RANGE, FEV1_RANGE};
use crate::validation::FieldChecker;
use crate::CareResult;
use ccm_types::Condition;
use serde::Deserialize;

/// Asthma risk inputs.
///
/// `score = 2·symptom_frequency + 3·nighttime_symptoms + 1.5·inhaler_use_days − 0.1·fev1`, plus
/// `0.2·eosinophil_count` under the extended profile. Frequencies are days per week.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AsthmaInputs {
    pub symptom_frequency: f64,
    pub nighttime_symptoms: f64,
    pub inhaler_use_days: f64,
    /// Percent of predicted.
    pub fev1: f64,
    /// Cells/µL. Required by the extended profile, ignored by baseline.
    #[serde(default)]
    pub eosinophil_count: Option<f64>,
}

impl RiskModel for AsthmaInputs {
    const CONDITION: Condition = Condition::Asthma;
    const THRESHOLDS: Thresholds = Thresholds::new(10.0, 20.0);

    fn risk_score(&self, profile: ScoringProfile) -> f64 {
        let base = self.symptom_frequency * 2.0
            + self.nighttime_symptoms * 3.0
            + self.inhaler_use_days * 1.5
            - self.fev1 * 0.1;
        if profile.is_extended() {
            base + self.eosinophil_count.unwrap_or(0.0) * 0.2
        } else {
            base
        }
    }

    fn validate(&self, profile: ScoringProfile, strict: bool) -> CareResult<()> {
        let checker = FieldChecker::new(strict);
        checker
            .field(
                "symptom_frequency",
                self.symptom_frequency,
                DAYS_PER_WEEK_RANGE,
            )?
            .field(
                "nighttime_symptoms",
                self.nighttime_symptoms,
                DAYS_PER_WEEK_RANGE,
            )?
            .field("inhaler_use_days", self.inhaler_use_days, DAYS_PER_WEEK_RANGE)?
            .field("fev1", self.fev1, FEV1_RANGE)?;
        if profile.is_extended() {
            checker.extended_field("eosinophil_count", self.eosinophil_count, EOSINOPHIL_RANGE)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccm_types::RiskTier;

    fn typical() -> AsthmaInputs {
        AsthmaInputs {
            symptom_frequency: 3.0,
            nighttime_symptoms: 1.0,
            inhaler_use_days: 2.0,
            fev1: 80.0,
            eosinophil_count: Some(300.0),
        }
    }

    #[test]
    fn typical_inputs_are_low_under_baseline() {
        // 6 + 3 + 3 - 8
        let inputs = typical();
        assert!((inputs.risk_score(ScoringProfile::Baseline) - 4.0).abs() < 1e-9);
        assert_eq!(inputs.tier(ScoringProfile::Baseline), RiskTier::Low);
    }

    #[test]
    fn eosinophil_count_dominates_extended_score() {
        let inputs = typical();
        assert!((inputs.risk_score(ScoringProfile::Extended) - 64.0).abs() < 1e-9);
        assert_eq!(inputs.tier(ScoringProfile::Extended), RiskTier::High);
    }

    #[test]
    fn daily_symptoms_are_high_under_baseline() {
        let inputs = AsthmaInputs {
            symptom_frequency: 7.0,
            nighttime_symptoms: 7.0,
            inhaler_use_days: 7.0,
            fev1: 20.0,
            eosinophil_count: Some(0.0),
        };
        assert_eq!(inputs.tier(ScoringProfile::Baseline), RiskTier::High);
    }

    #[test]
    fn night_symptoms_never_lower_tier() {
        let mut previous = RiskTier::Low;
        for nights in 0..=7 {
            let tier = AsthmaInputs {
                nighttime_symptoms: nights as f64,
                ..typical()
            }
            .tier(ScoringProfile::Baseline);
            assert!(tier >= previous);
            previous = tier;
        }
    }

    #[test]
    fn strict_validation_caps_days_per_week() {
        let inputs = AsthmaInputs {
            inhaler_use_days: 8.0,
            ..typical()
        };
        let err = inputs
            .validate(ScoringProfile::Baseline, true)
            .expect_err("more than 7 days per week");
        assert!(err.to_string().contains("inhaler_use_days"));
    }
}
