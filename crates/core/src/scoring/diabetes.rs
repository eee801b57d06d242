use super::{RiskModel, ScoringProfile, Thresholds};
use crate::constants::{AGE_RANGE, BMI_RANGE, FASTING_GLUCOSE_RANGE, HBA1C_RANGE};
use crate::validation::FieldChecker;
use crate::CareResult;
use ccm_types::Condition;
use serde::Deserialize;

/// Diabetes risk inputs.
///
/// `score = 0.3·bmi + 0.1·age + 10·family_history + 0.02·fasting_glucose`, plus `0.1·hba1c`
/// under the extended profile.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiabetesInputs {
    pub bmi: f64,
    pub age: f64,
    pub family_history: bool,
    /// mg/dL.
    pub fasting_glucose: f64,
    /// Percent. Required by the extended profile, ignored by baseline.
    #[serde(default)]
    pub hba1c: Option<f64>,
}

impl RiskModel for DiabetesInputs {
    const CONDITION: Condition = Condition::Diabetes;
    const THRESHOLDS: Thresholds = Thresholds::new(15.0, 20.0);

    fn risk_score(&self, profile: ScoringProfile) -> f64 {
        let family = if self.family_history { 10.0 } else { 0.0 };
        let base = self.bmi * 0.3 + self.age * 0.1 + family + self.fasting_glucose * 0.02;
        if profile.is_extended() {
            base + self.hba1c.unwrap_or(0.0) * 0.1
        } else {
            base
        }
    }

    fn validate(&self, profile: ScoringProfile, strict: bool) -> CareResult<()> {
        let checker = FieldChecker::new(strict);
        checker
            .field("bmi", self.bmi, BMI_RANGE)?
            .field("age", self.age, AGE_RANGE)?
            .field("fasting_glucose", self.fasting_glucose, FASTING_GLUCOSE_RANGE)?;
        if profile.is_extended() {
            checker.extended_field("hba1c", self.hba1c, HBA1C_RANGE)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccm_types::RiskTier;

    fn healthy_adult() -> DiabetesInputs {
        DiabetesInputs {
            bmi: 22.0,
            age: 30.0,
            family_history: false,
            fasting_glucose: 90.0,
            hba1c: Some(5.6),
        }
    }

    #[test]
    fn healthy_adult_is_low_in_both_profiles() {
        let inputs = healthy_adult();
        assert!((inputs.risk_score(ScoringProfile::Baseline) - 11.4).abs() < 1e-9);
        assert!((inputs.risk_score(ScoringProfile::Extended) - 11.96).abs() < 1e-9);
        assert_eq!(inputs.tier(ScoringProfile::Baseline), RiskTier::Low);
        assert_eq!(inputs.tier(ScoringProfile::Extended), RiskTier::Low);
    }

    #[test]
    fn family_history_raises_tier() {
        let inputs = DiabetesInputs {
            family_history: true,
            ..healthy_adult()
        };
        // 21.4 under baseline
        assert_eq!(inputs.tier(ScoringProfile::Baseline), RiskTier::High);
    }

    #[test]
    fn hba1c_only_counts_in_extended_profile() {
        // baseline 14.9 sits just below the moderate cut-off
        let inputs = DiabetesInputs {
            bmi: 30.0,
            age: 50.0,
            family_history: false,
            fasting_glucose: 45.0,
            hba1c: Some(8.0),
        };
        assert_eq!(inputs.tier(ScoringProfile::Baseline), RiskTier::Low);
        assert_eq!(inputs.tier(ScoringProfile::Extended), RiskTier::Moderate);
    }

    #[test]
    fn baseline_validation_ignores_missing_hba1c() {
        let inputs = DiabetesInputs {
            hba1c: None,
            ..healthy_adult()
        };
        inputs
            .validate(ScoringProfile::Baseline, true)
            .expect("hba1c is unused by baseline");
        let err = inputs
            .validate(ScoringProfile::Extended, true)
            .expect_err("extended needs hba1c");
        assert_eq!(
            err.to_string(),
            "invalid input: hba1c is required under the extended profile"
        );
    }

    #[test]
    fn lenient_extended_validation_still_needs_hba1c() {
        let inputs = DiabetesInputs {
            hba1c: None,
            ..healthy_adult()
        };
        assert!(inputs.validate(ScoringProfile::Extended, false).is_err());
    }

    #[test]
    fn present_hba1c_is_range_checked() {
        let inputs = DiabetesInputs {
            hba1c: Some(0.0),
            ..healthy_adult()
        };
        let err = inputs
            .validate(ScoringProfile::Extended, true)
            .expect_err("hba1c of 0 is below 4");
        assert!(matches!(err, crate::CareError::OutOfRange { field: "hba1c", .. }));
    }

    #[test]
    fn hba1c_may_be_omitted_on_the_wire() {
        let inputs: DiabetesInputs = serde_json::from_str(
            r#"{"bmi": 25, "age": 40, "family_history": true, "fasting_glucose": 100}"#,
        )
        .expect("hba1c is optional on the wire");
        assert_eq!(inputs.hba1c, None);
    }
}
