//! Constants used throughout the ccm core crate.
//!
//! Input ranges mirror the bounds of the assessment forms. They are applied only when strict
//! input checking is enabled in [`crate::CoreConfig`].

/// Inclusive bounds for a numeric clinical input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Age in years.
pub const AGE_RANGE: InputRange = InputRange::new(18.0, 100.0);

/// Systolic blood pressure in mmHg.
pub const SYSTOLIC_BP_RANGE: InputRange = InputRange::new(90.0, 200.0);

/// Total cholesterol in mg/dL.
pub const CHOLESTEROL_RANGE: InputRange = InputRange::new(100.0, 300.0);

pub const BMI_RANGE: InputRange = InputRange::new(10.0, 50.0);

/// Fasting plasma glucose in mg/dL.
pub const FASTING_GLUCOSE_RANGE: InputRange = InputRange::new(50.0, 300.0);

/// HbA1c in percent.
pub const HBA1C_RANGE: InputRange = InputRange::new(4.0, 15.0);

pub const SMOKING_YEARS_RANGE: InputRange = InputRange::new(0.0, 60.0);

/// FEV1 as percent of predicted.
pub const FEV1_RANGE: InputRange = InputRange::new(20.0, 100.0);

pub const EXACERBATIONS_RANGE: InputRange = InputRange::new(0.0, 10.0);

/// Days per week, shared by the asthma symptom inputs.
pub const DAYS_PER_WEEK_RANGE: InputRange = InputRange::new(0.0, 7.0);

/// Blood eosinophil count in cells/µL.
pub const EOSINOPHIL_RANGE: InputRange = InputRange::new(0.0, 1500.0);

/// Text returned by the responders when no condition has been assessed yet.
pub const NO_RESULTS_GUARD: &str = "Please complete risk assessments in previous tabs first.";
