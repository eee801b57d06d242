//! Risk scoring for chronic conditions.
//!
//! Each condition has a linear risk score over its clinical inputs and two cut-offs that bucket
//! the score into a [`RiskTier`]. Cut-offs are strict: a score equal to a threshold falls into
//! the lower tier.
//!
//! Two coefficient sets exist side by side as [`ScoringProfile`]s. Neither is canonical; the
//! profile is chosen once in [`CoreConfig`] and applied to every assessment.

mod asthma;
mod cardiovascular;
mod copd;
mod diabetes;

pub use asthma::AsthmaInputs;
pub use cardiovascular::CardiovascularInputs;
pub use copd::CopdInputs;
pub use diabetes::DiabetesInputs;

use crate::validation::ensure_finite;
use crate::{CareError, CareResult, CoreConfig};
use ccm_types::{Condition, RiskTier};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Coefficient set used when scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringProfile {
    /// Four core inputs per condition.
    Baseline,
    /// Baseline plus HbA1c, exacerbation count and eosinophil count.
    #[default]
    Extended,
}

impl ScoringProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringProfile::Baseline => "baseline",
            ScoringProfile::Extended => "extended",
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, ScoringProfile::Extended)
    }
}

impl fmt::Display for ScoringProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringProfile {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" => Ok(ScoringProfile::Baseline),
            "extended" => Ok(ScoringProfile::Extended),
            other => Err(CareError::InvalidInput(format!(
                "unknown scoring profile '{other}' (expected 'baseline' or 'extended')"
            ))),
        }
    }
}

/// Strict cut-offs separating the three tiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub moderate: f64,
    pub high: f64,
}

impl Thresholds {
    pub const fn new(moderate: f64, high: f64) -> Self {
        Self { moderate, high }
    }

    pub fn classify(&self, score: f64) -> RiskTier {
        if score > self.high {
            RiskTier::High
        } else if score > self.moderate {
            RiskTier::Moderate
        } else {
            RiskTier::Low
        }
    }
}

/// A condition-specific set of inputs that can be scored.
pub trait RiskModel {
    const CONDITION: Condition;
    const THRESHOLDS: Thresholds;

    /// Weighted sum of the inputs under `profile`. Never fails.
    fn risk_score(&self, profile: ScoringProfile) -> f64;

    /// Checks the inputs used by `profile`.
    ///
    /// When `strict` is false only non-finite values are rejected.
    fn validate(&self, profile: ScoringProfile, strict: bool) -> CareResult<()>;

    fn tier(&self, profile: ScoringProfile) -> RiskTier {
        Self::THRESHOLDS.classify(self.risk_score(profile))
    }
}

/// Inputs for any supported condition.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionInputs {
    Cardiovascular(CardiovascularInputs),
    Diabetes(DiabetesInputs),
    Copd(CopdInputs),
    Asthma(AsthmaInputs),
}

impl ConditionInputs {
    pub fn condition(&self) -> Condition {
        match self {
            ConditionInputs::Cardiovascular(_) => CardiovascularInputs::CONDITION,
            ConditionInputs::Diabetes(_) => DiabetesInputs::CONDITION,
            ConditionInputs::Copd(_) => CopdInputs::CONDITION,
            ConditionInputs::Asthma(_) => AsthmaInputs::CONDITION,
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        match self {
            ConditionInputs::Cardiovascular(_) => CardiovascularInputs::THRESHOLDS,
            ConditionInputs::Diabetes(_) => DiabetesInputs::THRESHOLDS,
            ConditionInputs::Copd(_) => CopdInputs::THRESHOLDS,
            ConditionInputs::Asthma(_) => AsthmaInputs::THRESHOLDS,
        }
    }

    pub fn risk_score(&self, profile: ScoringProfile) -> f64 {
        match self {
            ConditionInputs::Cardiovascular(inputs) => inputs.risk_score(profile),
            ConditionInputs::Diabetes(inputs) => inputs.risk_score(profile),
            ConditionInputs::Copd(inputs) => inputs.risk_score(profile),
            ConditionInputs::Asthma(inputs) => inputs.risk_score(profile),
        }
    }

    pub fn validate(&self, profile: ScoringProfile, strict: bool) -> CareResult<()> {
        match self {
            ConditionInputs::Cardiovascular(inputs) => inputs.validate(profile, strict),
            ConditionInputs::Diabetes(inputs) => inputs.validate(profile, strict),
            ConditionInputs::Copd(inputs) => inputs.validate(profile, strict),
            ConditionInputs::Asthma(inputs) => inputs.validate(profile, strict),
        }
    }

    /// Decodes the inputs for `condition` from any self-describing deserializer.
    ///
    /// This uses `serde_path_to_error` so that a missing or mistyped field is reported by name
    /// (e.g. `Diabetes inputs: bmi: invalid type`).
    ///
    /// # Errors
    ///
    /// Returns `CareError::Translation` when the data does not match the condition's fields.
    pub fn from_deserializer<'de, D>(condition: Condition, deserializer: D) -> CareResult<Self>
    where
        D: Deserializer<'de>,
    {
        match condition {
            Condition::Cardiovascular => {
                decode(condition, deserializer).map(ConditionInputs::Cardiovascular)
            }
            Condition::Diabetes => decode(condition, deserializer).map(ConditionInputs::Diabetes),
            Condition::Copd => decode(condition, deserializer).map(ConditionInputs::Copd),
            Condition::Asthma => decode(condition, deserializer).map(ConditionInputs::Asthma),
        }
    }

    /// Decodes inputs from a JSON value, as received by the REST API.
    pub fn from_json(condition: Condition, value: serde_json::Value) -> CareResult<Self> {
        Self::from_deserializer(condition, value)
    }
}

fn decode<'de, D, T>(condition: Condition, deserializer: D) -> CareResult<T>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    serde_path_to_error::deserialize::<_, T>(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        CareError::Translation(format!("{condition} inputs: {path}: {source}"))
    })
}

/// Outcome of scoring one condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    pub condition: Condition,
    pub tier: RiskTier,
    pub score: f64,
}

/// Scores condition inputs using the profile and strictness from [`CoreConfig`].
#[derive(Clone, Debug)]
pub struct Scorer {
    cfg: Arc<CoreConfig>,
}

impl Scorer {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn profile(&self) -> ScoringProfile {
        self.cfg.profile()
    }

    /// Validates and scores one set of inputs.
    ///
    /// # Errors
    ///
    /// Returns `CareError::NonFinite` for NaN/infinite inputs or a score that overflows,
    /// `CareError::OutOfRange` for values outside the form bounds when strict input checking is
    /// enabled, and `CareError::InvalidInput` when an extended-only input is missing under the
    /// extended profile.
    pub fn assess(&self, inputs: &ConditionInputs) -> CareResult<Assessment> {
        let profile = self.cfg.profile();
        let condition = inputs.condition();

        if let Err(e) = inputs.validate(profile, self.cfg.strict_inputs()) {
            tracing::warn!(%condition, error = %e, "rejected risk inputs");
            return Err(e);
        }

        let score = inputs.risk_score(profile);
        if let Err(e) = ensure_finite("score", score) {
            tracing::warn!(%condition, %profile, "risk score overflowed");
            return Err(e);
        }
        let tier = inputs.thresholds().classify(score);
        tracing::debug!(%condition, %profile, score, %tier, "assessed risk");

        Ok(Assessment {
            condition,
            tier,
            score,
        })
    }
}
