//! Shared domain primitives for chronic condition risk stratification.
//!
//! These types are used by the scoring core, the REST DTOs and the CLI so that a condition or a
//! risk tier always has exactly one spelling on the wire.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing domain primitives from text.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypesError {
    /// The text does not name one of the supported chronic conditions
    #[error("unknown condition: {0}")]
    UnknownCondition(String),
}

/// A chronic condition that can be risk-stratified.
///
/// The variant order is the order conditions are presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    Cardiovascular,
    Diabetes,
    Copd,
    Asthma,
}

impl Condition {
    /// Display name used in results and advisory text.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Cardiovascular => "Cardiovascular",
            Condition::Diabetes => "Diabetes",
            Condition::Copd => "COPD",
            Condition::Asthma => "Asthma",
        }
    }

    /// Whether the condition is managed with respiratory therapy input.
    pub fn is_respiratory(&self) -> bool {
        matches!(self, Condition::Copd | Condition::Asthma)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = TypesError;

    /// Parses a condition name case-insensitively.
    ///
    /// Accepts the display names plus the short forms `cardio` and `cvd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cardiovascular" | "cardio" | "cvd" => Ok(Condition::Cardiovascular),
            "diabetes" => Ok(Condition::Diabetes),
            "copd" => Ok(Condition::Copd),
            "asthma" => Ok(Condition::Asthma),
            _ => Err(TypesError::UnknownCondition(s.to_owned())),
        }
    }
}

/// Risk tier produced by thresholding a condition's risk score.
///
/// Ordered so that `Low < Moderate < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low",
            RiskTier::Moderate => "Moderate",
            RiskTier::High => "High",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for Condition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Condition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for RiskTier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
