//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Request
//! handling never reads process-wide environment variables.

use crate::scoring::ScoringProfile;
use crate::{CareError, CareResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    profile: ScoringProfile,
    strict_inputs: bool,
}

impl CoreConfig {
    pub fn new(profile: ScoringProfile, strict_inputs: bool) -> Self {
        Self {
            profile,
            strict_inputs,
        }
    }

    pub fn profile(&self) -> ScoringProfile {
        self.profile
    }

    /// Whether inputs outside the form bounds are rejected before scoring.
    pub fn strict_inputs(&self) -> bool {
        self.strict_inputs
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self::new(ScoringProfile::default(), true)
    }
}

/// Parse the scoring profile from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the extended profile.
pub fn profile_from_env_value(value: Option<String>) -> CareResult<ScoringProfile> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<ScoringProfile>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}

/// Parse the strict-inputs flag from an optional string value.
///
/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`. Defaults to `true`.
pub fn strict_inputs_from_env_value(value: Option<String>) -> CareResult<bool> {
    let Some(value) = value.map(|v| v.trim().to_ascii_lowercase()) else {
        return Ok(true);
    };

    match value.as_str() {
        "" | "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(CareError::InvalidInput(format!(
            "CCM_STRICT_INPUTS must be a boolean, got '{other}'"
        ))),
    }
}
