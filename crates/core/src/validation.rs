//! Input validation utilities.
//!
//! Scoring formulas accept any finite number. These helpers let callers reject values outside
//! the clinically meaningful range before a tier is produced.

use crate::constants::InputRange;
use crate::{CareError, CareResult};

/// Rejects NaN and infinities.
///
/// This check is applied regardless of whether strict range checking is enabled, so that a
/// score can always be compared against the tier thresholds.
pub fn ensure_finite(field: &'static str, value: f64) -> CareResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CareError::NonFinite { field })
    }
}

/// Validates that `value` is finite and lies within `range` (inclusive).
///
/// # Errors
///
/// Returns `CareError::NonFinite` for NaN or infinite values, and `CareError::OutOfRange` when
/// the value falls outside the range.
pub fn check_range(field: &'static str, value: f64, range: InputRange) -> CareResult<()> {
    ensure_finite(field, value)?;

    if !range.contains(value) {
        return Err(CareError::OutOfRange {
            field,
            value,
            min: range.min,
            max: range.max,
        });
    }

    Ok(())
}

/// Collects the checks for one set of inputs.
///
/// Strict mode applies range checks; lenient mode only rejects non-finite values.
pub(crate) struct FieldChecker {
    strict: bool,
}

impl FieldChecker {
    pub(crate) fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub(crate) fn field(&self, name: &'static str, value: f64, range: InputRange) -> CareResult<&Self> {
        if self.strict {
            check_range(name, value, range)?;
        } else {
            ensure_finite(name, value)?;
        }
        Ok(self)
    }

    /// Checks an input that only the extended profile reads. Absence is an error.
    pub(crate) fn extended_field(
        &self,
        name: &'static str,
        value: Option<f64>,
        range: InputRange,
    ) -> CareResult<&Self> {
        match value {
            Some(value) => self.field(name, value, range),
            None => Err(CareError::InvalidInput(format!(
                "{name} is required under the extended profile"
            ))),
        }
    }
}
