//! YAML batch files of condition submissions.
//!
//! A batch lists submissions in the order they were made:
//!
//! ```yaml
//! - condition: Cardiovascular
//!   inputs:
//!     age: 30
//!     systolic_bp: 120
//!     smoker: false
//!     cholesterol: 180
//! - condition: COPD
//!   inputs:
//!     smoking_years: 20
//!     age: 60
//!     fev1: 50
//!     exacerbations_last_year: 1
//! ```
//!
//! Extended-only inputs (`hba1c`, `exacerbations_last_year`, `eosinophil_count`) may be left out
//! when scoring with the baseline profile.
//!
//! Parsing is strict: unknown keys and wrongly typed values are rejected with the path to the
//! offending field.

use crate::scoring::{ConditionInputs, Scorer};
use crate::session::ResultsMapping;
use crate::{CareError, CareResult};
use ccm_types::Condition;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SubmissionWire {
    condition: Condition,
    inputs: serde_yaml::Value,
}

/// Parses a YAML batch into condition inputs, preserving order.
///
/// # Errors
///
/// Returns `CareError::InvalidYaml` if the text is not YAML, and `CareError::Translation` if an
/// entry does not match the expected shape.
pub fn parse_submissions(yaml_text: &str) -> CareResult<Vec<ConditionInputs>> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
    let wire = match serde_path_to_error::deserialize::<_, Vec<SubmissionWire>>(deserializer) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>"
            } else {
                path.as_str()
            };
            return Err(CareError::Translation(format!(
                "assessment file: {path}: {source}"
            )));
        }
    };

    wire.into_iter()
        .enumerate()
        .map(|(index, submission)| {
            ConditionInputs::from_deserializer(submission.condition, submission.inputs).map_err(
                |e| match e {
                    CareError::Translation(msg) => {
                        CareError::Translation(format!("entry {index}: {msg}"))
                    }
                    other => other,
                },
            )
        })
        .collect()
}

/// Reads and parses a YAML batch file.
pub fn read_submissions(path: &Path) -> CareResult<Vec<ConditionInputs>> {
    let text = std::fs::read_to_string(path).map_err(CareError::FileRead)?;
    parse_submissions(&text)
}

/// Scores every submission in order, recording each result in a fresh [`ResultsMapping`].
///
/// Stops at the first submission that fails validation.
pub fn score_submissions(
    scorer: &Scorer,
    submissions: &[ConditionInputs],
) -> CareResult<ResultsMapping> {
    let mut results = ResultsMapping::new();
    for inputs in submissions {
        let assessment = scorer.assess(inputs)?;
        if let Some(previous) = results.record(assessment) {
            tracing::debug!(
                condition = %previous.condition,
                previous = %previous.tier,
                current = %assessment.tier,
                "resubmitted condition overwritten"
            );
        }
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringProfile;
    use crate::CoreConfig;
    use ccm_types::RiskTier;
    use std::sync::Arc;
    use tempfile::TempDir;

    const BATCH: &str = r#"- condition: Cardiovascular
  inputs:
    age: 30
    systolic_bp: 120
    smoker: false
    cholesterol: 180
- condition: copd
  inputs:
    smoking_years: 20
    age: 60
    fev1: 50
    exacerbations_last_year: 2
- condition: Cardiovascular
  inputs:
    age: 80
    systolic_bp: 180
    smoker: true
    cholesterol: 280
"#;

    fn scorer() -> Scorer {
        Scorer::new(Arc::new(CoreConfig::new(ScoringProfile::Extended, true)))
    }

    #[test]
    fn parses_submissions_in_order() {
        let submissions = parse_submissions(BATCH).expect("valid batch");
        let conditions: Vec<_> = submissions.iter().map(|s| s.condition()).collect();
        assert_eq!(
            conditions,
            vec![
                Condition::Cardiovascular,
                Condition::Copd,
                Condition::Cardiovascular
            ]
        );
    }

    #[test]
    fn later_submission_overwrites_earlier_result() {
        let submissions = parse_submissions(BATCH).expect("valid batch");
        let results = score_submissions(&scorer(), &submissions).expect("valid inputs");

        assert_eq!(results.len(), 2);
        assert_eq!(results.tier(Condition::Cardiovascular), Some(RiskTier::High));
        assert_eq!(results.tier(Condition::Copd), Some(RiskTier::High));
        assert_eq!(
            results.iter().next().map(|r| r.condition),
            Some(Condition::Cardiovascular)
        );
    }

    #[test]
    fn reports_path_of_mistyped_input() {
        let yaml = r#"- condition: Asthma
  inputs:
    symptom_frequency: often
    nighttime_symptoms: 1
    inhaler_use_days: 2
    fev1: 80
"#;
        let err = parse_submissions(yaml).expect_err("symptom_frequency must be numeric");
        match err {
            CareError::Translation(msg) => {
                assert!(msg.starts_with("entry 0: Asthma inputs"), "{msg}");
                assert!(msg.contains("symptom_frequency"), "{msg}");
            }
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_condition() {
        let yaml = r#"- condition: Gout
  inputs: {}
"#;
        let err = parse_submissions(yaml).expect_err("gout is not supported");
        let msg = err.to_string();
        assert!(msg.contains("condition"), "{msg}");
        assert!(msg.contains("unknown condition: Gout"), "{msg}");
    }

    #[test]
    fn rejects_unknown_entry_keys() {
        let yaml = r#"- condition: Diabetes
  notes: fasting sample
  inputs:
    bmi: 22
    age: 30
    family_history: false
    fasting_glucose: 90
"#;
        let err = parse_submissions(yaml).expect_err("notes is not a known key");
        assert!(err.to_string().contains("notes"));
    }

    #[test]
    fn out_of_range_submission_stops_scoring() {
        let yaml = r#"- condition: Diabetes
  inputs:
    bmi: 80
    age: 30
    family_history: false
    fasting_glucose: 90
    hba1c: 5.6
"#;
        let submissions = parse_submissions(yaml).expect("well formed");
        let err = score_submissions(&scorer(), &submissions).expect_err("bmi above 50");
        assert!(matches!(err, CareError::OutOfRange { field: "bmi", .. }));
    }

    #[test]
    fn extended_profile_needs_hba1c_in_batches() {
        let yaml = r#"- condition: Diabetes
  inputs:
    bmi: 22
    age: 30
    family_history: false
    fasting_glucose: 90
"#;
        let submissions = parse_submissions(yaml).expect("hba1c may be omitted");
        let err = score_submissions(&Scorer::new(Arc::new(CoreConfig::default())), &submissions)
            .expect_err("extended reads hba1c");
        assert!(matches!(err, CareError::InvalidInput(_)));

        let baseline = Scorer::new(Arc::new(CoreConfig::new(ScoringProfile::Baseline, true)));
        let results = score_submissions(&baseline, &submissions).expect("baseline ignores hba1c");
        assert_eq!(results.tier(Condition::Diabetes), Some(RiskTier::Low));
    }

    #[test]
    fn reads_batch_from_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("assessments.yaml");
        std::fs::write(&path, BATCH).expect("write batch");

        let submissions = read_submissions(&path).expect("read batch");
        assert_eq!(submissions.len(), 3);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = read_submissions(&temp_dir.path().join("missing.yaml"))
            .expect_err("file does not exist");
        assert!(matches!(err, CareError::FileRead(_)));
        assert!(!err.is_client_error());
    }
}
