//! # ccm Core
//!
//! Core business logic for chronic condition risk stratification.
//!
//! This crate contains pure scoring and advisory operations:
//! - Linear risk scores and tier thresholds for cardiovascular disease, diabetes, COPD and asthma
//! - Per-session result tracking in submission order
//! - Tier-keyed care plans and keyword-routed assistant replies
//! - YAML batch files of submissions
//!
//! **No API concerns**: HTTP servers, session stores and CLI parsing belong in `api-rest`,
//! `api-shared` or `ccm-cli`.

pub mod assessment_file;
pub mod config;
pub mod constants;
pub mod error;
pub mod responder;
pub mod scoring;
pub mod session;
pub mod validation;

pub use ccm_types::{Condition, RiskTier, TypesError};
pub use config::CoreConfig;
pub use constants::NO_RESULTS_GUARD;
pub use error::{CareError, CareResult};
pub use responder::{assistant_reply, care_plan, AssistantReply, CarePlanStyle, Topic};
pub use scoring::{
    AsthmaInputs, Assessment, CardiovascularInputs, ConditionInputs, CopdInputs, DiabetesInputs,
    RiskModel, Scorer, ScoringProfile, Thresholds,
};
pub use session::{ConditionResult, ResultsMapping};
