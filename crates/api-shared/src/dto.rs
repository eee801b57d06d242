//! JSON request and response bodies.
//!
//! Conditions, tiers and topics travel as their display strings (`"COPD"`, `"Moderate"`,
//! `"follow-up"`) so clients never need to know the Rust enum spelling.

use ccm_core::{Assessment, AssistantReply, CarePlanStyle, ConditionResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Inputs for one condition.
///
/// The accepted fields depend on the condition in the request path, for example
/// `{"age": 30, "systolic_bp": 120, "smoker": false, "cholesterol": 180}` for cardiovascular.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessReq {
    #[schema(value_type = Object)]
    pub inputs: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssessRes {
    pub condition: String,
    pub tier: String,
    pub score: f64,
}

impl From<Assessment> for AssessRes {
    fn from(assessment: Assessment) -> Self {
        Self {
            condition: assessment.condition.to_string(),
            tier: assessment.tier.to_string(),
            score: assessment.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateSessionRes {
    pub session_id: String,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EndSessionRes {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ResultEntry {
    pub condition: String,
    pub tier: String,
    pub score: f64,
}

impl From<&ConditionResult> for ResultEntry {
    fn from(result: &ConditionResult) -> Self {
        Self {
            condition: result.condition.to_string(),
            tier: result.tier.to_string(),
            score: result.score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListResultsRes {
    pub session_id: String,
    /// In first-submission order.
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecordResultRes {
    pub result: ResultEntry,
    /// Tier this submission replaced, if the condition had been assessed before.
    pub previous_tier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarePlanQuery {
    /// `ccm` (default) or `mdt`.
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CarePlanRes {
    pub style: String,
    pub text: String,
}

impl CarePlanRes {
    pub fn new(style: CarePlanStyle, text: String) -> Self {
        Self {
            style: style.to_string(),
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssistantReq {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AssistantRes {
    /// Matched keyword topic, absent for help or guard replies.
    pub topic: Option<String>,
    pub text: String,
}

impl From<AssistantReply> for AssistantRes {
    fn from(reply: AssistantReply) -> Self {
        Self {
            topic: reply.topic.map(|t| t.keyword().to_string()),
            text: reply.text,
        }
    }
}
