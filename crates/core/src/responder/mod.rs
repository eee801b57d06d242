//! Advisory text for assessed conditions.
//!
//! Two independent strategies are provided and never merged:
//! - [`care_plan`] emits a fixed block per assessed condition, chosen by risk tier.
//! - [`assistant_reply`] routes a free-text query to a fixed block by keyword.
//!
//! Both are pure functions of the caller's [`ResultsMapping`]. When nothing has been assessed
//! they return [`NO_RESULTS_GUARD`].

mod assistant;
mod care_plan;

pub use assistant::{AssistantReply, Topic};

use crate::constants::NO_RESULTS_GUARD;
use crate::session::ResultsMapping;
use crate::CareError;
use std::fmt;
use std::str::FromStr;

/// Template table used for the unified care plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarePlanStyle {
    /// Chronic Care Model pillars for every tier.
    #[default]
    Ccm,
    /// Multidisciplinary team actions for High and Moderate tiers.
    Mdt,
}

impl CarePlanStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CarePlanStyle::Ccm => "ccm",
            CarePlanStyle::Mdt => "mdt",
        }
    }
}

impl fmt::Display for CarePlanStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarePlanStyle {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ccm" => Ok(CarePlanStyle::Ccm),
            "mdt" => Ok(CarePlanStyle::Mdt),
            other => Err(CareError::InvalidInput(format!(
                "unknown care plan style '{other}' (expected 'ccm' or 'mdt')"
            ))),
        }
    }
}

/// Renders the unified care plan for every assessed condition, in submission order.
pub fn care_plan(results: &ResultsMapping, style: CarePlanStyle) -> String {
    if results.is_empty() {
        return NO_RESULTS_GUARD.to_string();
    }

    match style {
        CarePlanStyle::Ccm => care_plan::render_ccm(results),
        CarePlanStyle::Mdt => care_plan::render_mdt(results),
    }
}

/// Answers a free-text query.
///
/// The query is matched case-insensitively against each [`Topic`] keyword in priority order;
/// the first hit selects the reply. Unmatched queries get a help message.
pub fn assistant_reply(results: &ResultsMapping, query: &str) -> AssistantReply {
    if results.is_empty() {
        return AssistantReply {
            topic: None,
            text: NO_RESULTS_GUARD.to_string(),
        };
    }

    let topic = Topic::match_query(query);
    tracing::debug!(?topic, conditions = results.len(), "assistant query routed");
    AssistantReply {
        topic,
        text: assistant::render(topic, results),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ConditionResult;
    use ccm_types::{Condition, RiskTier};

    fn results(entries: &[(Condition, RiskTier)]) -> ResultsMapping {
        let mut results = ResultsMapping::new();
        for &(condition, tier) in entries {
            results.record(ConditionResult {
                condition,
                tier,
                score: 0.0,
            });
        }
        results
    }

    #[test]
    fn empty_results_return_guard_for_any_query() {
        let empty = ResultsMapping::new();
        for query in ["follow-up", "monitoring", "", "hello"] {
            let reply = assistant_reply(&empty, query);
            assert_eq!(reply.text, NO_RESULTS_GUARD);
            assert_eq!(reply.topic, None);
        }
    }

    #[test]
    fn empty_results_return_guard_for_care_plan() {
        let empty = ResultsMapping::new();
        assert_eq!(care_plan(&empty, CarePlanStyle::Ccm), NO_RESULTS_GUARD);
        assert_eq!(care_plan(&empty, CarePlanStyle::Mdt), NO_RESULTS_GUARD);
    }

    #[test]
    fn follow_up_query_selects_follow_up_block_only() {
        let results = results(&[(Condition::Cardiovascular, RiskTier::Moderate)]);
        let reply = assistant_reply(&results, "What about follow-up?");

        assert_eq!(reply.topic, Some(Topic::FollowUp));
        assert!(reply.text.contains("Follow-up plan"));
        assert!(reply.text.contains("Cardiovascular"));
        assert!(!reply.text.contains("Monitoring plan"));
        assert!(!reply.text.contains("Self-management support"));
    }

    #[test]
    fn style_parses_case_insensitively() {
        assert_eq!("MDT".parse::<CarePlanStyle>().unwrap(), CarePlanStyle::Mdt);
        assert!("soap".parse::<CarePlanStyle>().is_err());
    }
}
