//! Keyword routing for assistant queries.

use crate::session::{ConditionResult, ResultsMapping};
use ccm_types::{Condition, RiskTier};
use serde::Serialize;

/// Topic selected by a keyword in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    FollowUp,
    Monitoring,
    SelfManagement,
}

impl Topic {
    /// Topics in match priority order.
    pub const PRIORITY: [Topic; 3] = [Topic::FollowUp, Topic::Monitoring, Topic::SelfManagement];

    pub fn keyword(&self) -> &'static str {
        match self {
            Topic::FollowUp => "follow-up",
            Topic::Monitoring => "monitoring",
            Topic::SelfManagement => "self-management",
        }
    }

    /// First topic whose keyword occurs in `query`, ignoring case.
    pub fn match_query(query: &str) -> Option<Topic> {
        let query = query.to_lowercase();
        Self::PRIORITY
            .into_iter()
            .find(|topic| query.contains(topic.keyword()))
    }
}

/// Reply to an assistant query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    /// `None` when no keyword matched or nothing has been assessed.
    pub topic: Option<Topic>,
    pub text: String,
}

const HELP: &str = "I can help with follow-up scheduling, monitoring plans and self-management \
support for the conditions you have assessed. Include \"follow-up\", \"monitoring\" or \
\"self-management\" in your question.";

fn follow_up_interval(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => {
            "weekly nurse check-ins and a physician medication review within two weeks"
        }
        RiskTier::Moderate => "monthly physician review with quarterly nurse visits",
        RiskTier::Low => "annual primary care review",
    }
}

fn monitoring_parameters(condition: Condition) -> &'static str {
    match condition {
        Condition::Cardiovascular => {
            "blood pressure and total cholesterol, with smoking status recorded at every visit"
        }
        Condition::Diabetes => "fasting glucose, HbA1c and BMI",
        Condition::Copd => "FEV1 by spirometry and the number of exacerbations",
        Condition::Asthma => "a symptom and night-waking diary, inhaler use days and FEV1",
    }
}

fn self_management_actions(condition: Condition) -> &'static str {
    match condition {
        Condition::Cardiovascular => {
            "smoking cessation support, a heart-healthy diet and regular physical activity"
        }
        Condition::Diabetes => {
            "home glucose testing, weight management goals and structured diabetes education"
        }
        Condition::Copd => {
            "inhaler technique review, pulmonary rehabilitation exercises and a written \
             exacerbation action plan"
        }
        Condition::Asthma => {
            "a personal asthma action plan, trigger avoidance and inhaler technique review"
        }
    }
}

fn render_block(
    heading: &str,
    closing: &str,
    results: &ResultsMapping,
    line: impl Fn(&ConditionResult) -> &'static str,
) -> String {
    let mut output = String::new();
    output.push_str(&format!("**{heading}:**\n"));
    for result in results {
        output.push_str(&format!(
            "- **{}** ({} risk): {}\n",
            result.condition,
            result.tier,
            line(result)
        ));
    }
    output.push('\n');
    output.push_str(closing);
    output
}

pub(super) fn render(topic: Option<Topic>, results: &ResultsMapping) -> String {
    match topic {
        Some(Topic::FollowUp) => render_block(
            "Follow-up plan",
            "Bring forward the next appointment if symptoms worsen between visits.",
            results,
            |r| follow_up_interval(r.tier),
        ),
        Some(Topic::Monitoring) => render_block(
            "Monitoring plan",
            "Record each reading in the shared care record so the whole team sees trends.",
            results,
            |r| monitoring_parameters(r.condition),
        ),
        Some(Topic::SelfManagement) => render_block(
            "Self-management support",
            "Agree one or two achievable goals with the patient and review them at each contact.",
            results,
            |r| self_management_actions(r.condition),
        ),
        None => HELP.to_string(),
    }
}
