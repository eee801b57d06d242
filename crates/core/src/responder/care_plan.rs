//! Tier-keyed care plan templates.

use crate::session::ResultsMapping;
use ccm_types::{Condition, RiskTier};

/// One Chronic Care Model block.
struct CcmTemplate {
    summary: &'static str,
    self_management: &'static str,
    decision_support: &'static str,
    delivery_system: &'static str,
    community_resources: &'static str,
}

const CCM_HIGH: CcmTemplate = CcmTemplate {
    summary: "A comprehensive care plan based on the Chronic Care Model includes:",
    self_management: "Patient education, training on symptom tracking, and emergency action planning.",
    decision_support: "Frequent specialist consultation and adherence to clinical guidelines for high-risk management.",
    delivery_system: "Monthly follow-ups, medication review, and adjustments. Implement care coordination across providers.",
    community_resources: "Referral to support groups and home care services if required.",
};

const CCM_MODERATE: CcmTemplate = CcmTemplate {
    summary: "Intermediate care plan with CCM recommendations:",
    self_management: "Encourage lifestyle changes, provide tools for tracking symptoms, and set achievable health goals.",
    decision_support: "Schedule quarterly check-ups with a focus on preventive care.",
    delivery_system: "Semi-annual follow-up visits, proactive medication adjustments, and referral as needed.",
    community_resources: "Connect with local health education resources.",
};

const CCM_LOW: CcmTemplate = CcmTemplate {
    summary: "Preventive and maintenance plan based on CCM recommendations.",
    self_management: "Encourage regular health checks and adherence to preventive lifestyle practices.",
    decision_support: "Annual review of patient health status.",
    delivery_system: "Ensure primary care check-ups annually or biannually.",
    community_resources: "Provide information on health maintenance resources.",
};

fn ccm_template(tier: RiskTier) -> &'static CcmTemplate {
    match tier {
        RiskTier::High => &CCM_HIGH,
        RiskTier::Moderate => &CCM_MODERATE,
        RiskTier::Low => &CCM_LOW,
    }
}

/// Multidisciplinary team actions for one tier.
struct MdtTemplate {
    physician: &'static str,
    nurse: &'static str,
    dietitian: &'static str,
    respiratory_therapist: Option<&'static str>,
}

const MDT_HIGH: MdtTemplate = MdtTemplate {
    physician: "Immediate review of medication, adjust therapy, and consider frequent specialist referrals.",
    nurse: "Weekly patient check-ins to monitor adherence and symptoms.",
    dietitian: "Design a personalized nutrition plan that supports condition management.",
    respiratory_therapist: Some("Implement pulmonary rehabilitation, monitor inhaler techniques."),
};

const MDT_MODERATE: MdtTemplate = MdtTemplate {
    physician: "Monthly reviews of patient status and lifestyle modifications.",
    nurse: "Educate on symptom tracking, quarterly visits to reinforce care plan.",
    dietitian: "Provide guidance on diet changes that support cardiovascular and metabolic health.",
    respiratory_therapist: None,
};

/// Low tier conditions have no team actions.
fn mdt_template(tier: RiskTier) -> Option<&'static MdtTemplate> {
    match tier {
        RiskTier::High => Some(&MDT_HIGH),
        RiskTier::Moderate => Some(&MDT_MODERATE),
        RiskTier::Low => None,
    }
}

const MDT_INTRO: &str = "Here's a detailed, multidisciplinary care plan based on current evidence:";
const MDT_GUIDELINES: &str =
    "Please consult specific guidelines (e.g., ADA, AHA) for detailed recommendations.";
const MDT_NOTHING_TO_ACTION: &str = "No high or moderate risk conditions were identified. \
Continue routine preventive care and reassess at the next annual review.";

pub(super) fn render_ccm(results: &ResultsMapping) -> String {
    let mut output = String::new();

    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let template = ccm_template(result.tier);
        let condition = result.condition;
        let tier = result.tier;

        output.push_str(&format!(
            "**{condition} Care Plan (Risk Level: {tier})**\n"
        ));
        output.push_str(&format!(
            "- **{condition} - {tier} Risk**: {}\n",
            template.summary
        ));
        output.push_str(&format!(
            "  - **Self-Management Support**: {}\n",
            template.self_management
        ));
        output.push_str(&format!(
            "  - **Decision Support**: {}\n",
            template.decision_support
        ));
        output.push_str(&format!(
            "  - **Delivery System Design**: {}\n",
            template.delivery_system
        ));
        output.push_str(&format!(
            "  - **Community Resources**: {}\n",
            template.community_resources
        ));
    }

    output
}

pub(super) fn render_mdt(results: &ResultsMapping) -> String {
    let actionable: Vec<(Condition, RiskTier, &MdtTemplate)> = results
        .iter()
        .filter_map(|r| mdt_template(r.tier).map(|t| (r.condition, r.tier, t)))
        .collect();

    if actionable.is_empty() {
        return MDT_NOTHING_TO_ACTION.to_string();
    }

    let mut output = String::new();
    output.push_str(MDT_INTRO);
    output.push_str("\n\n");

    for (condition, tier, template) in actionable {
        output.push_str(&format!("**{condition} ({tier} Risk):**\n"));
        output.push_str(&format!(
            "- **Primary Care Physician**: {}\n",
            template.physician
        ));
        output.push_str(&format!("- **Nurse**: {}\n", template.nurse));
        output.push_str(&format!("- **Dietitian**: {}\n", template.dietitian));
        if let Some(respiratory) = template.respiratory_therapist {
            if condition.is_respiratory() {
                output.push_str(&format!("- **Respiratory Therapist**: {respiratory}\n"));
            }
        }
        output.push('\n');
    }

    output.push_str(MDT_GUIDELINES);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ConditionResult;

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
    fn ccm_renders_one_block_per_condition_in_order() {
        let text = render_ccm(&results(&[
            (Condition::Diabetes, RiskTier::Low),
            (Condition::Cardiovascular, RiskTier::High),
        ]));

        let diabetes = text
            .find("**Diabetes Care Plan (Risk Level: Low)**")
            .expect("diabetes block");
        let cardio = text
            .find("**Cardiovascular Care Plan (Risk Level: High)**")
            .expect("cardiovascular block");
        assert!(diabetes < cardio);
        assert!(text.contains("Annual review of patient health status."));
        assert!(text.contains("Monthly follow-ups, medication review"));
    }

    #[test]
    fn ccm_moderate_uses_quarterly_check_ups() {
        let text = render_ccm(&results(&[(Condition::Copd, RiskTier::Moderate)]));
        assert!(text.contains("- **COPD - Moderate Risk**: Intermediate care plan"));
        assert!(text.contains("Schedule quarterly check-ups"));
        assert_eq!(text.matches("**Community Resources**").count(), 1);
    }

    #[test]
    fn mdt_skips_low_tier_conditions() {
        let text = render_mdt(&results(&[
            (Condition::Cardiovascular, RiskTier::Low),
            (Condition::Diabetes, RiskTier::Moderate),
        ]));

        assert!(text.starts_with(MDT_INTRO));
        assert!(text.contains("**Diabetes (Moderate Risk):**"));
        assert!(!text.contains("Cardiovascular"));
        assert!(text.ends_with(MDT_GUIDELINES));
    }

    #[test]
    fn mdt_names_respiratory_therapist_for_respiratory_conditions_only() {
        let text = render_mdt(&results(&[
            (Condition::Cardiovascular, RiskTier::High),
            (Condition::Asthma, RiskTier::High),
        ]));
        assert_eq!(text.matches("**Respiratory Therapist**").count(), 1);

        let asthma = text.find("**Asthma (High Risk):**").expect("asthma block");
        let therapist = text
            .find("**Respiratory Therapist**")
            .expect("therapist line");
        assert!(therapist > asthma);
    }

    #[test]
    fn mdt_with_only_low_tiers_has_nothing_to_action() {
        let text = render_mdt(&results(&[(Condition::Asthma, RiskTier::Low)]));
        assert_eq!(text, MDT_NOTHING_TO_ACTION);
    }
}
