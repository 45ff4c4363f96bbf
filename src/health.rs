use serde::{Deserialize, Serialize};

use crate::normalize::{clamp100, lenient_f64, round_score};

pub const DEFAULT_HEALTH_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHealthInput {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub traffic_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub lead_flow_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub offer_clarity_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub funnel_strength_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub momentum_score: Option<f64>,
}

impl BusinessHealthInput {
    fn raw(&self, metric: HealthMetric) -> Option<f64> {
        match metric {
            HealthMetric::TrafficScore => self.traffic_score,
            HealthMetric::LeadFlowScore => self.lead_flow_score,
            HealthMetric::OfferClarityScore => self.offer_clarity_score,
            HealthMetric::FunnelStrengthScore => self.funnel_strength_score,
            HealthMetric::MomentumScore => self.momentum_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthMetric {
    TrafficScore,
    LeadFlowScore,
    OfferClarityScore,
    FunnelStrengthScore,
    MomentumScore,
}

impl HealthMetric {
    pub const ALL: [HealthMetric; 5] = [
        HealthMetric::TrafficScore,
        HealthMetric::LeadFlowScore,
        HealthMetric::OfferClarityScore,
        HealthMetric::FunnelStrengthScore,
        HealthMetric::MomentumScore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HealthMetric::TrafficScore => "Traffic",
            HealthMetric::LeadFlowScore => "Lead Flow",
            HealthMetric::OfferClarityScore => "Offer Clarity",
            HealthMetric::FunnelStrengthScore => "Funnel Strength",
            HealthMetric::MomentumScore => "Momentum",
        }
    }

    fn suggestion(self) -> &'static str {
        match self {
            HealthMetric::TrafficScore => "Pick 1–2 core traffic channels (SEO, short-form video, partnerships, ads) and commit to a simple weekly publishing rhythm.",
            HealthMetric::LeadFlowScore => "Add or refine lead magnets, opt-in forms, and CTAs on your high-traffic pages.",
            HealthMetric::OfferClarityScore => "Tighten your one-liner and make your main product/service and outcome painfully obvious above the fold.",
            HealthMetric::FunnelStrengthScore => "Map your funnel stages and fix the biggest drop-off with a single improvement at a time.",
            HealthMetric::MomentumScore => "Adopt a simple weekly plan: 3 big rocks + daily needle-mover tasks, and track completion.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Low,
    Medium,
    High,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Low => "low",
            HealthStatus::Medium => "medium",
            HealthStatus::High => "high",
        }
    }
}

const STATUS_CUTOFFS: [(f64, HealthStatus); 2] =
    [(40.0, HealthStatus::Low), (70.0, HealthStatus::Medium)];

/// Buckets a clamped, unrounded 0–100 score.
pub fn status_for_clamped_score(score: f64) -> HealthStatus {
    STATUS_CUTOFFS
        .iter()
        .find(|(cutoff, _)| score < *cutoff)
        .map(|(_, status)| *status)
        .unwrap_or(HealthStatus::High)
}

/// Returns `(description, suggestion)` for a metric in a given state.
fn guidance(metric: HealthMetric, status: HealthStatus) -> (&'static str, &'static str) {
    use HealthMetric::*;
    use HealthStatus::*;

    let description = match (metric, status) {
        (TrafficScore, High) => "You’re driving solid traffic to your brand.",
        (TrafficScore, Medium) => "Traffic is okay but could be more consistent.",
        (TrafficScore, Low) => "You need more eyeballs on your brand and offers.",
        (LeadFlowScore, High) => "You’re converting traffic into leads nicely.",
        (LeadFlowScore, Medium) => "Leads are trickling in but not in a compounding way yet.",
        (LeadFlowScore, Low) => "You’re likely leaving a lot of potential leads uncaptured.",
        (OfferClarityScore, High) => "Your offer is clear and compelling.",
        (OfferClarityScore, Medium) => "Your offer makes sense but could be sharper.",
        (OfferClarityScore, Low) => "Your positioning and promise likely feel fuzzy to visitors.",
        (FunnelStrengthScore, High) => "You have a strong path from discovery to purchase.",
        (FunnelStrengthScore, Medium) => "Your funnel exists but has friction or gaps.",
        (FunnelStrengthScore, Low) => "Your funnel is either missing or too leaky to scale.",
        (MomentumScore, High) => "You’re moving with strong, compounding momentum.",
        (MomentumScore, Medium) => "You’re making progress, but it may feel inconsistent.",
        (MomentumScore, Low) => "Momentum is low – likely due to context switching or overwhelm.",
    };

    (description, metric.suggestion())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessHealthIndicator {
    pub key: HealthMetric,
    pub label: String,
    pub score: u8,
    pub status: HealthStatus,
    pub description: String,
    pub suggestion: String,
}

/// Produces one indicator per metric, in `HealthMetric::ALL` order.
pub fn compute_business_health_indicators(
    input: &BusinessHealthInput,
) -> Vec<BusinessHealthIndicator> {
    HealthMetric::ALL
        .iter()
        .map(|&metric| {
            let clamped = clamp100(input.raw(metric).unwrap_or(DEFAULT_HEALTH_SCORE));
            let status = status_for_clamped_score(clamped);
            let score = round_score(clamped);
            let (description, suggestion) = guidance(metric, status);

            BusinessHealthIndicator {
                key: metric,
                label: metric.label().to_string(),
                score,
                status,
                description: description.to_string(),
                suggestion: suggestion.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator(
        indicators: &[BusinessHealthIndicator],
        metric: HealthMetric,
    ) -> &BusinessHealthIndicator {
        indicators.iter().find(|i| i.key == metric).unwrap()
    }

    #[test]
    fn empty_input_yields_five_medium_indicators() {
        let indicators = compute_business_health_indicators(&BusinessHealthInput::default());
        assert_eq!(indicators.len(), 5);
        for indicator in &indicators {
            assert_eq!(indicator.score, 50);
            assert_eq!(indicator.status, HealthStatus::Medium);
        }
        let keys: Vec<HealthMetric> = indicators.iter().map(|i| i.key).collect();
        assert_eq!(keys, HealthMetric::ALL.to_vec());
    }

    #[test]
    fn status_boundaries_are_exact() {
        for (raw, expected) in [
            (39.0, HealthStatus::Low),
            (40.0, HealthStatus::Medium),
            (69.0, HealthStatus::Medium),
            (70.0, HealthStatus::High),
        ] {
            let input = BusinessHealthInput {
                traffic_score: Some(raw),
                ..BusinessHealthInput::default()
            };
            let indicators = compute_business_health_indicators(&input);
            assert_eq!(
                indicator(&indicators, HealthMetric::TrafficScore).status,
                expected,
                "traffic score {raw}"
            );
        }
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let input = BusinessHealthInput {
            lead_flow_score: Some(250.0),
            momentum_score: Some(-20.0),
            funnel_strength_score: Some(f64::NAN),
            ..BusinessHealthInput::default()
        };
        let indicators = compute_business_health_indicators(&input);
        let leads = indicator(&indicators, HealthMetric::LeadFlowScore);
        assert_eq!(leads.score, 100);
        assert_eq!(leads.status, HealthStatus::High);
        let momentum = indicator(&indicators, HealthMetric::MomentumScore);
        assert_eq!(momentum.score, 0);
        assert_eq!(momentum.status, HealthStatus::Low);
        assert_eq!(
            indicator(&indicators, HealthMetric::FunnelStrengthScore).score,
            0
        );
    }

    #[test]
    fn description_follows_status_and_suggestion_follows_metric() {
        let input = BusinessHealthInput {
            offer_clarity_score: Some(85.0),
            momentum_score: Some(12.0),
            ..BusinessHealthInput::default()
        };
        let indicators = compute_business_health_indicators(&input);
        let offer = indicator(&indicators, HealthMetric::OfferClarityScore);
        assert_eq!(offer.label, "Offer Clarity");
        assert_eq!(offer.description, "Your offer is clear and compelling.");
        let momentum = indicator(&indicators, HealthMetric::MomentumScore);
        assert!(momentum.description.starts_with("Momentum is low"));
        assert!(momentum.suggestion.starts_with("Adopt a simple weekly plan"));
    }

    #[test]
    fn status_uses_unrounded_score() {
        for (raw, score, expected) in [
            (39.6, 40, HealthStatus::Low),
            (69.5, 70, HealthStatus::Medium),
        ] {
            let input = BusinessHealthInput {
                traffic_score: Some(raw),
                ..BusinessHealthInput::default()
            };
            let indicators = compute_business_health_indicators(&input);
            let traffic = indicator(&indicators, HealthMetric::TrafficScore);
            assert_eq!(traffic.score, score, "traffic score {raw}");
            assert_eq!(traffic.status, expected, "traffic score {raw}");
        }
    }

    #[test]
    fn indicators_serialize_with_source_keys() {
        let indicators = compute_business_health_indicators(&BusinessHealthInput::default());
        let json = serde_json::to_value(&indicators).unwrap();
        assert_eq!(json[0]["key"], "trafficScore");
        assert_eq!(json[3]["key"], "funnelStrengthScore");
        assert_eq!(json[0]["status"], "medium");
    }

    #[test]
    fn mapping_is_repeatable() {
        let input = BusinessHealthInput {
            traffic_score: Some(61.0),
            lead_flow_score: Some(22.0),
            ..BusinessHealthInput::default()
        };
        assert_eq!(
            compute_business_health_indicators(&input),
            compute_business_health_indicators(&input)
        );
    }
}
