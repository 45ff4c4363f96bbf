use std::fmt;

use serde::{Deserialize, Serialize};

use crate::normalize::{clamp01, clamp100, lenient_f64};

/// Stand-in for a primary signal the caller could not supply. Kept below the
/// midpoint so missing data never inflates a score.
pub const DEFAULT_PRIMARY_SIGNAL: f64 = 0.4;
pub const DEFAULT_WEBSITE_SCORE: f64 = 0.0;
pub const DEFAULT_JOURNAL_CONSISTENCY: f64 = 0.0;
pub const DEFAULT_GOAL_PROGRESS: f64 = 0.0;

const CLARITY_WEIGHT: f64 = 0.22;
const EXECUTION_WEIGHT: f64 = 0.24;
const STRATEGY_WEIGHT: f64 = 0.22;
const CONSISTENCY_WEIGHT: f64 = 0.18;
const MARKET_READINESS_WEIGHT: f64 = 0.14;

const WEBSITE_BONUS_WEIGHT: f64 = 0.15;
const JOURNAL_BONUS_WEIGHT: f64 = 0.10;
const GOAL_BONUS_WEIGHT: f64 = 0.15;
// Caps the combined bonus at 0.16 of the final scale.
const BONUS_DAMPING: f64 = 0.4;

const WEBSITE_ADVICE_BELOW: f64 = 60.0;
const GOAL_ADVICE_BELOW: f64 = 0.5;

const WEBSITE_ADVICE: &str = "Run a website UX & clarity pass. Your homepage should clearly say who you help, what outcome you deliver, and your main call-to-action.";
const GOAL_ADVICE: &str = "Rework your goals into smaller, weekly milestones and add an explicit 'next action' for each.";

/// Raw founder signals as they arrive from a profile or request body.
///
/// Primary signals are 0–1 ratios, `website_score` is 0–100 and the other two
/// bonus signals are 0–1. Absent fields fall back to the `DEFAULT_*` constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderSignalInput {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub clarity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub execution: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub strategy: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub consistency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub market_readiness: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub website_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub journal_consistency: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub goal_progress: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderSubscores {
    pub clarity: u8,
    pub execution: u8,
    pub strategy: u8,
    pub consistency: u8,
    pub market_readiness: u8,
}

impl FounderSubscores {
    /// Subscores in the order used to break ties for the weakest pillar.
    pub fn pillars(&self) -> [(Pillar, u8); 5] {
        [
            (Pillar::Clarity, self.clarity),
            (Pillar::Execution, self.execution),
            (Pillar::Strategy, self.strategy),
            (Pillar::Consistency, self.consistency),
            (Pillar::MarketReadiness, self.market_readiness),
        ]
    }

    pub fn weakest(&self) -> Pillar {
        let mut weakest = (Pillar::Clarity, self.clarity);
        for (pillar, score) in self.pillars() {
            if score < weakest.1 {
                weakest = (pillar, score);
            }
        }
        weakest.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pillar {
    Clarity,
    Execution,
    Strategy,
    Consistency,
    MarketReadiness,
}

impl Pillar {
    pub fn label(self) -> &'static str {
        match self {
            Pillar::Clarity => "Clarity",
            Pillar::Execution => "Execution",
            Pillar::Strategy => "Strategy",
            Pillar::Consistency => "Consistency",
            Pillar::MarketReadiness => "Market Readiness",
        }
    }

    pub fn advice(self) -> &'static str {
        match self {
            Pillar::Clarity => "Tighten your core offer and one-liner. Make sure a stranger can understand exactly who you help and how in under 10 seconds.",
            Pillar::Execution => "Shift from planning to shipping. Commit to one needle-moving task per day and track it in your system.",
            Pillar::Strategy => "Zoom out and map your funnel: traffic → leads → conversations → sales. Make sure each step has at least one reliable tactic.",
            Pillar::Consistency => "Set smaller, repeatable commitments instead of big sporadic pushes. Momentum > intensity.",
            Pillar::MarketReadiness => "Talk to 5–10 ideal customers this week. Validate pains, language, and willingness to pay before overbuilding.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FounderTier {
    #[serde(rename = "Struggling Starter")]
    StrugglingStarter,
    #[serde(rename = "Finding Their Footing")]
    FindingTheirFooting,
    #[serde(rename = "Emerging Operator")]
    EmergingOperator,
    #[serde(rename = "Momentum Builder")]
    MomentumBuilder,
    #[serde(rename = "Scaling Strategist")]
    ScalingStrategist,
    #[serde(rename = "Elite Founder")]
    EliteFounder,
}

impl FounderTier {
    pub fn label(self) -> &'static str {
        match self {
            FounderTier::StrugglingStarter => "Struggling Starter",
            FounderTier::FindingTheirFooting => "Finding Their Footing",
            FounderTier::EmergingOperator => "Emerging Operator",
            FounderTier::MomentumBuilder => "Momentum Builder",
            FounderTier::ScalingStrategist => "Scaling Strategist",
            FounderTier::EliteFounder => "Elite Founder",
        }
    }
}

impl fmt::Display for FounderTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Exclusive upper bounds, ascending. Scores at or above the last cutoff are
/// Elite Founder.
const TIER_CUTOFFS: [(u8, FounderTier); 5] = [
    (30, FounderTier::StrugglingStarter),
    (45, FounderTier::FindingTheirFooting),
    (60, FounderTier::EmergingOperator),
    (75, FounderTier::MomentumBuilder),
    (90, FounderTier::ScalingStrategist),
];

pub fn tier_for_score(total: u8) -> FounderTier {
    TIER_CUTOFFS
        .iter()
        .find(|(cutoff, _)| total < *cutoff)
        .map(|(_, tier)| *tier)
        .unwrap_or(FounderTier::EliteFounder)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FounderScoreResult {
    pub total_score: u8,
    pub subscores: FounderSubscores,
    pub tier: FounderTier,
    pub summary: String,
    pub recommendations: Vec<String>,
}

struct NormalizedSignals {
    clarity: f64,
    execution: f64,
    strategy: f64,
    consistency: f64,
    market_readiness: f64,
    website_score: f64,
    journal_consistency: f64,
    goal_progress: f64,
}

impl NormalizedSignals {
    fn from_input(input: &FounderSignalInput) -> Self {
        let primary = |value: Option<f64>| clamp01(value.unwrap_or(DEFAULT_PRIMARY_SIGNAL));
        Self {
            clarity: primary(input.clarity),
            execution: primary(input.execution),
            strategy: primary(input.strategy),
            consistency: primary(input.consistency),
            market_readiness: primary(input.market_readiness),
            website_score: clamp100(input.website_score.unwrap_or(DEFAULT_WEBSITE_SCORE)),
            journal_consistency: clamp01(
                input
                    .journal_consistency
                    .unwrap_or(DEFAULT_JOURNAL_CONSISTENCY),
            ),
            goal_progress: clamp01(input.goal_progress.unwrap_or(DEFAULT_GOAL_PROGRESS)),
        }
    }

    fn subscores(&self) -> FounderSubscores {
        let to_score = |ratio: f64| (ratio * 100.0).round() as u8;
        FounderSubscores {
            clarity: to_score(self.clarity),
            execution: to_score(self.execution),
            strategy: to_score(self.strategy),
            consistency: to_score(self.consistency),
            market_readiness: to_score(self.market_readiness),
        }
    }

    fn base_score(&self) -> f64 {
        self.clarity * CLARITY_WEIGHT
            + self.execution * EXECUTION_WEIGHT
            + self.strategy * STRATEGY_WEIGHT
            + self.consistency * CONSISTENCY_WEIGHT
            + self.market_readiness * MARKET_READINESS_WEIGHT
    }

    fn bonus(&self) -> f64 {
        let website_boost = self.website_score / 100.0;
        (website_boost * WEBSITE_BONUS_WEIGHT
            + self.journal_consistency * JOURNAL_BONUS_WEIGHT
            + self.goal_progress * GOAL_BONUS_WEIGHT)
            * BONUS_DAMPING
    }
}

pub fn compute_founder_score(input: &FounderSignalInput) -> FounderScoreResult {
    let signals = NormalizedSignals::from_input(input);
    let subscores = signals.subscores();

    let total = (clamp01(signals.base_score() + signals.bonus()) * 100.0).round() as u8;
    let tier = tier_for_score(total);

    let mut recommendations = vec![subscores.weakest().advice().to_string()];
    if signals.website_score < WEBSITE_ADVICE_BELOW {
        recommendations.push(WEBSITE_ADVICE.to_string());
    }
    if signals.goal_progress < GOAL_ADVICE_BELOW {
        recommendations.push(GOAL_ADVICE.to_string());
    }

    let summary = format!(
        "Your current Founder Score is {total}/100 – you’re in the “{tier}” tier. \
         Focus on your weakest pillar first to unlock the biggest jump in momentum."
    );

    FounderScoreResult {
        total_score: total,
        subscores,
        tier,
        summary,
        recommendations,
    }
}
