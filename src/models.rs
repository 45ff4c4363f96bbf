use std::str::FromStr;

use anyhow::bail;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::founder::FounderSignalInput;
use crate::health::BusinessHealthInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    #[default]
    Revenue,
    Audience,
    Leads,
    Custom,
}

impl GoalType {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalType::Revenue => "revenue",
            GoalType::Audience => "audience",
            GoalType::Leads => "leads",
            GoalType::Custom => "custom",
        }
    }
}

impl FromStr for GoalType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "revenue" => Ok(GoalType::Revenue),
            "audience" => Ok(GoalType::Audience),
            "leads" => Ok(GoalType::Leads),
            "custom" => Ok(GoalType::Custom),
            other => bail!("unknown goal type `{other}`"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl GoalPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalPeriod::Monthly => "monthly",
            GoalPeriod::Quarterly => "quarterly",
            GoalPeriod::Yearly => "yearly",
        }
    }
}

impl FromStr for GoalPeriod {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(GoalPeriod::Monthly),
            "quarterly" => Ok(GoalPeriod::Quarterly),
            "yearly" => Ok(GoalPeriod::Yearly),
            other => bail!("unknown goal period `{other}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub label: String,
    pub target_value: f64,
    pub current_value: f64,
    pub period: GoalPeriod,
    pub period_label: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A goal about to be inserted, with the creation defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGoal {
    pub user_id: Uuid,
    pub goal_type: GoalType,
    pub label: String,
    pub target_value: f64,
    pub current_value: f64,
    pub period: GoalPeriod,
    pub period_label: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub source_key: String,
}

pub const DEFAULT_GOAL_LABEL: &str = "New Goal";

/// Stored founder profile. Every score is optional; the scoring modules fill
/// the gaps with their own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FounderProfile {
    pub user_id: Uuid,
    pub display_name: Option<String>,
    pub clarity_score: Option<f64>,
    pub execution_score: Option<f64>,
    pub strategy_score: Option<f64>,
    pub consistency_score: Option<f64>,
    pub market_readiness_score: Option<f64>,
    pub website_score: Option<f64>,
    pub journal_consistency: Option<f64>,
    pub traffic_score: Option<f64>,
    pub lead_flow_score: Option<f64>,
    pub offer_clarity_score: Option<f64>,
    pub funnel_strength_score: Option<f64>,
    pub momentum_score: Option<f64>,
}

impl FounderProfile {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    pub fn founder_signals(&self, goal_progress: Option<f64>) -> FounderSignalInput {
        FounderSignalInput {
            clarity: self.clarity_score,
            execution: self.execution_score,
            strategy: self.strategy_score,
            consistency: self.consistency_score,
            market_readiness: self.market_readiness_score,
            website_score: self.website_score,
            journal_consistency: self.journal_consistency,
            goal_progress,
        }
    }

    pub fn health_input(&self) -> BusinessHealthInput {
        BusinessHealthInput {
            traffic_score: self.traffic_score,
            lead_flow_score: self.lead_flow_score,
            offer_clarity_score: self.offer_clarity_score,
            funnel_strength_score: self.funnel_strength_score,
            momentum_score: self.momentum_score,
        }
    }
}
