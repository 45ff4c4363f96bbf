use anyhow::Context;
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{FounderProfile, Goal, GoalPeriod, GoalType, NewGoal, DEFAULT_GOAL_LABEL};

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub const DEMO_FOUNDER_ID: &str = "a1f0c3e2-5b7d-4c19-9e84-2f6d8b0c7e51";

pub async fn seed(pool: &PgPool) -> anyhow::Result<Uuid> {
    let user_id = Uuid::parse_str(DEMO_FOUNDER_ID)?;

    sqlx::query(
        r#"
        INSERT INTO prospra.founder_profiles
        (user_id, display_name, clarity_score, execution_score, strategy_score,
         consistency_score, market_readiness_score, website_score, journal_consistency,
         traffic_score, lead_flow_score, offer_clarity_score, funnel_strength_score,
         momentum_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (user_id) DO UPDATE
        SET display_name = EXCLUDED.display_name, updated_at = now()
        "#,
    )
    .bind(user_id)
    .bind("Maya Okafor")
    .bind(0.62_f64)
    .bind(0.48_f64)
    .bind(0.55_f64)
    .bind(0.41_f64)
    .bind(0.58_f64)
    .bind(54.0_f64)
    .bind(0.35_f64)
    .bind(60.0_f64)
    .bind(38.0_f64)
    .bind(72.0_f64)
    .bind(55.0_f64)
    .bind(65.0_f64)
    .execute(pool)
    .await?;

    let goals = vec![
        (
            "seed-goal-001",
            GoalType::Revenue,
            "Monthly recurring revenue",
            10_000.0,
            4_200.0,
            GoalPeriod::Monthly,
            NaiveDate::from_ymd_opt(2026, 11, 30).context("invalid date")?,
        ),
        (
            "seed-goal-002",
            GoalType::Audience,
            "Newsletter subscribers",
            2_500.0,
            2_750.0,
            GoalPeriod::Quarterly,
            NaiveDate::from_ymd_opt(2026, 12, 31).context("invalid date")?,
        ),
        (
            "seed-goal-003",
            GoalType::Leads,
            "Discovery calls booked",
            40.0,
            9.0,
            GoalPeriod::Monthly,
            NaiveDate::from_ymd_opt(2026, 11, 30).context("invalid date")?,
        ),
    ];

    for (source_key, goal_type, label, target_value, current_value, period, deadline) in goals {
        insert_goal(
            pool,
            &NewGoal {
                user_id,
                goal_type,
                label: label.to_string(),
                target_value,
                current_value,
                period,
                period_label: None,
                deadline: Some(deadline),
                source_key: source_key.to_string(),
            },
        )
        .await?;
    }

    Ok(user_id)
}

/// Inserts a goal unless its `source_key` is already present. Returns whether
/// a row was written.
pub async fn insert_goal(pool: &PgPool, goal: &NewGoal) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO prospra.goals
        (id, user_id, type, label, target_value, current_value, period,
         period_label, deadline, source_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ON CONFLICT (source_key) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(goal.user_id)
    .bind(goal.goal_type.as_str())
    .bind(&goal.label)
    .bind(goal.target_value)
    .bind(goal.current_value)
    .bind(goal.period.as_str())
    .bind(&goal.period_label)
    .bind(goal.deadline)
    .bind(&goal.source_key)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

fn goal_from_row(row: &PgRow) -> anyhow::Result<Goal> {
    let goal_type: String = row.try_get("type")?;
    let period: String = row.try_get("period")?;

    Ok(Goal {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        goal_type: goal_type.parse()?,
        label: row.try_get("label")?,
        target_value: row.try_get("target_value")?,
        current_value: row.try_get("current_value")?,
        period: period.parse()?,
        period_label: row.try_get("period_label")?,
        deadline: row.try_get("deadline")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub async fn fetch_goals(pool: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Goal>> {
    let rows = sqlx::query(
        r#"
        SELECT id, user_id, type, label, target_value, current_value, period,
               period_label, deadline, created_at, updated_at
        FROM prospra.goals
        WHERE user_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut goals = Vec::with_capacity(rows.len());
    for row in &rows {
        goals.push(goal_from_row(row).context("malformed goal row")?);
    }

    tracing::debug!(%user_id, count = goals.len(), "fetched goals");
    Ok(goals)
}

pub async fn fetch_profile(pool: &PgPool, user_id: Uuid) -> anyhow::Result<Option<FounderProfile>> {
    let row = sqlx::query(
        r#"
        SELECT user_id, display_name, clarity_score, execution_score, strategy_score,
               consistency_score, market_readiness_score, website_score,
               journal_consistency, traffic_score, lead_flow_score,
               offer_clarity_score, funnel_strength_score, momentum_score
        FROM prospra.founder_profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(Some(FounderProfile {
        user_id: row.try_get("user_id")?,
        display_name: row.try_get("display_name")?,
        clarity_score: row.try_get("clarity_score")?,
        execution_score: row.try_get("execution_score")?,
        strategy_score: row.try_get("strategy_score")?,
        consistency_score: row.try_get("consistency_score")?,
        market_readiness_score: row.try_get("market_readiness_score")?,
        website_score: row.try_get("website_score")?,
        journal_consistency: row.try_get("journal_consistency")?,
        traffic_score: row.try_get("traffic_score")?,
        lead_flow_score: row.try_get("lead_flow_score")?,
        offer_clarity_score: row.try_get("offer_clarity_score")?,
        funnel_strength_score: row.try_get("funnel_strength_score")?,
        momentum_score: row.try_get("momentum_score")?,
    }))
}

#[derive(Debug, Deserialize)]
pub struct GoalCsvRow {
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub goal_type: Option<String>,
    pub label: Option<String>,
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub period: Option<String>,
    pub period_label: Option<String>,
    pub deadline: Option<NaiveDate>,
    pub source_key: Option<String>,
}

impl GoalCsvRow {
    /// Applies the goal creation defaults to blank columns.
    pub fn into_new_goal(self) -> anyhow::Result<NewGoal> {
        let goal_type = match self.goal_type.as_deref() {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => GoalType::default(),
        };
        let period = match self.period.as_deref() {
            Some(value) if !value.trim().is_empty() => value.parse()?,
            _ => GoalPeriod::default(),
        };
        let label = self
            .label
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GOAL_LABEL.to_string());
        let source_key = self
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        Ok(NewGoal {
            user_id: self.user_id,
            goal_type,
            label,
            target_value: self.target_value.unwrap_or(0.0),
            current_value: self.current_value.unwrap_or(0.0),
            period,
            period_label: self.period_label,
            deadline: self.deadline,
            source_key,
        })
    }
}

pub async fn import_goals_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut inserted = 0usize;

    for (index, result) in reader.deserialize::<GoalCsvRow>().enumerate() {
        let line = index + 2;
        let goal = result
            .with_context(|| format!("invalid CSV row on line {line}"))?
            .into_new_goal()
            .with_context(|| format!("invalid goal on line {line}"))?;

        if insert_goal(pool, &goal).await? {
            inserted += 1;
        } else {
            tracing::debug!(source_key = %goal.source_key, "goal already imported, skipping");
        }
    }

    tracing::info!(inserted, path = %csv_path.display(), "imported goals");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_row(user_id: Uuid) -> GoalCsvRow {
        GoalCsvRow {
            user_id,
            goal_type: None,
            label: None,
            target_value: None,
            current_value: None,
            period: None,
            period_label: None,
            deadline: None,
            source_key: None,
        }
    }

    #[test]
    fn blank_columns_take_creation_defaults() {
        let user_id = Uuid::new_v4();
        let goal = blank_row(user_id).into_new_goal().unwrap();
        assert_eq!(goal.user_id, user_id);
        assert_eq!(goal.goal_type, GoalType::Revenue);
        assert_eq!(goal.label, "New Goal");
        assert_eq!(goal.target_value, 0.0);
        assert_eq!(goal.current_value, 0.0);
        assert_eq!(goal.period, GoalPeriod::Monthly);
        assert!(goal.source_key.starts_with("import-"));
    }

    #[test]
    fn provided_columns_are_kept() {
        let row = GoalCsvRow {
            goal_type: Some("leads".to_string()),
            label: Some("Demo calls".to_string()),
            target_value: Some(30.0),
            current_value: Some(12.0),
            period: Some("Quarterly".to_string()),
            source_key: Some("crm-77".to_string()),
            ..blank_row(Uuid::new_v4())
        };
        let goal = row.into_new_goal().unwrap();
        assert_eq!(goal.goal_type, GoalType::Leads);
        assert_eq!(goal.period, GoalPeriod::Quarterly);
        assert_eq!(goal.label, "Demo calls");
        assert_eq!(goal.source_key, "crm-77");
    }

    #[test]
    fn unknown_goal_type_is_rejected() {
        let row = GoalCsvRow {
            goal_type: Some("followers".to_string()),
            ..blank_row(Uuid::new_v4())
        };
        assert!(row.into_new_goal().is_err());
    }

    #[test]
    fn csv_rows_deserialize_with_blank_fields() {
        let data = "user_id,type,label,target_value,current_value,period,period_label,deadline,source_key\n\
                    0c22f1f1-9184-4fd4-9b21-28c68a6a89dc,,Launch list,500,,,,2026-12-01,\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let row: GoalCsvRow = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(row.label.as_deref(), Some("Launch list"));
        assert_eq!(row.target_value, Some(500.0));
        assert_eq!(row.current_value, None);
        assert_eq!(row.deadline, NaiveDate::from_ymd_opt(2026, 12, 1));
        assert!(row.source_key.is_none());
    }
}
