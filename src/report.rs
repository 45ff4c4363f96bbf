use std::fmt::Write;

use chrono::NaiveDate;

use crate::founder::{compute_founder_score, FounderScoreResult};
use crate::goals::{average_goal_progress, compute_goal_progress, goal_status};
use crate::health::compute_business_health_indicators;
use crate::models::{FounderProfile, Goal};

/// Founder score for a profile, fed by the average progress of its goals.
/// A profile without goals falls back to the engine's default goal progress.
pub fn founder_score_for(profile: &FounderProfile, goals: &[Goal]) -> FounderScoreResult {
    let goal_progress = if goals.is_empty() {
        None
    } else {
        Some(average_goal_progress(goals))
    };
    compute_founder_score(&profile.founder_signals(goal_progress))
}

pub fn build_report(profile: &FounderProfile, goals: &[Goal], generated_on: NaiveDate) -> String {
    let founder = founder_score_for(profile, goals);
    let health = compute_business_health_indicators(&profile.health_input());

    let mut output = String::new();
    let name = profile.display_name.as_deref().unwrap_or("Founder");

    let _ = writeln!(output, "# Founder Dashboard");
    let _ = writeln!(output, "Generated for {} on {}", name, generated_on);
    let _ = writeln!(output);
    let _ = writeln!(output, "## Founder Score");
    let _ = writeln!(output, "**{}/100** ({})", founder.total_score, founder.tier);
    let _ = writeln!(output);
    let _ = writeln!(output, "{}", founder.summary);
    let _ = writeln!(output);

    for (pillar, score) in founder.subscores.pillars() {
        let _ = writeln!(output, "- {}: {}", pillar.label(), score);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "### Recommendations");
    for (index, recommendation) in founder.recommendations.iter().enumerate() {
        let _ = writeln!(output, "{}. {}", index + 1, recommendation);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Business Health");
    for indicator in &health {
        let _ = writeln!(
            output,
            "- {}: {} ({}) {} {}",
            indicator.label,
            indicator.score,
            indicator.status.as_str(),
            indicator.description,
            indicator.suggestion
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Goals");

    if goals.is_empty() {
        let _ = writeln!(output, "No goals recorded yet.");
    } else {
        for goal in goals {
            let deadline = goal
                .deadline
                .map(|date| format!(", due {date}"))
                .unwrap_or_default();
            let _ = writeln!(
                output,
                "- {} ({}, {}{}): {} / {} ({:.0}%) {}",
                goal.label,
                goal.goal_type.as_str(),
                goal.period.as_str(),
                deadline,
                goal.current_value,
                goal.target_value,
                compute_goal_progress(goal) * 100.0,
                goal_status(goal)
            );
        }
        let _ = writeln!(output);
        let _ = writeln!(
            output,
            "Average progress: {:.0}%",
            average_goal_progress(goals) * 100.0
        );
    }

    output
}
