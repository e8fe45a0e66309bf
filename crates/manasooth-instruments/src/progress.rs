//! Goal progress, goal evaluation against new results, and goal lifecycle.
//!
//! Scores move in opposite directions depending on the questionnaire: WHO-5
//! improves upward, GAD-7 and PHQ-9 improve downward. Every computation here
//! is direction-aware through [`AssessmentType::higher_is_better`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use manasooth_core::models::assessment::{self, AssessmentType, CompletedAssessmentSet};
use manasooth_core::models::goal::{GoalDefinitionType, GoalStatus, UserGoal};

use crate::error::GoalError;

/// Fraction of the goal achieved, in `[0, 1]`.
pub fn goal_progress(goal: &UserGoal) -> f64 {
    match goal.status {
        GoalStatus::Achieved => return 1.0,
        GoalStatus::Missed | GoalStatus::Archived => return 0.0,
        GoalStatus::Active => {}
    }
    let Some(current) = goal.current_score else {
        return 0.0;
    };

    let start = goal.start_score;
    let target = goal.target_value;
    let higher = goal.assessment_type.higher_is_better();

    let progress = match goal.goal_definition_type {
        GoalDefinitionType::ReachSpecificScore => {
            let total = (target - start).abs();
            if total == 0.0 {
                return if current == target { 1.0 } else { 0.0 };
            }
            let (crossed, started_past, gained) = if higher {
                (current >= target, start >= target, current - start)
            } else {
                (current <= target, start <= target, start - current)
            };
            if crossed {
                1.0
            } else if started_past {
                0.0
            } else {
                gained.clamp(0.0, total) / total
            }
        }
        GoalDefinitionType::ImproveCurrentScore => {
            if target == 0.0 {
                return 0.0;
            }
            let gained = if higher { current - start } else { start - current };
            gained.max(0.0) / target
        }
    };

    progress.clamp(0.0, 1.0)
}

/// [`goal_progress`] as a 0–100 percentage.
pub fn progress_percent(goal: &UserGoal) -> f64 {
    goal_progress(goal) * 100.0
}

/// Whether `score` satisfies the goal's target.
pub fn target_met(goal: &UserGoal, score: f64) -> bool {
    let higher = goal.assessment_type.higher_is_better();
    match goal.goal_definition_type {
        GoalDefinitionType::ReachSpecificScore => {
            if higher {
                score >= goal.target_value
            } else {
                score <= goal.target_value
            }
        }
        GoalDefinitionType::ImproveCurrentScore => {
            let change = score - goal.start_score;
            if higher {
                change >= goal.target_value
            } else {
                change <= -goal.target_value
            }
        }
    }
}

/// What happened to one goal during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalOutcome {
    /// Not active, or no score for its questionnaire in the latest result.
    Untouched,
    /// `current_score` refreshed, status unchanged.
    ScoreUpdated,
    Achieved,
    Missed,
}

/// Refresh an active goal against the most recent completed result.
pub fn evaluate_goal(
    goal: &mut UserGoal,
    latest: &CompletedAssessmentSet,
    now: jiff::Timestamp,
) -> GoalOutcome {
    if !goal.is_active() {
        return GoalOutcome::Untouched;
    }
    let Some(score) = latest.score(goal.assessment_type) else {
        return GoalOutcome::Untouched;
    };
    let score = f64::from(score);
    goal.current_score = Some(score);

    if target_met(goal, score) {
        goal.status = GoalStatus::Achieved;
        GoalOutcome::Achieved
    } else if goal.target_date.is_some_and(|d| d < now) {
        goal.status = GoalStatus::Missed;
        GoalOutcome::Missed
    } else {
        GoalOutcome::ScoreUpdated
    }
}

/// Summary of a [`refresh_goals`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GoalRefresh {
    pub scores_updated: usize,
    pub achieved: Vec<Uuid>,
    pub missed: Vec<Uuid>,
}

impl GoalRefresh {
    pub fn status_changed(&self) -> bool {
        !self.achieved.is_empty() || !self.missed.is_empty()
    }

    /// Whether anything was written into the goals and they need saving.
    pub fn is_dirty(&self) -> bool {
        self.scores_updated > 0 || self.status_changed()
    }
}

/// Evaluate every active goal against the latest entry of `history`.
pub fn refresh_goals(
    goals: &mut [UserGoal],
    history: &[CompletedAssessmentSet],
    now: jiff::Timestamp,
) -> GoalRefresh {
    let mut summary = GoalRefresh::default();
    let Some(latest) = assessment::latest(history) else {
        return summary;
    };
    for goal in goals.iter_mut() {
        match evaluate_goal(goal, latest, now) {
            GoalOutcome::Untouched => {}
            GoalOutcome::ScoreUpdated => summary.scores_updated += 1,
            GoalOutcome::Achieved => {
                summary.scores_updated += 1;
                summary.achieved.push(goal.id);
            }
            GoalOutcome::Missed => {
                summary.scores_updated += 1;
                summary.missed.push(goal.id);
            }
        }
    }
    summary
}

/// User-supplied fields for creating or editing a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct GoalDraft {
    pub assessment_type: AssessmentType,
    pub goal_definition_type: GoalDefinitionType,
    pub target_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub target_date: Option<jiff::Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub notes: Option<String>,
}

/// Generated goal description, e.g.
/// `"Improve GAD-7 Anxiety Assessment score by 5 points (current goal: decrease score). By June 1, 2025."`
pub fn describe_goal(draft: &GoalDraft) -> String {
    let name = draft.assessment_type.display_name();
    let target = format_number(draft.target_value);
    let mut description = match draft.goal_definition_type {
        GoalDefinitionType::ReachSpecificScore => {
            format!("Reach a score of {target} for {name}.")
        }
        GoalDefinitionType::ImproveCurrentScore => {
            let direction = if draft.assessment_type.higher_is_better() {
                "increase"
            } else {
                "decrease"
            };
            format!("Improve {name} score by {target} points (current goal: {direction} score).")
        }
    };
    if let Some(date) = draft.target_date {
        description.push_str(&format!(" By {}.", date.strftime("%B %-d, %Y")));
    }
    description
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Build a goal from a draft. The start score is the latest result for the
/// draft's questionnaire; a reach goal without one starts at 0, an
/// improvement goal without one is rejected.
///
/// When `existing` is given the goal is an edit: its id, start date, and
/// status carry over, and its current score carries over if the
/// questionnaire did not change.
pub fn build_goal(
    draft: &GoalDraft,
    existing: Option<&UserGoal>,
    history: &[CompletedAssessmentSet],
    now: jiff::Timestamp,
) -> Result<UserGoal, GoalError> {
    if draft.target_value < 0.0 || draft.target_value.is_nan() {
        return Err(GoalError::NegativeTarget(draft.target_value));
    }

    let start_score = assessment::latest(history)
        .and_then(|s| s.score(draft.assessment_type))
        .map(f64::from);

    if start_score.is_none()
        && draft.goal_definition_type == GoalDefinitionType::ImproveCurrentScore
    {
        return Err(GoalError::MissingStartScore(draft.assessment_type));
    }

    let current_score = existing
        .filter(|g| g.assessment_type == draft.assessment_type)
        .and_then(|g| g.current_score);

    Ok(UserGoal {
        id: existing.map_or_else(Uuid::new_v4, |g| g.id),
        assessment_type: draft.assessment_type,
        goal_definition_type: draft.goal_definition_type,
        target_value: draft.target_value,
        target_date: draft.target_date,
        start_date: existing.map_or(now, |g| g.start_date),
        status: existing.map_or(GoalStatus::Active, |g| g.status),
        start_score: start_score.unwrap_or(0.0),
        current_score,
        notes: draft.notes.clone().filter(|n| !n.trim().is_empty()),
        description: Some(describe_goal(draft)),
    })
}

/// Apply a user-requested status change.
///
/// Allowed: mark an active goal achieved; mark an active goal missed once
/// its target date has passed; reactivate any non-active goal; archive any
/// goal not already archived.
pub fn transition(
    goal: &mut UserGoal,
    to: GoalStatus,
    now: jiff::Timestamp,
) -> Result<(), GoalError> {
    let from = goal.status;
    let allowed = match (from, to) {
        (GoalStatus::Active, GoalStatus::Achieved) => true,
        (GoalStatus::Active, GoalStatus::Missed) => goal.target_date.is_some_and(|d| d < now),
        (GoalStatus::Active, GoalStatus::Active) => false,
        (_, GoalStatus::Active) => true,
        (GoalStatus::Archived, GoalStatus::Archived) => false,
        (_, GoalStatus::Archived) => true,
        _ => false,
    };
    if !allowed {
        return Err(GoalError::InvalidTransition { from, to });
    }
    goal.status = to;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> jiff::Timestamp {
        s.parse().unwrap()
    }

    fn goal(
        assessment: AssessmentType,
        kind: GoalDefinitionType,
        start: f64,
        target: f64,
        current: Option<f64>,
    ) -> UserGoal {
        UserGoal {
            id: Uuid::new_v4(),
            assessment_type: assessment,
            goal_definition_type: kind,
            target_value: target,
            target_date: None,
            start_date: ts("2025-01-01T00:00:00Z"),
            status: GoalStatus::Active,
            start_score: start,
            current_score: current,
            notes: None,
            description: None,
        }
    }

    fn result(at: &str, who5: Option<u32>, gad7: Option<u32>, phq9: Option<u32>) -> CompletedAssessmentSet {
        CompletedAssessmentSet {
            date: ts(at),
            who5_score: who5,
            gad7_score: gad7,
            phq9_score: phq9,
            ai_feedback: None,
            ai_recommendations: None,
            requires_consultation: None,
        }
    }

    use AssessmentType::*;
    use GoalDefinitionType::*;

    #[test]
    fn reach_higher_is_better_is_linear_between_start_and_target() {
        let g = goal(Who5, ReachSpecificScore, 40.0, 80.0, Some(60.0));
        assert_eq!(goal_progress(&g), 0.5);
        assert_eq!(progress_percent(&g), 50.0);
    }

    #[test]
    fn reach_lower_is_better_is_linear_between_start_and_target() {
        let g = goal(Gad7, ReachSpecificScore, 15.0, 5.0, Some(12.0));
        assert!((goal_progress(&g) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn reach_is_complete_once_target_crossed() {
        assert_eq!(goal_progress(&goal(Who5, ReachSpecificScore, 40.0, 80.0, Some(92.0))), 1.0);
        assert_eq!(goal_progress(&goal(Phq9, ReachSpecificScore, 20.0, 8.0, Some(3.0))), 1.0);
    }

    #[test]
    fn reach_moving_the_wrong_way_is_zero() {
        assert_eq!(goal_progress(&goal(Who5, ReachSpecificScore, 40.0, 80.0, Some(20.0))), 0.0);
        assert_eq!(goal_progress(&goal(Gad7, ReachSpecificScore, 10.0, 4.0, Some(15.0))), 0.0);
    }

    #[test]
    fn reach_starting_past_target_is_zero_until_crossed() {
        // start already above a lower-is-better target is the normal case;
        // start below it means the target was met before the goal existed.
        let g = goal(Gad7, ReachSpecificScore, 3.0, 5.0, Some(7.0));
        assert_eq!(goal_progress(&g), 0.0);
        let g = goal(Gad7, ReachSpecificScore, 3.0, 5.0, Some(4.0));
        assert_eq!(goal_progress(&g), 1.0);
    }

    #[test]
    fn reach_with_zero_range_is_all_or_nothing() {
        assert_eq!(goal_progress(&goal(Who5, ReachSpecificScore, 60.0, 60.0, Some(60.0))), 1.0);
        assert_eq!(goal_progress(&goal(Who5, ReachSpecificScore, 60.0, 60.0, Some(64.0))), 0.0);
    }

    #[test]
    fn improve_by_points_respects_direction() {
        assert_eq!(goal_progress(&goal(Who5, ImproveCurrentScore, 40.0, 20.0, Some(50.0))), 0.5);
        assert_eq!(goal_progress(&goal(Phq9, ImproveCurrentScore, 18.0, 6.0, Some(15.0))), 0.5);
        assert_eq!(goal_progress(&goal(Phq9, ImproveCurrentScore, 18.0, 6.0, Some(20.0))), 0.0);
        assert_eq!(goal_progress(&goal(Who5, ImproveCurrentScore, 40.0, 8.0, Some(80.0))), 1.0);
    }

    #[test]
    fn improve_with_zero_target_is_zero() {
        assert_eq!(goal_progress(&goal(Gad7, ImproveCurrentScore, 12.0, 0.0, Some(2.0))), 0.0);
    }

    #[test]
    fn status_and_missing_score_short_circuit() {
        let mut g = goal(Who5, ReachSpecificScore, 40.0, 80.0, None);
        assert_eq!(goal_progress(&g), 0.0);
        g.current_score = Some(60.0);
        g.status = GoalStatus::Achieved;
        assert_eq!(goal_progress(&g), 1.0);
        g.status = GoalStatus::Missed;
        assert_eq!(goal_progress(&g), 0.0);
        g.status = GoalStatus::Archived;
        assert_eq!(goal_progress(&g), 0.0);
    }

    #[test]
    fn evaluation_marks_goals_achieved_or_missed() {
        let now = ts("2025-06-01T00:00:00Z");
        let latest = result("2025-05-30T00:00:00Z", Some(72), Some(9), None);

        let mut reach = goal(Who5, ReachSpecificScore, 40.0, 70.0, None);
        assert_eq!(evaluate_goal(&mut reach, &latest, now), GoalOutcome::Achieved);
        assert_eq!(reach.current_score, Some(72.0));

        let mut improve = goal(Gad7, ImproveCurrentScore, 12.0, 5.0, None);
        improve.target_date = Some(ts("2025-05-01T00:00:00Z"));
        assert_eq!(evaluate_goal(&mut improve, &latest, now), GoalOutcome::Missed);
        assert_eq!(improve.status, GoalStatus::Missed);

        let mut pending = goal(Gad7, ImproveCurrentScore, 12.0, 3.0, None);
        assert_eq!(evaluate_goal(&mut pending, &latest, now), GoalOutcome::Achieved);

        let mut no_score = goal(Phq9, ReachSpecificScore, 20.0, 5.0, None);
        no_score.target_date = Some(ts("2025-05-01T00:00:00Z"));
        assert_eq!(evaluate_goal(&mut no_score, &latest, now), GoalOutcome::Untouched);
        assert_eq!(no_score.status, GoalStatus::Active);
    }

    #[test]
    fn evaluation_leaves_inactive_goals_alone() {
        let now = ts("2025-06-01T00:00:00Z");
        let latest = result("2025-05-30T00:00:00Z", Some(90), None, None);
        let mut g = goal(Who5, ReachSpecificScore, 40.0, 70.0, None);
        g.status = GoalStatus::Archived;
        assert_eq!(evaluate_goal(&mut g, &latest, now), GoalOutcome::Untouched);
        assert_eq!(g.current_score, None);
    }

    #[test]
    fn refresh_uses_latest_result_by_date() {
        let now = ts("2025-06-01T00:00:00Z");
        let history = vec![
            result("2025-05-20T00:00:00Z", Some(30), None, None),
            result("2025-04-20T00:00:00Z", Some(95), None, None),
        ];
        let mut goals = vec![
            goal(Who5, ReachSpecificScore, 40.0, 70.0, None),
            goal(Gad7, ReachSpecificScore, 12.0, 4.0, None),
        ];
        let summary = refresh_goals(&mut goals, &history, now);
        assert_eq!(summary.scores_updated, 1);
        assert!(!summary.status_changed());
        assert!(summary.is_dirty());
        assert_eq!(goals[0].current_score, Some(30.0));

        let empty = refresh_goals(&mut goals, &[], now);
        assert!(!empty.is_dirty());
    }

    #[test]
    fn descriptions_name_target_and_direction() {
        let mut draft = GoalDraft {
            assessment_type: Gad7,
            goal_definition_type: ImproveCurrentScore,
            target_value: 5.0,
            target_date: None,
            notes: None,
        };
        assert_eq!(
            describe_goal(&draft),
            "Improve GAD-7 Anxiety Assessment score by 5 points (current goal: decrease score)."
        );

        draft.assessment_type = Who5;
        draft.goal_definition_type = ReachSpecificScore;
        draft.target_value = 72.0;
        draft.target_date = Some(ts("2025-06-01T12:00:00Z"));
        assert_eq!(
            describe_goal(&draft),
            "Reach a score of 72 for WHO-5 Well-being Index. By June 1, 2025."
        );
    }

    #[test]
    fn build_goal_takes_start_score_from_latest_result() {
        let now = ts("2025-06-01T00:00:00Z");
        let history = vec![
            result("2025-05-01T00:00:00Z", None, Some(14), None),
            result("2025-05-20T00:00:00Z", None, Some(11), None),
        ];
        let draft = GoalDraft {
            assessment_type: Gad7,
            goal_definition_type: ImproveCurrentScore,
            target_value: 4.0,
            target_date: None,
            notes: Some("  ".to_string()),
        };
        let g = build_goal(&draft, None, &history, now).unwrap();
        assert_eq!(g.start_score, 11.0);
        assert_eq!(g.status, GoalStatus::Active);
        assert_eq!(g.start_date, now);
        assert_eq!(g.notes, None);
        assert!(g.description.is_some());
    }

    #[test]
    fn build_goal_requires_score_for_improvement_only() {
        let now = ts("2025-06-01T00:00:00Z");
        let mut draft = GoalDraft {
            assessment_type: Phq9,
            goal_definition_type: ImproveCurrentScore,
            target_value: 4.0,
            target_date: None,
            notes: None,
        };
        assert!(matches!(
            build_goal(&draft, None, &[], now),
            Err(GoalError::MissingStartScore(Phq9))
        ));

        draft.goal_definition_type = ReachSpecificScore;
        assert_eq!(build_goal(&draft, None, &[], now).unwrap().start_score, 0.0);

        draft.target_value = -1.0;
        assert!(matches!(
            build_goal(&draft, None, &[], now),
            Err(GoalError::NegativeTarget(_))
        ));
    }

    #[test]
    fn editing_keeps_identity_and_status() {
        let now = ts("2025-06-01T00:00:00Z");
        let mut existing = goal(Who5, ReachSpecificScore, 40.0, 70.0, Some(55.0));
        existing.status = GoalStatus::Missed;
        let draft = GoalDraft {
            assessment_type: Who5,
            goal_definition_type: ReachSpecificScore,
            target_value: 65.0,
            target_date: None,
            notes: None,
        };
        let edited = build_goal(&draft, Some(&existing), &[], now).unwrap();
        assert_eq!(edited.id, existing.id);
        assert_eq!(edited.start_date, existing.start_date);
        assert_eq!(edited.status, GoalStatus::Missed);
        assert_eq!(edited.current_score, Some(55.0));
        assert_eq!(edited.target_value, 65.0);
    }

    #[test]
    fn transitions_follow_goal_card_rules() {
        let now = ts("2025-06-01T00:00:00Z");
        let mut g = goal(Who5, ReachSpecificScore, 40.0, 70.0, None);

        assert!(transition(&mut g, GoalStatus::Missed, now).is_err());
        g.target_date = Some(ts("2025-05-01T00:00:00Z"));
        transition(&mut g, GoalStatus::Missed, now).unwrap();
        assert_eq!(g.status, GoalStatus::Missed);

        assert!(transition(&mut g, GoalStatus::Achieved, now).is_err());
        transition(&mut g, GoalStatus::Archived, now).unwrap();
        assert!(matches!(
            transition(&mut g, GoalStatus::Archived, now),
            Err(GoalError::InvalidTransition { from: GoalStatus::Archived, to: GoalStatus::Archived })
        ));
        transition(&mut g, GoalStatus::Active, now).unwrap();
        assert!(transition(&mut g, GoalStatus::Active, now).is_err());
        transition(&mut g, GoalStatus::Achieved, now).unwrap();
    }
}
