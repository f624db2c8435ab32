//! Step planner: turns an ordered list of brew steps into a timeline.

use serde::{Deserialize, Serialize};

use crate::models::RecipeStep;

/// One brew step scheduled on the session timeline.
///
/// Derived fresh whenever a plan is built and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedStep {
    /// Position within the plan
    pub index: usize,
    pub step: RecipeStep,
    pub start_sec: u32,
    pub end_sec: u32,
    /// `end_sec - start_sec`, always at least 1
    pub duration_sec: u32,
    /// Cumulative pour target of the closest earlier step that had one
    pub prev_pour_target: Option<f64>,
    /// Grams to add during this step; `None` when the step has no target
    pub pour_delta: Option<f64>,
}

impl PlannedStep {
    /// Whether the session clock has reached the end of this step.
    pub fn is_complete_at(&self, elapsed_sec: u32) -> bool {
        elapsed_sec >= self.end_sec
    }

    /// Seconds left in the step at `elapsed_sec`.
    pub fn countdown(&self, elapsed_sec: u32) -> u32 {
        self.end_sec.saturating_sub(elapsed_sec)
    }

    /// Share of the step already elapsed, 0 to 100.
    pub fn progress_pct(&self, elapsed_sec: u32) -> f64 {
        let into_step = elapsed_sec.saturating_sub(self.start_sec);
        (f64::from(into_step) / f64::from(self.duration_sec.max(1)) * 100.0).min(100.0)
    }
}

/// Schedules steps in the order given, in a single forward pass.
///
/// For each step the start is its explicit window start or the running
/// cursor. The end is the first available of: explicit window end, start plus
/// duration, the next step's explicit start (when later than this start), or
/// start plus the type's fallback duration. Every step lasts at least one
/// second, and the cursor moves to the step's end.
pub fn build_step_plan(steps: &[RecipeStep]) -> Vec<PlannedStep> {
    let mut plan = Vec::with_capacity(steps.len());
    let mut cursor: u32 = 0;
    let mut last_pour_target: Option<f64> = None;

    for (index, step) in steps.iter().enumerate() {
        let start_sec = step.window_start_sec.unwrap_or(cursor);

        let end_by_duration = step.duration_sec.map(|duration| start_sec.saturating_add(duration));
        let end_by_next_start = steps
            .get(index + 1)
            .and_then(|next| next.window_start_sec)
            .filter(|next_start| *next_start > start_sec);
        let raw_end = step
            .window_end_sec
            .or(end_by_duration)
            .or(end_by_next_start)
            .unwrap_or_else(|| start_sec.saturating_add(step.step_type.fallback_duration_sec()));
        let end_sec = raw_end.max(start_sec.saturating_add(1));

        let target = step.pour_target();
        let pour_delta = target.map(|grams| (grams - last_pour_target.unwrap_or(0.0)).max(0.0));

        plan.push(PlannedStep {
            index,
            step: step.clone(),
            start_sec,
            end_sec,
            duration_sec: end_sec - start_sec,
            prev_pour_target: last_pour_target,
            pour_delta,
        });

        if target.is_some() {
            last_pour_target = target;
        }
        cursor = end_sec;
    }

    plan
}

/// End of the last planned step, or 0 for an empty plan.
pub fn total_timeline_sec(plan: &[PlannedStep]) -> u32 {
    plan.last().map_or(0, |planned| planned.end_sec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        fixtures::{pour, timed},
        StepType,
    };

    fn starts(plan: &[PlannedStep]) -> Vec<u32> {
        plan.iter().map(|p| p.start_sec).collect()
    }

    fn ends(plan: &[PlannedStep]) -> Vec<u32> {
        plan.iter().map(|p| p.end_sec).collect()
    }

    #[test]
    fn test_durations_and_pour_fallback() {
        let steps = vec![
            timed(0, StepType::Wait, "Bloom and wait", Some(45)),
            timed(1, StepType::Stir, "Stir", Some(30)),
            pour(2, 300.0, None),
        ];
        let plan = build_step_plan(&steps);

        assert_eq!(starts(&plan), vec![0, 45, 75]);
        assert_eq!(ends(&plan), vec![45, 75, 93]);
        assert_eq!(plan[2].duration_sec, 18);
        assert_eq!(total_timeline_sec(&plan), 93);
    }

    #[test]
    fn test_non_pour_fallback_is_thirty_seconds() {
        let plan = build_step_plan(&[timed(0, StepType::Serve, "Serve", None)]);
        assert_eq!(ends(&plan), vec![30]);
    }

    #[test]
    fn test_explicit_window_end_beats_duration() {
        let mut step = timed(0, StepType::Wait, "Steep", Some(90));
        step.window_end_sec = Some(40);
        let plan = build_step_plan(&[step]);
        assert_eq!(plan[0].end_sec, 40);
    }

    #[test]
    fn test_next_explicit_start_closes_open_step() {
        let first = timed(0, StepType::Stir, "Stir", None);
        let mut second = timed(1, StepType::Wait, "Wait", None);
        second.window_start_sec = Some(50);
        let plan = build_step_plan(&[first, second]);

        assert_eq!(ends(&plan), vec![50, 80]);
        assert_eq!(starts(&plan), vec![0, 50]);
    }

    #[test]
    fn test_later_explicit_start_leaves_gap() {
        let first = timed(0, StepType::Wait, "Wait", Some(20));
        let mut second = timed(1, StepType::Press, "Press", Some(15));
        second.window_start_sec = Some(60);
        let plan = build_step_plan(&[first, second]);

        assert_eq!(starts(&plan), vec![0, 60]);
        assert_eq!(ends(&plan), vec![20, 75]);
    }

    #[test]
    fn test_contradictory_window_clamps_to_one_second() {
        let mut step = timed(0, StepType::Wait, "Wait", None);
        step.window_start_sec = Some(30);
        step.window_end_sec = Some(10);
        let plan = build_step_plan(&[step]);

        assert_eq!(plan[0].start_sec, 30);
        assert_eq!(plan[0].end_sec, 31);
        assert_eq!(plan[0].duration_sec, 1);
    }

    #[test]
    fn test_zero_duration_still_occupies_one_second() {
        let plan = build_step_plan(&[timed(0, StepType::Stir, "Quick stir", Some(0))]);
        assert_eq!(plan[0].duration_sec, 1);
    }

    #[test]
    fn test_pour_deltas_track_previous_target() {
        let steps = vec![
            pour(0, 60.0, Some(45)),
            timed(1, StepType::Wait, "Wait", Some(10)),
            pour(2, 210.0, Some(30)),
            pour(3, 180.0, Some(10)),
        ];
        let plan = build_step_plan(&steps);

        assert_eq!(plan[0].prev_pour_target, None);
        assert_eq!(plan[0].pour_delta, Some(60.0));
        assert_eq!(plan[1].pour_delta, None);
        assert_eq!(plan[1].prev_pour_target, Some(60.0));
        assert_eq!(plan[2].pour_delta, Some(150.0));
        assert_eq!(plan[3].prev_pour_target, Some(210.0));
        assert_eq!(plan[3].pour_delta, Some(0.0));
    }

    #[test]
    fn test_default_cursor_plan_is_monotonic() {
        let steps: Vec<_> = (0..12)
            .map(|i| match i % 3 {
                0 => pour(i, f64::from(i) * 20.0, None),
                1 => timed(i, StepType::Wait, "Wait", Some(i * 3)),
                _ => timed(i, StepType::Stir, "Stir", None),
            })
            .collect();
        let plan = build_step_plan(&steps);

        for pair in plan.windows(2) {
            assert!(pair[0].start_sec <= pair[1].start_sec);
            assert!(pair[0].end_sec < pair[1].end_sec);
            assert_eq!(pair[0].end_sec, pair[1].start_sec);
        }
    }

    #[test]
    fn test_empty_plan() {
        let plan = build_step_plan(&[]);
        assert!(plan.is_empty());
        assert_eq!(total_timeline_sec(&plan), 0);
    }

    #[test]
    fn test_countdown_and_progress() {
        let plan = build_step_plan(&[
            timed(0, StepType::Wait, "Wait", Some(10)),
            timed(1, StepType::Wait, "Wait", Some(40)),
        ]);
        let second = &plan[1];
        assert_eq!(second.countdown(20), 30);
        assert_eq!(second.countdown(90), 0);
        assert!((second.progress_pct(20) - 25.0).abs() < 1e-9);
        assert_eq!(second.progress_pct(5), 0.0);
        assert_eq!(second.progress_pct(500), 100.0);
        assert!(second.is_complete_at(50));
        assert!(!second.is_complete_at(49));
    }
}
