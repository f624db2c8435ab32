//! Brew session state machine.
//!
//! The session is an explicit state value plus a pure transition per event.
//! Nothing here touches a clock, a timer, or a notification channel. The
//! driver owns the one-second interval, applies [`SessionEvent::Tick`], and
//! fires completion cues by comparing the previous and next
//! [`BrewSession::last_notified_step_id`].
//!
//! ```text
//! gated ──acknowledge──▶ ready-paused ──pause_toggle──▶ running ⇄ paused
//!                                                          │
//!                                      last step ends / skip on last step
//!                                                          ▼
//!                                                       complete
//! ```

use std::collections::BTreeSet;

use jiff::Timestamp;
use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    plan::{total_timeline_sec, PlannedStep},
    prep::PrepGate,
    prepared::BrewPlan,
};
use crate::models::RecipeVersion;

/// Progress of one brewing attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewSessionState {
    pub recipe_id: String,
    pub recipe_version_id: String,
    pub started_at: Timestamp,
    /// Index into the brew plan, kept within `[0, step_count - 1]`
    pub current_step_index: usize,
    /// Seconds on the session timeline
    pub elapsed_sec: u32,
    /// Seconds since the current step was entered
    pub step_elapsed_sec: u32,
    /// Latest poured-water reading in grams
    pub current_water_grams: f64,
    pub is_paused: bool,
    pub auto_advance: bool,
    pub is_complete: bool,
}

/// A fresh, paused session at step 0.
pub fn create_initial_session(
    recipe_id: &str,
    version: &RecipeVersion,
    started_at: Timestamp,
) -> BrewSessionState {
    BrewSessionState {
        recipe_id: recipe_id.to_string(),
        recipe_version_id: version.id.clone(),
        started_at,
        current_step_index: 0,
        elapsed_sec: 0,
        step_elapsed_sec: 0,
        current_water_grams: 0.0,
        is_paused: true,
        auto_advance: true,
        is_complete: false,
    }
}

/// Next index, never past the last step.
pub fn get_next_step_index(current: usize, step_count: usize) -> usize {
    (current + 1).min(step_count.saturating_sub(1))
}

/// Previous index, never below zero.
pub fn get_prev_step_index(current: usize) -> usize {
    current.saturating_sub(1)
}

/// A timed step is complete once `elapsed` reaches a positive duration.
pub fn is_timed_step_complete(duration_sec: Option<u32>, elapsed_sec: u32) -> bool {
    match duration_sec {
        Some(duration) if duration > 0 => elapsed_sec >= duration,
        _ => false,
    }
}

/// A pour step is complete once the poured reading reaches a positive target.
pub fn is_pour_step_complete(target_water_grams: Option<f64>, current_water_grams: f64) -> bool {
    match target_water_grams {
        Some(target) if target > 0.0 => current_water_grams >= target,
        _ => false,
    }
}

/// Advances both counters by one second unless paused or complete.
pub fn update_elapsed(state: BrewSessionState) -> BrewSessionState {
    if state.is_paused || state.is_complete {
        return state;
    }
    BrewSessionState {
        elapsed_sec: state.elapsed_sec + 1,
        step_elapsed_sec: state.step_elapsed_sec + 1,
        ..state
    }
}

/// Coarse state of a session, derived from its flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Prep checklist not yet acknowledged
    Gated,
    /// Prep done, timer not started
    ReadyPaused,
    Running,
    Paused,
    Complete,
}

/// Inputs to the session machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// One second of wall-clock time passed
    Tick,
    PauseToggle,
    Skip,
    Back,
    /// Start over at `at`, re-gating the prep checklist
    Reset { at: Timestamp },
    CheckPrep { index: usize, checked: bool },
    AcknowledgePrep,
    /// A scale reading of the water poured so far
    RecordWater { grams: f64 },
}

/// Session state together with its prep gate and cue bookkeeping.
///
/// Every transition consumes the session and returns its replacement, so a
/// reader never observes a half-applied update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrewSession {
    pub state: BrewSessionState,
    pub prep: PrepGate,
    /// Most recent step whose completion cue fired
    pub last_notified_step_id: Option<String>,
    /// Every step that has already cued in this attempt
    #[serde(default)]
    pub notified_step_ids: BTreeSet<String>,
}

impl BrewSession {
    /// Starts a session for a prepared plan, gated on its checklist.
    pub fn new(plan: &BrewPlan, started_at: Timestamp) -> Self {
        Self {
            state: create_initial_session(&plan.recipe_id, &plan.version, started_at),
            prep: PrepGate::new(plan.checklist.len()),
            last_notified_step_id: None,
            notified_step_ids: BTreeSet::new(),
        }
        .settle(&plan.steps)
    }

    pub fn phase(&self) -> SessionPhase {
        if !self.prep.ready {
            SessionPhase::Gated
        } else if self.state.is_complete {
            SessionPhase::Complete
        } else if !self.state.is_paused {
            SessionPhase::Running
        } else if self.state.elapsed_sec == 0 && self.state.current_step_index == 0 {
            SessionPhase::ReadyPaused
        } else {
            SessionPhase::Paused
        }
    }

    /// The planned step the session is on, if the plan has any.
    pub fn current_step<'a>(&self, steps: &'a [PlannedStep]) -> Option<&'a PlannedStep> {
        steps.get(self.state.current_step_index)
    }

    /// Dispatches one event to its transition.
    #[must_use]
    pub fn apply(self, event: &SessionEvent, plan: &BrewPlan) -> Self {
        debug!("session event {event:?} at {}s", self.state.elapsed_sec);
        match event {
            SessionEvent::Tick => self.tick(&plan.steps),
            SessionEvent::PauseToggle => self.pause_toggle(),
            SessionEvent::Skip => self.skip(&plan.steps),
            SessionEvent::Back => self.back(&plan.steps),
            SessionEvent::Reset { at } => self.reset(plan, *at),
            SessionEvent::CheckPrep { index, checked } => self.check_prep(*index, *checked),
            SessionEvent::AcknowledgePrep => self.acknowledge_prep(&plan.steps),
            SessionEvent::RecordWater { grams } => self.record_water(*grams),
        }
    }

    /// One second of running time. Marks the current step notified the first
    /// time the clock reaches its end and moves on to the next step, absorbing
    /// any gap before the next step's start. The last step completes the
    /// session.
    #[must_use]
    pub fn tick(self, steps: &[PlannedStep]) -> Self {
        if !self.prep.ready || self.state.is_paused || self.state.is_complete {
            return self;
        }
        let mut next = self.clamp_to_plan(steps);
        if next.state.is_complete {
            return next;
        }

        let planned = &steps[next.state.current_step_index];
        next.state = update_elapsed(next.state);
        if !planned.is_complete_at(next.state.elapsed_sec) {
            return next;
        }

        if next.notified_step_ids.insert(planned.step.id.clone()) {
            next.last_notified_step_id = Some(planned.step.id.clone());
        }
        if !next.state.auto_advance {
            return next;
        }

        let index = next.state.current_step_index;
        let following = get_next_step_index(index, steps.len());
        if following == index {
            next.state.is_complete = true;
            next.state.is_paused = true;
            next.state.step_elapsed_sec = planned.duration_sec;
            return next;
        }
        next.enter_step(following, steps)
    }

    /// Flips pause; ignored while gated or once complete.
    #[must_use]
    pub fn pause_toggle(mut self) -> Self {
        if self.prep.ready && !self.state.is_complete {
            self.state.is_paused = !self.state.is_paused;
        }
        self
    }

    /// Moves to the next step now, completing the session on the last one.
    #[must_use]
    pub fn skip(self, steps: &[PlannedStep]) -> Self {
        if !self.prep.ready || self.state.is_complete {
            return self;
        }
        let mut next = self.clamp_to_plan(steps);
        if next.state.is_complete {
            return next;
        }

        let index = next.state.current_step_index;
        let following = get_next_step_index(index, steps.len());
        if following == index {
            next.state.is_complete = true;
            next.state.is_paused = true;
            return next;
        }
        next.enter_step(following, steps)
    }

    /// Returns to the previous step's planned start and clears completion.
    #[must_use]
    pub fn back(mut self, steps: &[PlannedStep]) -> Self {
        if !self.prep.ready {
            return self;
        }
        let index = get_prev_step_index(self.state.current_step_index).min(steps.len().saturating_sub(1));
        self.state.current_step_index = index;
        self.state.elapsed_sec = steps.get(index).map_or(0, |planned| planned.start_sec);
        self.state.step_elapsed_sec = 0;
        self.state.is_complete = false;
        self
    }

    /// Back to step 0, paused, with a fresh checklist and no cue history.
    #[must_use]
    pub fn reset(self, plan: &BrewPlan, at: Timestamp) -> Self {
        debug!("resetting session for {}", self.state.recipe_id);
        BrewSession::new(plan, at)
    }

    #[must_use]
    pub fn check_prep(mut self, index: usize, checked: bool) -> Self {
        self.prep = self.prep.check(index, checked);
        self
    }

    /// Opens the gate when every item is checked. The timer stays paused; a
    /// plan without brew steps completes immediately.
    #[must_use]
    pub fn acknowledge_prep(mut self, steps: &[PlannedStep]) -> Self {
        self.prep = self.prep.acknowledge();
        self.settle(steps)
    }

    #[must_use]
    pub fn record_water(mut self, grams: f64) -> Self {
        if grams.is_finite() {
            self.state.current_water_grams = grams.max(0.0);
        }
        self
    }

    /// Re-fits the session to a plan that may have shrunk since the state was
    /// captured: an index beyond the plan lands on the last step at the end
    /// of the timeline.
    #[must_use]
    pub fn clamp_to_plan(mut self, steps: &[PlannedStep]) -> Self {
        if self.state.current_step_index >= steps.len() {
            self.state.current_step_index = steps.len().saturating_sub(1);
            self.state.elapsed_sec = total_timeline_sec(steps);
            self.state.step_elapsed_sec = 0;
            self.state.is_complete = steps.is_empty();
        }
        self.settle(steps)
    }

    fn enter_step(mut self, index: usize, steps: &[PlannedStep]) -> Self {
        self.state.current_step_index = index;
        self.state.step_elapsed_sec = 0;
        self.state.elapsed_sec = self.state.elapsed_sec.max(steps[index].start_sec);
        self
    }

    /// A prep-only recipe has nothing to time once the gate is open.
    fn settle(mut self, steps: &[PlannedStep]) -> Self {
        if self.prep.ready && steps.is_empty() {
            self.state.is_complete = true;
            self.state.is_paused = true;
        }
        self
    }
}
