//! Resumable session snapshots.
//!
//! A snapshot is an opaque JSON blob keyed by recipe id. Anything that fails
//! to decode, or that is older than the freshness window, is treated as
//! absent so the brewer simply starts cold.

use std::collections::BTreeSet;

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::{
    directive::PromptStyle,
    notify::CompletionCue,
    prep::PrepGate,
    prepared::BrewPlan,
    scaling::ScaleOptions,
    session::{BrewSession, BrewSessionState},
};
use crate::error::Result;

/// Snapshots at least this old are discarded.
pub const SNAPSHOT_FRESHNESS: SignedDuration = SignedDuration::from_hours(24);

fn default_cue() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session: BrewSessionState,
    pub target_water_grams: f64,
    pub target_ratio: f64,
    #[serde(default)]
    pub prompt_style: PromptStyle,
    #[serde(default = "default_cue")]
    pub enable_sound_cue: bool,
    #[serde(default = "default_cue")]
    pub enable_haptic_cue: bool,
    #[serde(default)]
    pub prep_checks: Vec<bool>,
    #[serde(default)]
    pub prep_ready: bool,
    #[serde(default)]
    pub last_notified_step_id: Option<String>,
    #[serde(default)]
    pub notified_step_ids: BTreeSet<String>,
    pub stored_at: Timestamp,
}

impl SessionSnapshot {
    /// Captures a session with the settings it runs under.
    pub fn capture(
        session: &BrewSession,
        options: ScaleOptions,
        prompt_style: PromptStyle,
        cue: CompletionCue,
        stored_at: Timestamp,
    ) -> Self {
        Self {
            session: BrewSessionState {
                auto_advance: true,
                ..session.state.clone()
            },
            target_water_grams: options.target_water_grams,
            target_ratio: options.target_ratio,
            prompt_style,
            enable_sound_cue: cue.sound,
            enable_haptic_cue: cue.haptic,
            prep_checks: session.prep.checks.clone(),
            prep_ready: session.prep.ready,
            last_notified_step_id: session.last_notified_step_id.clone(),
            notified_step_ids: session.notified_step_ids.clone(),
            stored_at,
        }
    }

    pub fn to_blob(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a stored blob; malformed input is `None`, never an error.
    pub fn from_blob(blob: &str) -> Option<Self> {
        serde_json::from_str(blob).ok()
    }

    pub fn is_fresh(&self, now: Timestamp, window: SignedDuration) -> bool {
        now.duration_since(self.stored_at) < window
    }

    pub fn scale_options(&self) -> ScaleOptions {
        ScaleOptions {
            target_water_grams: self.target_water_grams,
            target_ratio: self.target_ratio,
        }
    }

    pub fn cue(&self) -> CompletionCue {
        CompletionCue {
            sound: self.enable_sound_cue,
            haptic: self.enable_haptic_cue,
        }
    }

    /// Rebuilds a session against the current plan. Checklist ticks carry
    /// over only when the checklist still has the same length, and the
    /// session always resumes with auto-advance on.
    pub fn restore(self, plan: &BrewPlan) -> BrewSession {
        let len = plan.checklist.len();
        let mut prep = PrepGate::new(len);
        if self.prep_checks.len() == len {
            prep.checks = self.prep_checks;
        }
        prep.ready = self.prep_ready || len == 0;

        BrewSession {
            state: BrewSessionState {
                auto_advance: true,
                ..self.session
            },
            prep,
            last_notified_step_id: self.last_notified_step_id,
            notified_step_ids: self.notified_step_ids,
        }
        .clamp_to_plan(&plan.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::v60_recipe;

    fn sample(plan: &BrewPlan) -> SessionSnapshot {
        let mut session = BrewSession::new(plan, Timestamp::UNIX_EPOCH)
            .check_prep(0, true)
            .acknowledge_prep(&plan.steps)
            .pause_toggle();
        for _ in 0..50 {
            session = session.tick(&plan.steps);
        }
        session.state.auto_advance = false;
        SessionSnapshot::capture(
            &session,
            plan.options,
            PromptStyle::Plain,
            CompletionCue {
                sound: false,
                haptic: true,
            },
            Timestamp::from_second(1_700_000_000).unwrap(),
        )
    }

    #[test]
    fn test_blob_restores_progress() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();
        let blob = sample(&plan).to_blob().unwrap();
        let snapshot = SessionSnapshot::from_blob(&blob).unwrap();

        assert_eq!(snapshot.prompt_style, PromptStyle::Plain);
        assert!(!snapshot.cue().sound);
        let session = snapshot.restore(&plan);
        assert!(session.state.auto_advance);
        assert!(session.prep.ready);
        assert_eq!(session.state.current_step_index, 1);
        assert_eq!(session.state.elapsed_sec, 50);
        assert_eq!(session.last_notified_step_id.as_deref(), Some("test-step-2"));
    }

    #[test]
    fn test_malformed_blob_is_absent() {
        assert!(SessionSnapshot::from_blob("").is_none());
        assert!(SessionSnapshot::from_blob("{\"session\": 3}").is_none());
        assert!(SessionSnapshot::from_blob("not json").is_none());
    }

    #[test]
    fn test_freshness_window() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();
        let snapshot = sample(&plan);
        let stored = snapshot.stored_at;

        let within = stored.checked_add(SignedDuration::from_hours(23)).unwrap();
        let exactly = stored.checked_add(SNAPSHOT_FRESHNESS).unwrap();
        assert!(snapshot.is_fresh(within, SNAPSHOT_FRESHNESS));
        assert!(!snapshot.is_fresh(exactly, SNAPSHOT_FRESHNESS));
    }

    #[test]
    fn test_mismatched_checklist_length_resets_checks() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();
        let mut snapshot = sample(&plan);
        snapshot.prep_checks = vec![true, true, true];
        snapshot.prep_ready = false;

        let session = snapshot.restore(&plan);
        assert_eq!(session.prep.checks, vec![false]);
        assert!(!session.prep.ready);
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();
        let mut value = serde_json::to_value(sample(&plan)).unwrap();
        let object = value.as_object_mut().unwrap();
        for key in ["promptStyle", "enableSoundCue", "prepChecks", "notifiedStepIds"] {
            object.remove(key);
        }

        let snapshot = SessionSnapshot::from_blob(&value.to_string()).unwrap();
        assert_eq!(snapshot.prompt_style, PromptStyle::Barista);
        assert!(snapshot.enable_sound_cue);
        assert!(snapshot.prep_checks.is_empty());
    }
}
