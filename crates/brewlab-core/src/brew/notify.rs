//! Step-completion cues.

use super::session::BrewSession;

/// Something that can signal a completed step. Implementations swallow their
/// own failures; an unsupported environment simply does nothing.
pub trait NotificationSink {
    fn notify(&self);
}

/// Which cue channels are enabled for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionCue {
    pub sound: bool,
    pub haptic: bool,
}

impl Default for CompletionCue {
    fn default() -> Self {
        Self {
            sound: true,
            haptic: true,
        }
    }
}

impl CompletionCue {
    pub fn any(&self) -> bool {
        self.sound || self.haptic
    }
}

/// Id of the step that became notified between `prev` and `next`, if any.
pub fn newly_notified_step<'a>(prev: &BrewSession, next: &'a BrewSession) -> Option<&'a str> {
    match next.last_notified_step_id.as_deref() {
        Some(id) if prev.last_notified_step_id.as_deref() != Some(id) => Some(id),
        _ => None,
    }
}

/// Fires `sink` once when the transition from `prev` to `next` completed a
/// step. Returns whether it fired.
pub fn notify_on_transition(
    prev: &BrewSession,
    next: &BrewSession,
    cue: CompletionCue,
    sink: &dyn NotificationSink,
) -> bool {
    if !cue.any() || newly_notified_step(prev, next).is_none() {
        return false;
    }
    sink.notify();
    true
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use jiff::Timestamp;

    use super::*;
    use crate::{
        brew::{BrewPlan, SessionEvent},
        models::fixtures::v60_recipe,
    };

    #[derive(Default)]
    struct CountingSink {
        fired: Cell<u32>,
    }

    impl NotificationSink for CountingSink {
        fn notify(&self) {
            self.fired.set(self.fired.get() + 1);
        }
    }

    fn running_session(plan: &BrewPlan) -> BrewSession {
        BrewSession::new(plan, Timestamp::UNIX_EPOCH)
            .apply(&SessionEvent::CheckPrep { index: 0, checked: true }, plan)
            .apply(&SessionEvent::AcknowledgePrep, plan)
            .apply(&SessionEvent::PauseToggle, plan)
    }

    #[test]
    fn test_fires_once_per_step_boundary() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();
        let sink = CountingSink::default();
        let mut session = running_session(&plan);

        for _ in 0..60 {
            let next = session.clone().apply(&SessionEvent::Tick, &plan);
            notify_on_transition(&session, &next, CompletionCue::default(), &sink);
            session = next;
        }

        // steps end at 45 and 75
        assert_eq!(sink.fired.get(), 1);
        assert_eq!(session.state.current_step_index, 1);
    }

    #[test]
    fn test_back_into_notified_step_does_not_refire() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();
        let sink = CountingSink::default();
        let mut session = running_session(&plan);

        for _ in 0..45 {
            session = session.apply(&SessionEvent::Tick, &plan);
        }
        assert_eq!(session.last_notified_step_id.as_deref(), Some("test-step-2"));

        session = session.apply(&SessionEvent::Back, &plan);
        for _ in 0..45 {
            let next = session.clone().apply(&SessionEvent::Tick, &plan);
            notify_on_transition(&session, &next, CompletionCue::default(), &sink);
            session = next;
        }
        assert_eq!(sink.fired.get(), 0);
    }

    #[test]
    fn test_disabled_cue_never_fires() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();
        let sink = CountingSink::default();
        let cue = CompletionCue {
            sound: false,
            haptic: false,
        };
        let mut session = running_session(&plan);

        for _ in 0..50 {
            let next = session.clone().apply(&SessionEvent::Tick, &plan);
            assert!(!notify_on_transition(&session, &next, cue, &sink));
            session = next;
        }
        assert_eq!(sink.fired.get(), 0);
    }
}
