//! The brew engine: scaling, planning, prep gating, and the session machine.
//!
//! Everything in this module is pure and infallible apart from
//! [`BrewPlan::prepare`], which rejects a recipe with no versions. Data
//! flows leaves first:
//!
//! 1. [`scale_recipe_version`] rescales the active version.
//! 2. [`partition_steps`] and [`build_prep_checklist`] split out prep.
//! 3. [`build_step_plan`] schedules the brew steps.
//! 4. [`BrewSession`] consumes [`SessionEvent`]s against the plan.
//! 5. [`get_directive`] and [`format_seconds`] describe the current step.
//!
//! ```rust
//! use brewlab_core::brew::{get_directive, BrewPlan, BrewSession, PromptStyle, SessionEvent};
//! # fn demo(recipe: &brewlab_core::models::Recipe) -> brewlab_core::Result<()> {
//! let plan = BrewPlan::prepare(recipe, None)?;
//! let mut session = BrewSession::new(&plan, jiff::Timestamp::now());
//! for index in 0..plan.checklist.len() {
//!     session = session.apply(&SessionEvent::CheckPrep { index, checked: true }, &plan);
//! }
//! session = session
//!     .apply(&SessionEvent::AcknowledgePrep, &plan)
//!     .apply(&SessionEvent::PauseToggle, &plan)
//!     .apply(&SessionEvent::Tick, &plan);
//! if let Some(step) = plan.current(session.state.current_step_index) {
//!     println!("{}", get_directive(step, PromptStyle::Barista));
//! }
//! # Ok(())
//! # }
//! ```

pub mod directive;
pub mod format;
pub mod notify;
pub mod plan;
pub mod prep;
pub mod prepared;
pub mod scaling;
pub mod session;
pub mod snapshot;

pub use directive::{get_directive, summarize_step, PromptStyle};
pub use format::{format_seconds, to_ratio_label};
pub use notify::{newly_notified_step, notify_on_transition, CompletionCue, NotificationSink};
pub use plan::{build_step_plan, total_timeline_sec, PlannedStep};
pub use prep::{
    build_prep_checklist, is_prep_like_step, partition_steps, PrepChecklistItem, PrepGate,
};
pub use prepared::{BrewPlan, UPCOMING_PREVIEW};
pub use scaling::{scale_recipe_version, ScaleOptions};
pub use session::{
    create_initial_session, get_next_step_index, get_prev_step_index, is_pour_step_complete,
    is_timed_step_complete, update_elapsed, BrewSession, BrewSessionState, SessionEvent,
    SessionPhase,
};
pub use snapshot::{SessionSnapshot, SNAPSHOT_FRESHNESS};
