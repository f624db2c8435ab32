//! Interactive guided brew session.
//!
//! The runner drives a [`BrewSession`] from two sources: a one-second
//! interval while the timer runs, and commands typed on stdin. Snapshots are
//! handed to a single writer task so saves never hold up the timer and land
//! in the order they were taken.

use std::{io::Write, time::Duration};

use anyhow::{Context, Result};
use brewlab_core::{
    brew::{
        format_seconds, get_directive, notify_on_transition, summarize_step, CompletionCue,
        NotificationSink, SessionPhase, UPCOMING_PREVIEW,
    },
    params::{RecipeId, RecipeSlug},
    BrewPlan, BrewSession, Library, PromptStyle, ScaleOptions, SessionEvent, SessionSnapshot,
};
use jiff::Timestamp;
use log::{debug, info, warn};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};

use crate::{cli::BrewArgs, renderer::TerminalRenderer};

const HELP: &str = "\
## Commands

- `1`..`9`: tick or untick a prep item
- `all`: tick every prep item
- Enter: start after prep, then pause or resume
- `s`: skip to the next step
- `b`: back to the previous step
- `w 250`: record the scale reading in grams
- `r`: reset the session
- `q`: save and quit
";

/// Rings the terminal bell.
struct TerminalBell;

impl NotificationSink for TerminalBell {
    fn notify(&self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            debug!("bell failed: {e}");
        }
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq)]
enum Input {
    Enter,
    Toggle(usize),
    CheckAll,
    Skip,
    Back,
    Reset,
    Water(f64),
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let lower = line.to_lowercase();
    let mut words = lower.split_whitespace();
    match (words.next(), words.next()) {
        (None, _) | (Some("p"), None) => Input::Enter,
        (Some("all") | Some("a"), None) => Input::CheckAll,
        (Some("s") | Some("skip"), None) => Input::Skip,
        (Some("b") | Some("back"), None) => Input::Back,
        (Some("r") | Some("reset"), None) => Input::Reset,
        (Some("h") | Some("help") | Some("?"), None) => Input::Help,
        (Some("q") | Some("quit"), None) => Input::Quit,
        (Some("w") | Some("water"), Some(grams)) => grams
            .trim_end_matches('g')
            .parse()
            .map(Input::Water)
            .unwrap_or_else(|_| Input::Unknown(line.to_string())),
        (Some(word), None) => word
            .parse()
            .ok()
            .filter(|n: &usize| *n > 0)
            .map(Input::Toggle)
            .unwrap_or_else(|| Input::Unknown(line.to_string())),
        _ => Input::Unknown(line.to_string()),
    }
}

fn checklist_markdown(plan: &BrewPlan, session: &BrewSession) -> String {
    let mut out = format!("## Prep for {}\n\n", plan.recipe_title);
    for (index, item) in plan.checklist.iter().enumerate() {
        let mark = if session.prep.checks.get(index).copied().unwrap_or(false) {
            "x"
        } else {
            " "
        };
        out.push_str(&format!("{}. [{mark}] {}\n", index + 1, item.instruction));
    }
    out.push('\n');
    if session.prep.can_acknowledge() {
        out.push_str("All set. Press Enter to continue.\n");
    } else {
        out.push_str("Type an item number to tick it, or `all`.\n");
    }
    out
}

fn step_markdown(plan: &BrewPlan, session: &BrewSession, style: PromptStyle) -> String {
    let index = session.state.current_step_index;
    let Some(step) = plan.current(index) else {
        return "Nothing to brew.\n".to_string();
    };

    let mut out = format!(
        "## Step {} of {}: {}\n\n{}\n",
        index + 1,
        plan.steps.len(),
        step.step.instruction,
        get_directive(step, style)
    );
    if let Some(tips) = &step.step.tips {
        out.push_str(&format!("\n_{tips}_\n"));
    }
    let upcoming = plan.upcoming(index, UPCOMING_PREVIEW);
    if !upcoming.is_empty() {
        out.push_str("\n### Up next\n\n");
        for next in upcoming {
            out.push_str(&format!("- {}\n", summarize_step(next)));
        }
    }
    if session.phase() == SessionPhase::ReadyPaused {
        out.push_str("\nPress Enter to start the timer.\n");
    }
    out
}

fn status_line(plan: &BrewPlan, session: &BrewSession) -> String {
    let elapsed = session.state.elapsed_sec;
    let left = plan
        .current(session.state.current_step_index)
        .map_or(0, |step| step.countdown(elapsed));
    let paused = if session.state.is_paused { "  [paused]" } else { "" };
    format!(
        "{} / {}  next cue in {}  water {}g{paused}",
        format_seconds(i64::from(elapsed)),
        format_seconds(i64::from(plan.total_timeline_sec())),
        format_seconds(i64::from(left)),
        session.state.current_water_grams
    )
}

/// A running terminal brew session.
pub struct BrewRunner {
    library: Library,
    renderer: TerminalRenderer,
    plan: BrewPlan,
    session: BrewSession,
    style: PromptStyle,
    cue: CompletionCue,
}

impl BrewRunner {
    /// Loads the recipe and, unless `--fresh`, resumes a saved session.
    /// Explicit scale and style arguments override the resumed ones.
    pub async fn prepare(
        library: Library,
        renderer: TerminalRenderer,
        args: BrewArgs,
    ) -> Result<Self> {
        let recipe = library
            .require_recipe_by_slug(&RecipeSlug {
                slug: args.slug.clone(),
            })
            .await?;
        let id = RecipeId {
            recipe_id: recipe.id.clone(),
        };

        let snapshot = if args.fresh {
            library.clear_session_snapshot(&id).await?;
            None
        } else {
            library.load_session_snapshot(&id).await?
        };

        let base = recipe.active_version().map(ScaleOptions::for_version);
        let options = snapshot
            .as_ref()
            .map(SessionSnapshot::scale_options)
            .or(base)
            .map(|options| ScaleOptions {
                target_water_grams: args.water.unwrap_or(options.target_water_grams),
                target_ratio: args.ratio.unwrap_or(options.target_ratio),
            });
        let plan = BrewPlan::prepare(&recipe, options)?;

        let style = args
            .style
            .map(PromptStyle::from)
            .or(snapshot.as_ref().map(|s| s.prompt_style))
            .unwrap_or_default();
        let mut cue = snapshot
            .as_ref()
            .map(SessionSnapshot::cue)
            .unwrap_or_default();
        if args.no_sound {
            cue.sound = false;
        }

        let mut session = match snapshot {
            Some(snapshot) => {
                info!("Resuming saved session for '{}'", recipe.slug);
                snapshot.restore(&plan)
            }
            None => BrewSession::new(&plan, Timestamp::now()),
        };
        session.state.auto_advance = !args.manual;

        Ok(Self {
            library,
            renderer,
            plan,
            session,
            style,
            cue,
        })
    }

    pub async fn run(mut self) -> Result<()> {
        let (saves, saver) = self.spawn_saver();
        self.renderer.render(&format!(
            "# {}\n\n{}g coffee, {}g water ({}), {} total. Type `h` for help.\n\n",
            self.plan.recipe_title,
            self.plan.version.base_dose_grams,
            self.plan.version.base_water_grams,
            self.plan.ratio_label(),
            format_seconds(i64::from(self.plan.total_timeline_sec()))
        ))?;
        self.render_phase()?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.reset();

        while self.session.phase() != SessionPhase::Complete {
            let running = self.session.phase() == SessionPhase::Running;
            tokio::select! {
                _ = ticker.tick(), if running => {
                    self.advance(SessionEvent::Tick, &saves)?;
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        break;
                    };
                    if !self.handle_line(&line, &saves)? {
                        break;
                    }
                    if !running && self.session.phase() == SessionPhase::Running {
                        ticker.reset();
                    }
                }
            }
        }

        let complete = self.session.phase() == SessionPhase::Complete;
        if !complete {
            saves.send(self.capture()).ok();
        }
        drop(saves);
        if let Err(e) = saver.await {
            warn!("Session writer stopped early: {e}");
        }

        let id = RecipeId {
            recipe_id: self.plan.recipe_id.clone(),
        };
        if complete {
            self.library.clear_session_snapshot(&id).await?;
            println!();
            self.renderer.render(&format!(
                "## Brew complete in {}. Enjoy!\n",
                format_seconds(i64::from(self.session.state.elapsed_sec))
            ))?;
        } else {
            println!();
            self.renderer
                .render("Session saved. Run the same command to resume.\n")?;
        }
        Ok(())
    }

    /// Spawns the task that persists snapshots one at a time.
    fn spawn_saver(&self) -> (mpsc::UnboundedSender<SessionSnapshot>, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<SessionSnapshot>();
        let library = self.library.clone();
        let id = RecipeId {
            recipe_id: self.plan.recipe_id.clone(),
        };
        let handle = tokio::spawn(async move {
            while let Some(snapshot) = rx.recv().await {
                if let Err(e) = library.save_session_snapshot(&id, &snapshot).await {
                    warn!("Failed to save brew session: {e}");
                }
            }
        });
        (tx, handle)
    }

    fn capture(&self) -> SessionSnapshot {
        SessionSnapshot::capture(
            &self.session,
            self.plan.options,
            self.style,
            self.cue,
            Timestamp::now(),
        )
    }

    fn advance(
        &mut self,
        event: SessionEvent,
        saves: &mpsc::UnboundedSender<SessionSnapshot>,
    ) -> Result<()> {
        let prev = self.session.clone();
        let next = prev.clone().apply(&event, &self.plan);
        // A terminal has no haptics; only the sound channel reaches the bell.
        let terminal_cue = CompletionCue {
            haptic: false,
            ..self.cue
        };
        if notify_on_transition(&prev, &next, terminal_cue, &TerminalBell) {
            debug!("cue for step {:?}", next.last_notified_step_id);
        }
        let moved = prev.state.current_step_index != next.state.current_step_index
            || prev.phase() != next.phase();
        self.session = next;

        if moved {
            saves.send(self.capture()).ok();
            if self.session.phase() != SessionPhase::Complete {
                println!();
                self.render_phase()?;
            }
        } else if self.session.prep.ready {
            print!("\r{}   ", status_line(&self.plan, &self.session));
            std::io::stdout().flush().context("Failed to write status")?;
        }
        Ok(())
    }

    /// Applies one line of input. Returns `false` when the user quits.
    fn handle_line(
        &mut self,
        line: &str,
        saves: &mpsc::UnboundedSender<SessionSnapshot>,
    ) -> Result<bool> {
        let phase = self.session.phase();
        match parse_input(line) {
            Input::Quit => return Ok(false),
            Input::Help => self.renderer.render(HELP)?,
            Input::Enter if phase == SessionPhase::Gated => {
                self.advance(SessionEvent::AcknowledgePrep, saves)?;
                if self.session.phase() == SessionPhase::Gated {
                    self.renderer.render("Tick every prep item first.\n")?;
                }
            }
            Input::Enter => self.advance(SessionEvent::PauseToggle, saves)?,
            Input::Toggle(number) if phase == SessionPhase::Gated => {
                let index = number - 1;
                match self.session.prep.checks.get(index).copied() {
                    Some(checked) => {
                        self.advance(SessionEvent::CheckPrep { index, checked: !checked }, saves)?;
                        self.render_phase()?;
                    }
                    None => self.renderer.render(&format!("No prep item {number}.\n"))?,
                }
            }
            Input::CheckAll if phase == SessionPhase::Gated => {
                for index in 0..self.plan.checklist.len() {
                    self.advance(SessionEvent::CheckPrep { index, checked: true }, saves)?;
                }
                self.render_phase()?;
            }
            Input::Skip => self.advance(SessionEvent::Skip, saves)?,
            Input::Back => self.advance(SessionEvent::Back, saves)?,
            Input::Reset => {
                self.advance(SessionEvent::Reset { at: Timestamp::now() }, saves)?;
                saves.send(self.capture()).ok();
                self.render_phase()?;
            }
            Input::Water(grams) => self.advance(SessionEvent::RecordWater { grams }, saves)?,
            Input::Toggle(_) | Input::CheckAll => {
                self.renderer.render("Prep is already done.\n")?;
            }
            Input::Unknown(text) => self
                .renderer
                .render(&format!("Unknown command '{text}'. Type `h` for help.\n"))?,
        }
        Ok(true)
    }

    fn render_phase(&self) -> Result<()> {
        match self.session.phase() {
            SessionPhase::Gated => self
                .renderer
                .render(&checklist_markdown(&self.plan, &self.session)),
            SessionPhase::Complete => Ok(()),
            _ => self
                .renderer
                .render(&step_markdown(&self.plan, &self.session, self.style)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewlab_core::legacy::seed_recipes;

    fn v60_plan() -> BrewPlan {
        let recipe = seed_recipes()
            .unwrap()
            .into_iter()
            .find(|recipe| recipe.slug == "hario-v60")
            .unwrap();
        BrewPlan::prepare(&recipe, None).unwrap()
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input(""), Input::Enter);
        assert_eq!(parse_input("  p "), Input::Enter);
        assert_eq!(parse_input("2"), Input::Toggle(2));
        assert_eq!(parse_input("ALL"), Input::CheckAll);
        assert_eq!(parse_input("w 250g"), Input::Water(250.0));
        assert_eq!(parse_input("water 12.5"), Input::Water(12.5));
        assert_eq!(parse_input("q"), Input::Quit);
        assert_eq!(parse_input("0"), Input::Unknown("0".to_string()));
        assert_eq!(parse_input("w lots"), Input::Unknown("w lots".to_string()));
    }

    #[test]
    fn test_checklist_marks_ticked_items() {
        let plan = v60_plan();
        let session = BrewSession::new(&plan, Timestamp::now()).check_prep(0, true);

        let output = checklist_markdown(&plan, &session);
        assert!(output.contains("1. [x] "));
        if plan.checklist.len() > 1 {
            assert!(output.contains("2. [ ] "));
            assert!(output.ends_with("or `all`.\n"));
        }
    }

    #[test]
    fn test_step_markdown_previews_upcoming() {
        let plan = v60_plan();
        let mut session = BrewSession::new(&plan, Timestamp::now());
        for index in 0..plan.checklist.len() {
            session = session.check_prep(index, true);
        }
        let session = session.acknowledge_prep(&plan.steps);

        let output = step_markdown(&plan, &session, PromptStyle::Plain);
        assert!(output.starts_with(&format!("## Step 1 of {}", plan.steps.len())));
        assert!(output.contains("### Up next"));
        assert!(output.contains("Press Enter to start the timer."));
    }

    #[test]
    fn test_status_line_shows_pause() {
        let plan = v60_plan();
        let session = BrewSession::new(&plan, Timestamp::now());
        let line = status_line(&plan, &session);
        assert!(line.starts_with("00:00 / "));
        assert!(line.ends_with("[paused]"));
    }
}
