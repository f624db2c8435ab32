//! Coaching directives shown for the current step.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{format::format_seconds, plan::PlannedStep};
use crate::models::StepType;

/// Voice used for directives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// Framed as "Barista cue: ..." with type-specific wording
    #[default]
    Barista,
    /// Short neutral wording without the cue framing
    Plain,
}

impl PromptStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStyle::Barista => "barista",
            PromptStyle::Plain => "plain",
        }
    }
}

impl FromStr for PromptStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "barista" => Ok(PromptStyle::Barista),
            "plain" => Ok(PromptStyle::Plain),
            _ => Err(format!("Invalid prompt style: {s}")),
        }
    }
}

impl fmt::Display for PromptStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn pour_target_text(planned: &PlannedStep) -> Option<String> {
    let target = planned.step.pour_target()?;
    Some(match planned.pour_delta {
        Some(delta) if delta > 0.0 => format!("add {delta}g more water (to {target}g total)"),
        _ => format!("bring total water to {target}g"),
    })
}

/// One instruction sentence for the step, citing when the cue changes.
pub fn get_directive(planned: &PlannedStep, style: PromptStyle) -> String {
    let end = format_seconds(i64::from(planned.end_sec));
    let pour_text = pour_target_text(planned);

    if style == PromptStyle::Plain {
        return match (pour_text, planned.step.step_type) {
            (Some(text), _) => format!("Now {text}, then switch at {end}."),
            (None, StepType::Wait | StepType::Prep) => format!("Hold this step until {end}."),
            (None, _) => format!("Complete this move before {end}."),
        };
    }

    if let Some(text) = pour_text {
        return format!("Barista cue: {text}. Next cue at {end}.");
    }

    match planned.step.step_type {
        StepType::Wait => format!("Barista cue: hands off. Let it settle until {end}."),
        StepType::Prep => format!("Barista cue: prep quickly and lock in by {end}."),
        StepType::Stir => format!("Barista cue: one gentle stir, then hold to {end}."),
        StepType::Press => format!("Barista cue: press evenly and finish by {end}."),
        StepType::Serve => format!("Barista cue: pour and serve. Step wraps at {end}."),
        StepType::Pour => format!("Barista cue: follow this step through {end}."),
    }
}

/// Compact one-line label: start time, type, and pour amounts.
///
/// ```text
/// 00:45 · POUR · +150g · 210g total
/// ```
pub fn summarize_step(planned: &PlannedStep) -> String {
    let mut parts = vec![
        format_seconds(i64::from(planned.start_sec)),
        planned.step.step_type.as_str().to_uppercase(),
    ];

    if let Some(target) = planned.step.pour_target() {
        if let Some(delta) = planned.pour_delta.filter(|delta| *delta > 0.0) {
            parts.push(format!("+{delta}g"));
        }
        parts.push(format!("{target}g total"));
    }

    parts.join(" · ")
}
