//! Tag enumerations for steps and recipes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type tag of a recipe step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StepType {
    /// Setup work before the timer runs (heating, rinsing, grinding)
    Prep,
    /// Adding water up to a cumulative target
    Pour,
    /// Hands-off steeping or drawdown
    Wait,
    /// Agitation
    Stir,
    /// Plunging an immersion brewer
    Press,
    /// Decanting and serving
    Serve,
}

impl FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prep" => Ok(StepType::Prep),
            "pour" => Ok(StepType::Pour),
            "wait" => Ok(StepType::Wait),
            "stir" => Ok(StepType::Stir),
            "press" => Ok(StepType::Press),
            "serve" => Ok(StepType::Serve),
            _ => Err(format!("Invalid step type: {s}")),
        }
    }
}

impl StepType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Prep => "prep",
            StepType::Pour => "pour",
            StepType::Wait => "wait",
            StepType::Stir => "stir",
            StepType::Press => "press",
            StepType::Serve => "serve",
        }
    }

    /// Seconds a step of this type occupies when it carries no timing data.
    pub fn fallback_duration_sec(&self) -> u32 {
        match self {
            StepType::Pour => 18,
            _ => 30,
        }
    }
}

/// Difficulty tag derived from a recipe's step count.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Advanced,
}

impl Difficulty {
    /// Up to five steps is easy, up to seven is medium, anything longer is
    /// advanced.
    ///
    /// ```rust
    /// use brewlab_core::models::Difficulty;
    ///
    /// assert_eq!(Difficulty::from_step_count(5), Difficulty::Easy);
    /// assert_eq!(Difficulty::from_step_count(7), Difficulty::Medium);
    /// assert_eq!(Difficulty::from_step_count(8), Difficulty::Advanced);
    /// ```
    pub fn from_step_count(step_count: usize) -> Self {
        match step_count {
            0..=5 => Difficulty::Easy,
            6..=7 => Difficulty::Medium,
            _ => Difficulty::Advanced,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}
