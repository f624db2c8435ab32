//! Prep classification and the pre-brew checklist.
//!
//! Prep-like steps (heating water, placing and rinsing the filter) are pulled
//! out of the timed plan and presented as a checklist that must be completed
//! before the timer may run.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{RecipeStep, StepType};

pub const DEFAULT_HEAT_ITEM_ID: &str = "prep-default-heat-water";
pub const DEFAULT_FILTER_ITEM_ID: &str = "prep-default-filter-placement";

static HEAT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(heat|preheat|boil|kettle|temperature|temp)\b").expect("valid heat pattern")
});

static FILTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(filter|rinse)\b").expect("valid filter pattern"));

/// One item the brewer must tick off before brewing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepChecklistItem {
    /// Step id, or a `prep-default-*` id for synthesized items
    pub id: String,
    pub instruction: String,
}

pub fn mentions_heating(instruction: &str) -> bool {
    HEAT_PATTERN.is_match(instruction)
}

pub fn mentions_filter(instruction: &str) -> bool {
    FILTER_PATTERN.is_match(instruction)
}

pub fn is_prep_like_instruction(instruction: &str) -> bool {
    mentions_heating(instruction) || mentions_filter(instruction)
}

/// A step is prep-like when tagged `prep` or when its instruction talks
/// about heating or the filter.
pub fn is_prep_like_step(step: &RecipeStep) -> bool {
    step.step_type == StepType::Prep || is_prep_like_instruction(&step.instruction)
}

/// Splits steps into `(prep_like, brew)`, both in original order.
pub fn partition_steps(steps: &[RecipeStep]) -> (Vec<RecipeStep>, Vec<RecipeStep>) {
    steps.iter().cloned().partition(is_prep_like_step)
}

/// Builds the checklist: one item per distinct prep step id, then a default
/// heating item and a default filter item when no step covers them.
pub fn build_prep_checklist(
    prep_steps: &[RecipeStep],
    all_steps: &[RecipeStep],
    target_temp_c: f64,
) -> Vec<PrepChecklistItem> {
    let mut items: Vec<PrepChecklistItem> = Vec::with_capacity(prep_steps.len() + 2);

    for (index, step) in prep_steps.iter().enumerate() {
        let instruction = if step.instruction.is_empty() {
            format!("Prep task {}", index + 1)
        } else {
            step.instruction.clone()
        };
        match items.iter_mut().find(|item| item.id == step.id) {
            Some(existing) => existing.instruction = instruction,
            None => items.push(PrepChecklistItem {
                id: step.id.clone(),
                instruction,
            }),
        }
    }

    let instructions = || {
        prep_steps
            .iter()
            .chain(all_steps)
            .map(|step| step.instruction.as_str())
    };

    if !instructions().any(mentions_heating) {
        items.push(PrepChecklistItem {
            id: DEFAULT_HEAT_ITEM_ID.to_string(),
            instruction: format!("Heat water to about {target_temp_c}°C before brewing."),
        });
    }

    if !instructions().any(mentions_filter) {
        items.push(PrepChecklistItem {
            id: DEFAULT_FILTER_ITEM_ID.to_string(),
            instruction: "Place and rinse your filter before adding coffee.".to_string(),
        });
    }

    items
}

/// Acknowledgement state of the checklist; the timer is gated until `ready`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepGate {
    pub checks: Vec<bool>,
    pub ready: bool,
}

impl PrepGate {
    /// A fresh gate for a checklist of `len` items; an empty checklist is
    /// open from the start.
    pub fn new(len: usize) -> Self {
        Self {
            checks: vec![false; len],
            ready: len == 0,
        }
    }

    pub fn all_checked(&self) -> bool {
        self.checks.iter().all(|checked| *checked)
    }

    /// Whether `acknowledge` would open the gate.
    pub fn can_acknowledge(&self) -> bool {
        !self.ready && self.all_checked()
    }

    /// Sets one item; ignored once the gate is open or for an unknown index.
    #[must_use]
    pub fn check(mut self, index: usize, checked: bool) -> Self {
        if !self.ready {
            if let Some(slot) = self.checks.get_mut(index) {
                *slot = checked;
            }
        }
        self
    }

    /// Opens the gate when every item is checked; otherwise unchanged.
    #[must_use]
    pub fn acknowledge(mut self) -> Self {
        if self.all_checked() {
            self.ready = true;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{pour, step, timed};

    #[test]
    fn test_prep_patterns_match_whole_words_case_insensitively() {
        assert!(mentions_heating("Preheat the kettle"));
        assert!(mentions_heating("Check water TEMP"));
        assert!(!mentions_heating("Pour into the heated carafe"));
        assert!(mentions_filter("Rinse the paper"));
        assert!(mentions_filter("Place the FILTER"));
        assert!(!mentions_filter("Filtered water only"));
    }

    #[test]
    fn test_partition_by_type_and_instruction() {
        let steps = vec![
            step(0, StepType::Prep, "Grind 22g coffee"),
            step(1, StepType::Wait, "Rinse the filter with hot water"),
            pour(2, 60.0, Some(30)),
            timed(3, StepType::Stir, "Stir gently", Some(5)),
        ];
        let (prep, brew) = partition_steps(&steps);

        assert_eq!(prep.iter().map(|s| s.step_order).collect::<Vec<_>>(), vec![0, 1]);
        assert_eq!(brew.iter().map(|s| s.step_order).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_checklist_synthesizes_both_defaults() {
        let steps = vec![step(0, StepType::Prep, "Grind coffee medium-fine"), pour(1, 300.0, None)];
        let (prep, _) = partition_steps(&steps);
        let checklist = build_prep_checklist(&prep, &steps, 94.0);

        let ids: Vec<_> = checklist.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["test-step-1", DEFAULT_HEAT_ITEM_ID, DEFAULT_FILTER_ITEM_ID]);
        assert_eq!(checklist[1].instruction, "Heat water to about 94°C before brewing.");
    }

    #[test]
    fn test_checklist_skips_covered_defaults() {
        let steps = vec![
            step(0, StepType::Prep, "Heat water and rinse filter."),
            pour(1, 300.0, None),
        ];
        let (prep, _) = partition_steps(&steps);
        let checklist = build_prep_checklist(&prep, &steps, 96.0);

        assert_eq!(checklist.len(), 1);
        assert_eq!(checklist[0].instruction, "Heat water and rinse filter.");
    }

    #[test]
    fn test_checklist_collapses_duplicate_ids_only() {
        let first = step(0, StepType::Prep, "Boil water");
        let mut repeat = step(1, StepType::Prep, "Boil water");
        repeat.id = first.id.clone();
        let other = step(2, StepType::Prep, "Boil water");
        let prep = vec![first, repeat, other];
        let checklist = build_prep_checklist(&prep, &prep, 96.0);

        // two distinct ids, plus the filter default
        assert_eq!(checklist.len(), 3);
        assert_eq!(checklist[0].id, "test-step-1");
        assert_eq!(checklist[1].id, "test-step-3");
    }

    #[test]
    fn test_empty_instruction_gets_placeholder() {
        let prep = vec![step(0, StepType::Prep, "")];
        let checklist = build_prep_checklist(&prep, &prep, 96.0);
        assert_eq!(checklist[0].instruction, "Prep task 1");
    }

    #[test]
    fn test_gate_requires_every_item() {
        let gate = PrepGate::new(2).check(0, true);
        assert!(!gate.can_acknowledge());
        let gate = gate.acknowledge();
        assert!(!gate.ready);

        let gate = gate.check(1, true).acknowledge();
        assert!(gate.ready);
        assert!(!gate.can_acknowledge());
    }

    #[test]
    fn test_gate_ignores_checks_once_open_and_bad_indices() {
        let gate = PrepGate::new(1).check(5, true);
        assert_eq!(gate.checks, vec![false]);

        let gate = gate.check(0, true).acknowledge().check(0, false);
        assert_eq!(gate.checks, vec![true]);
    }

    #[test]
    fn test_empty_checklist_gate_starts_open() {
        assert!(PrepGate::new(0).ready);
    }
}
