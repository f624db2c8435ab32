//! Display implementations for domain models and brew plans.
//!
//! Output is markdown so the CLI renderer and MCP clients show the same
//! structure.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    brew::{format_seconds, summarize_step, to_ratio_label, BrewPlan, PlannedStep},
    models::{Difficulty, Recipe, RecipeStep, RecipeSummary, RecipeVersion, ShareLink, StepType},
};

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RecipeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. **{}** {}",
            self.step_order + 1,
            self.step_type.as_str().to_uppercase(),
            self.instruction
        )?;
        let mut facts = Vec::new();
        if let Some(target) = self.target_water_grams {
            facts.push(format!("{target}g total"));
        }
        if let Some(duration) = self.duration_sec {
            facts.push(format_seconds(i64::from(duration)));
        }
        if !facts.is_empty() {
            write!(f, " ({})", facts.join(", "))?;
        }
        writeln!(f)?;
        if let Some(tips) = &self.tips {
            writeln!(f, "   - _{tips}_")?;
        }
        Ok(())
    }
}

impl fmt::Display for RecipeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Version {}", self.version_number)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Coffee: {}g, Water: {}g ({})",
            self.base_dose_grams,
            self.base_water_grams,
            to_ratio_label(self.base_water_grams, self.base_dose_grams)
        )?;
        writeln!(f, "- Temperature: {}°C", self.target_temp_c)?;
        writeln!(f, "- Grind: {}", self.grind_label)?;
        if !self.equipment.is_empty() {
            writeln!(f, "- Equipment: {}", self.equipment.join(", "))?;
        }
        if !self.notes.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.notes)?;
        }
        writeln!(f)?;
        writeln!(f, "### Steps")?;
        writeln!(f)?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        writeln!(f)?;
        writeln!(f, "> {}", self.quote)?;
        writeln!(f)?;
        writeln!(f, "- Slug: {}", self.slug)?;
        writeln!(f, "- Brewer: {}", self.brewer)?;
        writeln!(
            f,
            "- Difficulty: {}, about {} min",
            self.difficulty, self.brew_time_min
        )?;
        writeln!(
            f,
            "- Visibility: {}",
            if self.is_public { "public" } else { "private" }
        )?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;

        match self.active_version() {
            Some(version) => write!(f, "{version}"),
            None => writeln!(f, "No versions in this recipe."),
        }
    }
}

impl fmt::Display for RecipeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visibility = if self.is_public { "" } else { " (private)" };
        writeln!(f, "## {}{visibility}", self.title)?;
        writeln!(f)?;
        writeln!(f, "- **Slug**: {}", self.slug)?;
        writeln!(f, "- **Brewer**: {}", self.brewer)?;
        if let (Some(water), Some(dose)) = (self.base_water_grams, self.base_dose_grams) {
            writeln!(
                f,
                "- **Recipe**: {dose}g coffee, {water}g water ({})",
                to_ratio_label(water, dose)
            )?;
        }
        writeln!(
            f,
            "- **Difficulty**: {} ({} steps, about {} min)",
            self.difficulty, self.step_count, self.brew_time_min
        )?;
        writeln!(f)
    }
}

impl fmt::Display for ShareLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Token: `{}`", self.token)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        match &self.revoked_at {
            Some(at) => writeln!(f, "- Revoked: {}", LocalDateTime(at)),
            None => writeln!(f, "- Status: active"),
        }
    }
}

impl fmt::Display for PlannedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} until {}: {}",
            self.index + 1,
            summarize_step(self),
            format_seconds(i64::from(self.end_sec)),
            self.step.instruction
        )
    }
}

impl fmt::Display for BrewPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Brew plan: {}", self.recipe_title)?;
        writeln!(f)?;
        writeln!(
            f,
            "- {}g coffee, {}g water ({})",
            self.version.base_dose_grams,
            self.version.base_water_grams,
            self.ratio_label()
        )?;
        writeln!(f, "- Water at {}°C, {} grind", self.version.target_temp_c, self.version.grind_label)?;
        writeln!(
            f,
            "- Total time: {}",
            format_seconds(i64::from(self.total_timeline_sec()))
        )?;
        writeln!(f)?;

        writeln!(f, "## Prep")?;
        writeln!(f)?;
        if self.checklist.is_empty() {
            writeln!(f, "Nothing to prepare.")?;
        }
        for item in &self.checklist {
            writeln!(f, "- [ ] {}", item.instruction)?;
        }
        writeln!(f)?;

        writeln!(f, "## Steps")?;
        writeln!(f)?;
        if self.steps.is_empty() {
            writeln!(f, "No timed steps.")?;
        }
        for step in &self.steps {
            writeln!(f, "{step}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        brew::BrewPlan,
        models::{fixtures::v60_recipe, RecipeSummary},
    };

    #[test]
    fn test_recipe_display_shows_active_version() {
        let output = v60_recipe().to_string();
        assert!(output.contains("### Steps"));
        assert!(output.contains("(1:15.9)"));
        assert!(output.contains("**POUR** "));
    }

    #[test]
    fn test_summary_marks_private() {
        let mut recipe = v60_recipe();
        recipe.is_public = false;
        let output = RecipeSummary::from(&recipe).to_string();
        assert!(output.contains("(private)"));
        assert!(output.contains("- **Slug**: test-v60"));
    }

    #[test]
    fn test_plan_display_lists_prep_and_steps() {
        let plan = BrewPlan::prepare(&v60_recipe(), None).unwrap();
        let output = plan.to_string();
        assert!(output.contains("- [ ] Heat water and rinse the filter"));
        assert!(output.contains("- Total time: 02:33"));
        assert!(output.contains("4. "));
    }
}
