//! Prompt templates for MCP server

use std::sync::LazyLock;

use serde_json::{Map, Value};

/// Argument definition for a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplateArg {
    pub name: String,
    pub description: String,
    pub required: bool,
    /// Substituted when an optional argument is left out
    pub fallback: &'static str,
}

/// Definition of a prompt template
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub name: String,
    pub description: String,
    pub template: String,
    pub arguments: Vec<PromptTemplateArg>,
}

impl PromptTemplate {
    /// Substitutes `{name}` placeholders with the supplied arguments.
    ///
    /// Missing optional arguments take their fallback text. The error is a
    /// message naming the offending argument.
    pub fn render(&self, arguments: Option<&Map<String, Value>>) -> Result<String, String> {
        let mut text = self.template.clone();
        for arg in &self.arguments {
            let value = match arguments.and_then(|args| args.get(&arg.name)) {
                Some(Value::String(value)) => value.clone(),
                Some(Value::Number(value)) => value.to_string(),
                Some(_) => return Err(format!("Argument '{}' must be a string", arg.name)),
                None if arg.required => {
                    return Err(format!("Required argument '{}' is missing", arg.name))
                }
                None => arg.fallback.to_string(),
            };
            text = text.replace(&format!("{{{}}}", arg.name), &value);
        }
        Ok(text)
    }
}

pub static PROMPT_TEMPLATES: LazyLock<Vec<PromptTemplate>> = LazyLock::new(|| {
    vec![
        PromptTemplate {
            name: "coach".to_string(),
            description: "Walk someone through a brew step by step as their barista".to_string(),
            template: r#"You are a calm, encouraging barista coaching a home brewer through a pour-over.

# Recipe
{slug}

# Water
{water}

## Step 1: Plan the Brew
Call `plan_brew` with the slug above (and `target_water_grams` if a water amount was given).
Read the prep checklist aloud first and wait until the brewer confirms every item.

## Step 2: Coach Each Step
Go through the planned steps in order. For each one:
- Say the directive from the "Directives" section
- Mention the target water mass when the step has one
- Give the step's duration and what to watch for

## Step 3: Wrap Up
When the last step is done, suggest one concrete adjustment for next time
(grind, ratio or pour speed) based on how the brew went."#
                .to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "slug".to_string(),
                    description: "Slug of the recipe to brew, e.g. hario-v60".to_string(),
                    required: true,
                    fallback: "",
                },
                PromptTemplateArg {
                    name: "water".to_string(),
                    description: "Total water in grams; defaults to the recipe's own".to_string(),
                    required: false,
                    fallback: "Use the recipe's own water amount",
                },
            ],
        },
        PromptTemplate {
            name: "dial-in".to_string(),
            description: "Turn tasting notes into a remixed recipe draft".to_string(),
            template: r#"You are helping a brewer dial in a recipe from how the last cup tasted.

# Recipe
{slug}

# Tasting Notes
{notes}

## Step 1: Review the Recipe
Call `show_recipe` to read the current ratio, grind and steps.

## Step 2: Diagnose
- Sour, thin or hollow usually means under-extraction: grind finer, pour hotter or extend contact time
- Bitter, dry or harsh usually means over-extraction: grind coarser or shorten the steps
- Change one variable at a time

## Step 3: Remix
Call `remix_recipe` to get a private copy, then describe the single change to make
and the result you expect in the cup."#
                .to_string(),
            arguments: vec![
                PromptTemplateArg {
                    name: "slug".to_string(),
                    description: "Slug of the recipe that was brewed".to_string(),
                    required: true,
                    fallback: "",
                },
                PromptTemplateArg {
                    name: "notes".to_string(),
                    description: "How the cup tasted".to_string(),
                    required: false,
                    fallback: "No notes given; ask the brewer how the cup tasted",
                },
            ],
        },
    ]
});

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn template(name: &str) -> &'static PromptTemplate {
        PROMPT_TEMPLATES
            .iter()
            .find(|t| t.name == name)
            .expect("template exists")
    }

    #[test]
    fn test_render_substitutes_arguments() {
        let args = json!({ "slug": "chemex", "water": 600 });
        let text = template("coach")
            .render(args.as_object())
            .expect("renders");
        assert!(text.contains("chemex"));
        assert!(text.contains("600"));
        assert!(!text.contains("{slug}"));
    }

    #[test]
    fn test_optional_argument_falls_back() {
        let args = json!({ "slug": "kalita-wave" });
        let text = template("dial-in")
            .render(args.as_object())
            .expect("renders");
        assert!(text.contains("ask the brewer how the cup tasted"));
        assert!(!text.contains("{notes}"));
    }

    #[test]
    fn test_missing_required_argument_is_rejected() {
        let error = template("coach").render(None).unwrap_err();
        assert!(error.contains("slug"));
    }

    #[test]
    fn test_non_string_argument_is_rejected() {
        let args = json!({ "slug": ["a", "b"] });
        assert!(template("dial-in").render(args.as_object()).is_err());
    }
}
