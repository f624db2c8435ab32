//! Command handlers and their clap argument wrappers.
//!
//! Each wrapper converts into the matching core parameter type with `From`,
//! so clap attributes never leak into `brewlab_core::params`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use brewlab_core::{
    brew::get_directive,
    display::{CreateResult, OperationStatus, UpdateResult},
    params::{ListRecipes, PlanBrew, RecipeSlug, ScaleRecipe, ShareToken},
    BrewPlan, Library, PromptStyle, Recipe,
};
use clap::{Args, Subcommand, ValueEnum};
use log::debug;

use crate::{brew::BrewRunner, renderer::TerminalRenderer};

/// List recipes
#[derive(Args)]
pub struct ListRecipesArgs {
    #[arg(long, help = "Show your own recipes (drafts included) instead of public ones")]
    pub mine: bool,
}

impl From<ListRecipesArgs> for ListRecipes {
    fn from(val: ListRecipesArgs) -> Self {
        ListRecipes { mine: val.mine }
    }
}

/// Select a recipe by slug
#[derive(Args)]
pub struct SlugArgs {
    #[arg(help = "URL slug of the recipe, e.g. hario-v60")]
    pub slug: String,
}

impl From<SlugArgs> for RecipeSlug {
    fn from(val: SlugArgs) -> Self {
        RecipeSlug { slug: val.slug }
    }
}

/// Rescale a recipe
#[derive(Args)]
pub struct ScaleArgs {
    #[arg(help = "URL slug of the recipe")]
    pub slug: String,
    #[arg(short, long, help = "Total water in grams")]
    pub water: Option<f64>,
    #[arg(short, long, help = "Water to coffee ratio, e.g. 16 for 1:16")]
    pub ratio: Option<f64>,
}

impl From<ScaleArgs> for ScaleRecipe {
    fn from(val: ScaleArgs) -> Self {
        ScaleRecipe {
            slug: val.slug,
            target_water_grams: val.water,
            target_ratio: val.ratio,
        }
    }
}

/// Directive voice
#[derive(Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum StyleArg {
    #[default]
    Barista,
    Plain,
}

impl From<StyleArg> for PromptStyle {
    fn from(val: StyleArg) -> Self {
        match val {
            StyleArg::Barista => PromptStyle::Barista,
            StyleArg::Plain => PromptStyle::Plain,
        }
    }
}

/// Show the prep checklist and step schedule for a brew
#[derive(Args)]
pub struct PlanArgs {
    #[arg(help = "URL slug of the recipe")]
    pub slug: String,
    #[arg(short, long, help = "Total water in grams")]
    pub water: Option<f64>,
    #[arg(short, long, help = "Water to coffee ratio, e.g. 16 for 1:16")]
    pub ratio: Option<f64>,
    #[arg(long, value_enum, default_value_t, help = "Directive voice")]
    pub style: StyleArg,
}

impl From<PlanArgs> for PlanBrew {
    fn from(val: PlanArgs) -> Self {
        PlanBrew {
            slug: val.slug,
            target_water_grams: val.water,
            target_ratio: val.ratio,
            prompt_style: val.style.into(),
        }
    }
}

/// Save an edited recipe draft from a JSON file
#[derive(Args)]
pub struct SaveArgs {
    #[arg(help = "Path to a recipe JSON file, as printed by `recipe export`")]
    pub file: PathBuf,
}

/// Select a share link by token
#[derive(Args)]
pub struct TokenArgs {
    #[arg(help = "Share token, or seed-<slug> for a bundled recipe")]
    pub token: String,
}

impl From<TokenArgs> for ShareToken {
    fn from(val: TokenArgs) -> Self {
        ShareToken { token: val.token }
    }
}

/// Run a guided brew session
#[derive(Args)]
pub struct BrewArgs {
    #[arg(help = "URL slug of the recipe")]
    pub slug: String,
    #[arg(short, long, help = "Total water in grams")]
    pub water: Option<f64>,
    #[arg(short, long, help = "Water to coffee ratio, e.g. 16 for 1:16")]
    pub ratio: Option<f64>,
    #[arg(long, value_enum, help = "Directive voice (defaults to the resumed or barista voice)")]
    pub style: Option<StyleArg>,
    #[arg(long, help = "Hold at the end of each step until you skip")]
    pub manual: bool,
    #[arg(long, help = "Do not ring the terminal bell when a step completes")]
    pub no_sound: bool,
    #[arg(long, help = "Start over instead of resuming a saved session")]
    pub fresh: bool,
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// List public recipes, or your own with --mine
    #[command(aliases = ["l", "ls"])]
    List(ListRecipesArgs),
    /// Show a recipe with its active version
    #[command(alias = "s")]
    Show(SlugArgs),
    /// Rescale a recipe to a water mass and ratio
    Scale(ScaleArgs),
    /// Show the brew plan: prep checklist, schedule and directives
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Create a private draft from the pour-over template
    #[command(alias = "n")]
    New,
    /// Print a recipe as JSON
    Export(SlugArgs),
    /// Save a draft from a JSON file
    Save(SaveArgs),
    /// Make one of your recipes public
    Publish(SlugArgs),
    /// Copy a recipe into a private draft of your own
    Remix(SlugArgs),
}

#[derive(Subcommand)]
pub enum ShareCommands {
    /// Get or create your share link for a recipe
    #[command(alias = "c")]
    Create(SlugArgs),
    /// List your share links for a recipe
    #[command(aliases = ["l", "ls"])]
    List(SlugArgs),
    /// Show the recipe a token points at
    #[command(alias = "o")]
    Open(TokenArgs),
    /// Remix the recipe a token points at
    Remix(TokenArgs),
    /// Revoke one of your share links
    Revoke(TokenArgs),
}

/// Runs commands against the library and renders their output.
pub struct Cli {
    library: Library,
    renderer: TerminalRenderer,
    owner: String,
}

impl Cli {
    pub fn new(library: Library, renderer: TerminalRenderer, owner: String) -> Self {
        Self {
            library,
            renderer,
            owner,
        }
    }

    pub async fn handle_recipe_command(&self, command: RecipeCommands) -> Result<()> {
        match command {
            RecipeCommands::List(args) => self.list_recipes(&args.into()).await,
            RecipeCommands::Show(args) => self.show_recipe(&args.into()).await,
            RecipeCommands::Scale(args) => {
                let plan = self.library.scale_recipe(&args.into()).await?;
                self.renderer.render(&plan.version.to_string())
            }
            RecipeCommands::Plan(args) => {
                let params = PlanBrew::from(args);
                let plan = self.library.plan_brew(&params).await?;
                let output = format!("{plan}{}", directives_section(&plan, params.prompt_style));
                self.renderer.render(&output)
            }
            RecipeCommands::New => {
                let draft = self.library.create_draft_recipe(&self.owner).await?;
                self.renderer.render(&CreateResult::new(draft).to_string())
            }
            RecipeCommands::Export(args) => {
                let recipe = self.library.require_recipe_by_slug(&args.into()).await?;
                println!("{}", serde_json::to_string_pretty(&recipe)?);
                Ok(())
            }
            RecipeCommands::Save(args) => self.save_draft(args).await,
            RecipeCommands::Publish(args) => {
                let published = self
                    .library
                    .publish_recipe_by_slug(&args.into(), &self.owner)
                    .await?;
                let result =
                    UpdateResult::with_changes(published, vec!["Published".to_string()]);
                self.renderer.render(&result.to_string())
            }
            RecipeCommands::Remix(args) => {
                let remix = self
                    .library
                    .remix_recipe_by_slug(&args.into(), &self.owner)
                    .await?;
                self.renderer.render(&CreateResult::new(remix).to_string())
            }
        }
    }

    pub async fn handle_share_command(&self, command: ShareCommands) -> Result<()> {
        match command {
            ShareCommands::Create(args) => {
                let link = self
                    .library
                    .create_or_get_share_link(&args.into(), &self.owner)
                    .await?;
                self.renderer.render(&CreateResult::new(link).to_string())
            }
            ShareCommands::List(args) => {
                let links = self
                    .library
                    .list_share_links(&args.into(), &self.owner)
                    .await?;
                self.renderer.render(&links.to_string())
            }
            ShareCommands::Open(args) => {
                let params = ShareToken::from(args);
                match self.library.get_recipe_by_share_token(&params).await? {
                    Some(recipe) => self.renderer.render(&recipe.to_string()),
                    None => self.renderer.render(
                        &OperationStatus::failure(format!(
                            "Share link '{}' not found or revoked",
                            params.token
                        ))
                        .to_string(),
                    ),
                }
            }
            ShareCommands::Remix(args) => {
                let remix = self
                    .library
                    .remix_recipe_from_share_token(&args.into(), &self.owner)
                    .await?;
                self.renderer.render(&CreateResult::new(remix).to_string())
            }
            ShareCommands::Revoke(args) => {
                let params = ShareToken::from(args);
                self.library.revoke_share_link(&params, &self.owner).await?;
                self.renderer.render(
                    &OperationStatus::success(format!("Revoked share link {}", params.token))
                        .to_string(),
                )
            }
        }
    }

    pub async fn brew(self, args: BrewArgs) -> Result<()> {
        BrewRunner::prepare(self.library, self.renderer, args)
            .await?
            .run()
            .await
    }

    pub async fn list_recipes(&self, params: &ListRecipes) -> Result<()> {
        let summaries = self
            .library
            .list_recipes_summary(params, &self.owner)
            .await?;
        let title = if params.mine { "My Recipes" } else { "Recipes" };
        self.renderer.render(&format!("# {title}\n\n{summaries}"))
    }

    async fn show_recipe(&self, params: &RecipeSlug) -> Result<()> {
        let recipe = self.library.require_recipe_by_slug(params).await?;
        self.renderer.render(&recipe.to_string())
    }

    async fn save_draft(&self, args: SaveArgs) -> Result<()> {
        let text = std::fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let recipe: Recipe = serde_json::from_str(&text)
            .with_context(|| format!("{} is not a recipe document", args.file.display()))?;
        debug!("Saving draft '{}' from {}", recipe.slug, args.file.display());

        let saved = self.library.save_recipe_draft(recipe, &self.owner).await?;
        let result = UpdateResult::with_changes(
            saved,
            vec!["Saved draft; difficulty and brew time recomputed".to_string()],
        );
        self.renderer.render(&result.to_string())
    }
}

/// Markdown list of the spoken directive for every planned step.
pub fn directives_section(plan: &BrewPlan, style: PromptStyle) -> String {
    let mut output = String::from("\n## Directives\n\n");
    for step in &plan.steps {
        output.push_str(&format!("{}. {}\n", step.index + 1, get_directive(step, style)));
    }
    output
}
