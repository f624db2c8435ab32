//! MCP tool handlers implementation

use std::sync::Arc;

use brewlab_core::{
    display::{CreateResult, OperationStatus, UpdateResult},
    params as core, Library,
};
use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{
        CallToolResult, Content, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        PaginatedRequestParam, Prompt, PromptArgument, PromptMessage, PromptMessageContent,
        PromptMessageRole,
    },
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::{errors::to_mcp_error, prompts::PROMPT_TEMPLATES};
use crate::cli::directives_section;

/// Transparent MCP wrapper that adds `Deserialize` and a JSON schema to a
/// core parameter type.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type RecipeSlug = McpParams<core::RecipeSlug>;
pub type ListRecipes = McpParams<core::ListRecipes>;
pub type ScaleRecipe = McpParams<core::ScaleRecipe>;
pub type PlanBrew = McpParams<core::PlanBrew>;
pub type ShareToken = McpParams<core::ShareToken>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text_result(text: impl Into<String>) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

/// Handler implementations for the MCP server, acting as a single owner.
pub struct McpHandlers {
    library: Arc<Library>,
    owner: String,
}

impl McpHandlers {
    pub fn new(library: Arc<Library>, owner: String) -> Self {
        Self { library, owner }
    }

    pub async fn list_recipes(&self, Parameters(params): Parameters<ListRecipes>) -> McpResult {
        debug!("list_recipes: {:?}", params);

        let inner_params = params.as_ref();
        let summaries = self
            .library
            .list_recipes_summary(inner_params, &self.owner)
            .await
            .map_err(|e| to_mcp_error("Failed to list recipes", &e))?;

        let title = match (summaries.is_empty(), inner_params.mine) {
            (true, true) => "You have no recipes yet",
            (true, false) => "No public recipes found",
            (false, true) => "My Recipes",
            (false, false) => "Public Recipes",
        };
        text_result(format!("# {title}\n\n{summaries}"))
    }

    pub async fn show_recipe(&self, Parameters(params): Parameters<RecipeSlug>) -> McpResult {
        debug!("show_recipe: {:?}", params);

        let recipe = self
            .library
            .require_recipe_by_slug(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get recipe", &e))?;
        text_result(recipe.to_string())
    }

    pub async fn scale_recipe(&self, Parameters(params): Parameters<ScaleRecipe>) -> McpResult {
        debug!("scale_recipe: {:?}", params);

        let plan = self
            .library
            .scale_recipe(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to scale recipe", &e))?;
        text_result(plan.version.to_string())
    }

    pub async fn plan_brew(&self, Parameters(params): Parameters<PlanBrew>) -> McpResult {
        debug!("plan_brew: {:?}", params);

        let inner_params = params.as_ref();
        let plan = self
            .library
            .plan_brew(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to plan brew", &e))?;
        text_result(format!(
            "{plan}{}",
            directives_section(&plan, inner_params.prompt_style)
        ))
    }

    pub async fn create_draft(&self) -> McpResult {
        debug!("create_draft for '{}'", self.owner);

        let draft = self
            .library
            .create_draft_recipe(&self.owner)
            .await
            .map_err(|e| to_mcp_error("Failed to create draft", &e))?;
        text_result(CreateResult::new(draft).to_string())
    }

    pub async fn publish_recipe(&self, Parameters(params): Parameters<RecipeSlug>) -> McpResult {
        debug!("publish_recipe: {:?}", params);

        let published = self
            .library
            .publish_recipe_by_slug(params.as_ref(), &self.owner)
            .await
            .map_err(|e| to_mcp_error("Failed to publish recipe", &e))?;
        text_result(
            UpdateResult::with_changes(published, vec!["Published".to_string()]).to_string(),
        )
    }

    pub async fn remix_recipe(&self, Parameters(params): Parameters<RecipeSlug>) -> McpResult {
        debug!("remix_recipe: {:?}", params);

        let remix = self
            .library
            .remix_recipe_by_slug(params.as_ref(), &self.owner)
            .await
            .map_err(|e| to_mcp_error("Failed to remix recipe", &e))?;
        text_result(CreateResult::new(remix).to_string())
    }

    pub async fn share_recipe(&self, Parameters(params): Parameters<RecipeSlug>) -> McpResult {
        debug!("share_recipe: {:?}", params);

        let link = self
            .library
            .create_or_get_share_link(params.as_ref(), &self.owner)
            .await
            .map_err(|e| to_mcp_error("Failed to create share link", &e))?;
        text_result(CreateResult::new(link).to_string())
    }

    pub async fn list_share_links(
        &self,
        Parameters(params): Parameters<RecipeSlug>,
    ) -> McpResult {
        debug!("list_share_links: {:?}", params);

        let links = self
            .library
            .list_share_links(params.as_ref(), &self.owner)
            .await
            .map_err(|e| to_mcp_error("Failed to list share links", &e))?;
        text_result(links.to_string())
    }

    pub async fn revoke_share_link(
        &self,
        Parameters(params): Parameters<ShareToken>,
    ) -> McpResult {
        debug!("revoke_share_link: {:?}", params);

        let inner_params = params.as_ref();
        self.library
            .revoke_share_link(inner_params, &self.owner)
            .await
            .map_err(|e| to_mcp_error("Failed to revoke share link", &e))?;
        text_result(
            OperationStatus::success(format!("Revoked share link {}", inner_params.token))
                .to_string(),
        )
    }

    pub async fn open_share(&self, Parameters(params): Parameters<ShareToken>) -> McpResult {
        debug!("open_share: {:?}", params);

        let inner_params = params.as_ref();
        let recipe = self
            .library
            .get_recipe_by_share_token(inner_params)
            .await
            .map_err(|e| to_mcp_error("Failed to open share link", &e))?;
        match recipe {
            Some(recipe) => text_result(recipe.to_string()),
            None => text_result(
                OperationStatus::failure(format!(
                    "Share link '{}' not found or revoked",
                    inner_params.token
                ))
                .to_string(),
            ),
        }
    }

    pub async fn remix_share(&self, Parameters(params): Parameters<ShareToken>) -> McpResult {
        debug!("remix_share: {:?}", params);

        let remix = self
            .library
            .remix_recipe_from_share_token(params.as_ref(), &self.owner)
            .await
            .map_err(|e| to_mcp_error("Failed to remix shared recipe", &e))?;
        text_result(CreateResult::new(remix).to_string())
    }

    pub async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
    ) -> Result<ListPromptsResult, ErrorData> {
        debug!("list_prompts");

        let prompts = PROMPT_TEMPLATES
            .iter()
            .map(|template| {
                Prompt::new(
                    &template.name,
                    Some(&template.description),
                    Some(
                        template
                            .arguments
                            .iter()
                            .map(|arg| PromptArgument {
                                name: arg.name.clone(),
                                description: Some(arg.description.clone()),
                                required: Some(arg.required),
                            })
                            .collect(),
                    ),
                )
            })
            .collect();

        Ok(ListPromptsResult {
            next_cursor: None,
            prompts,
        })
    }

    pub async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
    ) -> Result<GetPromptResult, ErrorData> {
        debug!("get_prompt: {}", request.name);

        let template = PROMPT_TEMPLATES
            .iter()
            .find(|t| t.name == request.name)
            .ok_or_else(|| ErrorData::invalid_params("Prompt not found", None))?;

        let prompt_text = template
            .render(request.arguments.as_ref())
            .map_err(|message| ErrorData::invalid_params(message, None))?;

        Ok(GetPromptResult {
            description: Some(template.description.clone()),
            messages: vec![PromptMessage {
                role: PromptMessageRole::User,
                content: PromptMessageContent::text(prompt_text),
            }],
        })
    }
}
