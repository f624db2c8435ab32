//! MCP server implementation for brewlab
//!
//! Exposes the recipe library and brew planner as Model Context Protocol
//! tools so assistants can browse, plan, remix and share recipes.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use brewlab_core::Library;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{
        GetPromptRequestParam, GetPromptResult, Implementation, ListPromptsResult,
        PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;
pub mod prompts;

pub use handlers::{ListRecipes, McpResult, PlanBrew, RecipeSlug, ScaleRecipe, ShareToken};

const INSTRUCTIONS: &str = r#"brewlab is a pour-over coffee companion: a library of brew recipes, a planner that scales them and a share system for passing recipes around.

## Core Concepts
- **Recipes**: Titled brews for a brewer (V60, Chemex, Kalita Wave...) with one or more versions
- **Versions**: The dose, water, ratio, grind and temperature plus an ordered list of steps
- **Steps**: Timed actions (bloom, pour, wait, stir, swirl, press) or untimed prep (grind, rinse, heat)
- **Share links**: Tokens that give read access to one published version of a recipe

## Workflows

### Brewing
1. `list_recipes` to browse the public library
2. `plan_brew` with a slug and optional water or ratio for the prep checklist, schedule and directives

### Authoring
1. `create_draft` or `remix_recipe` to get a private recipe of your own
2. `publish_recipe` when it is ready for everyone

### Sharing
1. `share_recipe` returns a token (the same one until it is revoked)
2. `open_share` and `remix_share` resolve a token; `revoke_share_link` ends it
- Seed recipes are always reachable with the token "seed-{slug}""#;

/// MCP server for brewlab
#[derive(Clone)]
pub struct BrewlabMcpServer {
    library: Arc<Library>,
    owner: String,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl BrewlabMcpServer {
    /// Create a server acting as `owner` for every tool call
    pub fn new(library: Library, owner: String) -> Self {
        Self {
            library: Arc::new(library),
            owner,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.library.clone(), self.owner.clone())
    }

    #[tool(
        name = "list_recipes",
        description = "List recipes as summaries with brewer, difficulty, brew time, water and dose. Use mine=false (default) for the public library or mine=true for your own recipes including private drafts."
    )]
    async fn list_recipes(&self, params: Parameters<ListRecipes>) -> McpResult {
        self.handlers().list_recipes(params).await
    }

    #[tool(
        name = "show_recipe",
        description = "Show a recipe by slug with its active version: dose, water, ratio, grind, temperature and every step with its duration and water target."
    )]
    async fn show_recipe(&self, params: Parameters<RecipeSlug>) -> McpResult {
        self.handlers().show_recipe(params).await
    }

    #[tool(
        name = "scale_recipe",
        description = "Rescale a recipe's active version to a target water mass (grams) and/or ratio. Missing targets keep the recipe's own values. Dose and every step's water target follow the new totals."
    )]
    async fn scale_recipe(&self, params: Parameters<ScaleRecipe>) -> McpResult {
        self.handlers().scale_recipe(params).await
    }

    #[tool(
        name = "plan_brew",
        description = "Plan a brew session: scale the recipe, split prep steps (grind, rinse, heat) into a checklist, schedule the timed steps with start and end times, and add a spoken directive per step. prompt_style is 'barista' (default) or 'plain'."
    )]
    async fn plan_brew(&self, params: Parameters<PlanBrew>) -> McpResult {
        self.handlers().plan_brew(params).await
    }

    #[tool(
        name = "create_draft",
        description = "Create a private template draft owned by you. Returns the new slug; edit it from the CLI with export/save, then publish it."
    )]
    async fn create_draft(&self) -> McpResult {
        self.handlers().create_draft().await
    }

    #[tool(
        name = "publish_recipe",
        description = "Make one of your own recipes public. Fails if the recipe belongs to someone else."
    )]
    async fn publish_recipe(&self, params: Parameters<RecipeSlug>) -> McpResult {
        self.handlers().publish_recipe(params).await
    }

    #[tool(
        name = "remix_recipe",
        description = "Copy the active version of a public recipe (or one of yours) into a new private draft owned by you. The copy gets a new slug ending in '-remix-xxxx'."
    )]
    async fn remix_recipe(&self, params: Parameters<RecipeSlug>) -> McpResult {
        self.handlers().remix_recipe(params).await
    }

    #[tool(
        name = "share_recipe",
        description = "Get your share token for a recipe, creating one if you have no active link. The token points at the recipe's current active version."
    )]
    async fn share_recipe(&self, params: Parameters<RecipeSlug>) -> McpResult {
        self.handlers().share_recipe(params).await
    }

    #[tool(
        name = "list_share_links",
        description = "List the share links you created for a recipe, including revoked ones."
    )]
    async fn list_share_links(&self, params: Parameters<RecipeSlug>) -> McpResult {
        self.handlers().list_share_links(params).await
    }

    #[tool(
        name = "revoke_share_link",
        description = "Revoke one of your share tokens. Revoked tokens no longer resolve."
    )]
    async fn revoke_share_link(&self, params: Parameters<ShareToken>) -> McpResult {
        self.handlers().revoke_share_link(params).await
    }

    #[tool(
        name = "open_share",
        description = "Show the recipe a share token points at, at the version that was shared. Tokens of the form 'seed-{slug}' open seed recipes."
    )]
    async fn open_share(&self, params: Parameters<ShareToken>) -> McpResult {
        self.handlers().open_share(params).await
    }

    #[tool(
        name = "remix_share",
        description = "Remix the recipe a share token points at into a private draft of your own. Works for private recipes shared with you."
    )]
    async fn remix_share(&self, params: Parameters<ShareToken>) -> McpResult {
        self.handlers().remix_share(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for BrewlabMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "brewlab".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_prompts(
        &self,
        request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        self.handlers().list_prompts(request).await
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        self.handlers().get_prompt(request).await
    }
}

/// Run the MCP server with stdio transport until the client disconnects or
/// the process is interrupted
pub async fn run_stdio_server(server: BrewlabMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting brewlab MCP server on stdio as '{}'", server.owner);
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use brewlab_core::LibraryBuilder;
    use tempfile::TempDir;

    use super::*;

    async fn create_test_server() -> (BrewlabMcpServer, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let library = LibraryBuilder::new()
            .with_database_path(Some(temp_dir.path().join("mcp.db")))
            .build()
            .await
            .expect("Failed to build library");
        (BrewlabMcpServer::new(library, "tester".to_string()), temp_dir)
    }

    #[tokio::test]
    async fn test_every_tool_is_routed() {
        let (server, _temp_dir) = create_test_server().await;
        let names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        for expected in [
            "list_recipes",
            "show_recipe",
            "scale_recipe",
            "plan_brew",
            "create_draft",
            "publish_recipe",
            "remix_recipe",
            "share_recipe",
            "list_share_links",
            "revoke_share_link",
            "open_share",
            "remix_share",
        ] {
            assert!(names.iter().any(|name| name == expected), "{expected} missing");
        }
    }

    #[tokio::test]
    async fn test_server_info_names_brewlab() {
        let (server, _temp_dir) = create_test_server().await;
        let info = server.get_info();
        assert_eq!(info.server_info.name, "brewlab");
        assert!(info
            .instructions
            .unwrap_or_default()
            .contains("seed-{slug}"));
    }
}
