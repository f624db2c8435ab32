//! Core library for the brewlab pour-over coffee companion.
//!
//! The crate holds everything below the user interfaces:
//!
//! - [`models`]: recipes, versions, steps and share links
//! - [`brew`]: the pure brew engine (scaling, planning, prep gating, the
//!   session state machine and directives)
//! - [`library`]: the async recipe repository backed by SQLite via [`db`]
//! - [`display`]: markdown rendering shared by the CLI and the MCP server
//! - [`legacy`]: the bundled legacy brew cards imported as seed recipes
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use brewlab_core::{
//!     brew::{get_directive, BrewSession, PromptStyle, SessionEvent},
//!     params::PlanBrew,
//!     LibraryBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let library = LibraryBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let plan = library
//!     .plan_brew(&PlanBrew {
//!         slug: "chemex".to_string(),
//!         target_water_grams: Some(500.0),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{plan}");
//!
//! let mut session = BrewSession::new(&plan, jiff::Timestamp::now());
//! for index in 0..plan.checklist.len() {
//!     session = session.apply(&SessionEvent::CheckPrep { index, checked: true }, &plan);
//! }
//! session = session.apply(&SessionEvent::AcknowledgePrep, &plan);
//! if let Some(step) = session.current_step(&plan.steps) {
//!     println!("{}", get_directive(step, PromptStyle::Barista));
//! }
//! # Ok(())
//! # }
//! ```

pub mod brew;
pub mod db;
pub mod display;
pub mod error;
pub mod legacy;
pub mod library;
pub mod models;
pub mod params;

// Re-export commonly used types
pub use brew::{BrewPlan, BrewSession, PromptStyle, ScaleOptions, SessionEvent, SessionSnapshot};
pub use db::Database;
pub use display::{CreateResult, LocalDateTime, OperationStatus, RecipeSummaries, UpdateResult};
pub use error::{BrewError, Result};
pub use library::{Library, LibraryBuilder};
pub use models::{Recipe, RecipeStep, RecipeSummary, RecipeVersion, ShareLink, StepType};
