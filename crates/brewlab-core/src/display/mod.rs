//! Display formatting for recipes, listings, brew plans and operation
//! results.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes go through newtype wrappers so the CLI
//! renderer and the MCP server print the same markdown.
//!
//! - [`collections`]: [`RecipeSummaries`], [`ShareLinks`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`]
//!
//! ```rust
//! use brewlab_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Share link revoked".to_string());
//! assert_eq!(status.to_string(), "Success: Share link revoked\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{RecipeSummaries, ShareLinks};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, UpdateResult};
pub use status::OperationStatus;
