//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Recipe, ShareLink};

/// Wrapper type for displaying a newly created resource.
///
/// ```rust,no_run
/// # use brewlab_core::{display::CreateResult, LibraryBuilder};
/// # async {
/// let library = LibraryBuilder::new().build().await?;
/// let draft = library.create_draft_recipe("local").await?;
/// println!("{}", CreateResult::new(draft));
/// # Result::<(), brewlab_core::BrewError>::Ok(())
/// # };
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Recipe> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created recipe with slug: {}", self.resource.slug)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ShareLink> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Share token: {}", self.resource.token)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying an updated resource with a list of changes.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<Recipe> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated recipe: {}", self.resource.slug)?;
        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        Ok(())
    }
}
