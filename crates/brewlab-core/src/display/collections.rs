//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{RecipeSummary, ShareLink};

/// Newtype wrapper for displaying a recipe listing. Empty listings print a
/// placeholder line.
///
/// # Examples
///
/// ```rust
/// use brewlab_core::{
///     display::RecipeSummaries,
///     models::{Difficulty, RecipeSummary},
/// };
///
/// let summary = RecipeSummary {
///     slug: "chemex".to_string(),
///     title: "Chemex".to_string(),
///     brewer: "Chemex".to_string(),
///     difficulty: Difficulty::Medium,
///     brew_time_min: 5,
///     is_public: true,
///     base_water_grams: Some(700.0),
///     base_dose_grams: Some(50.0),
///     step_count: 7,
/// };
///
/// let output = RecipeSummaries(vec![summary]).to_string();
/// assert!(output.contains("(1:14.0)"));
/// ```
#[derive(Debug, Clone, serde::Serialize)]
#[serde(transparent)]
pub struct RecipeSummaries(pub Vec<RecipeSummary>);

impl RecipeSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecipeSummary> {
        self.0.iter()
    }
}

impl Index<usize> for RecipeSummaries {
    type Output = RecipeSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a RecipeSummaries {
    type Item = &'a RecipeSummary;
    type IntoIter = std::slice::Iter<'a, RecipeSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RecipeSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No recipes found.")
        } else {
            for summary in &self.0 {
                write!(f, "{summary}")?;
            }
            Ok(())
        }
    }
}

/// A recipe's share links, newest first.
pub struct ShareLinks(pub Vec<ShareLink>);

impl fmt::Display for ShareLinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No share links.");
        }
        for link in &self.0 {
            write!(f, "{link}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_listing() {
        assert_eq!(RecipeSummaries(vec![]).to_string(), "No recipes found.\n");
        assert_eq!(ShareLinks(vec![]).to_string(), "No share links.\n");
    }
}
