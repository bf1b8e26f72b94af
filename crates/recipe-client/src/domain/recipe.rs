//! Recipe Entity
//!
//! A recipe as returned by the server, plus the draft shape sent on
//! create and update.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned recipe identifier.
///
/// Opaque to the client: the server may hand out numbers or strings, and
/// the value is echoed back into request paths unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipeId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeId::Number(n) => write!(f, "{}", n),
            RecipeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecipeId {
    fn from(value: i64) -> Self {
        RecipeId::Number(value)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        RecipeId::Text(value.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(value: String) -> Self {
        RecipeId::Text(value)
    }
}

/// A stored recipe
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipe {
    /// Immutable once assigned by the server
    pub id: RecipeId,
    pub title: String,
    /// Ordered ingredient tokens
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Free-text preparation steps
    #[serde(default)]
    pub steps: String,
}

impl Recipe {
    /// Ingredients as shown in the edit form
    pub fn ingredients_text(&self) -> String {
        join_ingredients(&self.ingredients)
    }
}

/// Request body for `POST /recipes` and `PUT /recipes/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub ingredients: Vec<String>,
    pub steps: String,
}

impl RecipeDraft {
    /// Build a draft from raw form text.
    ///
    /// `ingredients_text` is comma separated; see [`split_ingredients`].
    pub fn from_form(title: &str, ingredients_text: &str, steps: &str) -> Self {
        Self {
            title: title.to_string(),
            ingredients: split_ingredients(ingredients_text),
            steps: steps.to_string(),
        }
    }
}

/// Split on `,` and trim every token. Empty tokens are kept.
pub fn split_ingredients(text: &str) -> Vec<String> {
    text.split(',').map(|token| token.trim().to_string()).collect()
}

pub fn join_ingredients(ingredients: &[String]) -> String {
    ingredients.join(", ")
}
