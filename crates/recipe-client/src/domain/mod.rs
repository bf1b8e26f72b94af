//! Domain Layer
//!
//! Wire entities shared by the API client, the store and the UI.
//! No I/O lives here.

mod recipe;
mod user;

pub use recipe::{join_ingredients, split_ingredients, Recipe, RecipeDraft, RecipeId};
pub use user::User;
