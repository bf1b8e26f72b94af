//! UI Components
//!
//! Reusable Leptos components.

mod recipe_card;
mod recipe_form;
mod recipe_list;
mod status_line;

pub use recipe_card::RecipeCard;
pub use recipe_form::RecipeForm;
pub use recipe_list::RecipeList;
pub use status_line::StatusLine;
