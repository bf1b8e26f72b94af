//! Recipe Client
//!
//! Platform-neutral core of the recipe book:
//! - domain: wire entities
//! - api: the `RecipeApi` seam and its HTTP implementation
//! - store / form: in-memory state
//! - session: ties them together for the UI
//! - bootstrap: startup sequence

mod api;
mod bootstrap;
mod config;
mod domain;
mod error;
mod form;
mod session;
mod store;

#[cfg(test)]
mod tests;

pub use api::{HttpRecipeApi, RecipeApi};
pub use bootstrap::bootstrap;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_USER_NAME};
pub use domain::{join_ingredients, split_ingredients, Recipe, RecipeDraft, RecipeId, User};
pub use error::{ApiError, ApiOperation, ApiResult, Mutation, RemoteFailure, SessionError, SessionResult};
pub use form::{FormController, FormFields, Submission};
pub use session::Session;
pub use store::RecipeStore;
