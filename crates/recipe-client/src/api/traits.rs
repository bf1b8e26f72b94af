//! API Layer - Core Trait
//!
//! Abstract interface over the recipe REST service.
//! The session only talks to this trait, so tests can swap the transport.

use async_trait::async_trait;

use crate::domain::{Recipe, RecipeDraft, RecipeId, User};
use crate::error::ApiResult;

/// Remote CRUD operations for recipes
///
/// Futures are not `Send`: in the browser they are driven by the
/// single-threaded event loop through `fetch`.
#[async_trait(?Send)]
pub trait RecipeApi {
    /// `POST /login`
    async fn login(&self, name: &str) -> ApiResult<User>;

    /// `GET /recipes`, in server order
    async fn list_recipes(&self) -> ApiResult<Vec<Recipe>>;

    /// `POST /recipes`, returns the created recipe with its new id
    async fn create_recipe(&self, draft: &RecipeDraft) -> ApiResult<Recipe>;

    /// `PUT /recipes/{id}`, returns the stored recipe
    async fn update_recipe(&self, id: &RecipeId, draft: &RecipeDraft) -> ApiResult<Recipe>;

    /// `DELETE /recipes/{id}`
    async fn delete_recipe(&self, id: &RecipeId) -> ApiResult<()>;
}
