//! Global Application State Store
//!
//! Reactive mirror of the session for rendering. The session stays the
//! source of truth; these fields are overwritten after every operation.

use leptos::prelude::*;
use reactive_stores::Store;
use recipe_client::{FormFields, Recipe, RecipeId};

/// View state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Recipes in display order
    pub recipes: Vec<Recipe>,
    /// Set once login succeeds
    pub user_name: Option<String>,
    pub form_visible: bool,
    /// Recipe the form is editing (None = create)
    pub editing: Option<RecipeId>,
    pub form_fields: FormFields,
    /// A list request is running
    pub loading: bool,
    /// Recipes whose delete request is running
    pub deleting: Vec<RecipeId>,
    /// Message of the last failed operation
    pub last_error: Option<String>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}
