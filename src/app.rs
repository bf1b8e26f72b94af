//! Recipe Book Frontend App
//!
//! Header, toolbar, form and recipe list.

use leptos::prelude::*;
use reactive_stores::Store;
use recipe_client::{ClientConfig, HttpRecipeApi, Session};

use crate::components::{RecipeForm, RecipeList, StatusLine};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_env();
    let session = Session::new(HttpRecipeApi::new(config.clone()));
    let store = Store::new(AppState::default());
    let ctx = AppContext::new(session, store);

    // Provide context to all children
    provide_context(store);
    provide_context(ctx);

    // Login and first load, once on mount
    ctx.start(config.user_name);

    let user_label = move || match store.user_name().get() {
        Some(name) => format!("Signed in as {}", name),
        None => "Not signed in".to_string(),
    };

    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1>"Recipe Book"</h1>
                <span class="user-name">{user_label}</span>
            </header>

            <div class="toolbar">
                <button class="primary-btn" on:click=move |_| ctx.open_for_create()>
                    "New recipe"
                </button>
                <button
                    class="secondary-btn"
                    disabled=move || store.loading().get()
                    on:click=move |_| ctx.reload()
                >
                    "Reload"
                </button>
            </div>

            <StatusLine />
            <RecipeForm />
            <RecipeList />
        </div>
    }
}
