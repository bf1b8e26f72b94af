//! Recipe List Component
//!
//! Renders the store in order. Keyed on the whole recipe so an update with
//! the same id still re-renders its card.

use leptos::prelude::*;

use super::RecipeCard;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RecipeList() -> impl IntoView {
    let store = use_app_store();

    view! {
        <div class="recipe-list">
            <Show
                when=move || !store.recipes().get().is_empty()
                fallback=move || view! {
                    <p class="empty-state">
                        {move || if store.loading().get() { "Loading recipes..." } else { "No recipes yet." }}
                    </p>
                }
            >
                <For
                    each=move || store.recipes().get()
                    key=|recipe| recipe.clone()
                    children=move |recipe| view! { <RecipeCard recipe=recipe /> }
                />
            </Show>
            <p class="recipe-count">{move || format!("{} recipes", store.recipes().get().len())}</p>
        </div>
    }
}
