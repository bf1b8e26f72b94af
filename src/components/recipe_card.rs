//! Recipe Card Component
//!
//! Title, ingredients, rendered steps and the edit/delete actions.

use leptos::prelude::*;
use recipe_client::Recipe;

use crate::context::AppContext;
use crate::markdown::render_steps;
use crate::store::{use_app_store, AppStateStoreFields};

/// One recipe in the list. Actions carry the recipe id, never its position.
///
/// Delete asks first, naming the recipe, and the card shows "Deleting..."
/// until the request settles.
#[component]
pub fn RecipeCard(recipe: Recipe) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();
    let (confirming, set_confirming) = signal(false);

    let id = recipe.id.clone();
    let deleting = {
        let id = id.clone();
        move || store.deleting().get().contains(&id)
    };
    let card_pending = deleting.clone();
    let edit_id = id.clone();
    let delete_id = id;
    let ingredients = recipe.ingredients_text();
    let steps_html = render_steps(&recipe.steps);
    let confirm_text = format!("Delete \"{}\"?", recipe.title);

    let actions = move || {
        if deleting() {
            view! { <span class="delete-pending">"Deleting..."</span> }.into_any()
        } else if confirming.get() {
            let delete_id = delete_id.clone();
            view! {
                <span class="delete-confirm">
                    <span class="delete-confirm-text">{confirm_text.clone()}</span>
                    <button
                        class="confirm-btn"
                        on:click=move |_| {
                            set_confirming.set(false);
                            ctx.delete(delete_id.clone());
                        }
                    >
                        "Yes"
                    </button>
                    <button class="cancel-btn" on:click=move |_| set_confirming.set(false)>
                        "No"
                    </button>
                </span>
            }
            .into_any()
        } else {
            let edit_id = edit_id.clone();
            view! {
                <button class="edit-btn" on:click=move |_| ctx.open_for_edit(edit_id.clone())>
                    "Edit"
                </button>
                <button class="delete-btn" on:click=move |_| set_confirming.set(true)>
                    "Delete"
                </button>
            }
            .into_any()
        }
    };

    view! {
        <div class="recipe-item" class:pending=card_pending>
            <h3>{recipe.title}</h3>
            <p>
                <strong>"Ingredients: "</strong>
                {ingredients}
            </p>
            <div class="recipe-steps">
                <strong>"Steps:"</strong>
                <div inner_html=steps_html></div>
            </div>
            <div class="recipe-actions">{actions}</div>
        </div>
    }
}
