//! Recipe Form Component
//!
//! The single create/edit form. Inputs write straight into the session's
//! form controller; submit hands over to the session.

use leptos::prelude::*;

use crate::context::AppContext;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RecipeForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let store = use_app_store();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        ctx.submit();
    };

    let heading = move || {
        if store.editing().get().is_some() {
            "Edit recipe"
        } else {
            "New recipe"
        }
    };

    view! {
        <Show when=move || store.form_visible().get()>
            <div class="form-container">
                <h2>{heading}</h2>
                <form class="recipe-form" on:submit=on_submit>
                    <label for="recipe-name">"Title"</label>
                    <input
                        id="recipe-name"
                        type="text"
                        placeholder="Recipe title"
                        prop:value=move || store.form_fields().get().title
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            ctx.edit_form(|form| form.set_title(value));
                        }
                    />

                    <label for="ingredients">"Ingredients"</label>
                    <input
                        id="ingredients"
                        type="text"
                        placeholder="Comma separated, e.g. flour, water, salt"
                        prop:value=move || store.form_fields().get().ingredients
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            ctx.edit_form(|form| form.set_ingredients(value));
                        }
                    />

                    <label for="steps">"Steps"</label>
                    <textarea
                        id="steps"
                        rows="6"
                        placeholder="Markdown is supported"
                        prop:value=move || store.form_fields().get().steps
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            ctx.edit_form(|form| form.set_steps(value));
                        }
                    ></textarea>

                    <div class="form-actions">
                        <button type="submit" class="primary-btn">"Save"</button>
                        <button type="button" class="cancel-btn" on:click=move |_| ctx.toggle_form()>
                            "Hide"
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
