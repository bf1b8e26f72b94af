//! Status Line Component
//!
//! Read-only line with the last error, hidden when there is none.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn StatusLine() -> impl IntoView {
    let store = use_app_store();

    view! {
        {move || store.last_error().get().map(|message| view! {
            <p class="status-error">{message}</p>
        })}
    }
}
