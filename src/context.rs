//! Application Context
//!
//! Shares the session with every component and runs its async operations
//! on the local executor, copying results into the reactive store.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use recipe_client::{bootstrap, FormController, HttpRecipeApi, RecipeId, Session, SessionError};
use tracing::error;

use crate::store::{AppStateStoreFields, AppStore};

pub type RecipeSession = Session<HttpRecipeApi>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    session: StoredValue<Rc<RecipeSession>, LocalStorage>,
    store: AppStore,
}

impl AppContext {
    pub fn new(session: RecipeSession, store: AppStore) -> Self {
        Self {
            session: StoredValue::new_local(Rc::new(session)),
            store,
        }
    }

    fn session(&self) -> Rc<RecipeSession> {
        self.session.get_value()
    }

    // ========================
    // Store sync
    // ========================

    fn sync_recipes(&self) {
        *self.store.recipes().write() = self.session().recipes();
    }

    fn sync_form(&self) {
        let form = self.session().form();
        *self.store.form_visible().write() = form.is_visible();
        *self.store.editing().write() = form.editing().cloned();
        *self.store.form_fields().write() = form.fields().clone();
    }

    fn sync_user(&self) {
        *self.store.user_name().write() = self.session().user().map(|u| u.name);
    }

    /// Log and surface a failure. Store and form keep their state.
    fn report(&self, context: &str, err: &SessionError) {
        error!("{}: {}", context, err);
        *self.store.last_error().write() = Some(err.to_string());
    }

    fn clear_error(&self) {
        *self.store.last_error().write() = None;
    }

    // ========================
    // Operations
    // ========================

    /// Login then initial load. Stops after a failed login.
    pub fn start(&self, user_name: String) {
        let ctx = *self;
        let session = self.session();
        *self.store.loading().write() = true;
        spawn_local(async move {
            let result = bootstrap(&session, &user_name).await;
            ctx.sync_user();
            match result {
                Ok(_) => ctx.sync_recipes(),
                Err(e) => ctx.report("startup failed", &e),
            }
            *ctx.store.loading().write() = false;
        });
    }

    /// Re-run the list call
    pub fn reload(&self) {
        let ctx = *self;
        let session = self.session();
        *self.store.loading().write() = true;
        spawn_local(async move {
            match session.refresh().await {
                Ok(_) => {
                    ctx.clear_error();
                    ctx.sync_recipes();
                }
                Err(e) => ctx.report("failed to load recipes", &e),
            }
            *ctx.store.loading().write() = false;
        });
    }

    /// Delete by id; the id sits in `deleting` while the request runs
    pub fn delete(&self, id: RecipeId) {
        let ctx = *self;
        let session = self.session();
        self.store.deleting().write().push(id.clone());
        spawn_local(async move {
            match session.delete_recipe(&id).await {
                Ok(()) => {
                    ctx.clear_error();
                    ctx.sync_recipes();
                }
                Err(e) => ctx.report("failed to delete recipe", &e),
            }
            ctx.store.deleting().write().retain(|pending| pending != &id);
        });
    }

    pub fn submit(&self) {
        let ctx = *self;
        let session = self.session();
        spawn_local(async move {
            match session.submit_form().await {
                Ok(_) => {
                    ctx.clear_error();
                    ctx.sync_recipes();
                }
                Err(e) => ctx.report("failed to save recipe", &e),
            }
            ctx.sync_form();
        });
    }

    // ========================
    // Form
    // ========================

    pub fn open_for_create(&self) {
        self.session().open_for_create();
        self.sync_form();
    }

    pub fn open_for_edit(&self, id: RecipeId) {
        if let Err(e) = self.session().open_for_edit(&id) {
            self.report("cannot edit", &e);
        }
        self.sync_form();
    }

    pub fn toggle_form(&self) {
        self.session().toggle_form();
        self.sync_form();
    }

    /// Apply an input change to the session form
    pub fn edit_form(&self, edit: impl FnOnce(&mut FormController)) {
        self.session().edit_form(edit);
        self.sync_form();
    }
}
