//! Session
//!
//! Owns everything the page used to keep in globals: the logged-in user,
//! the recipe store, the form and the set of mutations in flight.
//!
//! Single-threaded by construction (`RefCell`). No borrow is held across
//! an `.await`, so event handlers may interleave freely between requests.

use std::cell::RefCell;
use std::collections::HashSet;

use tracing::{debug, warn};

use crate::api::RecipeApi;
use crate::domain::{Recipe, RecipeDraft, RecipeId, User};
use crate::error::{Mutation, SessionError, SessionResult};
use crate::form::{FormController, Submission};
use crate::store::RecipeStore;

pub struct Session<A> {
    api: A,
    user: RefCell<Option<User>>,
    store: RefCell<RecipeStore>,
    form: RefCell<FormController>,
    in_flight: RefCell<HashSet<Mutation>>,
}

/// Marks a mutation as running until dropped
struct InFlightGuard<'a> {
    in_flight: &'a RefCell<HashSet<Mutation>>,
    key: Mutation,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.borrow_mut().remove(&self.key);
    }
}

impl<A: RecipeApi> Session<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            user: RefCell::new(None),
            store: RefCell::new(RecipeStore::new()),
            form: RefCell::new(FormController::new()),
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    /// Snapshot of the store, in display order
    pub fn recipes(&self) -> Vec<Recipe> {
        self.store.borrow().as_slice().to_vec()
    }

    pub fn recipe(&self, id: &RecipeId) -> Option<Recipe> {
        self.store.borrow().get(id).cloned()
    }

    /// Snapshot of the form state
    pub fn form(&self) -> FormController {
        self.form.borrow().clone()
    }

    pub fn is_busy(&self, mutation: &Mutation) -> bool {
        self.in_flight.borrow().contains(mutation)
    }

    fn begin(&self, key: Mutation) -> SessionResult<InFlightGuard<'_>> {
        if !self.in_flight.borrow_mut().insert(key.clone()) {
            warn!(mutation = %key, "rejected, same mutation already in flight");
            return Err(SessionError::Busy(key));
        }
        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            key,
        })
    }

    // ========================
    // Remote operations
    // ========================

    pub async fn login(&self, name: &str) -> SessionResult<User> {
        let user = self.api.login(name).await?;
        *self.user.borrow_mut() = Some(user.clone());
        Ok(user)
    }

    /// Replace the store with the server's list. Returns the new length.
    pub async fn refresh(&self) -> SessionResult<usize> {
        let recipes = self.api.list_recipes().await?;
        let mut store = self.store.borrow_mut();
        store.replace_all(recipes);
        Ok(store.len())
    }

    pub async fn create_recipe(&self, draft: RecipeDraft) -> SessionResult<Recipe> {
        let _guard = self.begin(Mutation::Create)?;
        let created = self.api.create_recipe(&draft).await?;
        self.store.borrow_mut().upsert(created.clone());
        Ok(created)
    }

    pub async fn update_recipe(&self, id: &RecipeId, draft: RecipeDraft) -> SessionResult<Recipe> {
        let _guard = self.begin(Mutation::Modify(id.clone()))?;
        let updated = self.api.update_recipe(id, &draft).await?;
        if !self.store.borrow_mut().replace(id, updated.clone()) {
            debug!(%id, "updated recipe no longer in store");
        }
        Ok(updated)
    }

    pub async fn delete_recipe(&self, id: &RecipeId) -> SessionResult<()> {
        let _guard = self.begin(Mutation::Modify(id.clone()))?;
        self.api.delete_recipe(id).await?;
        self.store.borrow_mut().remove(id);
        Ok(())
    }

    // ========================
    // Form
    // ========================

    pub fn open_for_create(&self) {
        self.form.borrow_mut().open_for_create();
    }

    pub fn open_for_edit(&self, id: &RecipeId) -> SessionResult<()> {
        let recipe = self
            .recipe(id)
            .ok_or_else(|| SessionError::UnknownRecipe(id.clone()))?;
        self.form.borrow_mut().open_for_edit(&recipe);
        Ok(())
    }

    pub fn toggle_form(&self) {
        self.form.borrow_mut().toggle_visibility();
    }

    /// Apply field edits coming from the inputs
    pub fn edit_form(&self, edit: impl FnOnce(&mut FormController)) {
        edit(&mut self.form.borrow_mut());
    }

    /// Create or update from the form.
    ///
    /// On success the form is cleared and hidden, unless it was reopened
    /// while the request ran. On failure nothing in the form changes, so
    /// the user can retry.
    pub async fn submit_form(&self) -> SessionResult<Recipe> {
        let (generation, submission) = {
            let form = self.form.borrow();
            (form.generation(), form.prepare_submit()?)
        };
        let saved = match submission {
            Submission::Create(draft) => self.create_recipe(draft).await?,
            Submission::Update(id, draft) => self.update_recipe(&id, draft).await?,
        };
        if !self.form.borrow_mut().complete_submit(generation) {
            debug!(id = %saved.id, "form reopened during submit, left as is");
        }
        Ok(saved)
    }
}
