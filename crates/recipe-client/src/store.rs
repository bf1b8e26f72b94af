//! Recipe Store
//!
//! Ordered in-memory mirror of the server's recipe collection.
//! Entries never share an id.

use crate::domain::{Recipe, RecipeId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &RecipeId) -> Option<&Recipe> {
        self.recipes.iter().find(|recipe| &recipe.id == id)
    }

    pub fn contains(&self, id: &RecipeId) -> bool {
        self.get(id).is_some()
    }

    /// Replace everything with a freshly listed sequence.
    ///
    /// Server order is kept; a repeated id keeps its first position and
    /// the later value.
    pub fn replace_all(&mut self, recipes: Vec<Recipe>) {
        self.recipes.clear();
        for recipe in recipes {
            self.upsert(recipe);
        }
    }

    /// Append a created recipe, or overwrite in place if the id is known
    pub fn upsert(&mut self, recipe: Recipe) {
        match self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe,
            None => self.recipes.push(recipe),
        }
    }

    /// Replace the entry with the same id. Returns false if there is none.
    pub fn replace(&mut self, id: &RecipeId, updated: Recipe) -> bool {
        // The server may echo a different id; drop any other entry holding it
        if &updated.id != id {
            self.recipes.retain(|r| r.id != updated.id);
        }
        match self.recipes.iter_mut().find(|r| &r.id == id) {
            Some(existing) => {
                *existing = updated;
                true
            }
            None => false,
        }
    }

    /// Remove by id. Returns the removed recipe.
    pub fn remove(&mut self, id: &RecipeId) -> Option<Recipe> {
        let index = self.recipes.iter().position(|r| &r.id == id)?;
        Some(self.recipes.remove(index))
    }
}
