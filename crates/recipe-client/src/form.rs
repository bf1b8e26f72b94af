//! Form Controller
//!
//! State of the single create/edit form. Pure state machine: the session
//! performs the network call and reports back through `complete_submit`.

use crate::domain::{Recipe, RecipeDraft, RecipeId};
use crate::error::{SessionError, SessionResult};

/// Raw text of the three form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub title: String,
    /// Comma separated
    pub ingredients: String,
    pub steps: String,
}

impl FormFields {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            ingredients: recipe.ingredients_text(),
            steps: recipe.steps.clone(),
        }
    }

    /// Reject blank fields, reporting the first one found.
    ///
    /// With `unchanged_from`, a field still holding its prefilled value is
    /// not checked: an edit may resubmit what the server already stores.
    pub fn validate(&self, unchanged_from: Option<&FormFields>) -> SessionResult<()> {
        let checks = [
            ("title", &self.title, unchanged_from.map(|o| &o.title)),
            ("ingredients", &self.ingredients, unchanged_from.map(|o| &o.ingredients)),
            ("steps", &self.steps, unchanged_from.map(|o| &o.steps)),
        ];
        let blank = checks
            .iter()
            .find(|(_, value, original)| Some(*value) != *original && value.trim().is_empty());
        match blank {
            Some((field, _, _)) => Err(SessionError::EmptyField(*field)),
            None => Ok(()),
        }
    }

    pub fn to_draft(&self) -> RecipeDraft {
        RecipeDraft::from_form(&self.title, &self.ingredients, &self.steps)
    }
}

/// What a submit should do on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(RecipeDraft),
    Update(RecipeId, RecipeDraft),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormController {
    /// Edit cursor, holding the recipe as it was when the form opened;
    /// `None` means the form creates a new recipe
    editing: Option<Recipe>,
    fields: FormFields,
    visible: bool,
    /// Bumped every time the form is (re)opened
    generation: u64,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn editing(&self) -> Option<&RecipeId> {
        self.editing.as_ref().map(|recipe| &recipe.id)
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Identifies one opening of the form; see [`complete_submit`](Self::complete_submit)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn open_for_create(&mut self) {
        self.editing = None;
        self.fields = FormFields::default();
        self.visible = true;
        self.generation += 1;
    }

    pub fn open_for_edit(&mut self, recipe: &Recipe) {
        self.editing = Some(recipe.clone());
        self.fields = FormFields::from_recipe(recipe);
        self.visible = true;
        self.generation += 1;
    }

    /// Show or hide, keeping whatever was typed
    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    pub fn set_title(&mut self, value: impl Into<String>) {
        self.fields.title = value.into();
    }

    pub fn set_ingredients(&mut self, value: impl Into<String>) {
        self.fields.ingredients = value.into();
    }

    pub fn set_steps(&mut self, value: impl Into<String>) {
        self.fields.steps = value.into();
    }

    /// Decide what submitting the current fields means. State is untouched.
    pub fn prepare_submit(&self) -> SessionResult<Submission> {
        match &self.editing {
            Some(original) => {
                let prefilled = FormFields::from_recipe(original);
                self.fields.validate(Some(&prefilled))?;
                let mut draft = self.fields.to_draft();
                // Untouched ingredients go back exactly as stored
                if self.fields.ingredients == prefilled.ingredients {
                    draft.ingredients = original.ingredients.clone();
                }
                Ok(Submission::Update(original.id.clone(), draft))
            }
            None => {
                self.fields.validate(None)?;
                Ok(Submission::Create(self.fields.to_draft()))
            }
        }
    }

    /// A submit went through: back to an empty, hidden create form.
    ///
    /// Does nothing if the form was reopened since `generation` was read,
    /// so a newer edit is not wiped. Returns whether the form was reset.
    pub fn complete_submit(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.editing = None;
        self.fields = FormFields::default();
        self.visible = false;
        true
    }
}
