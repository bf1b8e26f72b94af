//! Session Integration Tests
//!
//! Drives `Session` and `bootstrap` against an in-memory `RecipeApi` that
//! records every call and can be told to fail or to hold a request open.

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::{
        bootstrap, ApiError, ApiOperation, ApiResult, Mutation, Recipe, RecipeApi, RecipeDraft,
        RecipeId, RemoteFailure, Session, SessionError, User,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Login(String),
        List,
        Create(RecipeDraft),
        Update(RecipeId, RecipeDraft),
        Delete(RecipeId),
    }

    #[derive(Default)]
    struct FakeApi {
        server: RefCell<Vec<Recipe>>,
        next_id: Cell<i64>,
        calls: RefCell<Vec<Call>>,
        fail_status: Cell<Option<u16>>,
        hold: Cell<bool>,
        release: Notify,
    }

    impl FakeApi {
        fn with_recipes(recipes: Vec<Recipe>) -> Self {
            let api = FakeApi::default();
            api.next_id.set(100);
            *api.server.borrow_mut() = recipes;
            api
        }

        fn fail_next(&self, status: u16) {
            self.fail_status.set(Some(status));
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        async fn respond(&self, operation: ApiOperation, call: Call) -> ApiResult<()> {
            self.calls.borrow_mut().push(call);
            if self.hold.get() {
                self.release.notified().await;
            }
            match self.fail_status.take() {
                Some(status) => Err(ApiError::new(
                    operation,
                    RemoteFailure::Status {
                        status,
                        body: "server error".into(),
                    },
                )),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl RecipeApi for FakeApi {
        async fn login(&self, name: &str) -> ApiResult<User> {
            self.respond(ApiOperation::Login, Call::Login(name.to_string())).await?;
            Ok(User::new(name))
        }

        async fn list_recipes(&self) -> ApiResult<Vec<Recipe>> {
            self.respond(ApiOperation::Fetch, Call::List).await?;
            Ok(self.server.borrow().clone())
        }

        async fn create_recipe(&self, draft: &RecipeDraft) -> ApiResult<Recipe> {
            self.respond(ApiOperation::Create, Call::Create(draft.clone())).await?;
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            let recipe = Recipe {
                id: RecipeId::Number(id),
                title: draft.title.clone(),
                ingredients: draft.ingredients.clone(),
                steps: draft.steps.clone(),
            };
            self.server.borrow_mut().push(recipe.clone());
            Ok(recipe)
        }

        async fn update_recipe(&self, id: &RecipeId, draft: &RecipeDraft) -> ApiResult<Recipe> {
            self.respond(ApiOperation::Update, Call::Update(id.clone(), draft.clone())).await?;
            Ok(Recipe {
                id: id.clone(),
                title: draft.title.clone(),
                ingredients: draft.ingredients.clone(),
                steps: draft.steps.clone(),
            })
        }

        async fn delete_recipe(&self, id: &RecipeId) -> ApiResult<()> {
            self.respond(ApiOperation::Delete, Call::Delete(id.clone())).await?;
            self.server.borrow_mut().retain(|r| &r.id != id);
            Ok(())
        }
    }

    fn recipe(id: i64, title: &str) -> Recipe {
        Recipe {
            id: RecipeId::Number(id),
            title: title.to_string(),
            ingredients: vec!["water".into(), "salt".into()],
            steps: format!("make {}", title),
        }
    }

    fn draft(title: &str, ingredients: &str, steps: &str) -> RecipeDraft {
        RecipeDraft::from_form(title, ingredients, steps)
    }

    async fn loaded_session(recipes: Vec<Recipe>) -> Session<FakeApi> {
        let session = Session::new(FakeApi::with_recipes(recipes));
        session.refresh().await.expect("Failed to load");
        session
    }

    fn titles(session: &Session<FakeApi>) -> Vec<String> {
        session.recipes().into_iter().map(|r| r.title).collect()
    }

    // ========================
    // Bootstrap
    // ========================

    #[tokio::test]
    async fn test_bootstrap_logs_in_then_loads_in_server_order() {
        let session = Session::new(FakeApi::with_recipes(vec![
            recipe(3, "Pie"),
            recipe(1, "Soup"),
            recipe(2, "Bread"),
        ]));

        let count = bootstrap(&session, "João da Silva").await.expect("Bootstrap failed");

        assert_eq!(count, 3);
        assert_eq!(session.user().map(|u| u.name), Some("João da Silva".to_string()));
        assert_eq!(titles(&session), vec!["Pie", "Soup", "Bread"]);
        assert_eq!(
            session.api().calls(),
            vec![Call::Login("João da Silva".into()), Call::List]
        );
    }

    #[tokio::test]
    async fn test_failed_login_stops_bootstrap() {
        let session = Session::new(FakeApi::with_recipes(vec![recipe(1, "Soup")]));
        session.api().fail_next(401);

        let err = bootstrap(&session, "Ana").await.unwrap_err();

        assert!(matches!(err, SessionError::Api(ApiError::Login(_))));
        assert_eq!(err.status(), Some(401));
        assert!(session.user().is_none());
        assert!(session.recipes().is_empty());
        assert_eq!(session.api().calls(), vec![Call::Login("Ana".into())]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_store() {
        let session = loaded_session(vec![recipe(1, "Soup")]).await;
        session.api().server.borrow_mut().clear();
        session.api().fail_next(503);

        let err = session.refresh().await.unwrap_err();

        assert!(matches!(err, SessionError::Api(ApiError::Fetch(_))));
        assert_eq!(err.status(), Some(503));
        assert_eq!(titles(&session), vec!["Soup"]);
    }

    // ========================
    // Create / Update / Delete
    // ========================

    #[tokio::test]
    async fn test_create_sends_trimmed_ingredients_and_appends() {
        let session = loaded_session(vec![recipe(1, "Soup")]).await;

        let created = session
            .create_recipe(draft("Salad", "a, b , c", "mix"))
            .await
            .expect("Create failed");

        assert_eq!(created.ingredients, vec!["a", "b", "c"]);
        assert_eq!(
            session.api().calls().last(),
            Some(&Call::Create(RecipeDraft {
                title: "Salad".into(),
                ingredients: vec!["a".into(), "b".into(), "c".into()],
                steps: "mix".into(),
            }))
        );
        assert_eq!(titles(&session), vec!["Soup", "Salad"]);
    }

    #[tokio::test]
    async fn test_update_replaces_only_matching_entry() {
        let session = loaded_session(vec![recipe(1, "Soup"), recipe(2, "Bread"), recipe(3, "Pie")]).await;

        session
            .update_recipe(&RecipeId::Number(2), draft("Rye bread", "rye, water", "bake"))
            .await
            .expect("Update failed");

        let recipes = session.recipes();
        assert_eq!(titles(&session), vec!["Soup", "Rye bread", "Pie"]);
        assert_eq!(recipes[1].ingredients, vec!["rye", "water"]);
        assert_eq!(recipes[0], recipe(1, "Soup"));
        assert_eq!(recipes[2], recipe(3, "Pie"));
    }

    #[tokio::test]
    async fn test_delete_removes_entry_on_success() {
        let session = loaded_session(vec![recipe(1, "Soup")]).await;

        session.delete_recipe(&RecipeId::Number(1)).await.expect("Delete failed");

        assert!(session.recipes().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_leaves_store_unchanged() {
        let session = loaded_session(vec![recipe(1, "Soup")]).await;
        session.api().fail_next(500);

        let err = session.delete_recipe(&RecipeId::Number(1)).await.unwrap_err();

        assert!(matches!(err, SessionError::Api(ApiError::Delete(_))));
        assert_eq!(err.status(), Some(500));
        assert_eq!(session.recipes(), vec![recipe(1, "Soup")]);
    }

    #[tokio::test]
    async fn test_delete_keeps_order_of_others() {
        let session = loaded_session(vec![recipe(1, "A"), recipe(2, "B"), recipe(3, "C")]).await;

        session.delete_recipe(&RecipeId::Number(2)).await.expect("Delete failed");

        assert_eq!(titles(&session), vec!["A", "C"]);
    }

    #[tokio::test]
    async fn test_failed_mutations_leave_store_unchanged() {
        let session = loaded_session(vec![recipe(1, "Soup"), recipe(2, "Bread")]).await;
        let before = session.recipes();

        session.api().fail_next(400);
        let err = session.create_recipe(draft("X", "y", "z")).await.unwrap_err();
        assert!(matches!(err, SessionError::Api(ApiError::Create(_))));
        assert_eq!(err.status(), Some(400));

        session.api().fail_next(404);
        let err = session
            .update_recipe(&RecipeId::Number(2), draft("X", "y", "z"))
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Api(ApiError::Update(_))));
        assert_eq!(err.status(), Some(404));

        assert_eq!(session.recipes(), before);
    }

    // ========================
    // Form
    // ========================

    #[tokio::test]
    async fn test_edit_then_submit_updates_with_original_values() {
        let session = loaded_session(vec![recipe(1, "Soup"), recipe(2, "Bread")]).await;

        session.open_for_edit(&RecipeId::Number(2)).expect("Open failed");
        session.submit_form().await.expect("Submit failed");

        assert_eq!(
            session.api().calls().last(),
            Some(&Call::Update(
                RecipeId::Number(2),
                RecipeDraft {
                    title: "Bread".into(),
                    ingredients: vec!["water".into(), "salt".into()],
                    steps: "make Bread".into(),
                }
            ))
        );
        let form = session.form();
        assert!(form.editing().is_none());
        assert!(!form.is_visible());
        assert_eq!(form.fields().title, "");
    }

    #[tokio::test]
    async fn test_create_form_submit() {
        let session = loaded_session(vec![]).await;

        session.open_for_create();
        session.edit_form(|form| {
            form.set_title("Tea");
            form.set_ingredients(" water ,leaves ");
            form.set_steps("steep");
        });
        let saved = session.submit_form().await.expect("Submit failed");

        assert_eq!(saved.ingredients, vec!["water", "leaves"]);
        assert_eq!(titles(&session), vec!["Tea"]);
        assert!(!session.form().is_visible());
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_form_open() {
        let session = loaded_session(vec![recipe(1, "Soup")]).await;
        session.open_for_edit(&RecipeId::Number(1)).unwrap();
        session.edit_form(|form| form.set_title("Cold soup"));
        session.api().fail_next(500);

        let err = session.submit_form().await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        let form = session.form();
        assert!(form.is_visible());
        assert_eq!(form.editing(), Some(&RecipeId::Number(1)));
        assert_eq!(form.fields().title, "Cold soup");
        assert_eq!(titles(&session), vec!["Soup"]);
    }

    #[tokio::test]
    async fn test_blank_submit_makes_no_request() {
        let session = loaded_session(vec![]).await;
        session.open_for_create();
        session.edit_form(|form| form.set_title("Only a title"));

        let err = session.submit_form().await.unwrap_err();

        assert_eq!(err, SessionError::EmptyField("ingredients"));
        assert_eq!(session.api().calls(), vec![Call::List]);
        assert!(session.form().is_visible());
    }

    #[tokio::test]
    async fn test_unchanged_edit_of_recipe_with_blank_fields_still_updates() {
        let bare = Recipe {
            id: RecipeId::Number(1),
            title: "Toast".into(),
            ingredients: vec![],
            steps: String::new(),
        };
        let session = loaded_session(vec![bare]).await;

        session.open_for_edit(&RecipeId::Number(1)).expect("Open failed");
        session.submit_form().await.expect("Submit failed");

        assert_eq!(
            session.api().calls().last(),
            Some(&Call::Update(
                RecipeId::Number(1),
                RecipeDraft {
                    title: "Toast".into(),
                    ingredients: vec![],
                    steps: String::new(),
                }
            ))
        );
        assert!(!session.form().is_visible());
    }

    #[tokio::test]
    async fn test_form_reopened_during_submit_is_kept() {
        let session = loaded_session(vec![recipe(1, "Soup"), recipe(2, "Bread")]).await;
        session.api().hold.set(true);
        session.open_for_edit(&RecipeId::Number(1)).unwrap();

        let (submitted, ()) = tokio::join!(session.submit_form(), async {
            session.open_for_edit(&RecipeId::Number(2)).expect("Open failed");
            session.edit_form(|form| form.set_title("Rye bread"));
            session.api().release.notify_one();
        });

        assert_eq!(submitted.expect("Submit failed").title, "Soup");
        let form = session.form();
        assert_eq!(form.editing(), Some(&RecipeId::Number(2)));
        assert_eq!(form.fields().title, "Rye bread");
        assert!(form.is_visible());
    }

    #[tokio::test]
    async fn test_open_for_edit_unknown_id() {
        let session = loaded_session(vec![recipe(1, "Soup")]).await;

        let err = session.open_for_edit(&RecipeId::Number(9)).unwrap_err();

        assert_eq!(err, SessionError::UnknownRecipe(RecipeId::Number(9)));
        assert!(!session.form().is_visible());
    }

    // ========================
    // Single-flight guard
    // ========================

    #[tokio::test]
    async fn test_duplicate_create_is_rejected_while_in_flight() {
        let session = loaded_session(vec![]).await;
        session.api().hold.set(true);

        let (first, second) = tokio::join!(
            session.create_recipe(draft("Soup", "water", "boil")),
            async {
                let second = session.create_recipe(draft("Soup", "water", "boil")).await;
                session.api().release.notify_one();
                second
            }
        );

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), SessionError::Busy(Mutation::Create));
        assert_eq!(titles(&session), vec!["Soup"]);

        // Guard released: a later create goes through
        session.api().hold.set(false);
        session
            .create_recipe(draft("Bread", "flour", "bake"))
            .await
            .expect("Create failed");
        assert_eq!(titles(&session), vec!["Soup", "Bread"]);
    }

    #[tokio::test]
    async fn test_delete_rejected_while_update_of_same_id_in_flight() {
        let session = loaded_session(vec![recipe(1, "Soup"), recipe(2, "Bread")]).await;
        session.api().hold.set(true);
        let id = RecipeId::Number(1);

        let (update, delete) = tokio::join!(
            session.update_recipe(&id, draft("Hot soup", "water", "boil")),
            async {
                let delete = session.delete_recipe(&id).await;
                session.api().release.notify_one();
                delete
            }
        );

        assert!(update.is_ok());
        assert_eq!(delete.unwrap_err(), SessionError::Busy(Mutation::Modify(id.clone())));
        assert!(!session.is_busy(&Mutation::Modify(id)));
        assert_eq!(titles(&session), vec!["Hot soup", "Bread"]);

        // Other ids were never blocked
        session.api().hold.set(false);
        session.delete_recipe(&RecipeId::Number(2)).await.expect("Delete failed");
        assert_eq!(titles(&session), vec!["Hot soup"]);
    }

    #[tokio::test]
    async fn test_guard_released_after_failure() {
        let session = loaded_session(vec![recipe(1, "Soup")]).await;
        let id = RecipeId::Number(1);
        session.api().fail_next(500);

        assert!(session.delete_recipe(&id).await.is_err());
        assert!(!session.is_busy(&Mutation::Modify(id.clone())));

        session.delete_recipe(&id).await.expect("Retry failed");
        assert!(session.recipes().is_empty());
    }
}
