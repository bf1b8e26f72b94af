//! HTTP implementation of [`RecipeApi`] on top of `reqwest`.
//!
//! On `wasm32` reqwest drives the browser `fetch`; on native targets it
//! uses hyper, which is what the integration tests exercise.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use super::RecipeApi;
use crate::config::ClientConfig;
use crate::domain::{Recipe, RecipeDraft, RecipeId, User};
use crate::error::{ApiError, ApiOperation, ApiResult, RemoteFailure};

/// Characters escaped when an id is placed in a path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Serialize)]
struct LoginArgs<'a> {
    name: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpRecipeApi {
    client: Client,
    config: ClientConfig,
}

impl HttpRecipeApi {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    fn recipe_url(&self, id: &RecipeId) -> String {
        let segment = utf8_percent_encode(&id.to_string(), PATH_SEGMENT).to_string();
        self.config.url(&format!("recipes/{}", segment))
    }

    /// Send a request and turn non-2xx answers into errors carrying the body
    async fn send(&self, operation: ApiOperation, request: RequestBuilder) -> ApiResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| fail(operation, RemoteFailure::Transport(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(fail(
                operation,
                RemoteFailure::Status {
                    status: status.as_u16(),
                    body,
                },
            ));
        }
        debug!(%operation, status = status.as_u16(), "request succeeded");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(operation: ApiOperation, response: Response) -> ApiResult<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| fail(operation, RemoteFailure::Decode(e.to_string())))
    }
}

/// Log at the call site, then hand the error back
fn fail(operation: ApiOperation, failure: RemoteFailure) -> ApiError {
    let err = ApiError::new(operation, failure);
    error!(%operation, status = ?err.status(), "{}", err);
    err
}

#[async_trait(?Send)]
impl RecipeApi for HttpRecipeApi {
    async fn login(&self, name: &str) -> ApiResult<User> {
        let request = self
            .client
            .post(self.config.url("/login"))
            .json(&LoginArgs { name });
        let response = self.send(ApiOperation::Login, request).await?;
        let user: User = Self::decode(ApiOperation::Login, response).await?;
        info!(user = %user.name, "logged in");
        Ok(user)
    }

    async fn list_recipes(&self) -> ApiResult<Vec<Recipe>> {
        debug!("fetching recipes");
        let request = self.client.get(self.config.url("/recipes"));
        let response = self.send(ApiOperation::Fetch, request).await?;
        let recipes: Vec<Recipe> = Self::decode(ApiOperation::Fetch, response).await?;
        info!(count = recipes.len(), "recipes loaded");
        Ok(recipes)
    }

    async fn create_recipe(&self, draft: &RecipeDraft) -> ApiResult<Recipe> {
        let request = self.client.post(self.config.url("/recipes")).json(draft);
        let response = self.send(ApiOperation::Create, request).await?;
        let recipe: Recipe = Self::decode(ApiOperation::Create, response).await?;
        info!(id = %recipe.id, title = %recipe.title, "recipe created");
        Ok(recipe)
    }

    async fn update_recipe(&self, id: &RecipeId, draft: &RecipeDraft) -> ApiResult<Recipe> {
        let request = self.client.put(self.recipe_url(id)).json(draft);
        let response = self.send(ApiOperation::Update, request).await?;
        let recipe: Recipe = Self::decode(ApiOperation::Update, response).await?;
        info!(id = %recipe.id, title = %recipe.title, "recipe updated");
        Ok(recipe)
    }

    async fn delete_recipe(&self, id: &RecipeId) -> ApiResult<()> {
        let request = self.client.delete(self.recipe_url(id));
        // Body is an ack at most
        self.send(ApiOperation::Delete, request).await?;
        info!(%id, "recipe deleted");
        Ok(())
    }
}
