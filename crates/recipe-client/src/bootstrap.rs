//! Startup sequence: login, then the initial list.

use tracing::{error, info};

use crate::api::RecipeApi;
use crate::error::SessionResult;
use crate::session::Session;

/// Log in as `user_name` and load the recipes.
///
/// Linear and non-retrying. A failed login stops here and the store stays
/// empty. Returns the number of recipes loaded.
pub async fn bootstrap<A: RecipeApi>(session: &Session<A>, user_name: &str) -> SessionResult<usize> {
    info!(user = %user_name, "starting session");

    if let Err(e) = session.login(user_name).await {
        error!("login failed, recipes will not be loaded: {}", e);
        return Err(e);
    }

    let count = session.refresh().await.map_err(|e| {
        error!("initial recipe load failed: {}", e);
        e
    })?;
    info!(count, "session ready");
    Ok(count)
}
