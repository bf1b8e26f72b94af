//! Client Configuration
//!
//! The WASM bundle has no process environment at runtime, so overrides are
//! baked in at compile time through `RECIPE_API_URL` and `RECIPE_USER`.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://lsd-ricx.azurewebsites.net";
pub const DEFAULT_USER_NAME: &str = "João da Silva";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root of every REST path, without a trailing slash
    pub base_url: String,
    /// Fixed name sent to `/login` during bootstrap
    pub user_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_name: DEFAULT_USER_NAME.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            user_name: user_name.into(),
        }
    }

    /// Defaults overridden by compile-time environment variables
    pub fn from_env() -> Self {
        Self::with_overrides(option_env!("RECIPE_API_URL"), option_env!("RECIPE_USER"))
    }

    fn with_overrides(base_url: Option<&str>, user_name: Option<&str>) -> Self {
        let defaults = Self::default();
        Self::new(
            base_url.filter(|s| !s.trim().is_empty()).unwrap_or(&defaults.base_url),
            user_name.filter(|s| !s.trim().is_empty()).unwrap_or(&defaults.user_name),
        )
    }

    /// Absolute URL for a path such as `/recipes`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
