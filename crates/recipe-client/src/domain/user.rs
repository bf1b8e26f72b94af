//! User Entity

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The logged-in user as echoed by `POST /login`.
///
/// Only `name` is interpreted; everything else the server sends is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}
