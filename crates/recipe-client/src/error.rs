//! Error Types
//!
//! `ApiError` is "a remote call failed", tagged by the operation that
//! triggered it. `SessionError` adds the local refusals made before any
//! request is sent.

use std::fmt;

use thiserror::Error;

use crate::domain::RecipeId;

pub type ApiResult<T> = Result<T, ApiError>;
pub type SessionResult<T> = Result<T, SessionError>;

/// What went wrong with a single HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    /// Server answered with a non-2xx status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Request never produced a response
    #[error("transport error: {0}")]
    Transport(String),
    /// 2xx response whose body could not be decoded
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl RemoteFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            RemoteFailure::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Remote operations of the recipe API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    Login,
    Fetch,
    Create,
    Update,
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ApiOperation::Login => "login",
            ApiOperation::Fetch => "fetch recipes",
            ApiOperation::Create => "create recipe",
            ApiOperation::Update => "update recipe",
            ApiOperation::Delete => "delete recipe",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("login failed: {0}")]
    Login(RemoteFailure),
    #[error("failed to fetch recipes: {0}")]
    Fetch(RemoteFailure),
    #[error("failed to create recipe: {0}")]
    Create(RemoteFailure),
    #[error("failed to update recipe: {0}")]
    Update(RemoteFailure),
    #[error("failed to delete recipe: {0}")]
    Delete(RemoteFailure),
}

impl ApiError {
    pub fn new(operation: ApiOperation, failure: RemoteFailure) -> Self {
        match operation {
            ApiOperation::Login => ApiError::Login(failure),
            ApiOperation::Fetch => ApiError::Fetch(failure),
            ApiOperation::Create => ApiError::Create(failure),
            ApiOperation::Update => ApiError::Update(failure),
            ApiOperation::Delete => ApiError::Delete(failure),
        }
    }

    pub fn operation(&self) -> ApiOperation {
        match self {
            ApiError::Login(_) => ApiOperation::Login,
            ApiError::Fetch(_) => ApiOperation::Fetch,
            ApiError::Create(_) => ApiOperation::Create,
            ApiError::Update(_) => ApiOperation::Update,
            ApiError::Delete(_) => ApiOperation::Delete,
        }
    }

    pub fn failure(&self) -> &RemoteFailure {
        match self {
            ApiError::Login(f)
            | ApiError::Fetch(f)
            | ApiError::Create(f)
            | ApiError::Update(f)
            | ApiError::Delete(f) => f,
        }
    }

    /// HTTP status, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        self.failure().status()
    }
}

/// A mutation the session refuses to start twice
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Mutation {
    Create,
    Modify(RecipeId),
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mutation::Create => f.write_str("create"),
            Mutation::Modify(id) => write!(f, "change of recipe {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("a {0} is already in progress")]
    Busy(Mutation),
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("no recipe with id {0}")]
    UnknownRecipe(RecipeId),
}

impl SessionError {
    /// HTTP status of the underlying remote failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::Api(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_body_are_carried() {
        let err = ApiError::new(
            ApiOperation::Delete,
            RemoteFailure::Status { status: 500, body: "boom".into() },
        );
        assert!(matches!(err, ApiError::Delete(_)));
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.failure().body(), Some("boom"));
        assert_eq!(err.to_string(), "failed to delete recipe: HTTP 500: boom");
    }

    #[test]
    fn transport_failures_have_no_status() {
        let err = ApiError::new(ApiOperation::Login, RemoteFailure::Transport("refused".into()));
        assert_eq!(err.operation(), ApiOperation::Login);
        assert_eq!(err.status(), None);
        assert_eq!(SessionError::from(err).status(), None);
    }
}
