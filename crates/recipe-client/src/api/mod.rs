//! API Layer
//!
//! The `RecipeApi` seam and its HTTP implementation.

mod http;
mod traits;

pub use http::HttpRecipeApi;
pub use traits::RecipeApi;
