//! Collection model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Name of the reserved fallback collection. Books whose last regular
/// collection link disappears are reparented here so no book is ever
/// left uncollected.
pub const UNSORTED_COLLECTION: &str = "Unsorted";

/// Full collection model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Collection {
    pub id: i64,
    pub name: String,
}

/// Create collection request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CollectionInput {
    #[validate(length(min = 1, message = "Collection name cannot be empty"))]
    pub name: String,
}

/// Rename collection request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CollectionUpdate {
    #[validate(length(min = 1, message = "Collection name cannot be empty"))]
    pub name: String,
}

/// Collection name parameters, shared by the existence and search
/// endpoints
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct CollectionQuery {
    pub name: String,
}
