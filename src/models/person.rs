//! Person model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Full person model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Person {
    pub id: i64,
    pub first_name: Option<String>,
    pub prefix: Option<String>,
    pub last_name: String,
}

/// Contributor reference inside a book payload. The role field is only
/// consulted for the free-form "others" list; authors and editors get
/// their role from the list they arrive in.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PersonRef {
    pub first_name: Option<String>,
    pub prefix: Option<String>,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: String,
    pub role: Option<String>,
}

/// Update person request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PersonUpdate {
    pub first_name: Option<String>,
    pub prefix: Option<String>,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
}

/// Person search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct PersonQuery {
    pub last_name: String,
}

/// Role listing parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RoleQuery {
    pub role: String,
}

/// A book credit as seen from a person: title plus the role held there
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookCredit {
    pub title: String,
    pub role: String,
}

/// Person detail view: identity plus every (title, role) credit
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonView {
    pub id: i64,
    pub first_name: Option<String>,
    pub prefix: Option<String>,
    pub last_name: String,
    pub books: Vec<BookCredit>,
}

/// Person list view: identity plus the distinct roles held anywhere
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonWithRoles {
    pub id: i64,
    pub first_name: Option<String>,
    pub prefix: Option<String>,
    pub last_name: String,
    pub roles: Vec<String>,
}
