//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::contribution::Credit;
use super::person::PersonRef;

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub language: String,
    pub format: String,
    pub location: String,
    pub in_stock: bool,
    pub original_language: Option<String>,
    pub publication_year: Option<i32>,
    pub historical_date: Option<i32>,
    pub publisher: Option<String>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookInput {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(nested)]
    pub authors: Vec<PersonRef>,
    #[serde(default)]
    #[validate(nested)]
    pub editors: Vec<PersonRef>,
    #[serde(default)]
    #[validate(nested)]
    pub others: Vec<PersonRef>,
    #[validate(length(min = 1, message = "Language is required"))]
    pub language: String,
    #[validate(length(min = 1, message = "Format is required"))]
    pub format: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(required(message = "Stock status must be specified"))]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub collections: Vec<String>,
    pub original_language: Option<String>,
    #[validate(range(min = 1000, max = 2100, message = "Publication year must be a valid year"))]
    pub publication_year: Option<i32>,
    #[validate(range(
        min = -5000,
        max = 2100,
        message = "Historical date must be between 5000 BCE and 2100 CE"
    ))]
    pub historical_date: Option<i32>,
    pub publisher: Option<String>,
}

/// Update book request; absent fields keep their current value
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BookUpdate {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(nested)]
    pub authors: Option<Vec<PersonRef>>,
    #[validate(nested)]
    pub editors: Option<Vec<PersonRef>>,
    #[validate(nested)]
    pub others: Option<Vec<PersonRef>>,
    pub language: Option<String>,
    pub format: Option<String>,
    pub location: Option<String>,
    pub in_stock: Option<bool>,
    pub collections: Option<Vec<String>>,
    pub original_language: Option<String>,
    #[validate(range(min = 1000, max = 2100, message = "Publication year must be a valid year"))]
    pub publication_year: Option<i32>,
    #[validate(range(
        min = -5000,
        max = 2100,
        message = "Historical date must be between 5000 BCE and 2100 CE"
    ))]
    pub historical_date: Option<i32>,
    pub publisher: Option<String>,
}

/// Book filter parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub year: Option<i32>,
    pub language: Option<String>,
}

/// Title search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct TitleQuery {
    pub title: String,
}

/// Book detail view: attributes plus contributors partitioned by role
/// and the names of the collections it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookView {
    pub id: i64,
    pub title: String,
    pub language: String,
    pub format: String,
    pub location: String,
    pub in_stock: bool,
    pub original_language: Option<String>,
    pub publication_year: Option<i32>,
    pub historical_date: Option<i32>,
    pub publisher: Option<String>,
    pub authors: Vec<Credit>,
    pub editors: Vec<Credit>,
    pub others: Vec<Credit>,
    pub collections: Vec<String>,
}
