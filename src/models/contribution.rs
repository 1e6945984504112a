//! Book-person junction model (N:M relationship with role)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// A contributor as seen from a book: person identity plus the role
/// held on that book. One row per contribution.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Credit {
    pub person_id: i64,
    pub first_name: Option<String>,
    pub prefix: Option<String>,
    pub last_name: String,
    pub role: String,
}
