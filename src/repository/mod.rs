//! Repository layer for database operations

pub mod books;
pub mod collections;
pub mod contributions;
pub mod people;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub people: people::PeopleRepository,
    pub collections: collections::CollectionsRepository,
    pub contributions: contributions::ContributionsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            people: people::PeopleRepository::new(pool.clone()),
            collections: collections::CollectionsRepository::new(pool.clone()),
            contributions: contributions::ContributionsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Round-trip to the database, used by the readiness probe
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
