//! Collections repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::collection::Collection,
};

#[derive(Clone)]
pub struct CollectionsRepository {
    pool: Pool<Postgres>,
}

impl CollectionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all collections ordered by name
    pub async fn list(&self) -> AppResult<Vec<Collection>> {
        let collections =
            sqlx::query_as::<_, Collection>("SELECT id, name FROM collections ORDER BY name")
                .fetch_all(&self.pool)
                .await?;

        Ok(collections)
    }

    /// Get a collection by id
    pub async fn get(&self, id: i64) -> AppResult<Collection> {
        sqlx::query_as::<_, Collection>("SELECT id, name FROM collections WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Collection not found with ID: {}", id)))
    }

    /// Look up a collection by name, case-insensitively
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Collection>> {
        let collection = sqlx::query_as::<_, Collection>(
            "SELECT id, name FROM collections WHERE LOWER(name) = LOWER($1)",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(collection)
    }

    /// Whether a collection with this name exists
    pub async fn exists(&self, name: &str) -> AppResult<bool> {
        Ok(self.find_by_name(name).await?.is_some())
    }

    /// Case-insensitive substring search on name
    pub async fn search_by_name(&self, name: &str) -> AppResult<Vec<Collection>> {
        let collections = sqlx::query_as::<_, Collection>(
            "SELECT id, name FROM collections WHERE name ILIKE $1 ORDER BY name",
        )
        .bind(format!("%{}%", name))
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// Names of the collections a book belongs to
    pub async fn names_for_book(&self, book_id: i64) -> AppResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT c.name
            FROM collections c
            JOIN book_collections bc ON bc.collection_id = c.id
            WHERE bc.book_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    // =========================================================================
    // WRITE (transaction-scoped)
    // =========================================================================

    /// Insert a new collection
    pub async fn insert(&self, conn: &mut PgConnection, name: &str) -> AppResult<Collection> {
        let collection = sqlx::query_as::<_, Collection>(
            "INSERT INTO collections (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(conn)
        .await?;

        Ok(collection)
    }

    /// Rename a collection
    pub async fn rename(
        &self,
        conn: &mut PgConnection,
        id: i64,
        name: &str,
    ) -> AppResult<Collection> {
        sqlx::query_as::<_, Collection>(
            "UPDATE collections SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Collection not found with ID: {}", id)))
    }

    /// Delete a collection row
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM collections WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Resolve collection names to rows inside a transaction.
    /// Missing names are simply absent from the result.
    pub async fn resolve_names(
        &self,
        conn: &mut PgConnection,
        names: &[String],
    ) -> AppResult<Vec<Collection>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, name
            FROM collections
            WHERE LOWER(name) = ANY(SELECT LOWER(n) FROM UNNEST($1::text[]) AS n)
            "#,
        )
        .bind(names)
        .fetch_all(conn)
        .await?;

        Ok(collections)
    }

    // =========================================================================
    // BOOK LINKS (book_collections junction)
    // =========================================================================

    /// Link a book to a collection; already-linked pairs are left alone
    pub async fn link_book(
        &self,
        conn: &mut PgConnection,
        book_id: i64,
        collection_id: i64,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO book_collections (book_id, collection_id)
            VALUES ($1, $2)
            ON CONFLICT (book_id, collection_id) DO NOTHING
            "#,
        )
        .bind(book_id)
        .bind(collection_id)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Remove one book-collection link, reporting whether it existed
    pub async fn unlink_book(
        &self,
        conn: &mut PgConnection,
        book_id: i64,
        collection_id: i64,
    ) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM book_collections WHERE book_id = $1 AND collection_id = $2")
                .bind(book_id)
                .bind(collection_id)
                .execute(conn)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every collection link for a book
    pub async fn clear_book_links(&self, conn: &mut PgConnection, book_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM book_collections WHERE book_id = $1")
            .bind(book_id)
            .execute(conn)
            .await?;

        Ok(())
    }

    /// Number of collections a book currently belongs to
    pub async fn link_count(&self, conn: &mut PgConnection, book_id: i64) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM book_collections WHERE book_id = $1")
                .bind(book_id)
                .fetch_one(conn)
                .await?;

        Ok(count)
    }

    /// Books whose only collection is the given one
    pub async fn books_linked_only_to(
        &self,
        conn: &mut PgConnection,
        collection_id: i64,
    ) -> AppResult<Vec<i64>> {
        let book_ids: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT bc.book_id
            FROM book_collections bc
            WHERE bc.collection_id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM book_collections other
                  WHERE other.book_id = bc.book_id AND other.collection_id != $1
              )
            "#,
        )
        .bind(collection_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(book_ids)
    }

    /// Remove every book link for a collection
    pub async fn clear_collection_links(
        &self,
        conn: &mut PgConnection,
        collection_id: i64,
    ) -> AppResult<()> {
        sqlx::query("DELETE FROM book_collections WHERE collection_id = $1")
            .bind(collection_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
