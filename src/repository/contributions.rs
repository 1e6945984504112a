//! Contributions repository (book_contributors junction)

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::AppResult,
    models::contribution::Credit,
};

#[derive(Clone)]
pub struct ContributionsRepository {
    pool: Pool<Postgres>,
}

impl ContributionsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// All contributors of a book with their roles, one row per contribution
    pub async fn credits_for_book(&self, book_id: i64) -> AppResult<Vec<Credit>> {
        let credits = sqlx::query_as::<_, Credit>(
            r#"
            SELECT p.id AS person_id, p.first_name, p.prefix, p.last_name, bc.role
            FROM book_contributors bc
            JOIN people p ON p.id = bc.person_id
            WHERE bc.book_id = $1
            ORDER BY bc.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(credits)
    }

    // =========================================================================
    // WRITE (transaction-scoped)
    // =========================================================================

    /// Record a contribution; an identical (book, person, role) row is
    /// left alone rather than duplicated
    pub async fn insert(
        &self,
        conn: &mut PgConnection,
        book_id: i64,
        person_id: i64,
        role: &str,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO book_contributors (book_id, person_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (book_id, person_id, role) DO NOTHING
            "#,
        )
        .bind(book_id)
        .bind(person_id)
        .bind(role)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Roles a person holds on one specific book
    pub async fn roles_on_book(
        &self,
        conn: &mut PgConnection,
        book_id: i64,
        person_id: i64,
    ) -> AppResult<Vec<String>> {
        let roles: Vec<String> = sqlx::query_scalar(
            "SELECT role FROM book_contributors WHERE book_id = $1 AND person_id = $2",
        )
        .bind(book_id)
        .bind(person_id)
        .fetch_all(conn)
        .await?;

        Ok(roles)
    }

    /// How many contributors hold the given role on a book
    pub async fn count_role_on_book(
        &self,
        conn: &mut PgConnection,
        book_id: i64,
        role: &str,
    ) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM book_contributors WHERE book_id = $1 AND role = $2",
        )
        .bind(book_id)
        .bind(role)
        .fetch_one(conn)
        .await?;

        Ok(count)
    }

    /// Distinct people credited on a book
    pub async fn people_on_book(
        &self,
        conn: &mut PgConnection,
        book_id: i64,
    ) -> AppResult<Vec<i64>> {
        let person_ids: Vec<i64> = sqlx::query_scalar(
            "SELECT DISTINCT person_id FROM book_contributors WHERE book_id = $1",
        )
        .bind(book_id)
        .fetch_all(conn)
        .await?;

        Ok(person_ids)
    }

    /// Remove every contribution a person holds on a book
    pub async fn delete_person_from_book(
        &self,
        conn: &mut PgConnection,
        book_id: i64,
        person_id: i64,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM book_contributors WHERE book_id = $1 AND person_id = $2",
        )
        .bind(book_id)
        .bind(person_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Remove every contribution row of a book
    pub async fn delete_for_book(&self, conn: &mut PgConnection, book_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM book_contributors WHERE book_id = $1")
            .bind(book_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
