//! People repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::person::{BookCredit, Person, PersonUpdate},
};

#[derive(Clone)]
pub struct PeopleRepository {
    pool: Pool<Postgres>,
}

impl PeopleRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all people ordered by name
    pub async fn list(&self) -> AppResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>(
            "SELECT id, first_name, prefix, last_name FROM people ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(people)
    }

    /// Get a person by id
    pub async fn get(&self, id: i64) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            "SELECT id, first_name, prefix, last_name FROM people WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Person not found with ID: {}", id)))
    }

    /// Case-insensitive exact match on last name
    pub async fn find_by_last_name(&self, last_name: &str) -> AppResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT id, first_name, prefix, last_name
            FROM people
            WHERE LOWER(last_name) = LOWER($1)
            ORDER BY last_name, first_name
            "#,
        )
        .bind(last_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(people)
    }

    /// All people holding the given role on at least one book
    pub async fn by_role(&self, role: &str) -> AppResult<Vec<Person>> {
        let people = sqlx::query_as::<_, Person>(
            r#"
            SELECT DISTINCT p.id, p.first_name, p.prefix, p.last_name
            FROM people p
            JOIN book_contributors bc ON bc.person_id = p.id
            WHERE bc.role = $1
            ORDER BY p.last_name, p.first_name
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(people)
    }

    /// Every (title, role) credit held by a person
    pub async fn credits(&self, person_id: i64) -> AppResult<Vec<BookCredit>> {
        let credits = sqlx::query_as::<_, BookCredit>(
            r#"
            SELECT b.title, bc.role
            FROM book_contributors bc
            JOIN books b ON b.id = bc.book_id
            WHERE bc.person_id = $1
            ORDER BY b.title, bc.role
            "#,
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(credits)
    }

    /// Distinct roles a person holds across all books
    pub async fn distinct_roles(&self, person_id: i64) -> AppResult<Vec<String>> {
        let roles: Vec<String> = sqlx::query_scalar(
            "SELECT DISTINCT role FROM book_contributors WHERE person_id = $1 ORDER BY role",
        )
        .bind(person_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles)
    }

    // =========================================================================
    // WRITE (transaction-scoped)
    // =========================================================================

    /// Find-or-create a person by exact name. The insert races cleanly:
    /// ON CONFLICT DO NOTHING followed by a lookup always yields the one
    /// surviving row, whichever writer created it.
    pub async fn upsert(
        &self,
        conn: &mut PgConnection,
        first_name: Option<&str>,
        prefix: Option<&str>,
        last_name: &str,
    ) -> AppResult<Person> {
        let inserted = sqlx::query_as::<_, Person>(
            r#"
            INSERT INTO people (first_name, prefix, last_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (last_name, (COALESCE(first_name, ''))) DO NOTHING
            RETURNING id, first_name, prefix, last_name
            "#,
        )
        .bind(first_name)
        .bind(prefix)
        .bind(last_name)
        .fetch_optional(&mut *conn)
        .await?;

        if let Some(person) = inserted {
            return Ok(person);
        }

        sqlx::query_as::<_, Person>(
            r#"
            SELECT id, first_name, prefix, last_name
            FROM people
            WHERE last_name = $1 AND COALESCE(first_name, '') = COALESCE($2, '')
            "#,
        )
        .bind(last_name)
        .bind(first_name)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::Internal("Person vanished during upsert".to_string()))
    }

    /// Apply the present fields of an update
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i64,
        update: &PersonUpdate,
    ) -> AppResult<Person> {
        sqlx::query_as::<_, Person>(
            r#"
            UPDATE people SET
                first_name = COALESCE($1::text, first_name),
                prefix = COALESCE($2::text, prefix),
                last_name = COALESCE($3::text, last_name)
            WHERE id = $4
            RETURNING id, first_name, prefix, last_name
            "#,
        )
        .bind(update.first_name.as_deref())
        .bind(update.prefix.as_deref())
        .bind(update.last_name.as_deref())
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Person not found with ID: {}", id)))
    }

    /// Among the given ids, the ones with no remaining contributions
    pub async fn orphaned_among(
        &self,
        conn: &mut PgConnection,
        person_ids: &[i64],
    ) -> AppResult<Vec<i64>> {
        if person_ids.is_empty() {
            return Ok(Vec::new());
        }

        let orphans: Vec<i64> = sqlx::query_scalar(
            r#"
            SELECT p.id
            FROM people p
            WHERE p.id = ANY($1)
              AND NOT EXISTS (SELECT 1 FROM book_contributors bc WHERE bc.person_id = p.id)
            "#,
        )
        .bind(person_ids)
        .fetch_all(conn)
        .await?;

        Ok(orphans)
    }

    /// Delete the given people in one statement
    pub async fn delete_ids(&self, conn: &mut PgConnection, ids: &[i64]) -> AppResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        sqlx::query("DELETE FROM people WHERE id = ANY($1)")
            .bind(ids)
            .execute(conn)
            .await?;

        Ok(())
    }
}
