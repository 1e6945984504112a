//! Books repository for database operations

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput, BookUpdate},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// List all books ordered by title
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, language, format, location, in_stock,
                   original_language, publication_year, historical_date, publisher
            FROM books
            ORDER BY title
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Get a book by id
    pub async fn get(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, language, format, location, in_stock,
                   original_language, publication_year, historical_date, publisher
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book not found with ID: {}", id)))
    }

    /// Case-insensitive substring search on title
    pub async fn search_by_title(&self, title: &str) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, language, format, location, in_stock,
                   original_language, publication_year, historical_date, publisher
            FROM books
            WHERE title ILIKE $1
            ORDER BY title
            "#,
        )
        .bind(format!("%{}%", title))
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Filter by publication year and/or language; a missing filter matches everything
    pub async fn filter(&self, year: Option<i32>, language: Option<&str>) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, language, format, location, in_stock,
                   original_language, publication_year, historical_date, publisher
            FROM books
            WHERE ($1::int IS NULL OR publication_year = $1)
              AND ($2::text IS NULL OR LOWER(language) = LOWER($2))
            ORDER BY title
            "#,
        )
        .bind(year)
        .bind(language)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// All books linked to a collection
    pub async fn by_collection(&self, collection_id: i64) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT b.id, b.title, b.language, b.format, b.location, b.in_stock,
                   b.original_language, b.publication_year, b.historical_date, b.publisher
            FROM books b
            JOIN book_collections bc ON bc.book_id = b.id
            WHERE bc.collection_id = $1
            ORDER BY b.title
            "#,
        )
        .bind(collection_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    /// Whether a title is already taken, optionally excluding one book
    pub async fn title_exists(&self, title: &str, exclude_id: Option<i64>) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM books WHERE title = $1 AND ($2::bigint IS NULL OR id != $2)",
        )
        .bind(title)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    // =========================================================================
    // WRITE (transaction-scoped)
    // =========================================================================

    /// Insert a new book and return the stored row
    pub async fn insert(&self, conn: &mut PgConnection, input: &BookInput) -> AppResult<Book> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (
                title, language, format, location, in_stock,
                original_language, publication_year, historical_date, publisher
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, title, language, format, location, in_stock,
                      original_language, publication_year, historical_date, publisher
            "#,
        )
        .bind(&input.title)
        .bind(&input.language)
        .bind(&input.format)
        .bind(&input.location)
        .bind(input.in_stock.unwrap_or(false))
        .bind(&input.original_language)
        .bind(input.publication_year)
        .bind(input.historical_date)
        .bind(&input.publisher)
        .fetch_one(conn)
        .await?;

        Ok(book)
    }

    /// Apply the present fields of an update, leaving absent ones untouched
    pub async fn update(
        &self,
        conn: &mut PgConnection,
        id: i64,
        update: &BookUpdate,
    ) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($1::text, title),
                language = COALESCE($2::text, language),
                format = COALESCE($3::text, format),
                location = COALESCE($4::text, location),
                in_stock = COALESCE($5::boolean, in_stock),
                original_language = COALESCE($6::text, original_language),
                publication_year = COALESCE($7::int, publication_year),
                historical_date = COALESCE($8::int, historical_date),
                publisher = COALESCE($9::text, publisher)
            WHERE id = $10
            RETURNING id, title, language, format, location, in_stock,
                      original_language, publication_year, historical_date, publisher
            "#,
        )
        .bind(update.title.as_deref())
        .bind(update.language.as_deref())
        .bind(update.format.as_deref())
        .bind(update.location.as_deref())
        .bind(update.in_stock)
        .bind(update.original_language.as_deref())
        .bind(update.publication_year)
        .bind(update.historical_date)
        .bind(update.publisher.as_deref())
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book not found with ID: {}", id)))
    }

    /// Delete a book row. Junction rows go with it via ON DELETE CASCADE.
    pub async fn delete(&self, conn: &mut PgConnection, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}
