//! Book lifecycle service

use crate::{
    error::{conflict_on_unique_violation, AppError, AppResult},
    language,
    models::{
        book::{BookInput, BookUpdate, BookView},
        collection::UNSORTED_COLLECTION,
        role::Role,
    },
    projection,
    repository::Repository,
    validation,
};

use super::contributors::ContributorEngine;

#[derive(Clone)]
pub struct BookService {
    repository: Repository,
    contributors: ContributorEngine,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self {
            contributors: ContributorEngine::new(repository.clone()),
            repository,
        }
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Create a book with its collections and contributors in one
    /// transaction
    pub async fn create_book(&self, mut input: BookInput) -> AppResult<BookView> {
        validation::validate_book_input(&self.repository, &input).await?;

        input.language = language::to_iso_code(&input.language);
        if let Some(ref orig) = input.original_language {
            input.original_language = Some(language::to_iso_code(orig));
        }

        let mut tx = self.repository.pool.begin().await?;

        let book = self
            .repository
            .books
            .insert(&mut tx, &input)
            .await
            .map_err(|e| match e {
                AppError::Database(db) => conflict_on_unique_violation(
                    db,
                    &format!("A book with the title '{}' already exists.", input.title),
                ),
                other => other,
            })?;

        let resolved = self
            .repository
            .collections
            .resolve_names(&mut tx, &input.collections)
            .await?;
        validation::require_all_collections_resolved(input.collections.len(), resolved.len())?;

        for collection in &resolved {
            self.repository
                .collections
                .link_book(&mut tx, book.id, collection.id)
                .await?;
        }

        self.contributors
            .assign_all(&mut tx, book.id, &input.authors, &input.editors, &input.others)
            .await?;

        tx.commit().await?;

        tracing::info!(book_id = book.id, title = %book.title, "Book created");

        self.get_book(book.id).await
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// All books as full views
    pub async fn get_all_books(&self) -> AppResult<Vec<BookView>> {
        let books = self.repository.books.list().await?;
        self.assemble_views(books).await
    }

    /// One book as a full view
    pub async fn get_book(&self, id: i64) -> AppResult<BookView> {
        let book = self.repository.books.get(id).await?;
        let credits = self.repository.contributions.credits_for_book(id).await?;
        let collections = self.repository.collections.names_for_book(id).await?;

        Ok(projection::book_view(book, credits, collections))
    }

    /// Books whose title contains the fragment, case-insensitively
    pub async fn get_books_by_title(&self, title: &str) -> AppResult<Vec<BookView>> {
        let books = self.repository.books.search_by_title(title).await?;
        self.assemble_views(books).await
    }

    /// Books matching a year and/or language filter
    pub async fn filter_books(
        &self,
        year: Option<i32>,
        language_filter: Option<&str>,
    ) -> AppResult<Vec<BookView>> {
        let normalized = language_filter.map(language::to_iso_code);
        let books = self
            .repository
            .books
            .filter(year, normalized.as_deref())
            .await?;
        self.assemble_views(books).await
    }

    /// Books in a collection, by collection id
    pub async fn get_books_by_collection(&self, collection_id: i64) -> AppResult<Vec<BookView>> {
        self.repository.collections.get(collection_id).await?;
        let books = self.repository.books.by_collection(collection_id).await?;
        self.assemble_views(books).await
    }

    /// Books in a collection, by collection name
    pub async fn get_books_by_collection_name(&self, name: &str) -> AppResult<Vec<BookView>> {
        let collection = self
            .repository
            .collections
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Collection not found: {}", name)))?;

        let books = self.repository.books.by_collection(collection.id).await?;
        self.assemble_views(books).await
    }

    async fn assemble_views(
        &self,
        books: Vec<crate::models::book::Book>,
    ) -> AppResult<Vec<BookView>> {
        let mut views = Vec::with_capacity(books.len());
        for book in books {
            let credits = self
                .repository
                .contributions
                .credits_for_book(book.id)
                .await?;
            let collections = self.repository.collections.names_for_book(book.id).await?;
            views.push(projection::book_view(book, credits, collections));
        }
        Ok(views)
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Partial update: attributes, collection replacement and additive
    /// contributor assignment, all in one transaction
    pub async fn update_book(&self, id: i64, mut update: BookUpdate) -> AppResult<BookView> {
        validation::validate_payload(&update)?;
        self.repository.books.get(id).await?;

        if let Some(ref title) = update.title {
            if self.repository.books.title_exists(title, Some(id)).await? {
                return Err(AppError::Conflict(format!(
                    "A book with the title '{}' already exists.",
                    title
                )));
            }
        }

        if let Some(ref lang) = update.language {
            update.language = Some(language::to_iso_code(lang));
        }
        if let Some(ref orig) = update.original_language {
            update.original_language = Some(language::to_iso_code(orig));
        }

        let mut tx = self.repository.pool.begin().await?;

        self.repository
            .books
            .update(&mut tx, id, &update)
            .await
            .map_err(|e| match e {
                AppError::Database(db) => conflict_on_unique_violation(
                    db,
                    "A book with this title already exists.",
                ),
                other => other,
            })?;

        if let Some(ref names) = update.collections {
            if names.is_empty() {
                // An explicit empty list cannot leave the book
                // uncollected; it falls back to the reserved collection.
                let unsorted = self.unsorted_id(&mut tx).await?;
                self.repository.collections.clear_book_links(&mut tx, id).await?;
                self.repository
                    .collections
                    .link_book(&mut tx, id, unsorted)
                    .await?;
            } else {
                let resolved = self
                    .repository
                    .collections
                    .resolve_names(&mut tx, names)
                    .await?;
                if resolved.len() != names.len() {
                    return Err(AppError::Validation(
                        "One or more collections do not exist.".to_string(),
                    ));
                }

                self.repository.collections.clear_book_links(&mut tx, id).await?;
                for collection in &resolved {
                    self.repository
                        .collections
                        .link_book(&mut tx, id, collection.id)
                        .await?;
                }
            }
        }

        let authors = update.authors.as_deref().unwrap_or(&[]);
        let editors = update.editors.as_deref().unwrap_or(&[]);
        let others = update.others.as_deref().unwrap_or(&[]);
        if !authors.is_empty() || !editors.is_empty() || !others.is_empty() {
            self.contributors
                .assign_all(&mut tx, id, authors, editors, others)
                .await?;
        }

        tx.commit().await?;

        self.get_book(id).await
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a book, its contributions and its collection links, then
    /// sweep the people it credited for orphans
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        self.repository.books.get(id).await?;

        let mut tx = self.repository.pool.begin().await?;

        let credited = self.repository.contributions.people_on_book(&mut tx, id).await?;

        self.repository.contributions.delete_for_book(&mut tx, id).await?;
        self.repository.books.delete(&mut tx, id).await?;

        let removed = self.contributors.sweep_orphans(&mut tx, &credited).await?;

        tx.commit().await?;

        tracing::info!(
            book_id = id,
            orphans_removed = removed.len(),
            "Book deleted"
        );

        Ok(())
    }

    // =========================================================================
    // CONTRIBUTION AND COLLECTION REMOVAL
    // =========================================================================

    /// Remove a person's contributions from a book. Fails if that would
    /// strip the book of its last author or last editor; afterwards the
    /// person is deleted if no longer credited anywhere.
    pub async fn remove_person_from_book(
        &self,
        book_id: i64,
        person_id: i64,
    ) -> AppResult<BookView> {
        self.repository.books.get(book_id).await?;
        self.repository.people.get(person_id).await?;

        let mut tx = self.repository.pool.begin().await?;

        let roles = self
            .repository
            .contributions
            .roles_on_book(&mut tx, book_id, person_id)
            .await?;
        if roles.is_empty() {
            return Err(AppError::NotFound(format!(
                "Person {} is not associated with book {}.",
                person_id, book_id
            )));
        }

        // Each protected role is judged against its own remaining count:
        // removing the last AUTHOR fails even when editors remain.
        for role_str in &roles {
            if let Ok(role) = role_str.parse::<Role>() {
                let count = self
                    .repository
                    .contributions
                    .count_role_on_book(&mut tx, book_id, role.as_str())
                    .await?;
                validation::check_removal_guard(role, count)?;
            }
        }

        self.repository
            .contributions
            .delete_person_from_book(&mut tx, book_id, person_id)
            .await?;

        let removed = self
            .contributors
            .remove_orphaned_person(&mut tx, person_id)
            .await?;

        tx.commit().await?;

        if removed {
            tracing::info!(person_id, "Orphaned person removed");
        }

        self.get_book(book_id).await
    }

    /// Unlink a collection from a book. A book left with no collections
    /// is reparented to the reserved fallback collection.
    pub async fn remove_collection_from_book(
        &self,
        book_id: i64,
        collection_name: &str,
    ) -> AppResult<()> {
        self.repository.books.get(book_id).await?;
        let collection = self
            .repository
            .collections
            .find_by_name(collection_name)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Collection not found: {}", collection_name))
            })?;

        let mut tx = self.repository.pool.begin().await?;

        let existed = self
            .repository
            .collections
            .unlink_book(&mut tx, book_id, collection.id)
            .await?;
        if !existed {
            return Err(AppError::NotFound(format!(
                "Book {} is not in collection '{}'.",
                book_id, collection_name
            )));
        }

        if self.repository.collections.link_count(&mut tx, book_id).await? == 0 {
            let unsorted = self.unsorted_id(&mut tx).await?;
            self.repository
                .collections
                .link_book(&mut tx, book_id, unsorted)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Id of the reserved fallback collection. Its absence is a broken
    /// deployment, not a user error.
    async fn unsorted_id(&self, conn: &mut sqlx::PgConnection) -> AppResult<i64> {
        let resolved = self
            .repository
            .collections
            .resolve_names(conn, &[UNSORTED_COLLECTION.to_string()])
            .await?;

        resolved
            .first()
            .map(|c| c.id)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Reserved collection '{}' is missing",
                    UNSORTED_COLLECTION
                ))
            })
    }
}
