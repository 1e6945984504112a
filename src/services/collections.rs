//! Collection service

use crate::{
    error::{conflict_on_unique_violation, AppError, AppResult},
    models::collection::{Collection, CollectionInput, CollectionUpdate, UNSORTED_COLLECTION},
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct CollectionService {
    repository: Repository,
}

impl CollectionService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All collections ordered by name
    pub async fn get_all_collections(&self) -> AppResult<Vec<Collection>> {
        self.repository.collections.list().await
    }

    /// One collection by id
    pub async fn get_collection(&self, id: i64) -> AppResult<Collection> {
        self.repository.collections.get(id).await
    }

    /// Whether a collection with this name exists, case-insensitively
    pub async fn collection_exists(&self, name: &str) -> AppResult<bool> {
        self.repository.collections.exists(name).await
    }

    /// Collections whose name contains the fragment
    pub async fn search_collections(&self, name: &str) -> AppResult<Vec<Collection>> {
        self.repository.collections.search_by_name(name).await
    }

    /// Create a collection with a unique name
    pub async fn create_collection(&self, input: CollectionInput) -> AppResult<Collection> {
        validation::validate_payload(&input)?;
        validation::validate_unique_collection_name(&self.repository, &input.name).await?;

        let mut tx = self.repository.pool.begin().await?;

        let collection = self
            .repository
            .collections
            .insert(&mut tx, &input.name)
            .await
            .map_err(|e| match e {
                AppError::Database(db) => conflict_on_unique_violation(
                    db,
                    &format!("A collection with the name '{}' already exists.", input.name),
                ),
                other => other,
            })?;

        tx.commit().await?;

        Ok(collection)
    }

    /// Rename a collection. The reserved fallback collection keeps its
    /// name.
    pub async fn update_collection(
        &self,
        id: i64,
        update: CollectionUpdate,
    ) -> AppResult<Collection> {
        validation::validate_payload(&update)?;

        let existing = self.repository.collections.get(id).await?;
        if existing.name == UNSORTED_COLLECTION {
            return Err(AppError::Validation(format!(
                "The reserved collection '{}' cannot be renamed.",
                UNSORTED_COLLECTION
            )));
        }

        if let Some(holder) = self.repository.collections.find_by_name(&update.name).await? {
            if holder.id != id {
                return Err(AppError::Conflict(format!(
                    "A collection with the name '{}' already exists.",
                    update.name
                )));
            }
        }

        let mut tx = self.repository.pool.begin().await?;

        let collection = self
            .repository
            .collections
            .rename(&mut tx, id, &update.name)
            .await
            .map_err(|e| match e {
                AppError::Database(db) => conflict_on_unique_violation(
                    db,
                    &format!("A collection with the name '{}' already exists.", update.name),
                ),
                other => other,
            })?;

        tx.commit().await?;

        Ok(collection)
    }

    /// Delete a collection. Books that belonged only to it are
    /// reparented to the reserved fallback collection in the same
    /// transaction; the fallback itself cannot be deleted.
    pub async fn delete_collection(&self, id: i64) -> AppResult<()> {
        let existing = self.repository.collections.get(id).await?;
        if existing.name == UNSORTED_COLLECTION {
            return Err(AppError::Validation(format!(
                "The reserved collection '{}' cannot be deleted.",
                UNSORTED_COLLECTION
            )));
        }

        let mut tx = self.repository.pool.begin().await?;

        let unsorted = self
            .repository
            .collections
            .resolve_names(&mut tx, &[UNSORTED_COLLECTION.to_string()])
            .await?
            .first()
            .map(|c| c.id)
            .ok_or_else(|| {
                AppError::Internal(format!(
                    "Reserved collection '{}' is missing",
                    UNSORTED_COLLECTION
                ))
            })?;

        let stranded = self
            .repository
            .collections
            .books_linked_only_to(&mut tx, id)
            .await?;
        for book_id in &stranded {
            self.repository
                .collections
                .link_book(&mut tx, *book_id, unsorted)
                .await?;
        }

        self.repository
            .collections
            .clear_collection_links(&mut tx, id)
            .await?;
        self.repository.collections.delete(&mut tx, id).await?;

        tx.commit().await?;

        tracing::info!(
            collection_id = id,
            reparented = stranded.len(),
            "Collection deleted"
        );

        Ok(())
    }
}
