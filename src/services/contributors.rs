//! Contributor assignment engine.
//!
//! Resolves incoming contributor references to stored people and records
//! their roles on a book. All methods run inside a caller-owned
//! transaction so a failed batch leaves nothing behind.

use indexmap::IndexMap;
use sqlx::PgConnection;
use unicode_normalization::UnicodeNormalization;

use crate::{
    error::AppResult,
    models::{person::Person, person::PersonRef, role::Role},
    repository::Repository,
};

/// Per-batch cache of resolved people, keyed by normalized name.
/// IndexMap keeps resolution order stable across a batch.
pub type PersonCache = IndexMap<String, Person>;

#[derive(Clone)]
pub struct ContributorEngine {
    repository: Repository,
}

impl ContributorEngine {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Assign the full contributor payload of a book: authors, editors,
    /// then the free-form others. One cache spans all three batches, so
    /// the same name never resolves twice.
    pub async fn assign_all(
        &self,
        conn: &mut PgConnection,
        book_id: i64,
        authors: &[PersonRef],
        editors: &[PersonRef],
        others: &[PersonRef],
    ) -> AppResult<()> {
        let mut cache = PersonCache::new();

        self.assign_batch(conn, &mut cache, book_id, authors, Role::Author)
            .await?;
        self.assign_batch(conn, &mut cache, book_id, editors, Role::Editor)
            .await?;
        self.assign_others(conn, &mut cache, book_id, others).await?;

        Ok(())
    }

    /// Assign every person in a batch under one fixed role
    pub async fn assign_batch(
        &self,
        conn: &mut PgConnection,
        cache: &mut PersonCache,
        book_id: i64,
        refs: &[PersonRef],
        role: Role,
    ) -> AppResult<()> {
        for person_ref in refs {
            let person = self.resolve_person(conn, cache, person_ref).await?;
            self.repository
                .contributions
                .insert(conn, book_id, person.id, role.as_str())
                .await?;
        }

        Ok(())
    }

    /// Assign the free-form list: each entry carries its own role string,
    /// and anything unparseable collapses to OTHER
    pub async fn assign_others(
        &self,
        conn: &mut PgConnection,
        cache: &mut PersonCache,
        book_id: i64,
        refs: &[PersonRef],
    ) -> AppResult<()> {
        for person_ref in refs {
            let role = person_ref
                .role
                .as_deref()
                .map(Role::parse_or_other)
                .unwrap_or(Role::Other);

            let person = self.resolve_person(conn, cache, person_ref).await?;
            self.repository
                .contributions
                .insert(conn, book_id, person.id, role.as_str())
                .await?;
        }

        Ok(())
    }

    /// Find-or-create the person behind a reference, consulting the
    /// batch cache first
    pub async fn resolve_person(
        &self,
        conn: &mut PgConnection,
        cache: &mut PersonCache,
        person_ref: &PersonRef,
    ) -> AppResult<Person> {
        let first = person_ref.first_name.as_deref().map(normalize_name);
        let last = normalize_name(&person_ref.last_name);
        let key = cache_key(first.as_deref(), &last);

        if let Some(person) = cache.get(&key) {
            return Ok(person.clone());
        }

        let person = self
            .repository
            .people
            .upsert(conn, first.as_deref(), person_ref.prefix.as_deref(), &last)
            .await?;

        cache.insert(key, person.clone());
        Ok(person)
    }

    /// Delete the given person if no contribution references them
    /// anymore. Idempotent: a still-credited or already-deleted person
    /// is left alone.
    pub async fn remove_orphaned_person(
        &self,
        conn: &mut PgConnection,
        person_id: i64,
    ) -> AppResult<bool> {
        let orphans = self
            .repository
            .people
            .orphaned_among(conn, &[person_id])
            .await?;

        if orphans.is_empty() {
            return Ok(false);
        }

        self.repository.people.delete_ids(conn, &orphans).await?;
        Ok(true)
    }

    /// Sweep a candidate set, deleting everyone no longer credited
    /// anywhere. Returns the ids actually removed.
    pub async fn sweep_orphans(
        &self,
        conn: &mut PgConnection,
        candidates: &[i64],
    ) -> AppResult<Vec<i64>> {
        let orphans = self
            .repository
            .people
            .orphaned_among(conn, candidates)
            .await?;

        self.repository.people.delete_ids(conn, &orphans).await?;
        Ok(orphans)
    }
}

/// NFC-normalize and trim a name so byte-different spellings of the same
/// text resolve to one person
pub fn normalize_name(name: &str) -> String {
    name.trim().nfc().collect()
}

fn cache_key(first: Option<&str>, last: &str) -> String {
    format!("{}\u{1f}{}", first.unwrap_or(""), last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name_trims_and_recomposes() {
        assert_eq!(normalize_name("  Homer "), "Homer");
        // decomposed e + combining diaeresis recomposes to ë
        assert_eq!(normalize_name("Bronte\u{0308}"), "Brontë");
    }

    #[test]
    fn test_cache_key_distinguishes_missing_first_name() {
        assert_ne!(cache_key(None, "Homer"), cache_key(Some("Win"), "Homer"));
        assert_eq!(cache_key(None, "Homer"), cache_key(None, "Homer"));
    }

    #[test]
    fn test_cache_key_separator_prevents_collisions() {
        // "Ann A" + "Lee" must not collide with "Ann" + "A Lee"
        assert_ne!(cache_key(Some("Ann A"), "Lee"), cache_key(Some("Ann"), "A Lee"));
    }
}
