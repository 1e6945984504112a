//! Business logic services

pub mod books;
pub mod collections;
pub mod contributors;
pub mod people;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
    pub people: people::PersonService,
    pub collections: collections::CollectionService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BookService::new(repository.clone()),
            people: people::PersonService::new(repository.clone()),
            collections: collections::CollectionService::new(repository),
        }
    }
}
