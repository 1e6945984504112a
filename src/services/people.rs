//! Person service

use crate::{
    error::{conflict_on_unique_violation, AppError, AppResult},
    models::{
        person::{PersonUpdate, PersonView, PersonWithRoles},
        role::Role,
    },
    projection,
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct PersonService {
    repository: Repository,
}

impl PersonService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All people with the distinct roles they hold anywhere
    pub async fn get_all_people(&self) -> AppResult<Vec<PersonWithRoles>> {
        let people = self.repository.people.list().await?;

        let mut views = Vec::with_capacity(people.len());
        for person in people {
            let roles = self.repository.people.distinct_roles(person.id).await?;
            views.push(projection::person_with_roles(person, roles));
        }
        Ok(views)
    }

    /// One person with every (title, role) credit
    pub async fn get_person(&self, id: i64) -> AppResult<PersonView> {
        let person = self.repository.people.get(id).await?;
        let books = self.repository.people.credits(id).await?;

        Ok(projection::person_view(person, books))
    }

    /// People matching a last name, case-insensitively
    pub async fn search_people(&self, last_name: &str) -> AppResult<Vec<PersonView>> {
        let people = self.repository.people.find_by_last_name(last_name).await?;

        let mut views = Vec::with_capacity(people.len());
        for person in people {
            let books = self.repository.people.credits(person.id).await?;
            views.push(projection::person_view(person, books));
        }
        Ok(views)
    }

    /// People holding the given role on at least one book. The role
    /// string is parsed strictly; an unknown role is rejected.
    pub async fn get_people_by_role(&self, role_str: &str) -> AppResult<Vec<PersonView>> {
        let role: Role = role_str
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid role provided: {}", role_str)))?;

        let people = self.repository.people.by_role(role.as_str()).await?;

        let mut views = Vec::with_capacity(people.len());
        for person in people {
            let books = self.repository.people.credits(person.id).await?;
            views.push(projection::person_view(person, books));
        }
        Ok(views)
    }

    /// Update a person's name fields. Renaming onto an existing identity
    /// is a conflict, enforced by the unique name index.
    pub async fn update_person(&self, id: i64, update: PersonUpdate) -> AppResult<PersonView> {
        validation::validate_payload(&update)?;
        self.repository.people.get(id).await?;

        let mut tx = self.repository.pool.begin().await?;

        self.repository
            .people
            .update(&mut tx, id, &update)
            .await
            .map_err(|e| match e {
                AppError::Database(db) => conflict_on_unique_violation(
                    db,
                    "A person with this name already exists.",
                ),
                other => other,
            })?;

        tx.commit().await?;

        self.get_person(id).await
    }
}
