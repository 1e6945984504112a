//! Input and cross-entity validation rules.
//!
//! Field-level constraints live on the DTOs as `validator` derives; this
//! module flattens their output into one message and adds the rules that
//! span entities or need database lookups.

use validator::{Validate, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::{book::BookInput, person::PersonRef, role::Role},
    repository::Repository,
};

/// Run the derive-based field validation and flatten failures into a
/// single "field: message, ..." string.
pub fn validate_payload<T: Validate>(payload: &T) -> AppResult<()> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(aggregate_field_errors(&e)))
}

/// Flatten `ValidationErrors` into "field: message" pairs joined by ", "
pub fn aggregate_field_errors(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    parts.sort();
    parts.join(", ")
}

/// A book must arrive with at least one author or editor
pub fn require_creator(authors: &[PersonRef], editors: &[PersonRef]) -> AppResult<()> {
    if authors.is_empty() && editors.is_empty() {
        return Err(AppError::Validation(
            "A book must have at least one author or editor.".to_string(),
        ));
    }
    Ok(())
}

/// A book must name at least one collection
pub fn require_collections(collections: &[String]) -> AppResult<()> {
    if collections.is_empty() {
        return Err(AppError::Validation(
            "At least one collection must be specified.".to_string(),
        ));
    }
    Ok(())
}

/// Every requested collection name must have resolved to a stored row
pub fn require_all_collections_resolved(requested: usize, resolved: usize) -> AppResult<()> {
    if resolved != requested {
        return Err(AppError::Validation(
            "Some collections do not exist.".to_string(),
        ));
    }
    Ok(())
}

/// Removing a contribution must not strip a book of its last holder of a
/// protected role. Only AUTHOR and EDITOR are protected; each is judged
/// against its own remaining count.
pub fn check_removal_guard(role: Role, count_on_book: i64) -> AppResult<()> {
    let protected = matches!(role, Role::Author | Role::Editor);
    if protected && count_on_book <= 1 {
        return Err(AppError::Validation(format!(
            "Cannot remove the last {} of a book.",
            role.display_name().to_lowercase()
        )));
    }
    Ok(())
}

/// Full cross-entity validation for book creation
pub async fn validate_book_input(repository: &Repository, input: &BookInput) -> AppResult<()> {
    validate_payload(input)?;

    if repository.books.title_exists(&input.title, None).await? {
        return Err(AppError::Conflict(format!(
            "A book with the title '{}' already exists.",
            input.title
        )));
    }

    require_collections(&input.collections)?;

    for name in &input.collections {
        if !repository.collections.exists(name).await? {
            return Err(AppError::Validation(format!(
                "Collection '{}' does not exist.",
                name
            )));
        }
    }

    require_creator(&input.authors, &input.editors)
}

/// Collection names must be unique, case-insensitively
pub async fn validate_unique_collection_name(
    repository: &Repository,
    name: &str,
) -> AppResult<()> {
    if repository.collections.exists(name).await? {
        return Err(AppError::Conflict(format!(
            "A collection with the name '{}' already exists.",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(last: &str) -> PersonRef {
        PersonRef {
            first_name: None,
            prefix: None,
            last_name: last.to_string(),
            role: None,
        }
    }

    #[test]
    fn test_require_creator() {
        assert!(require_creator(&[], &[]).is_err());
        assert!(require_creator(&[person("Homer")], &[]).is_ok());
        assert!(require_creator(&[], &[person("Knox")]).is_ok());
    }

    #[test]
    fn test_require_collections() {
        assert!(require_collections(&[]).is_err());
        assert!(require_collections(&["Classics".to_string()]).is_ok());
    }

    #[test]
    fn test_removal_guard_protects_last_author() {
        assert!(check_removal_guard(Role::Author, 1).is_err());
        assert!(check_removal_guard(Role::Author, 2).is_ok());
        assert!(check_removal_guard(Role::Editor, 1).is_err());
    }

    #[test]
    fn test_removal_guard_ignores_unprotected_roles() {
        assert!(check_removal_guard(Role::Translator, 1).is_ok());
        assert!(check_removal_guard(Role::Other, 1).is_ok());
        assert!(check_removal_guard(Role::Illustrator, 0).is_ok());
    }

    #[test]
    fn test_collections_resolution_count() {
        assert!(require_all_collections_resolved(2, 2).is_ok());
        assert!(require_all_collections_resolved(2, 1).is_err());
    }
}
