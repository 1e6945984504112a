//! People endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::person::{PersonQuery, PersonUpdate, PersonView, PersonWithRoles, RoleQuery},
    AppState,
};

/// List all people with the roles they hold
#[utoipa::path(
    get,
    path = "/people",
    tag = "people",
    responses(
        (status = 200, description = "List of people", body = Vec<PersonWithRoles>)
    )
)]
pub async fn list_people(State(state): State<AppState>) -> AppResult<Json<Vec<PersonWithRoles>>> {
    let people = state.services.people.get_all_people().await?;
    Ok(Json(people))
}

/// Get person details by ID
#[utoipa::path(
    get,
    path = "/people/{id}",
    tag = "people",
    params(
        ("id" = i64, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person details", body = PersonView),
        (status = 404, description = "Person not found")
    )
)]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PersonView>> {
    let person = state.services.people.get_person(id).await?;
    Ok(Json(person))
}

/// Search people by last name
#[utoipa::path(
    get,
    path = "/people/search",
    tag = "people",
    params(PersonQuery),
    responses(
        (status = 200, description = "Matching people", body = Vec<PersonView>)
    )
)]
pub async fn search_people(
    State(state): State<AppState>,
    Query(query): Query<PersonQuery>,
) -> AppResult<Json<Vec<PersonView>>> {
    let people = state.services.people.search_people(&query.last_name).await?;
    Ok(Json(people))
}

/// List people holding a given role
#[utoipa::path(
    get,
    path = "/people/role",
    tag = "people",
    params(RoleQuery),
    responses(
        (status = 200, description = "People holding the role", body = Vec<PersonView>),
        (status = 400, description = "Unknown role")
    )
)]
pub async fn get_people_by_role(
    State(state): State<AppState>,
    Query(query): Query<RoleQuery>,
) -> AppResult<Json<Vec<PersonView>>> {
    let people = state.services.people.get_people_by_role(&query.role).await?;
    Ok(Json(people))
}

/// Update a person's name
#[utoipa::path(
    put,
    path = "/people/{id}",
    tag = "people",
    params(
        ("id" = i64, Path, description = "Person ID")
    ),
    request_body = PersonUpdate,
    responses(
        (status = 200, description = "Person updated", body = PersonView),
        (status = 404, description = "Person not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<PersonUpdate>,
) -> AppResult<Json<PersonView>> {
    let updated = state.services.people.update_person(id, update).await?;
    Ok(Json(updated))
}
