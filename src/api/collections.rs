//! Collection endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::collection::{Collection, CollectionInput, CollectionQuery, CollectionUpdate},
    AppState,
};

/// List all collections
#[utoipa::path(
    get,
    path = "/collections",
    tag = "collections",
    responses(
        (status = 200, description = "List of collections", body = Vec<Collection>)
    )
)]
pub async fn list_collections(State(state): State<AppState>) -> AppResult<Json<Vec<Collection>>> {
    let collections = state.services.collections.get_all_collections().await?;
    Ok(Json(collections))
}

/// Get collection details by ID
#[utoipa::path(
    get,
    path = "/collections/{id}",
    tag = "collections",
    params(
        ("id" = i64, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Collection details", body = Collection),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Collection>> {
    let collection = state.services.collections.get_collection(id).await?;
    Ok(Json(collection))
}

/// Check whether a collection name is taken
#[utoipa::path(
    get,
    path = "/collections/exists",
    tag = "collections",
    params(CollectionQuery),
    responses(
        (status = 200, description = "Whether the collection exists", body = bool)
    )
)]
pub async fn collection_exists(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> AppResult<Json<bool>> {
    let exists = state
        .services
        .collections
        .collection_exists(&query.name)
        .await?;
    Ok(Json(exists))
}

/// Search collections by name substring
#[utoipa::path(
    get,
    path = "/collections/search",
    tag = "collections",
    params(CollectionQuery),
    responses(
        (status = 200, description = "Matching collections", body = Vec<Collection>)
    )
)]
pub async fn search_collections(
    State(state): State<AppState>,
    Query(query): Query<CollectionQuery>,
) -> AppResult<Json<Vec<Collection>>> {
    let collections = state
        .services
        .collections
        .search_collections(&query.name)
        .await?;
    Ok(Json(collections))
}

/// Create a new collection
#[utoipa::path(
    post,
    path = "/collections",
    tag = "collections",
    request_body = CollectionInput,
    responses(
        (status = 201, description = "Collection created", body = Collection),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Collection already exists")
    )
)]
pub async fn create_collection(
    State(state): State<AppState>,
    Json(input): Json<CollectionInput>,
) -> AppResult<(StatusCode, Json<Collection>)> {
    let created = state.services.collections.create_collection(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Rename a collection
#[utoipa::path(
    put,
    path = "/collections/{id}",
    tag = "collections",
    params(
        ("id" = i64, Path, description = "Collection ID")
    ),
    request_body = CollectionUpdate,
    responses(
        (status = 200, description = "Collection updated", body = Collection),
        (status = 400, description = "Reserved collection cannot be renamed"),
        (status = 404, description = "Collection not found"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn update_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CollectionUpdate>,
) -> AppResult<Json<Collection>> {
    let updated = state
        .services
        .collections
        .update_collection(id, update)
        .await?;
    Ok(Json(updated))
}

/// Delete a collection
#[utoipa::path(
    delete,
    path = "/collections/{id}",
    tag = "collections",
    params(
        ("id" = i64, Path, description = "Collection ID")
    ),
    responses(
        (status = 204, description = "Collection deleted"),
        (status = 400, description = "Reserved collection cannot be deleted"),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn delete_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.collections.delete_collection(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
