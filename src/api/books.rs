//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::book::{BookInput, BookQuery, BookUpdate, BookView, TitleQuery},
    AppState,
};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<BookView>)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookView>>> {
    let books = state.services.books.get_all_books().await?;
    Ok(Json(books))
}

/// Get book details by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookView),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookView>> {
    let book = state.services.books.get_book(id).await?;
    Ok(Json(book))
}

/// Search books by title substring
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(TitleQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookView>)
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<Vec<BookView>>> {
    let books = state.services.books.get_books_by_title(&query.title).await?;
    Ok(Json(books))
}

/// Filter books by publication year and/or language
#[utoipa::path(
    get,
    path = "/books/filter",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookView>)
    )
)]
pub async fn filter_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<BookView>>> {
    let books = state
        .services
        .books
        .filter_books(query.year, query.language.as_deref())
        .await?;
    Ok(Json(books))
}

/// List books in a collection by collection ID
#[utoipa::path(
    get,
    path = "/books/by-collection/{collection_id}",
    tag = "books",
    params(
        ("collection_id" = i64, Path, description = "Collection ID")
    ),
    responses(
        (status = 200, description = "Books in the collection", body = Vec<BookView>),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn get_books_by_collection(
    State(state): State<AppState>,
    Path(collection_id): Path<i64>,
) -> AppResult<Json<Vec<BookView>>> {
    let books = state
        .services
        .books
        .get_books_by_collection(collection_id)
        .await?;
    Ok(Json(books))
}

/// List books in a collection by collection name
#[utoipa::path(
    get,
    path = "/books/by-collection-name/{collection_name}",
    tag = "books",
    params(
        ("collection_name" = String, Path, description = "Collection name")
    ),
    responses(
        (status = 200, description = "Books in the collection", body = Vec<BookView>),
        (status = 404, description = "Collection not found")
    )
)]
pub async fn get_books_by_collection_name(
    State(state): State<AppState>,
    Path(collection_name): Path<String>,
) -> AppResult<Json<Vec<BookView>>> {
    let books = state
        .services
        .books
        .get_books_by_collection_name(&collection_name)
        .await?;
    Ok(Json(books))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created", body = BookView),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Book already exists")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Json(input): Json<BookInput>,
) -> AppResult<(StatusCode, Json<BookView>)> {
    let created = state.services.books.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "Book updated", body = BookView),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Title already taken")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<BookUpdate>,
) -> AppResult<Json<BookView>> {
    let updated = state.services.books.update_book(id, update).await?;
    Ok(Json(updated))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete_book(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove a person's contributions from a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}/people/{person_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID"),
        ("person_id" = i64, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Updated book", body = BookView),
        (status = 400, description = "Removal would strip the last author or editor"),
        (status = 404, description = "Book or person not found")
    )
)]
pub async fn remove_person_from_book(
    State(state): State<AppState>,
    Path((book_id, person_id)): Path<(i64, i64)>,
) -> AppResult<Json<BookView>> {
    let updated = state
        .services
        .books
        .remove_person_from_book(book_id, person_id)
        .await?;
    Ok(Json(updated))
}

/// Remove a collection from a book
#[utoipa::path(
    delete,
    path = "/books/{book_id}/collections/{collection_name}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID"),
        ("collection_name" = String, Path, description = "Collection name")
    ),
    responses(
        (status = 200, description = "Collection removed from the book", body = String),
        (status = 404, description = "Book or collection not found")
    )
)]
pub async fn remove_collection_from_book(
    State(state): State<AppState>,
    Path((book_id, collection_name)): Path<(i64, String)>,
) -> AppResult<String> {
    state
        .services
        .books
        .remove_collection_from_book(book_id, &collection_name)
        .await?;

    Ok(format!(
        "Collection '{}' removed from book with ID {}",
        collection_name, book_id
    ))
}
