//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, collections, health, people};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookworm API",
        version = "1.1.0",
        description = "Personal library inventory REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Bookworm", email = "contact@b-612.fr")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::search_books,
        books::filter_books,
        books::get_books_by_collection,
        books::get_books_by_collection_name,
        books::create_book,
        books::update_book,
        books::delete_book,
        books::remove_person_from_book,
        books::remove_collection_from_book,
        // People
        people::list_people,
        people::get_person,
        people::search_people,
        people::get_people_by_role,
        people::update_person,
        // Collections
        collections::list_collections,
        collections::get_collection,
        collections::collection_exists,
        collections::search_collections,
        collections::create_collection,
        collections::update_collection,
        collections::delete_collection,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookInput,
            crate::models::book::BookUpdate,
            crate::models::book::BookView,
            // People
            crate::models::person::Person,
            crate::models::person::PersonRef,
            crate::models::person::PersonUpdate,
            crate::models::person::PersonView,
            crate::models::person::PersonWithRoles,
            crate::models::person::BookCredit,
            crate::models::role::Role,
            // Collections
            crate::models::collection::Collection,
            crate::models::collection::CollectionInput,
            crate::models::collection::CollectionUpdate,
            // Contributions
            crate::models::contribution::Credit,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book management"),
        (name = "people", description = "Contributor management"),
        (name = "collections", description = "Collection management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
