//! Bookworm Server - Personal Library Inventory
//!
//! A Rust REST API server for cataloging books, contributors and
//! collections.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bookworm_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("bookworm_server={},tower_http=debug", config.logging.level).into()
        });

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Bookworm Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        repository,
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Books
        .route("/books", get(api::books::list_books))
        .route("/books", post(api::books::create_book))
        .route("/books/search", get(api::books::search_books))
        .route("/books/filter", get(api::books::filter_books))
        .route(
            "/books/by-collection/:collection_id",
            get(api::books::get_books_by_collection),
        )
        .route(
            "/books/by-collection-name/:collection_name",
            get(api::books::get_books_by_collection_name),
        )
        .route("/books/:id", get(api::books::get_book))
        .route("/books/:id", put(api::books::update_book))
        .route("/books/:id", delete(api::books::delete_book))
        .route(
            "/books/:book_id/people/:person_id",
            delete(api::books::remove_person_from_book),
        )
        .route(
            "/books/:book_id/collections/:collection_name",
            delete(api::books::remove_collection_from_book),
        )
        // People
        .route("/people", get(api::people::list_people))
        .route("/people/search", get(api::people::search_people))
        .route("/people/role", get(api::people::get_people_by_role))
        .route("/people/:id", get(api::people::get_person))
        .route("/people/:id", put(api::people::update_person))
        // Collections
        .route("/collections", get(api::collections::list_collections))
        .route("/collections", post(api::collections::create_collection))
        .route("/collections/exists", get(api::collections::collection_exists))
        .route("/collections/search", get(api::collections::search_collections))
        .route("/collections/:id", get(api::collections::get_collection))
        .route("/collections/:id", put(api::collections::update_collection))
        .route("/collections/:id", delete(api::collections::delete_collection))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
