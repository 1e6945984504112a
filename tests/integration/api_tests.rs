//! API integration tests
//!
//! These run against a live server with a migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to create a book and return its id
async fn create_test_book(client: &Client, title: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "language": "English",
            "format": "Hardcover",
            "location": "Office",
            "in_stock": true,
            "authors": [{"first_name": "Jane", "last_name": "Doe"}],
            "collections": ["Unsorted"]
        }))
        .send()
        .await
        .expect("Failed to send create request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_book() {
    let client = Client::new();

    let book_id = create_test_book(&client, "Integration Test Book").await;

    // The created book is readable and carries its author
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["title"], "Integration Test Book");
    assert_eq!(body["authors"][0]["last_name"], "Doe");
    assert_eq!(body["collections"][0], "Unsorted");

    // Delete it
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);

    // Gone afterwards
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_book_duplicate_title_conflicts() {
    let client = Client::new();

    let book_id = create_test_book(&client, "Duplicate Title Book").await;

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Duplicate Title Book",
            "language": "English",
            "format": "Paperback",
            "location": "Shelf",
            "in_stock": true,
            "authors": [{"first_name": "John", "last_name": "Smith"}],
            "collections": ["Unsorted"]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_create_book_without_creators_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "No Creators Book",
            "language": "English",
            "format": "Paperback",
            "location": "Shelf",
            "in_stock": true,
            "collections": ["Unsorted"]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_remove_last_author_rejected() {
    let client = Client::new();

    let book_id = create_test_book(&client, "Sole Author Book").await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let person_id = body["authors"][0]["person_id"]
        .as_i64()
        .expect("No person ID");

    // Removing the only author must fail and leave the book unchanged
    let response = client
        .delete(format!("{}/books/{}/people/{}", BASE_URL, book_id, person_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["authors"].as_array().map(Vec::len), Some(1));

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_book_delete_sweeps_orphaned_person() {
    let client = Client::new();

    let book_id = create_test_book(&client, "Orphan Sweep Book").await;

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let person_id = body["authors"][0]["person_id"]
        .as_i64()
        .expect("No person ID");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    // The person's only credit is gone, so the person is gone too
    let response = client
        .get(format!("{}/people/{}", BASE_URL, person_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_search_books_by_title() {
    let client = Client::new();

    let book_id = create_test_book(&client, "Searchable Unique Title").await;

    let response = client
        .get(format!("{}/books/search?title=Searchable Unique", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let titles: Vec<&str> = body
        .as_array()
        .expect("Expected array")
        .iter()
        .filter_map(|b| b["title"].as_str())
        .collect();
    assert!(titles.contains(&"Searchable Unique Title"));

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_people_by_role_rejects_unknown_role() {
    let client = Client::new();

    let response = client
        .get(format!("{}/people/role?role=WIZARD", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_collection_lifecycle() {
    let client = Client::new();

    // Create
    let response = client
        .post(format!("{}/collections", BASE_URL))
        .json(&json!({"name": "Integration Shelf"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    let collection_id = body["id"].as_i64().expect("No collection ID");

    // Duplicate name conflicts, case-insensitively
    let response = client
        .post(format!("{}/collections", BASE_URL))
        .json(&json!({"name": "integration shelf"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);

    // Existence check
    let response = client
        .get(format!("{}/collections/exists?name=Integration Shelf", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!(true));

    // Delete
    let response = client
        .delete(format!("{}/collections/{}", BASE_URL, collection_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_unsorted_collection_is_protected() {
    let client = Client::new();

    let response = client
        .get(format!("{}/collections/search?name=Unsorted", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let unsorted_id = body
        .as_array()
        .and_then(|c| c.first())
        .and_then(|c| c["id"].as_i64())
        .expect("Unsorted collection missing");

    let response = client
        .delete(format!("{}/collections/{}", BASE_URL, unsorted_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let response = client
        .put(format!("{}/collections/{}", BASE_URL, unsorted_id))
        .json(&json!({"name": "Renamed"}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_removing_last_collection_falls_back_to_unsorted() {
    let client = Client::new();

    // A dedicated collection for this book
    let response = client
        .post(format!("{}/collections", BASE_URL))
        .json(&json!({"name": "Fallback Shelf"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let collection_id = body["id"].as_i64().expect("No collection ID");

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Fallback Test Book",
            "language": "English",
            "format": "Paperback",
            "location": "Shelf",
            "in_stock": true,
            "authors": [{"first_name": "Fall", "last_name": "Back"}],
            "collections": ["Fallback Shelf"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let book_id = body["id"].as_i64().expect("No book ID");

    // Unlinking the only collection reparents the book to Unsorted
    let response = client
        .delete(format!(
            "{}/books/{}/collections/Fallback Shelf",
            BASE_URL, book_id
        ))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["collections"], json!(["Unsorted"]));

    // Cleanup
    let _ = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/collections/{}", BASE_URL, collection_id))
        .send()
        .await;
}
