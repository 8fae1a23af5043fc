mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{app, count, delete, get, post, put};

const BOOKS: &str = "/api/books";
const AUTHORS: &str = "/api/authors";

fn default_book() -> Value {
    json!({
        "title": "AAAAAAAAAA",
        "description": "AAAAAAAAAA",
        "publicationDate": "1970-01-01",
        "price": 1
    })
}

#[tokio::test]
async fn create_book_round_trips_fields() {
    let (_app, router) = app().await;

    let created = post(&router, BOOKS, default_book()).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(
        created.header("X-bookshelfApp-alert"),
        Some("bookshelfApp.book.created")
    );
    let id = created.body["id"].as_i64().unwrap();
    assert_eq!(
        created.header("location"),
        Some(format!("/api/books/{id}").as_str())
    );

    let fetched = get(&router, &format!("{BOOKS}/{id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["title"], "AAAAAAAAAA");
    assert_eq!(fetched.body["description"], "AAAAAAAAAA");
    assert_eq!(fetched.body["publicationDate"], "1970-01-01");
    assert_eq!(fetched.body["price"].as_f64(), Some(1.0));
    assert!(fetched.body["author"].is_null());
}

#[tokio::test]
async fn price_is_kept_to_two_decimal_places() {
    let (_app, router) = app().await;

    let created = post(&router, BOOKS, json!({ "title": "t", "price": 12.346 })).await;
    let id = created.body["id"].as_i64().unwrap();

    let fetched = get(&router, &format!("{BOOKS}/{id}")).await;
    assert_eq!(fetched.body["price"].as_f64(), Some(12.35));
}

#[tokio::test]
async fn create_book_with_existing_id_is_rejected() {
    let (_app, router) = app().await;
    let mut book = default_book();
    book["id"] = json!(1);

    let response = post(&router, BOOKS, book).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.header("X-bookshelfApp-error"), Some("error.idexists"));
    assert_eq!(response.header("X-bookshelfApp-params"), Some("book"));
    assert_eq!(count(&router, BOOKS).await, 0);
}

#[tokio::test]
async fn update_book_without_id_is_rejected() {
    let (_app, router) = app().await;

    let response = put(&router, BOOKS, default_book()).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.header("X-bookshelfApp-error"), Some("error.idnull"));
}

#[tokio::test]
async fn get_nonexistent_book_is_not_found() {
    let (_app, router) = app().await;

    let response = get(&router, &format!("{BOOKS}/{}", i64::MAX)).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_book_decrements_count() {
    let (_app, router) = app().await;
    let created = post(&router, BOOKS, default_book()).await;
    let id = created.body["id"].as_i64().unwrap();

    let response = delete(&router, &format!("{BOOKS}/{id}")).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(count(&router, BOOKS).await, 0);
    assert_eq!(
        get(&router, &format!("{BOOKS}/{id}")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn book_author_link_is_visible_from_both_sides() {
    let (_app, router) = app().await;
    let author = post(
        &router,
        AUTHORS,
        json!({ "name": "Ursula", "birthDate": "1929-10-21" }),
    )
    .await;
    let author_id = author.body["id"].as_i64().unwrap();

    let mut book = default_book();
    book["author"] = json!({ "id": author_id });
    let created = post(&router, BOOKS, book).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let book_id = created.body["id"].as_i64().unwrap();
    assert_eq!(created.body["author"]["id"], author_id);
    assert_eq!(created.body["author"]["name"], "Ursula");

    let fetched = get(&router, &format!("{AUTHORS}/{author_id}")).await;
    let books = fetched.body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["id"], book_id);

    // Clearing the reference on the book detaches it from the author.
    let mut detached = created.body.clone();
    detached["author"] = Value::Null;
    let updated = put(&router, BOOKS, detached).await;
    assert_eq!(updated.status, StatusCode::OK);
    assert!(updated.body["author"].is_null());

    let fetched = get(&router, &format!("{AUTHORS}/{author_id}")).await;
    assert_eq!(fetched.body["books"], json!([]));
}

#[tokio::test]
async fn deleting_an_author_keeps_their_books() {
    let (_app, router) = app().await;
    let author = post(&router, AUTHORS, json!({ "name": "Ursula" })).await;
    let author_id = author.body["id"].as_i64().unwrap();

    let mut book = default_book();
    book["author"] = json!({ "id": author_id });
    let book_id = post(&router, BOOKS, book).await.body["id"].as_i64().unwrap();

    let response = delete(&router, &format!("{AUTHORS}/{author_id}")).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let fetched = get(&router, &format!("{BOOKS}/{book_id}")).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert!(fetched.body["author"].is_null());
}

#[tokio::test]
async fn unknown_author_reference_is_a_conflict() {
    let (_app, router) = app().await;
    let mut book = default_book();
    book["author"] = json!({ "id": 404 });

    let response = post(&router, BOOKS, book).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"]["code"], "conflict");
    assert_eq!(count(&router, BOOKS).await, 0);
}

#[tokio::test]
async fn author_books_in_payload_are_ignored() {
    let (_app, router) = app().await;
    let book_id = post(&router, BOOKS, default_book()).await.body["id"]
        .as_i64()
        .unwrap();

    let author = post(
        &router,
        AUTHORS,
        json!({ "name": "Ursula", "books": [{ "id": book_id }] }),
    )
    .await;

    assert_eq!(author.status, StatusCode::CREATED);
    assert_eq!(author.body["books"], json!([]));
    let fetched = get(&router, &format!("{BOOKS}/{book_id}")).await;
    assert!(fetched.body["author"].is_null());
}

#[tokio::test]
async fn large_prices_round_trip_digit_for_digit() {
    let (_app, router) = app().await;
    let body: Value =
        serde_json::from_str(r#"{ "title": "t", "price": 12345678901234567.89 }"#).unwrap();

    let created = post(&router, BOOKS, body).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["price"].to_string(), "12345678901234567.89");
    let id = created.body["id"].as_i64().unwrap();

    let fetched = get(&router, &format!("{BOOKS}/{id}")).await;
    assert_eq!(fetched.body["price"].to_string(), "12345678901234567.89");
}

#[tokio::test]
async fn prices_are_rounded_in_decimal_not_binary() {
    let (_app, router) = app().await;

    for (sent, stored) in [("2.675", "2.68"), ("1.005", "1.01"), ("0.1", "0.1")] {
        let body: Value =
            serde_json::from_str(&format!(r#"{{ "title": "t", "price": {sent} }}"#)).unwrap();
        let id = post(&router, BOOKS, body).await.body["id"].as_i64().unwrap();

        let fetched = get(&router, &format!("{BOOKS}/{id}")).await;
        assert_eq!(fetched.body["price"].to_string(), stored, "sent {sent}");
    }
}

#[tokio::test]
async fn update_book_overwrites_every_field() {
    let (_app, router) = app().await;
    let author = post(&router, AUTHORS, json!({ "name": "Ursula" })).await;
    let author_id = author.body["id"].as_i64().unwrap();
    let id = post(&router, BOOKS, default_book()).await.body["id"]
        .as_i64()
        .unwrap();

    let response = put(
        &router,
        BOOKS,
        json!({
            "id": id,
            "title": "BBBBBBBBBB",
            "description": "BBBBBBBBBB",
            "publicationDate": "1970-01-02",
            "price": 2,
            "author": { "id": author_id }
        }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("X-bookshelfApp-alert"),
        Some("bookshelfApp.book.updated")
    );
    assert_eq!(response.header("X-bookshelfApp-params"), Some(id.to_string().as_str()));

    let fetched = get(&router, &format!("{BOOKS}/{id}")).await;
    assert_eq!(fetched.body["title"], "BBBBBBBBBB");
    assert_eq!(fetched.body["description"], "BBBBBBBBBB");
    assert_eq!(fetched.body["publicationDate"], "1970-01-02");
    assert_eq!(fetched.body["price"].as_f64(), Some(2.0));
    assert_eq!(fetched.body["author"]["id"], author_id);
    assert_eq!(count(&router, BOOKS).await, 1);
}

#[tokio::test]
async fn update_unknown_book_is_rejected() {
    let (_app, router) = app().await;
    let mut book = default_book();
    book["id"] = json!(99);

    let response = put(&router, BOOKS, book).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.header("X-bookshelfApp-error"),
        Some("error.idnotfound")
    );
    assert_eq!(response.header("X-bookshelfApp-params"), Some("book"));
    assert_eq!(count(&router, BOOKS).await, 0);
}

#[tokio::test]
async fn delete_missing_book_is_idempotent() {
    let (_app, router) = app().await;
    post(&router, BOOKS, default_book()).await;

    let response = delete(&router, &format!("{BOOKS}/42")).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(count(&router, BOOKS).await, 1);
}

#[tokio::test]
async fn delete_removes_exactly_one_book() {
    let (_app, router) = app().await;
    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(post(&router, BOOKS, default_book()).await.body["id"].as_i64().unwrap());
    }
    let before = count(&router, BOOKS).await;

    let response = delete(&router, &format!("{BOOKS}/{}", ids[1])).await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(count(&router, BOOKS).await, before - 1);
    let remaining: Vec<i64> = get(&router, BOOKS)
        .await
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["id"].as_i64().unwrap())
        .collect();
    assert_eq!(remaining, [ids[0], ids[2]]);
}

#[tokio::test]
async fn malformed_payloads_are_rejected_with_error_bodies() {
    let (_app, router) = app().await;

    let response = post(
        &router,
        BOOKS,
        json!({ "title": "t", "publicationDate": "yesterday" }),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["error"]["code"], "validation_error");

    let response = post(&router, BOOKS, json!({ "title": "t", "price": "cheap" })).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(count(&router, BOOKS).await, 0);
}
