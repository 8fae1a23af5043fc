//! REST resource for [`Book`].
//!
//! Only `author.id` is read from payloads; an id with no matching author is
//! rejected by the foreign key and surfaces as `409 Conflict`.

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookshelf_db::Repository;
use bookshelf_http::{alert, error::AppError, extract::ApiJson};

use super::{models::Book, repository::BookRepository};
use crate::utils;

const ENTITY_NAME: &str = "book";
const RESOURCE: &str = "books";

pub fn router(repository: BookRepository) -> Router {
    Router::new()
        .route(
            "/",
            get(get_all_books).post(create_book).put(update_book),
        )
        .route("/health", get(health_check))
        .route("/{id}", get(get_book).delete(delete_book))
        .with_state(repository)
}

async fn create_book(
    State(repository): State<BookRepository>,
    ApiJson(book): ApiJson<Book>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(%book, author_id = ?book.author_id(), "REST request to save Book");
    if book.id.is_some() {
        return Err(AppError::bad_request_alert(
            "A new book cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let result = repository.save(book).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();

    let mut headers = alert::entity_creation_alert(ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::try_from(utils::resource_location(RESOURCE, &id)) {
        headers.insert(LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(result)))
}

async fn update_book(
    State(repository): State<BookRepository>,
    ApiJson(book): ApiJson<Book>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(%book, author_id = ?book.author_id(), "REST request to update Book");
    let Some(id) = book.id else {
        return Err(AppError::bad_request_alert("Invalid id", ENTITY_NAME, "idnull"));
    };
    if !repository.exists_by_id(id).await? {
        return Err(AppError::bad_request_alert(
            "Entity not found",
            ENTITY_NAME,
            "idnotfound",
        ));
    }

    let result = repository.save(book).await?;
    let headers = alert::entity_update_alert(ENTITY_NAME, &id.to_string());
    Ok((headers, Json(result)))
}

async fn get_all_books(
    State(repository): State<BookRepository>,
) -> Result<Json<Vec<Book>>, AppError> {
    tracing::debug!("REST request to get all Books");
    Ok(Json(repository.find_all().await?))
}

async fn get_book(
    State(repository): State<BookRepository>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, AppError> {
    tracing::debug!(id, "REST request to get Book");
    repository
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book {id} not found")))
}

async fn delete_book(
    State(repository): State<BookRepository>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(id, "REST request to delete Book");
    repository.delete_by_id(id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        alert::entity_deletion_alert(ENTITY_NAME, &id.to_string()),
    ))
}

async fn health_check() -> &'static str {
    "books module is healthy"
}
