//! REST resource for [`Author`].

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use bookshelf_db::Repository;
use bookshelf_http::{alert, error::AppError, extract::ApiJson};

use super::{models::Author, repository::AuthorRepository};
use crate::utils;

const ENTITY_NAME: &str = "author";
const RESOURCE: &str = "authors";

pub fn router(repository: AuthorRepository) -> Router {
    Router::new()
        .route(
            "/",
            get(get_all_authors).post(create_author).put(update_author),
        )
        .route("/health", get(health_check))
        .route("/{id}", get(get_author).delete(delete_author))
        .with_state(repository)
}

/// `POST /api/authors`: 201 with the stored author, 400 if the payload has an id.
async fn create_author(
    State(repository): State<AuthorRepository>,
    ApiJson(author): ApiJson<Author>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(%author, "REST request to save Author");
    if author.id.is_some() {
        return Err(AppError::bad_request_alert(
            "A new author cannot already have an ID",
            ENTITY_NAME,
            "idexists",
        ));
    }

    let result = repository.save(author).await?;
    let id = result.id.map(|id| id.to_string()).unwrap_or_default();

    let mut headers = alert::entity_creation_alert(ENTITY_NAME, &id);
    if let Ok(location) = HeaderValue::try_from(utils::resource_location(RESOURCE, &id)) {
        headers.insert(LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(result)))
}

/// `PUT /api/authors`: 200 with the stored author, 400 if the id is missing or unknown.
async fn update_author(
    State(repository): State<AuthorRepository>,
    ApiJson(author): ApiJson<Author>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(%author, "REST request to update Author");
    let Some(id) = author.id else {
        return Err(AppError::bad_request_alert("Invalid id", ENTITY_NAME, "idnull"));
    };
    if !repository.exists_by_id(id).await? {
        return Err(AppError::bad_request_alert(
            "Entity not found",
            ENTITY_NAME,
            "idnotfound",
        ));
    }

    let result = repository.save(author).await?;
    let headers = alert::entity_update_alert(ENTITY_NAME, &id.to_string());
    Ok((headers, Json(result)))
}

async fn get_all_authors(
    State(repository): State<AuthorRepository>,
) -> Result<Json<Vec<Author>>, AppError> {
    tracing::debug!("REST request to get all Authors");
    Ok(Json(repository.find_all().await?))
}

async fn get_author(
    State(repository): State<AuthorRepository>,
    Path(id): Path<i64>,
) -> Result<Json<Author>, AppError> {
    tracing::debug!(id, "REST request to get Author");
    repository
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("author {id} not found")))
}

/// `DELETE /api/authors/{id}`: 204 whether or not the author existed.
async fn delete_author(
    State(repository): State<AuthorRepository>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(id, "REST request to delete Author");
    repository.delete_by_id(id).await?;
    Ok((
        StatusCode::NO_CONTENT,
        alert::entity_deletion_alert(ENTITY_NAME, &id.to_string()),
    ))
}

async fn health_check() -> &'static str {
    "authors module is healthy"
}
