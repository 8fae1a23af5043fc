//! Request extractors whose rejections render as [`AppError`] bodies.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::AppError;

/// `Json<T>` that rejects with the error envelope instead of axum's plain text.
///
/// A body that parses but does not fit `T` is a `422` validation error; any
/// other rejection (syntax, content type, unreadable body) is a `400`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let reason = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => AppError::validation(
                vec![serde_json::json!({ "reason": reason })],
                "request body does not match the expected shape",
            ),
            _ => AppError::bad_request(reason),
        }
    }
}
