//! Alert headers telling clients which notification to show after a write.
//!
//! Header names are prefixed with the application name, e.g.
//! `X-bookshelfApp-alert: bookshelfApp.book.created` paired with
//! `X-bookshelfApp-params: 42`.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use once_cell::sync::OnceCell;

pub const DEFAULT_APPLICATION_NAME: &str = "bookshelfApp";

static APPLICATION_NAME: OnceCell<String> = OnceCell::new();

/// Set the application name used for header prefixes. Only the first call
/// takes effect; returns whether this call set it.
pub fn set_application_name(name: impl Into<String>) -> bool {
    APPLICATION_NAME.set(name.into()).is_ok()
}

pub fn application_name() -> &'static str {
    APPLICATION_NAME
        .get()
        .map(String::as_str)
        .unwrap_or(DEFAULT_APPLICATION_NAME)
}

pub fn alert_header_name() -> String {
    format!("X-{}-alert", application_name())
}

pub fn error_header_name() -> String {
    format!("X-{}-error", application_name())
}

pub fn params_header_name() -> String {
    format!("X-{}-params", application_name())
}

pub fn entity_creation_alert(entity_name: &str, param: &str) -> HeaderMap {
    entity_alert(entity_name, "created", param)
}

pub fn entity_update_alert(entity_name: &str, param: &str) -> HeaderMap {
    entity_alert(entity_name, "updated", param)
}

pub fn entity_deletion_alert(entity_name: &str, param: &str) -> HeaderMap {
    entity_alert(entity_name, "deleted", param)
}

/// Headers for a rejected request: `error.{error_key}` plus the entity name.
pub fn failure_alert(entity_name: &str, error_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(&mut headers, error_header_name(), format!("error.{error_key}"));
    insert(&mut headers, params_header_name(), entity_name.to_string());
    headers
}

fn entity_alert(entity_name: &str, action: &str, param: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    insert(
        &mut headers,
        alert_header_name(),
        format!("{}.{}.{}", application_name(), entity_name, action),
    );
    insert(&mut headers, params_header_name(), param.to_string());
    headers
}

fn insert(headers: &mut HeaderMap, name: String, value: String) {
    match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
        (Ok(name), Ok(value)) => {
            headers.insert(name, value);
        }
        _ => tracing::warn!("dropping alert header that is not valid HTTP"),
    }
}
