//! Client-side state for the REST resources.
//!
//! Each entity type gets an [`EntityStore`]: action creators that issue the
//! HTTP call through a [`Transport`] and dispatch request/success/failure
//! actions into a pure [`reducer`](reducer::reduce). [`views`] render the
//! resulting state as text.

pub mod entity;
pub mod reducer;
pub mod store;
pub mod transport;
pub mod views;

pub use entity::ApiEntity;
pub use reducer::{Action, ActionKind, EntityState};
pub use store::{Alert, EntityStore};
pub use transport::{ApiRequest, ApiResponse, ClientError, RouterTransport, Transport};
