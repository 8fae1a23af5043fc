use bookshelf_http::alert;
use time::OffsetDateTime;

use super::{
    entity::ApiEntity,
    reducer::{reduce, Action, ActionKind, EntityState},
    transport::{ApiRequest, ApiResponse, ClientError, Transport},
};

/// Notification the server attached to a write response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// `X-{app}-alert` value, e.g. `bookshelfApp.book.created`.
    pub key: String,
    /// `X-{app}-params` value, usually the entity id.
    pub param: Option<String>,
}

impl Alert {
    fn from_response(response: &ApiResponse) -> Option<Self> {
        let header = |name: String| {
            response
                .headers
                .get(name.as_str())
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let key = header(alert::alert_header_name())?;
        Some(Self {
            key,
            param: header(alert::params_header_name()),
        })
    }
}

/// State slice plus action creators for one entity type.
///
/// Every action creator takes `&mut self`, so one request is in flight per
/// store at a time.
pub struct EntityStore<E: ApiEntity, T: Transport> {
    state: EntityState<E>,
    transport: T,
    last_alert: Option<Alert>,
}

impl<E: ApiEntity, T: Transport> EntityStore<E, T> {
    pub fn new(transport: T) -> Self {
        Self {
            state: EntityState::default(),
            transport,
            last_alert: None,
        }
    }

    pub fn state(&self) -> &EntityState<E> {
        &self.state
    }

    pub fn last_alert(&self) -> Option<&Alert> {
        self.last_alert.as_ref()
    }

    pub fn dispatch(&mut self, action: Action<E>) {
        tracing::debug!(action = %action.action_type(E::ENTITY), "dispatch");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// `GET /api/{resource}` with a cache buster, replacing `entities`.
    pub async fn get_entities(&mut self) -> Result<&[E], ClientError> {
        let url = format!("{}?cacheBuster={}", E::api_url(), cache_buster());
        let entities = self
            .run(ActionKind::FetchList, ApiRequest::get(url), |response| {
                response.json::<Vec<E>>()
            })
            .await?;
        self.dispatch(Action::FetchListSuccess(entities));
        Ok(&self.state.entities)
    }

    /// `GET /api/{resource}/{id}`, replacing `entity`.
    pub async fn get_entity(&mut self, id: i64) -> Result<&E, ClientError> {
        let url = format!("{}/{}", E::api_url(), id);
        let entity = self
            .run(ActionKind::Fetch, ApiRequest::get(url), |response| {
                response.json::<E>()
            })
            .await?;
        self.dispatch(Action::FetchSuccess(entity));
        Ok(&self.state.entity)
    }

    /// `POST` the cleaned entity, then refresh the list.
    pub async fn create_entity(&mut self, entity: E) -> Result<E, ClientError> {
        let body = serde_json::to_value(entity.clean())?;
        let created = self
            .run(
                ActionKind::Create,
                ApiRequest::post(E::api_url(), body),
                |response| response.json::<E>(),
            )
            .await?;
        self.dispatch(Action::CreateSuccess(created.clone()));
        self.get_entities().await?;
        Ok(created)
    }

    /// `PUT` the cleaned entity.
    pub async fn update_entity(&mut self, entity: E) -> Result<E, ClientError> {
        let body = serde_json::to_value(entity.clean())?;
        let updated = self
            .run(
                ActionKind::Update,
                ApiRequest::put(E::api_url(), body),
                |response| response.json::<E>(),
            )
            .await?;
        self.dispatch(Action::UpdateSuccess(updated.clone()));
        Ok(updated)
    }

    /// `DELETE /api/{resource}/{id}`.
    pub async fn delete_entity(&mut self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}/{}", E::api_url(), id);
        self.run(ActionKind::Delete, ApiRequest::delete(url), |response| {
            response.error_for_status()
        })
        .await?;
        self.dispatch(Action::DeleteSuccess);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.last_alert = None;
        self.dispatch(Action::Reset);
    }

    /// Dispatch the request action, send, and decode with `decode`. Any
    /// failure is dispatched as the failure action before being returned.
    async fn run<R>(
        &mut self,
        kind: ActionKind,
        request: ApiRequest,
        decode: impl FnOnce(&ApiResponse) -> Result<R, ClientError>,
    ) -> Result<R, ClientError> {
        self.dispatch(Action::Request(kind));

        let outcome = match self.transport.send(request).await {
            Ok(response) => {
                if let Some(alert) = Alert::from_response(&response) {
                    tracing::info!(alert = %alert.key, param = ?alert.param, "server alert");
                    self.last_alert = Some(alert);
                }
                decode(&response)
            }
            Err(err) => Err(err),
        };

        if let Err(err) = &outcome {
            self.dispatch(Action::Failure(kind, err.to_string()));
        }
        outcome
    }
}

fn cache_buster() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}
