//! Per-entity state slice and its reducer.

use std::fmt;

/// State mirrored from the server for one entity type.
#[derive(Debug, Clone, Default)]
pub struct EntityState<E> {
    pub loading: bool,
    pub error_message: Option<String>,
    pub entities: Vec<E>,
    pub entity: E,
    pub updating: bool,
    pub update_success: bool,
}

/// The request an action belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    FetchList,
    Fetch,
    Create,
    Update,
    Delete,
}

impl ActionKind {
    /// Action type for `entity`, e.g. `book/FETCH_BOOK_LIST`.
    pub fn action_type(self, entity: &str) -> String {
        let upper = entity.to_uppercase();
        let code = match self {
            ActionKind::FetchList => format!("FETCH_{upper}_LIST"),
            ActionKind::Fetch => format!("FETCH_{upper}"),
            ActionKind::Create => format!("CREATE_{upper}"),
            ActionKind::Update => format!("UPDATE_{upper}"),
            ActionKind::Delete => format!("DELETE_{upper}"),
        };
        format!("{entity}/{code}")
    }

    fn is_read(self) -> bool {
        matches!(self, ActionKind::FetchList | ActionKind::Fetch)
    }
}

/// Everything the reducer reacts to.
#[derive(Debug, Clone)]
pub enum Action<E> {
    Request(ActionKind),
    Failure(ActionKind, String),
    FetchListSuccess(Vec<E>),
    FetchSuccess(E),
    CreateSuccess(E),
    UpdateSuccess(E),
    DeleteSuccess,
    Reset,
}

impl<E> Action<E> {
    /// Full action type with its phase suffix, e.g. `book/CREATE_BOOK_FULFILLED`.
    pub fn action_type(&self, entity: &str) -> String {
        let (kind, phase) = match self {
            Action::Request(kind) => (*kind, Phase::Pending),
            Action::Failure(kind, _) => (*kind, Phase::Rejected),
            Action::FetchListSuccess(_) => (ActionKind::FetchList, Phase::Fulfilled),
            Action::FetchSuccess(_) => (ActionKind::Fetch, Phase::Fulfilled),
            Action::CreateSuccess(_) => (ActionKind::Create, Phase::Fulfilled),
            Action::UpdateSuccess(_) => (ActionKind::Update, Phase::Fulfilled),
            Action::DeleteSuccess => (ActionKind::Delete, Phase::Fulfilled),
            Action::Reset => return format!("{entity}/RESET"),
        };
        format!("{}_{}", kind.action_type(entity), phase)
    }
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Pending,
    Fulfilled,
    Rejected,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Pending => "PENDING",
            Phase::Fulfilled => "FULFILLED",
            Phase::Rejected => "REJECTED",
        })
    }
}

/// Pure state transition.
pub fn reduce<E: Default>(state: EntityState<E>, action: Action<E>) -> EntityState<E> {
    match action {
        Action::Request(kind) if kind.is_read() => EntityState {
            error_message: None,
            update_success: false,
            loading: true,
            ..state
        },
        Action::Request(_) => EntityState {
            error_message: None,
            update_success: false,
            updating: true,
            ..state
        },
        Action::Failure(_, message) => EntityState {
            loading: false,
            updating: false,
            update_success: false,
            error_message: Some(message),
            ..state
        },
        Action::FetchListSuccess(entities) => EntityState {
            loading: false,
            entities,
            ..state
        },
        Action::FetchSuccess(entity) => EntityState {
            loading: false,
            entity,
            ..state
        },
        Action::CreateSuccess(entity) | Action::UpdateSuccess(entity) => EntityState {
            updating: false,
            update_success: true,
            entity,
            ..state
        },
        Action::DeleteSuccess => EntityState {
            updating: false,
            update_success: true,
            entity: E::default(),
            ..state
        },
        Action::Reset => EntityState::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::models::Book;

    fn book(id: i64) -> Book {
        Book {
            id: Some(id),
            ..Book::default()
        }
    }

    #[test]
    fn read_request_sets_loading_and_clears_error() {
        let state = EntityState::<Book> {
            error_message: Some("boom".into()),
            update_success: true,
            ..EntityState::default()
        };

        let state = reduce(state, Action::Request(ActionKind::FetchList));
        assert!(state.loading);
        assert!(!state.updating);
        assert!(!state.update_success);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn write_requests_set_updating() {
        for kind in [ActionKind::Create, ActionKind::Update, ActionKind::Delete] {
            let state = reduce(EntityState::<Book>::default(), Action::Request(kind));
            assert!(state.updating, "{kind:?}");
            assert!(!state.loading, "{kind:?}");
        }
    }

    #[test]
    fn failure_clears_flags_and_keeps_message() {
        let state = EntityState::<Book> {
            loading: true,
            updating: true,
            ..EntityState::default()
        };
        let state = reduce(state, Action::Failure(ActionKind::Create, "Bad Request".into()));
        assert!(!state.loading);
        assert!(!state.updating);
        assert!(!state.update_success);
        assert_eq!(state.error_message.as_deref(), Some("Bad Request"));
    }

    #[test]
    fn fetch_successes_fill_payloads() {
        let state = reduce(
            EntityState::<Book>::default(),
            Action::Request(ActionKind::FetchList),
        );
        let state = reduce(state, Action::FetchListSuccess(vec![book(1), book(2)]));
        assert!(!state.loading);
        assert_eq!(state.entities.len(), 2);

        let state = reduce(state, Action::FetchSuccess(book(2)));
        assert_eq!(state.entity.id, Some(2));
    }

    #[test]
    fn write_successes_mark_update_success() {
        let state = reduce(EntityState::<Book>::default(), Action::CreateSuccess(book(7)));
        assert!(state.update_success);
        assert_eq!(state.entity.id, Some(7));

        let state = reduce(state, Action::DeleteSuccess);
        assert!(state.update_success);
        assert!(!state.updating);
        assert!(state.entity.id.is_none());
    }

    #[test]
    fn reset_returns_initial_state() {
        let state = reduce(
            EntityState::<Book>::default(),
            Action::FetchListSuccess(vec![book(1)]),
        );
        let state = reduce(state, Action::Reset);
        assert!(state.entities.is_empty());
        assert!(!state.loading && !state.updating && !state.update_success);
    }

    #[test]
    fn action_types_follow_entity_naming() {
        assert_eq!(
            ActionKind::FetchList.action_type("book"),
            "book/FETCH_BOOK_LIST"
        );
        assert_eq!(
            Action::<Book>::DeleteSuccess.action_type("book"),
            "book/DELETE_BOOK_FULFILLED"
        );
        assert_eq!(
            Action::<Book>::Request(ActionKind::Fetch).action_type("author"),
            "author/FETCH_AUTHOR_PENDING"
        );
        assert_eq!(Action::<Book>::Reset.action_type("book"), "book/RESET");
    }
}
