//! Generic pending → fulfilled | rejected store for one server collection.
//!
//! The reducer is pure and independent of the network; [`ResourceStore`]
//! drives it from CRUD operations against the transport.

use std::fmt::Display;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use talentdesk_client::{ApiRequest, Transport};
use talentdesk_core::{Notifier, Pagination, Slice};

/// A server-backed record with a stable identity.
pub trait Record: Clone + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + PartialEq + Display + Send + Sync;

    fn id(&self) -> Self::Id;
}

/// Where a freshly created record lands in `items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Prepend,
    Append,
}

/// Observable state of one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionState<T> {
    pub items: Vec<T>,
    pub pagination: Option<Pagination>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: None,
            loading: false,
            error: None,
        }
    }
}

/// Collection transitions. Settlement events carry everything the reducer
/// needs so it stays a pure function of (state, event).
#[derive(Debug, Clone)]
pub enum CollectionEvent<T: Record> {
    Pending,
    /// List fulfilled: `items` and `pagination` are replaced wholesale.
    Listed {
        items: Vec<T>,
        pagination: Option<Pagination>,
    },
    Created {
        record: T,
        placement: Placement,
    },
    Updated(T),
    Deleted(T::Id),
    Rejected {
        message: String,
    },
    ErrorCleared,
    Cleared,
}

/// Pure transition function for a collection slice.
///
/// The single `error` slot is shared by every operation kind on the
/// collection: the last transition to settle wins it, and any fulfilled
/// settlement clears it.
pub fn reduce<T: Record>(state: CollectionState<T>, event: CollectionEvent<T>) -> CollectionState<T> {
    match event {
        CollectionEvent::Pending => CollectionState {
            loading: true,
            error: None,
            ..state
        },
        CollectionEvent::Listed { items, pagination } => CollectionState {
            items,
            pagination,
            loading: false,
            error: None,
        },
        CollectionEvent::Created { record, placement } => {
            let CollectionState {
                mut items,
                pagination,
                ..
            } = state;
            match placement {
                Placement::Prepend => items.insert(0, record),
                Placement::Append => items.push(record),
            }
            CollectionState {
                items,
                pagination,
                loading: false,
                error: None,
            }
        }
        CollectionEvent::Updated(record) => {
            let CollectionState {
                mut items,
                pagination,
                ..
            } = state;
            // No matching id: the response is dropped silently, not an error.
            if let Some(slot) = items.iter_mut().find(|item| item.id() == record.id()) {
                *slot = record;
            }
            CollectionState {
                items,
                pagination,
                loading: false,
                error: None,
            }
        }
        CollectionEvent::Deleted(id) => {
            let CollectionState {
                mut items,
                pagination,
                ..
            } = state;
            items.retain(|item| item.id() != id);
            CollectionState {
                items,
                pagination,
                loading: false,
                error: None,
            }
        }
        CollectionEvent::Rejected { message } => CollectionState {
            loading: false,
            error: Some(message),
            ..state
        },
        CollectionEvent::ErrorCleared => CollectionState {
            error: None,
            ..state
        },
        CollectionEvent::Cleared => CollectionState::default(),
    }
}

/// Endpoint wiring and envelope keys for one collection.
///
/// Server envelopes are not uniform: some nest the payload under `data`,
/// list keys are plural, record keys singular. Each instantiation names its
/// own keys rather than the store guessing.
#[derive(Debug, Clone)]
pub struct ResourceRoutes {
    /// Collection path, e.g. `/users` or `/admin/managers`.
    pub collection: &'static str,
    /// Envelope key holding the full listing, e.g. `users`.
    pub list_key: &'static str,
    /// Envelope key holding a single record on create/update, e.g. `user`.
    pub record_key: &'static str,
    pub placement: Placement,
}

impl ResourceRoutes {
    fn member(&self, id: impl Display) -> String {
        format!("{}/{}", self.collection, id)
    }
}

/// Generic three-phase store for one server-backed collection.
///
/// Cheap to clone; clones share the same slice. Dispatched operations are
/// never cancelled: a stale settlement still applies its transition, so two
/// concurrent `list` calls settle last-write-wins. Callers that need strict
/// ordering must sequence their own requests.
#[derive(Clone)]
pub struct ResourceStore<T: Record> {
    transport: Arc<dyn Transport>,
    routes: ResourceRoutes,
    slice: Slice<CollectionState<T>>,
}

impl<T: Record> ResourceStore<T> {
    pub fn new(
        transport: Arc<dyn Transport>,
        routes: ResourceRoutes,
        notifier: &Arc<Notifier>,
    ) -> Self {
        Self {
            transport,
            routes,
            slice: Slice::new(CollectionState::default(), Arc::clone(notifier)),
        }
    }

    pub fn state(&self) -> CollectionState<T> {
        self.slice.snapshot()
    }

    pub fn slice(&self) -> &Slice<CollectionState<T>> {
        &self.slice
    }

    fn dispatch(&self, event: CollectionEvent<T>) {
        self.slice.transition(|state| reduce(state, event));
    }

    fn reject(&self, message: String) {
        self.dispatch(CollectionEvent::Rejected { message });
    }

    fn list_fallback(&self) -> String {
        format!("Failed to get {}", self.routes.list_key)
    }

    fn write_fallback(&self, verb: &str) -> String {
        format!("Failed to {verb} {}", self.routes.record_key)
    }

    /// GET the collection. Fulfilment replaces `items` and `pagination`
    /// wholesale; the view never observes a stitched partial listing.
    pub async fn list(&self, query: &[(&str, &str)]) {
        self.dispatch(CollectionEvent::Pending);

        let request = ApiRequest::get(self.routes.collection)
            .with_query(query.iter().map(|(k, v)| (*k, *v)));
        match self.transport.send(request).await {
            Ok(body) => match decode_listing::<T>(&body, self.routes.list_key) {
                Some((items, pagination)) => {
                    self.dispatch(CollectionEvent::Listed { items, pagination });
                }
                None => {
                    tracing::error!(
                        collection = self.routes.collection,
                        "listing response missing '{}'",
                        self.routes.list_key
                    );
                    self.reject(self.list_fallback());
                }
            },
            Err(err) => self.reject(err.surface_message(&self.list_fallback())),
        }
    }

    /// POST a new record; fulfilment inserts it per the configured placement.
    pub async fn create(&self, payload: Value) {
        self.dispatch(CollectionEvent::Pending);

        let request = ApiRequest::post(self.routes.collection).with_body(payload);
        match self.transport.send(request).await {
            Ok(body) => match decode_record::<T>(&body, self.routes.record_key) {
                Some(record) => self.dispatch(CollectionEvent::Created {
                    record,
                    placement: self.routes.placement,
                }),
                None => {
                    tracing::error!(
                        collection = self.routes.collection,
                        "create response missing '{}'",
                        self.routes.record_key
                    );
                    self.reject(self.write_fallback("create"));
                }
            },
            Err(err) => self.reject(err.surface_message(&self.write_fallback("create"))),
        }
    }

    /// PUT an existing record; fulfilment replaces the match by id, or drops
    /// the response silently when no record with that id is held.
    pub async fn update(&self, id: T::Id, payload: Value) {
        self.dispatch(CollectionEvent::Pending);

        let request = ApiRequest::put(self.routes.member(&id)).with_body(payload);
        match self.transport.send(request).await {
            Ok(body) => match decode_record::<T>(&body, self.routes.record_key) {
                Some(record) => self.dispatch(CollectionEvent::Updated(record)),
                None => {
                    tracing::error!(
                        collection = self.routes.collection,
                        "update response missing '{}'",
                        self.routes.record_key
                    );
                    self.reject(self.write_fallback("update"));
                }
            },
            Err(err) => self.reject(err.surface_message(&self.write_fallback("update"))),
        }
    }

    /// DELETE by id; fulfilment removes the matching record, or no-ops when
    /// it is already gone.
    pub async fn delete(&self, id: T::Id) {
        self.dispatch(CollectionEvent::Pending);

        match self.transport.send(ApiRequest::delete(self.routes.member(&id))).await {
            Ok(_) => self.dispatch(CollectionEvent::Deleted(id)),
            Err(err) => self.reject(err.surface_message(&self.write_fallback("delete"))),
        }
    }

    pub fn clear(&self) {
        self.dispatch(CollectionEvent::Cleared);
    }

    pub fn clear_error(&self) {
        self.dispatch(CollectionEvent::ErrorCleared);
    }
}

/// Locate `key` in a response envelope: top level first, then under `data`.
pub(crate) fn extract<'v>(body: &'v Value, key: &str) -> Option<&'v Value> {
    body.get(key)
        .or_else(|| body.get("data").and_then(|data| data.get(key)))
}

fn decode_listing<T: Record>(body: &Value, key: &str) -> Option<(Vec<T>, Option<Pagination>)> {
    let items = serde_json::from_value(extract(body, key)?.clone()).ok()?;
    let pagination = extract(body, "pagination")
        .and_then(|value| serde_json::from_value(value.clone()).ok());
    Some((items, pagination))
}

fn decode_record<T: Record>(body: &Value, key: &str) -> Option<T> {
    serde_json::from_value(extract(body, key)?.clone()).ok()
}
