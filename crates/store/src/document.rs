//! Singleton fetch-only documents.
//!
//! Dashboard stats, analytics, and member listings are single values with
//! the same three-phase lifecycle as a collection but no CRUD surface.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use talentdesk_client::{ApiRequest, Transport};
use talentdesk_core::{Notifier, Slice};

use crate::resource::extract;

/// Observable state of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentState<T> {
    pub value: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for DocumentState<T> {
    fn default() -> Self {
        Self {
            value: None,
            loading: false,
            error: None,
        }
    }
}

/// Document transitions.
#[derive(Debug, Clone)]
pub enum DocumentEvent<T> {
    Pending,
    Loaded(T),
    Rejected { message: String },
    ErrorCleared,
    Cleared,
}

/// Pure transition function for a document slice.
pub fn reduce<T: Clone>(state: DocumentState<T>, event: DocumentEvent<T>) -> DocumentState<T> {
    match event {
        DocumentEvent::Pending => DocumentState {
            loading: true,
            error: None,
            ..state
        },
        DocumentEvent::Loaded(value) => DocumentState {
            value: Some(value),
            loading: false,
            error: None,
        },
        DocumentEvent::Rejected { message } => DocumentState {
            loading: false,
            error: Some(message),
            ..state
        },
        DocumentEvent::ErrorCleared => DocumentState {
            error: None,
            ..state
        },
        DocumentEvent::Cleared => DocumentState::default(),
    }
}

/// Fetch-only store for one server document.
///
/// The path is supplied per load because some documents are member-scoped
/// (`/manager/groups/:id/members`); the central container wires the fixed
/// paths.
#[derive(Clone)]
pub struct DocumentStore<T: Clone + DeserializeOwned + Send + Sync + 'static> {
    transport: Arc<dyn Transport>,
    /// Envelope key holding the document, e.g. `stats`.
    key: &'static str,
    fallback: &'static str,
    slice: Slice<DocumentState<T>>,
}

impl<T: Clone + DeserializeOwned + Send + Sync + 'static> DocumentStore<T> {
    pub fn new(
        transport: Arc<dyn Transport>,
        key: &'static str,
        fallback: &'static str,
        notifier: &Arc<Notifier>,
    ) -> Self {
        Self {
            transport,
            key,
            fallback,
            slice: Slice::new(DocumentState::default(), Arc::clone(notifier)),
        }
    }

    pub fn state(&self) -> DocumentState<T> {
        self.slice.snapshot()
    }

    fn dispatch(&self, event: DocumentEvent<T>) {
        self.slice.transition(|state| reduce(state, event));
    }

    /// GET `path` and replace the document on fulfilment.
    pub async fn load(&self, path: &str) {
        self.dispatch(DocumentEvent::Pending);

        match self.transport.send(ApiRequest::get(path)).await {
            Ok(body) => {
                let decoded = extract(&body, self.key)
                    .and_then(|value| serde_json::from_value(value.clone()).ok());
                match decoded {
                    Some(value) => self.dispatch(DocumentEvent::Loaded(value)),
                    None => {
                        tracing::error!(path, "document response missing '{}'", self.key);
                        self.dispatch(DocumentEvent::Rejected {
                            message: self.fallback.to_string(),
                        });
                    }
                }
            }
            Err(err) => self.dispatch(DocumentEvent::Rejected {
                message: err.surface_message(self.fallback),
            }),
        }
    }

    pub fn clear(&self) {
        self.dispatch(DocumentEvent::Cleared);
    }

    pub fn clear_error(&self) {
        self.dispatch(DocumentEvent::ErrorCleared);
    }
}
