//! Profile and user-resource operations.
//!
//! One slice backs the profile, password change, and resume upload: they
//! multiplex the same `loading`/`error` slot the way every collection does.

use std::sync::Arc;

use serde_json::Value;

use talentdesk_client::{ApiRequest, Transport};
use talentdesk_core::{Notifier, Slice};

use crate::records::UserRecord;
use crate::resource::extract;

const GET_FALLBACK: &str = "Failed to get profile";
const UPDATE_FALLBACK: &str = "Failed to update profile";
const PASSWORD_FALLBACK: &str = "Failed to change password";
const RESUME_FALLBACK: &str = "Failed to upload resume";

/// Observable profile state for the signed-in user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProfileState {
    pub profile: Option<UserRecord>,
    /// Server acknowledgement of the last resume upload.
    pub resume: Option<Value>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Profile transitions.
#[derive(Debug, Clone)]
pub enum ProfileEvent {
    Pending,
    ProfileLoaded(UserRecord),
    /// Password change fulfilled; nothing in the slice changes but the flags.
    PasswordChanged,
    ResumeUploaded(Value),
    Rejected { message: String },
    ErrorCleared,
    Cleared,
}

/// Pure transition function for the profile slice.
pub fn reduce(state: ProfileState, event: ProfileEvent) -> ProfileState {
    match event {
        ProfileEvent::Pending => ProfileState {
            loading: true,
            error: None,
            ..state
        },
        ProfileEvent::ProfileLoaded(profile) => ProfileState {
            profile: Some(profile),
            loading: false,
            error: None,
            ..state
        },
        ProfileEvent::PasswordChanged => ProfileState {
            loading: false,
            error: None,
            ..state
        },
        ProfileEvent::ResumeUploaded(resume) => ProfileState {
            resume: Some(resume),
            loading: false,
            error: None,
            ..state
        },
        ProfileEvent::Rejected { message } => ProfileState {
            loading: false,
            error: Some(message),
            ..state
        },
        ProfileEvent::ErrorCleared => ProfileState {
            error: None,
            ..state
        },
        ProfileEvent::Cleared => ProfileState::default(),
    }
}

/// Store for the signed-in user's own profile and resources.
#[derive(Clone)]
pub struct ProfileStore {
    transport: Arc<dyn Transport>,
    slice: Slice<ProfileState>,
}

impl ProfileStore {
    pub fn new(transport: Arc<dyn Transport>, notifier: &Arc<Notifier>) -> Self {
        Self {
            transport,
            slice: Slice::new(ProfileState::default(), Arc::clone(notifier)),
        }
    }

    pub fn state(&self) -> ProfileState {
        self.slice.snapshot()
    }

    fn dispatch(&self, event: ProfileEvent) {
        self.slice.transition(|state| reduce(state, event));
    }

    fn settle_profile(&self, body: Value, fallback: &str) {
        match extract(&body, "user").and_then(|value| serde_json::from_value(value.clone()).ok())
        {
            Some(profile) => self.dispatch(ProfileEvent::ProfileLoaded(profile)),
            None => {
                tracing::error!("profile response missing 'user'");
                self.dispatch(ProfileEvent::Rejected {
                    message: fallback.to_string(),
                });
            }
        }
    }

    /// GET `/auth/profile`.
    pub async fn load(&self) {
        self.dispatch(ProfileEvent::Pending);
        match self.transport.send(ApiRequest::get("/auth/profile")).await {
            Ok(body) => self.settle_profile(body, GET_FALLBACK),
            Err(err) => self.dispatch(ProfileEvent::Rejected {
                message: err.surface_message(GET_FALLBACK),
            }),
        }
    }

    /// PUT `/auth/profile`.
    pub async fn update(&self, payload: Value) {
        self.dispatch(ProfileEvent::Pending);
        let request = ApiRequest::put("/auth/profile").with_body(payload);
        match self.transport.send(request).await {
            Ok(body) => self.settle_profile(body, UPDATE_FALLBACK),
            Err(err) => self.dispatch(ProfileEvent::Rejected {
                message: err.surface_message(UPDATE_FALLBACK),
            }),
        }
    }

    /// PUT `/auth/change-password`. Fulfilment carries no payload.
    pub async fn change_password(&self, payload: Value) {
        self.dispatch(ProfileEvent::Pending);
        let request = ApiRequest::put("/auth/change-password").with_body(payload);
        match self.transport.send(request).await {
            Ok(_) => self.dispatch(ProfileEvent::PasswordChanged),
            Err(err) => self.dispatch(ProfileEvent::Rejected {
                message: err.surface_message(PASSWORD_FALLBACK),
            }),
        }
    }

    /// POST `/user/resume`, multipart.
    pub async fn upload_resume(&self, filename: &str, bytes: Vec<u8>) {
        self.dispatch(ProfileEvent::Pending);
        match self
            .transport
            .upload("/user/resume", "resume", filename, bytes)
            .await
        {
            Ok(body) => {
                let resume = extract(&body, "resume").cloned().unwrap_or(body);
                self.dispatch(ProfileEvent::ResumeUploaded(resume));
            }
            Err(err) => self.dispatch(ProfileEvent::Rejected {
                message: err.surface_message(RESUME_FALLBACK),
            }),
        }
    }

    pub fn clear(&self) {
        self.dispatch(ProfileEvent::Cleared);
    }

    pub fn clear_error(&self) {
        self.dispatch(ProfileEvent::ErrorCleared);
    }
}
