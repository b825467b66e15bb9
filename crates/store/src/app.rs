//! Central state container wiring every store to one transport and one
//! subscriber registry.

use std::sync::Arc;

use serde_json::Value;

use talentdesk_auth::SessionManager;
use talentdesk_client::{
    ClientConfig, CredentialCell, FileTokenStore, HttpTransport, TokenStore, Transport,
};
use talentdesk_core::{Notifier, Subscription};

use crate::document::DocumentStore;
use crate::profile::ProfileStore;
use crate::records::{
    GroupRecord, InterviewRecord, ManagerRecord, ReportRecord, ScheduleRecord, UserRecord,
};
use crate::resource::{Placement, ResourceRoutes, ResourceStore};

const USER_ROUTES: ResourceRoutes = ResourceRoutes {
    collection: "/users",
    list_key: "users",
    record_key: "user",
    placement: Placement::Prepend,
};

const MANAGER_ROUTES: ResourceRoutes = ResourceRoutes {
    collection: "/admin/managers",
    list_key: "managers",
    record_key: "manager",
    placement: Placement::Prepend,
};

const GROUP_ROUTES: ResourceRoutes = ResourceRoutes {
    collection: "/manager/groups",
    list_key: "groups",
    record_key: "group",
    placement: Placement::Append,
};

const SCHEDULE_ROUTES: ResourceRoutes = ResourceRoutes {
    collection: "/manager/schedules",
    list_key: "schedules",
    record_key: "schedule",
    placement: Placement::Append,
};

const REPORT_ROUTES: ResourceRoutes = ResourceRoutes {
    collection: "/manager/reports",
    list_key: "reports",
    record_key: "report",
    placement: Placement::Append,
};

const INTERVIEW_ROUTES: ResourceRoutes = ResourceRoutes {
    collection: "/user/interviews",
    list_key: "interviews",
    record_key: "interview",
    placement: Placement::Append,
};

/// The whole application state tree.
///
/// One [`Notifier`] spans every slice, so a single subscriber sees every
/// transition regardless of which store produced it. Cheap to clone; clones
/// share all state.
#[derive(Clone)]
pub struct AppStore {
    notifier: Arc<Notifier>,
    pub session: SessionManager,
    pub users: ResourceStore<UserRecord>,
    pub managers: ResourceStore<ManagerRecord>,
    pub groups: ResourceStore<GroupRecord>,
    pub schedules: ResourceStore<ScheduleRecord>,
    pub reports: ResourceStore<ReportRecord>,
    pub interviews: ResourceStore<InterviewRecord>,
    pub profile: ProfileStore,
    pub dashboard_stats: DocumentStore<Value>,
    pub system_analytics: DocumentStore<Value>,
    pub user_analytics: DocumentStore<Value>,
    pub group_members: DocumentStore<Vec<UserRecord>>,
}

impl AppStore {
    /// Wire the full tree onto explicit collaborators.
    pub fn new(
        transport: Arc<dyn Transport>,
        tokens: Arc<dyn TokenStore>,
        credentials: Arc<CredentialCell>,
    ) -> Self {
        let notifier = Notifier::new();

        Self {
            session: SessionManager::new(
                Arc::clone(&transport),
                tokens,
                credentials,
                &notifier,
            ),
            users: ResourceStore::new(Arc::clone(&transport), USER_ROUTES, &notifier),
            managers: ResourceStore::new(Arc::clone(&transport), MANAGER_ROUTES, &notifier),
            groups: ResourceStore::new(Arc::clone(&transport), GROUP_ROUTES, &notifier),
            schedules: ResourceStore::new(Arc::clone(&transport), SCHEDULE_ROUTES, &notifier),
            reports: ResourceStore::new(Arc::clone(&transport), REPORT_ROUTES, &notifier),
            interviews: ResourceStore::new(Arc::clone(&transport), INTERVIEW_ROUTES, &notifier),
            profile: ProfileStore::new(Arc::clone(&transport), &notifier),
            dashboard_stats: DocumentStore::new(
                Arc::clone(&transport),
                "stats",
                "Failed to get dashboard stats",
                &notifier,
            ),
            system_analytics: DocumentStore::new(
                Arc::clone(&transport),
                "analytics",
                "Failed to get system analytics",
                &notifier,
            ),
            user_analytics: DocumentStore::new(
                Arc::clone(&transport),
                "analytics",
                "Failed to get analytics",
                &notifier,
            ),
            group_members: DocumentStore::new(
                transport,
                "members",
                "Failed to get group members",
                &notifier,
            ),
            notifier,
        }
    }

    /// Wire the tree onto the production transport and the OS token file.
    pub fn with_defaults() -> anyhow::Result<Self> {
        let credentials = Arc::new(CredentialCell::new());
        let provider: Arc<dyn talentdesk_client::CredentialProvider> = credentials.clone();
        let transport = Arc::new(HttpTransport::new(ClientConfig::from_env(), provider));
        let tokens = Arc::new(FileTokenStore::open_default()?);
        Ok(Self::new(transport, tokens, credentials))
    }

    /// Register a callback invoked after any transition anywhere in the tree.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.notifier.subscribe(callback)
    }

    /// GET `/users/stats/dashboard`.
    pub async fn load_dashboard_stats(&self) {
        self.dashboard_stats.load("/users/stats/dashboard").await;
    }

    /// GET `/admin/analytics`.
    pub async fn load_system_analytics(&self) {
        self.system_analytics.load("/admin/analytics").await;
    }

    /// GET `/user/analytics`.
    pub async fn load_user_analytics(&self) {
        self.user_analytics.load("/user/analytics").await;
    }

    /// GET `/manager/groups/{id}/members`.
    pub async fn load_group_members(&self, group_id: u64) {
        self.group_members
            .load(&format!("/manager/groups/{group_id}/members"))
            .await;
    }

    /// End the session and drop every piece of per-session data so nothing
    /// leaks across to the next sign-in.
    pub async fn sign_out(&self) {
        self.session.logout().await;
        self.clear_collections();
    }

    fn clear_collections(&self) {
        self.users.clear();
        self.managers.clear();
        self.groups.clear();
        self.schedules.clear();
        self.reports.clear();
        self.interviews.clear();
        self.profile.clear();
        self.dashboard_stats.clear();
        self.system_analytics.clear();
        self.user_analytics.clear();
        self.group_members.clear();
    }
}
