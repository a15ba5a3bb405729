use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{AuthApi, CoursesApi, GradesApi, NotificationsApi, ResourcesApi, UsersApi};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::http::{HttpTransport, ReqwestTransport, RequestPipeline};
use crate::router::{platform_routes, NavigationGuard};
use crate::session::{JsonFileStorage, Session, SessionStorage, SessionStore};
use crate::shell::{
    Navigator, Notifier, NullNavigator, NullProgress, ProgressIndicator, TracingNotifier,
};

/// Fully wired client: one session, one pipeline, the navigation guard and
/// the API surface, all sharing the injected shell seams.
pub struct PlatformClient {
    config: ClientConfig,
    session: Arc<Session>,
    pipeline: Arc<RequestPipeline>,
    store: SessionStore,
    guard: NavigationGuard,
    users: UsersApi,
    courses: CoursesApi,
    notifications: NotificationsApi,
    grades: GradesApi,
    resources: ResourcesApi,
}

impl PlatformClient {
    /// Wire a client with the default transport, storage and shell.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let storage = JsonFileStorage::new(&config.storage.data_dir)
            .map_err(|e| ApiError::Storage(e.to_string()))?;

        Ok(Self::with_parts(
            config,
            Arc::new(storage),
            Arc::new(ReqwestTransport::new()),
            Arc::new(TracingNotifier),
            Arc::new(NullProgress),
            Arc::new(NullNavigator),
        ))
    }

    /// Wire a client from explicit parts (embedders with real shells, tests).
    pub fn with_parts(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
        transport: Arc<dyn HttpTransport>,
        notifier: Arc<dyn Notifier>,
        progress: Arc<dyn ProgressIndicator>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let session = Arc::new(Session::new(storage));
        let pipeline = Arc::new(RequestPipeline::new(
            transport,
            config.api.base_url.clone(),
            session.clone(),
            notifier.clone(),
            progress.clone(),
            navigator.clone(),
        ));
        let store = SessionStore::new(session.clone(), AuthApi::new(pipeline.clone()));
        let guard = NavigationGuard::new(
            platform_routes(),
            session.clone(),
            notifier,
            progress,
            navigator,
            config.ui.product_title.clone(),
        );

        Self {
            session,
            store,
            guard,
            users: UsersApi::new(pipeline.clone()),
            courses: CoursesApi::new(pipeline.clone()),
            notifications: NotificationsApi::new(pipeline.clone()),
            grades: GradesApi::new(pipeline.clone()),
            resources: ResourcesApi::new(pipeline.clone()),
            pipeline,
            config,
        }
    }

    /// Restore any persisted session, then validate it against the backend
    /// when one was found.
    pub async fn initialize(&self) {
        self.store.check_auth();
        if self.store.is_logged_in() {
            match self.store.get_current_user().await {
                Ok(user) => info!(user_id = user.id, "session restored"),
                Err(e) => warn!(error = %e, "restored session was rejected by the backend"),
            }
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    pub fn pipeline(&self) -> &Arc<RequestPipeline> {
        &self.pipeline
    }

    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    pub fn courses(&self) -> &CoursesApi {
        &self.courses
    }

    pub fn notifications(&self) -> &NotificationsApi {
        &self.notifications
    }

    pub fn grades(&self) -> &GradesApi {
        &self.grades
    }

    pub fn resources(&self) -> &ResourcesApi {
        &self.resources
    }
}
