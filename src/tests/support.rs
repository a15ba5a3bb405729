//! Shared fixtures for the unit tests.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::api::auth::AuthApi;
use crate::http::client::mock::MockTransport;
use crate::http::RequestPipeline;
use crate::session::{MemoryStorage, Session, SessionStore, User, UserRole};
use crate::shell::recording::{RecordingNavigator, RecordingNotifier, RecordingProgress};

pub const BASE_URL: &str = "http://backend.test/api/v1";
pub const PRODUCT_TITLE: &str = "AI Course Platform";

/// A fully wired client core over a mock transport and recording shell.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub storage: Arc<MemoryStorage>,
    pub session: Arc<Session>,
    pub pipeline: Arc<RequestPipeline>,
    pub store: SessionStore,
    pub notifier: Arc<RecordingNotifier>,
    pub progress: Arc<RecordingProgress>,
    pub navigator: Arc<RecordingNavigator>,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(MockTransport::new());
        let storage = Arc::new(MemoryStorage::new());
        let session = Arc::new(Session::new(storage.clone()));
        let notifier = Arc::new(RecordingNotifier::default());
        let progress = Arc::new(RecordingProgress::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let pipeline = Arc::new(RequestPipeline::new(
            transport.clone(),
            BASE_URL,
            session.clone(),
            notifier.clone(),
            progress.clone(),
            navigator.clone(),
        ));
        let store = SessionStore::new(session.clone(), AuthApi::new(pipeline.clone()));

        Self {
            transport,
            storage,
            session,
            pipeline,
            store,
            notifier,
            progress,
            navigator,
        }
    }

    /// Install an authenticated session directly, bypassing the network.
    pub fn sign_in(&self, token: &str, role: UserRole) -> User {
        let user = sample_user(role);
        self.session
            .set_authenticated(token.to_string(), user.clone())
            .expect("failed to install test session");
        user
    }
}

pub fn sample_user(role: UserRole) -> User {
    User {
        id: 7,
        username: "azhang".to_string(),
        email: Some("azhang@example.edu".to_string()),
        full_name: Some("Alice Zhang".to_string()),
        avatar_url: Some("/avatars/7.png".to_string()),
        phone: None,
        role,
        is_active: Some(true),
    }
}

pub fn login_body(token: &str, user: &User) -> Value {
    json!({ "token": token, "user": user })
}

pub fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}
