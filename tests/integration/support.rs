//! Shared harness for the integration tests: a client core wired to the
//! real reqwest transport plus recording shell fakes.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use aicourse_client::api::auth::AuthApi;
use aicourse_client::http::{ReqwestTransport, RequestPipeline};
use aicourse_client::session::{MemoryStorage, Session, SessionStore, User, UserRole};
use aicourse_client::shell::{Navigator, Notifier, ProgressIndicator};

#[derive(Default)]
pub struct TestNotifier {
    messages: Mutex<Vec<(String, String)>>,
}

impl TestNotifier {
    pub fn errors(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| level == "error")
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Notifier for TestNotifier {
    fn warning(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("warning".to_string(), message.to_string()));
    }

    fn error(&self, message: &str) {
        self.messages
            .lock()
            .unwrap()
            .push(("error".to_string(), message.to_string()));
    }
}

#[derive(Default)]
pub struct TestProgress {
    started: AtomicUsize,
    finished: AtomicUsize,
}

impl TestProgress {
    pub fn counts(&self) -> (usize, usize) {
        (
            self.started.load(Ordering::SeqCst),
            self.finished.load(Ordering::SeqCst),
        )
    }
}

impl ProgressIndicator for TestProgress {
    fn start(&self) {
        self.started.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self) {
        self.finished.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct TestNavigator {
    pushes: Mutex<Vec<String>>,
}

impl TestNavigator {
    pub fn pushes(&self) -> Vec<String> {
        self.pushes.lock().unwrap().clone()
    }
}

impl Navigator for TestNavigator {
    fn push(&self, path: &str) {
        self.pushes.lock().unwrap().push(path.to_string());
    }

    fn set_title(&self, _title: &str) {}
}

pub struct TestClient {
    pub storage: Arc<MemoryStorage>,
    pub session: Arc<Session>,
    pub pipeline: Arc<RequestPipeline>,
    pub store: SessionStore,
    pub notifier: Arc<TestNotifier>,
    pub progress: Arc<TestProgress>,
    pub navigator: Arc<TestNavigator>,
}

/// Wire a client core against the given base URL (a mockito server).
pub fn client_for(base_url: &str) -> TestClient {
    let storage = Arc::new(MemoryStorage::new());
    let session = Arc::new(Session::new(storage.clone()));
    let notifier = Arc::new(TestNotifier::default());
    let progress = Arc::new(TestProgress::default());
    let navigator = Arc::new(TestNavigator::default());
    let pipeline = Arc::new(RequestPipeline::new(
        Arc::new(ReqwestTransport::new()),
        base_url,
        session.clone(),
        notifier.clone(),
        progress.clone(),
        navigator.clone(),
    ));
    let store = SessionStore::new(session.clone(), AuthApi::new(pipeline.clone()));

    TestClient {
        storage,
        session,
        pipeline,
        store,
        notifier,
        progress,
        navigator,
    }
}

pub fn sample_user(role: UserRole) -> User {
    User {
        id: 7,
        username: "azhang".to_string(),
        email: Some("azhang@example.edu".to_string()),
        full_name: Some("Alice Zhang".to_string()),
        avatar_url: None,
        phone: None,
        role,
        is_active: Some(true),
    }
}
