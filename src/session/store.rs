use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::auth::{AuthApi, Credentials, PasswordChange, RegisterRequest};
use crate::error::{ApiError, ApiResult};
use crate::session::storage::{PersistedSession, SessionStorage};
use crate::session::user::{User, UserRole};

/// In-memory half of the session: the bearer token and the profile.
#[derive(Debug, Clone, Default)]
struct SessionState {
    token: String,
    user: Option<User>,
}

/// Single source of truth for "who is signed in and with what credential".
///
/// Constructed once and shared between the request pipeline, the navigation
/// guard and the session store; there is no global instance. The token and
/// the profile always change together, in memory and in storage, so a
/// half-authenticated state cannot be observed.
pub struct Session {
    state: RwLock<SessionState>,
    storage: Arc<dyn SessionStorage>,
}

impl Session {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            storage,
        }
    }

    fn state(&self) -> SessionState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// True iff both the token and the profile are present.
    pub fn is_logged_in(&self) -> bool {
        let state = self.state();
        !state.token.is_empty() && state.user.is_some()
    }

    /// Current bearer token; empty when signed out.
    pub fn token(&self) -> String {
        self.state().token
    }

    /// Current profile, if signed in.
    pub fn user(&self) -> Option<User> {
        self.state().user
    }

    pub fn user_id(&self) -> Option<i64> {
        self.state().user.map(|user| user.id)
    }

    pub fn role(&self) -> Option<UserRole> {
        self.state().user.map(|user| user.role)
    }

    pub fn display_name(&self) -> String {
        self.state()
            .user
            .map(|user| user.display_name().to_string())
            .unwrap_or_default()
    }

    pub fn avatar_url(&self) -> String {
        self.state()
            .user
            .and_then(|user| user.avatar_url)
            .unwrap_or_default()
    }

    /// Landing route for the current session: the role home when signed in,
    /// the login page otherwise.
    pub fn default_route(&self) -> &'static str {
        match self.role() {
            Some(role) => role.default_route(),
            None => "/login",
        }
    }

    /// Install a freshly authenticated session and persist the pair.
    pub fn set_authenticated(&self, token: String, user: User) -> ApiResult<()> {
        let persisted = PersistedSession {
            token: token.clone(),
            user_json: encode_user(&user)?,
        };
        self.storage.store(&persisted).map_err(storage_error)?;

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        state.token = token;
        state.user = Some(user);
        Ok(())
    }

    /// Replace the profile, keep the token, and re-persist the pair.
    pub fn replace_user(&self, user: User) -> ApiResult<()> {
        let persisted = PersistedSession {
            token: self.token(),
            user_json: encode_user(&user)?,
        };
        self.storage.store(&persisted).map_err(storage_error)?;

        self.state.write().unwrap_or_else(|e| e.into_inner()).user = Some(user);
        Ok(())
    }

    /// Merge partial profile fields into the current profile and re-persist.
    ///
    /// Fails without touching state when there is no profile or the patch
    /// does not produce a valid one.
    pub fn merge_user(&self, patch: &Value) -> ApiResult<User> {
        let current = self
            .user()
            .ok_or_else(|| ApiError::Unexpected("no signed-in profile to update".to_string()))?;

        let mut merged = serde_json::to_value(&current)
            .map_err(|e| ApiError::Unexpected(format!("failed to encode profile: {e}")))?;
        if let (Some(target), Some(fields)) = (merged.as_object_mut(), patch.as_object()) {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }

        let user: User = serde_json::from_value(merged).map_err(|e| {
            ApiError::Unexpected(format!("profile update produced an invalid profile: {e}"))
        })?;
        self.replace_user(user.clone())?;
        Ok(user)
    }

    /// Drop the session from memory and storage.
    ///
    /// Never fails: a storage error is logged and the in-memory state is
    /// cleared regardless.
    pub fn clear(&self) {
        {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            state.token.clear();
            state.user = None;
        }
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
    }

    /// Restore a previously persisted session, if any.
    ///
    /// A persisted profile that no longer parses counts as corruption: the
    /// whole pair is dropped and the session stays signed out.
    pub fn restore(&self) {
        let persisted = match self.storage.load() {
            Ok(Some(persisted)) => persisted,
            Ok(None) => {
                debug!("no persisted session to restore");
                return;
            }
            Err(e) => {
                warn!(error = %e, "failed to read persisted session");
                return;
            }
        };

        if persisted.token.is_empty() {
            debug!("persisted session has no token, ignoring");
            return;
        }

        match serde_json::from_str::<User>(&persisted.user_json) {
            Ok(user) => {
                let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
                state.token = persisted.token;
                state.user = Some(user);
                drop(state);
                info!(user_id = self.user_id(), "session restored from storage");
            }
            Err(e) => {
                warn!(error = %e, "persisted profile is corrupt, dropping session");
                self.clear();
            }
        }
    }
}

fn encode_user(user: &User) -> ApiResult<String> {
    serde_json::to_string(user)
        .map_err(|e| ApiError::Storage(format!("failed to encode profile: {e}")))
}

fn storage_error(e: anyhow::Error) -> ApiError {
    ApiError::Storage(e.to_string())
}

/// Session lifecycle operations backed by the `/auth` endpoints.
pub struct SessionStore {
    session: Arc<Session>,
    auth: AuthApi,
}

impl SessionStore {
    pub fn new(session: Arc<Session>, auth: AuthApi) -> Self {
        Self { session, auth }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    /// Sign in.
    ///
    /// On success the token/profile pair is installed and persisted. A
    /// response without a usable token fails without touching the previous
    /// session; transport and server errors pass through unchanged.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<User> {
        let response = self.auth.login(credentials).await?;

        let token = response.token.unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::Authentication {
                reason: "login response did not contain a token".to_string(),
            });
        }
        let user = response.user.ok_or_else(|| ApiError::Authentication {
            reason: "login response did not contain a user profile".to_string(),
        })?;

        self.session.set_authenticated(token, user.clone())?;
        info!(user_id = user.id, role = ?user.role, "signed in");
        Ok(user)
    }

    /// Create an account. The session itself is not touched.
    pub async fn register(&self, data: &RegisterRequest) -> ApiResult<Value> {
        self.auth.register(data).await
    }

    /// Refresh the profile from the backend.
    ///
    /// A failed "who am I" usually means the token is no longer valid, so
    /// any failure signs out fully before the error is handed back.
    pub async fn get_current_user(&self) -> ApiResult<User> {
        let result = self.refresh_profile().await;
        if let Err(e) = &result {
            warn!(error = %e, "profile refresh failed, signing out");
            self.logout().await;
        }
        result
    }

    async fn refresh_profile(&self) -> ApiResult<User> {
        let user = self.auth.current_user().await?;
        self.session.replace_user(user.clone())?;
        Ok(user)
    }

    /// Apply partial profile updates.
    ///
    /// On failure the in-memory profile is left untouched and the error
    /// propagates.
    pub async fn update_user_info(&self, updates: &Value) -> ApiResult<User> {
        let patch = self.auth.update_current_user(updates).await?;
        self.session.merge_user(&patch)
    }

    /// Change the account password. No local state is involved.
    pub async fn change_password(&self, data: &PasswordChange) -> ApiResult<()> {
        self.auth.change_password(data).await
    }

    /// Sign out.
    ///
    /// The backend is notified on a best-effort basis; local state and
    /// storage are always cleared. Safe to call repeatedly.
    pub async fn logout(&self) {
        if !self.session.token().is_empty() {
            if let Err(e) = self.auth.logout().await {
                debug!(error = %e, "backend logout notification failed");
            }
        }
        self.session.clear();
        info!("signed out");
    }

    /// Restore any persisted session at startup.
    pub fn check_auth(&self) {
        self.session.restore();
    }
}
