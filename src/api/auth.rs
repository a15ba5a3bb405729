use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::http::RequestPipeline;
use crate::session::{User, UserRole};

/// Login form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Registration form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

/// Password change form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// Body of a login response. Both halves are optional on the wire; the
/// session store decides whether they amount to a usable session.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// `/auth` endpoints.
#[derive(Clone)]
pub struct AuthApi {
    http: Arc<RequestPipeline>,
}

impl AuthApi {
    pub fn new(http: Arc<RequestPipeline>) -> Self {
        Self { http }
    }

    pub async fn login(&self, credentials: &Credentials) -> ApiResult<LoginResponse> {
        self.http.post("/auth/login", credentials).await?.data()
    }

    pub async fn register(&self, data: &RegisterRequest) -> ApiResult<Value> {
        self.http.post("/auth/register", data).await?.json()
    }

    pub async fn current_user(&self) -> ApiResult<User> {
        self.http.get("/auth/me").await?.data()
    }

    pub async fn update_current_user(&self, updates: &Value) -> ApiResult<Value> {
        self.http.put("/auth/me", updates).await?.json()
    }

    pub async fn change_password(&self, data: &PasswordChange) -> ApiResult<()> {
        self.http.post("/auth/change-password", data).await?;
        Ok(())
    }

    pub async fn logout(&self) -> ApiResult<()> {
        self.http.post_empty("/auth/logout").await?;
        Ok(())
    }

    /// Sign out one of the account's other devices.
    pub async fn logout_device(&self, device_id: &str) -> ApiResult<()> {
        self.http
            .post("/auth/logout-device", &json!({ "deviceId": device_id }))
            .await?;
        Ok(())
    }

    pub async fn login_devices(&self) -> ApiResult<Value> {
        self.http.get("/auth/login-devices").await?.json()
    }

    pub async fn health(&self) -> ApiResult<Value> {
        self.http.get("/auth/health").await?.json()
    }
}
