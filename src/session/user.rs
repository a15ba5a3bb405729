use serde::{Deserialize, Serialize};

/// Role attached to every platform account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    /// Wire representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => "STUDENT",
            UserRole::Teacher => "TEACHER",
            UserRole::Admin => "ADMIN",
        }
    }

    /// Landing route for the role after sign-in.
    pub fn default_route(self) -> &'static str {
        match self {
            UserRole::Admin => "/admin/dashboard",
            UserRole::Teacher => "/teacher/dashboard",
            UserRole::Student => "/student/dashboard",
        }
    }
}

/// Profile of a platform account as served by `/auth/me`.
///
/// Carries the client-relevant subset of the backend user record; unknown
/// fields on the wire are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl User {
    /// Preferred display name: the full name when set, else the login name.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}
