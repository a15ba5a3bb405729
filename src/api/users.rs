use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::ApiResult;
use crate::http::{ApiRequest, RequestPipeline};
use crate::session::{User, UserRole};

/// Filters for the user list.
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub role: Option<UserRole>,
    pub keyword: Option<String>,
}

impl UserQuery {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(page) = self.page {
            request = request.query("page", page);
        }
        if let Some(size) = self.size {
            request = request.query("size", size);
        }
        if let Some(role) = self.role {
            request = request.query("role", role.as_str());
        }
        if let Some(keyword) = &self.keyword {
            request = request.query("keyword", keyword);
        }
        request
    }
}

/// `/users` endpoints (administration).
#[derive(Clone)]
pub struct UsersApi {
    http: Arc<RequestPipeline>,
}

impl UsersApi {
    pub fn new(http: Arc<RequestPipeline>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &UserQuery) -> ApiResult<Value> {
        self.http
            .send(query.apply(ApiRequest::get("/users")))
            .await?
            .json()
    }

    pub async fn get(&self, id: i64) -> ApiResult<User> {
        self.http.get(format!("/users/{id}")).await?.data()
    }

    pub async fn create(&self, data: &Value) -> ApiResult<User> {
        self.http.post("/users", data).await?.data()
    }

    pub async fn update(&self, id: i64, data: &Value) -> ApiResult<User> {
        self.http.put(format!("/users/{id}"), data).await?.data()
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.http.delete(format!("/users/{id}")).await?;
        Ok(())
    }

    pub async fn batch_delete(&self, user_ids: &[i64]) -> ApiResult<()> {
        self.http
            .delete_with_body("/users/batch", &json!({ "userIds": user_ids }))
            .await?;
        Ok(())
    }

    pub async fn reset_password(&self, id: i64, new_password: &str) -> ApiResult<()> {
        self.http
            .post(
                format!("/users/{id}/reset-password"),
                &json!({ "newPassword": new_password }),
            )
            .await?;
        Ok(())
    }

    pub async fn activate(&self, id: i64) -> ApiResult<()> {
        self.http.post_empty(format!("/users/{id}/activate")).await?;
        Ok(())
    }

    pub async fn deactivate(&self, id: i64) -> ApiResult<()> {
        self.http
            .post_empty(format!("/users/{id}/deactivate"))
            .await?;
        Ok(())
    }

    pub async fn batch_activate(&self, user_ids: &[i64]) -> ApiResult<()> {
        self.http
            .post("/users/batch/activate", &json!({ "userIds": user_ids }))
            .await?;
        Ok(())
    }

    pub async fn batch_deactivate(&self, user_ids: &[i64]) -> ApiResult<()> {
        self.http
            .post("/users/batch/deactivate", &json!({ "userIds": user_ids }))
            .await?;
        Ok(())
    }

    pub async fn statistics(&self) -> ApiResult<Value> {
        self.http.get("/users/statistics").await?.json()
    }
}
