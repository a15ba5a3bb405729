use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiResult;
use crate::http::{ApiRequest, RequestPipeline};

/// Filters for the notification list.
#[derive(Debug, Clone, Default)]
pub struct NotificationQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub unread_only: bool,
}

impl NotificationQuery {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(page) = self.page {
            request = request.query("page", page);
        }
        if let Some(size) = self.size {
            request = request.query("size", size);
        }
        if self.unread_only {
            request = request.query("unreadOnly", true);
        }
        request
    }
}

/// `/notifications` endpoints.
#[derive(Clone)]
pub struct NotificationsApi {
    http: Arc<RequestPipeline>,
}

impl NotificationsApi {
    pub fn new(http: Arc<RequestPipeline>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &NotificationQuery) -> ApiResult<Value> {
        self.http
            .send(query.apply(ApiRequest::get("/notifications")))
            .await?
            .json()
    }

    pub async fn summary(&self) -> ApiResult<Value> {
        self.http.get("/notifications/summary").await?.json()
    }

    /// Broadcast a notification (admin only).
    pub async fn send(&self, data: &Value) -> ApiResult<Value> {
        self.http.post("/notifications/send", data).await?.json()
    }

    pub async fn create(&self, data: &Value) -> ApiResult<Value> {
        self.http.post("/notifications", data).await?.json()
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        self.http.delete(format!("/notifications/{id}")).await?;
        Ok(())
    }

    pub async fn mark_read(&self, id: i64) -> ApiResult<()> {
        self.http
            .put_empty(format!("/notifications/{id}/read"))
            .await?;
        Ok(())
    }

    pub async fn mark_all_read(&self) -> ApiResult<()> {
        self.http.put_empty("/notifications/mark-all-read").await?;
        Ok(())
    }

    pub async fn categories(&self) -> ApiResult<Value> {
        self.http.get("/notifications/categories").await?.json()
    }

    pub async fn statistics(&self) -> ApiResult<Value> {
        self.http.get("/notifications/statistics").await?.json()
    }
}
