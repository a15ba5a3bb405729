use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use crate::error::ApiResult;
use crate::http::{ApiRequest, MultipartForm, RequestPipeline};

/// A course material to upload.
#[derive(Debug, Clone)]
pub struct ResourceUpload {
    pub file_name: String,
    pub mime: String,
    pub data: Bytes,
    pub course_id: i64,
    pub description: Option<String>,
    pub visible_to_all: Option<bool>,
}

/// `/resources` endpoints.
#[derive(Clone)]
pub struct ResourcesApi {
    http: Arc<RequestPipeline>,
}

impl ResourcesApi {
    pub fn new(http: Arc<RequestPipeline>) -> Self {
        Self { http }
    }

    /// Upload a course material as a multipart form.
    pub async fn upload(&self, upload: ResourceUpload) -> ApiResult<Value> {
        let mut form = MultipartForm::new()
            .file("file", upload.file_name, upload.mime, upload.data)
            .text("courseId", upload.course_id.to_string());
        if let Some(description) = upload.description {
            form = form.text("description", description);
        }
        if let Some(visible_to_all) = upload.visible_to_all {
            form = form.text("visibleToAll", visible_to_all.to_string());
        }

        self.http.upload("/resources/upload", form).await?.json()
    }

    pub async fn list(&self, course_id: i64) -> ApiResult<Value> {
        self.http
            .send(ApiRequest::get("/resources").query("courseId", course_id))
            .await?
            .json()
    }

    /// Download a material's raw bytes.
    pub async fn download(&self, id: i64) -> ApiResult<Bytes> {
        self.http
            .download(ApiRequest::get(format!("/resources/download/{id}")))
            .await
    }

    pub async fn record_access(&self, id: i64) -> ApiResult<()> {
        self.http
            .post_empty(format!("/resources/{id}/access"))
            .await?;
        Ok(())
    }
}
