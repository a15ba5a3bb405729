use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;

use crate::error::ApiResult;
use crate::http::{ApiRequest, RequestPipeline};

/// Filters for grade listings and statistics.
#[derive(Debug, Clone, Default)]
pub struct GradeQuery {
    pub course_id: Option<i64>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl GradeQuery {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(course_id) = self.course_id {
            request = request.query("courseId", course_id);
        }
        if let Some(page) = self.page {
            request = request.query("page", page);
        }
        if let Some(size) = self.size {
            request = request.query("size", size);
        }
        request
    }
}

/// `/grades` endpoints.
#[derive(Clone)]
pub struct GradesApi {
    http: Arc<RequestPipeline>,
}

impl GradesApi {
    pub fn new(http: Arc<RequestPipeline>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &GradeQuery) -> ApiResult<Value> {
        self.http
            .send(query.apply(ApiRequest::get("/grades")))
            .await?
            .json()
    }

    /// Export grades as a binary report.
    pub async fn export(&self, params: &Value) -> ApiResult<Bytes> {
        let request = ApiRequest::post("/grades/export").json(params)?;
        self.http.download(request).await
    }

    /// Score one submission.
    pub async fn grade_submission(&self, submission_id: i64, data: &Value) -> ApiResult<Value> {
        self.http
            .put(format!("/grades/{submission_id}/grade"), data)
            .await?
            .json()
    }

    pub async fn statistics(&self, query: &GradeQuery) -> ApiResult<Value> {
        self.http
            .send(query.apply(ApiRequest::get("/grades/statistics")))
            .await?
            .json()
    }
}
