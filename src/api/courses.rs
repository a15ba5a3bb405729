use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiResult;
use crate::http::{ApiRequest, RequestPipeline};

/// Filters for paginated course listings.
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub keyword: Option<String>,
}

impl CourseQuery {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(page) = self.page {
            request = request.query("page", page);
        }
        if let Some(size) = self.size {
            request = request.query("size", size);
        }
        if let Some(keyword) = &self.keyword {
            request = request.query("keyword", keyword);
        }
        request
    }
}

/// `/courses` endpoints.
#[derive(Clone)]
pub struct CoursesApi {
    http: Arc<RequestPipeline>,
}

impl CoursesApi {
    pub fn new(http: Arc<RequestPipeline>) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &CourseQuery) -> ApiResult<Value> {
        self.http
            .send(query.apply(ApiRequest::get("/courses")))
            .await?
            .json()
    }

    pub async fn get(&self, course_id: i64) -> ApiResult<Value> {
        self.http.get(format!("/courses/{course_id}")).await?.json()
    }

    pub async fn create(&self, data: &Value) -> ApiResult<Value> {
        self.http.post("/courses", data).await?.json()
    }

    pub async fn update(&self, course_id: i64, data: &Value) -> ApiResult<Value> {
        self.http
            .put(format!("/courses/{course_id}"), data)
            .await?
            .json()
    }

    pub async fn delete(&self, course_id: i64) -> ApiResult<()> {
        self.http.delete(format!("/courses/{course_id}")).await?;
        Ok(())
    }

    /// Enroll the signed-in student into the course.
    pub async fn enroll(&self, course_id: i64) -> ApiResult<()> {
        self.http
            .post_empty(format!("/courses/{course_id}/enroll"))
            .await?;
        Ok(())
    }

    pub async fn students(&self, course_id: i64, query: &CourseQuery) -> ApiResult<Value> {
        self.http
            .send(query.apply(ApiRequest::get(format!("/courses/{course_id}/students"))))
            .await?
            .json()
    }

    pub async fn progress(&self, course_id: i64) -> ApiResult<Value> {
        self.http
            .get(format!("/courses/{course_id}/progress"))
            .await?
            .json()
    }

    pub async fn statistics(&self) -> ApiResult<Value> {
        self.http.get("/courses/statistics").await?.json()
    }

    pub async fn analytics(&self, course_id: i64) -> ApiResult<Value> {
        self.http
            .get(format!("/courses/{course_id}/analytics"))
            .await?
            .json()
    }

    pub async fn resources(&self, course_id: i64) -> ApiResult<Value> {
        self.http
            .get(format!("/courses/{course_id}/resources"))
            .await?
            .json()
    }
}
