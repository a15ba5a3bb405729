use std::sync::Arc;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::http::client::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use crate::http::request::{ApiRequest, ApiResponse, MultipartForm, ResponseKind};
use crate::session::Session;
use crate::shell::{Navigator, Notifier, ProgressIndicator};

/// Application-level codes accepted as success inside a 2xx body. The
/// backend emits both; both are honored.
const SUCCESS_CODES: [i64; 2] = [0, 200];

/// Pairs the busy indicator with the lifetime of one request.
struct ProgressGuard {
    progress: Arc<dyn ProgressIndicator>,
}

impl ProgressGuard {
    fn start(progress: Arc<dyn ProgressIndicator>) -> Self {
        progress.start();
        Self { progress }
    }
}

impl Drop for ProgressGuard {
    fn drop(&mut self) {
        self.progress.finish();
    }
}

/// Uniform request dispatch: credential attachment on the way out, outcome
/// classification on the way back.
///
/// This is the only place a 401 triggers the global sign-out and login
/// redirect; callers never handle that themselves. Every rejection carries
/// exactly one user notification, and the busy indicator is started and
/// stopped exactly once per request whatever the outcome.
pub struct RequestPipeline {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<dyn ProgressIndicator>,
    navigator: Arc<dyn Navigator>,
}

impl RequestPipeline {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
        progress: Arc<dyn ProgressIndicator>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            notifier,
            progress,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request through the full pipeline.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let _progress = ProgressGuard::start(self.progress.clone());
        let request_id = Uuid::new_v4();

        let mut headers = Vec::new();
        let token = self.session.token();
        if !token.is_empty() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }

        let url = format!("{}{}", self.base_url, request.path);
        debug!(%request_id, method = %request.method, path = %request.path, "dispatching request");

        let outcome = self
            .transport
            .send(HttpRequest {
                method: request.method.clone(),
                url,
                headers,
                query: request.query.clone(),
                body: request.body.clone(),
            })
            .await;

        match outcome {
            Ok(response) if response.is_success() => self.accept(&request, response, request_id),
            Ok(response) => Err(self.reject_status(&request, &response, request_id)),
            Err(error) => Err(self.reject_transport(error, request_id)),
        }
    }

    /// HTTP-level success: binary payloads pass through untouched; JSON
    /// payloads are checked for an application-level failure envelope.
    fn accept(
        &self,
        request: &ApiRequest,
        response: HttpResponse,
        request_id: Uuid,
    ) -> ApiResult<ApiResponse> {
        let status = response.status();
        let body = response.into_body();

        if request.kind == ResponseKind::Json {
            if let Ok(envelope) = serde_json::from_slice::<Value>(&body) {
                if let Some(code) = envelope.get("code").and_then(Value::as_i64) {
                    if !SUCCESS_CODES.contains(&code) {
                        let message = envelope
                            .get("message")
                            .and_then(Value::as_str)
                            .unwrap_or("Request failed")
                            .to_string();
                        warn!(%request_id, code, message = %message, "request rejected by the backend");
                        self.notifier.error(&message);
                        return Err(ApiError::Business { code, message });
                    }
                }
            }
        }

        debug!(%request_id, status, "request completed");
        Ok(ApiResponse::new(status, body))
    }

    /// Classify a non-2xx response, emit the single user notification plus
    /// any forced side effect, and hand back the error.
    fn reject_status(
        &self,
        request: &ApiRequest,
        response: &HttpResponse,
        request_id: Uuid,
    ) -> ApiError {
        let status = response.status();
        let server_message = serde_json::from_slice::<Value>(response.body())
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });
        warn!(%request_id, status, path = %request.path, "request failed");

        match status {
            401 => {
                self.notifier.error("Session expired, please log in again");
                // Local invalidation only; a backend call here would re-enter
                // the pipeline.
                self.session.clear();
                self.navigator.push("/login");
                ApiError::Authentication {
                    reason: server_message.unwrap_or_else(|| "session expired".to_string()),
                }
            }
            403 => {
                self.notifier.error("Permission denied");
                self.navigator.push("/403");
                ApiError::Authorization {
                    reason: server_message.unwrap_or_else(|| "permission denied".to_string()),
                }
            }
            404 => {
                self.notifier.error("Requested resource does not exist");
                ApiError::NotFound {
                    path: request.path.clone(),
                }
            }
            500 => {
                self.notifier.error("Internal server error");
                ApiError::Server {
                    status,
                    message: server_message.unwrap_or_else(|| "internal server error".to_string()),
                }
            }
            _ => {
                let message = server_message.unwrap_or_else(|| format!("Request failed ({status})"));
                self.notifier.error(&message);
                ApiError::Server { status, message }
            }
        }
    }

    /// Classify a failure that produced no HTTP response at all.
    fn reject_transport(&self, error: TransportError, request_id: Uuid) -> ApiError {
        warn!(%request_id, error = %error, "request failed without a response");

        match error {
            TransportError::Timeout => {
                self.notifier
                    .error("Request timed out, please check your connection");
                ApiError::Timeout
            }
            TransportError::Connection(_) => {
                self.notifier
                    .error("Network connection failed, please check your settings");
                ApiError::Network
            }
            TransportError::Other(message) => {
                let message = if message.is_empty() {
                    "Unknown error".to_string()
                } else {
                    message
                };
                self.notifier.error(&message);
                ApiError::Unexpected(message)
            }
        }
    }

    // Convenience dispatchers for the common request shapes.

    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        self.execute(request).await
    }

    pub async fn get(&self, path: impl Into<String>) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::get(path)).await
    }

    pub async fn post(
        &self,
        path: impl Into<String>,
        body: &impl Serialize,
    ) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::post(path).json(body)?).await
    }

    pub async fn post_empty(&self, path: impl Into<String>) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::post(path)).await
    }

    pub async fn put(
        &self,
        path: impl Into<String>,
        body: &impl Serialize,
    ) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::put(path).json(body)?).await
    }

    pub async fn put_empty(&self, path: impl Into<String>) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::put(path)).await
    }

    pub async fn patch(
        &self,
        path: impl Into<String>,
        body: &impl Serialize,
    ) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::patch(path).json(body)?).await
    }

    pub async fn delete(&self, path: impl Into<String>) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::delete(path)).await
    }

    pub async fn delete_with_body(
        &self,
        path: impl Into<String>,
        body: &impl Serialize,
    ) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::delete(path).json(body)?).await
    }

    /// Multipart upload.
    pub async fn upload(
        &self,
        path: impl Into<String>,
        form: MultipartForm,
    ) -> ApiResult<ApiResponse> {
        self.execute(ApiRequest::post(path).multipart(form)).await
    }

    /// Fetch a binary payload, skipping the JSON envelope check.
    pub async fn download(&self, request: ApiRequest) -> ApiResult<Bytes> {
        Ok(self.execute(request.binary()).await?.into_bytes())
    }
}
