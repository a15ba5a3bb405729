//! Request pipeline and its transport seam.

pub mod client;
pub mod pipeline;
pub mod request;

pub use client::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use pipeline::RequestPipeline;
pub use request::{ApiRequest, ApiResponse, FilePart, MultipartForm, RequestBody, ResponseKind};
