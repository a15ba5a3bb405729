//! # aicourse-client
//!
//! Client core for the AI course platform. Three cooperating pieces:
//! a durable session store, an HTTP request pipeline that attaches
//! credentials and classifies every outcome, and a navigation guard that
//! enforces per-route authentication and role policies. The API modules
//! are thin wrappers over the pipeline; rendering is left to the embedding
//! shell via the seams in [`shell`].

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod router;
pub mod service;
pub mod session;
pub mod shell;

#[cfg(test)]
mod tests;

// Re-export core components
pub use crate::config::{load_config, ClientConfig};
pub use crate::error::{ApiError, ApiResult};
pub use crate::router::{Navigation, NavigationGuard};
pub use crate::service::PlatformClient;
pub use crate::session::{Session, SessionStore, User, UserRole};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
