//! Thin endpoint wrappers over the request pipeline.
//!
//! Each module maps one backend resource to typed calls. No module handles
//! authentication or error presentation itself; the pipeline already did
//! by the time a result reaches the caller.

pub mod auth;
pub mod courses;
pub mod grades;
pub mod notifications;
pub mod resources;
pub mod users;

pub use auth::AuthApi;
pub use courses::CoursesApi;
pub use grades::GradesApi;
pub use notifications::NotificationsApi;
pub use resources::ResourcesApi;
pub use users::UsersApi;
