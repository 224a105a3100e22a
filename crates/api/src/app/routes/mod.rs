use axum::{Router, routing::get};

pub mod blogs;
pub mod login;
pub mod persons;
pub mod stats;
pub mod system;
pub mod users;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/persons", persons::router())
        .nest("/blogs", blogs::router())
        .nest("/users", users::router())
        .nest("/login", login::router())
        .route("/stats", get(stats::summary))
}
