//! Geist server library logic.

pub mod api;
pub mod api_users;
pub mod config;

use axum::{routing::get, Extension, Router};
use geist_users::UserStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Path prefix every user route is registered under.
pub const USERS_PATH: &str = "/api/users";

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// User persistence.
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }
}

/// Builds the application router.
///
/// The collection routes answer both with and without a trailing slash.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            USERS_PATH,
            get(api_users::list_users_handler).post(api_users::create_user_handler),
        )
        .route(
            &format!("{USERS_PATH}/"),
            get(api_users::list_users_handler).post(api_users::create_user_handler),
        )
        .route(
            &format!("{USERS_PATH}/{{id}}"),
            get(api_users::get_user_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(Extension(Arc::new(state)))
}
