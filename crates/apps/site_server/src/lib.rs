//! Pass-through API for the hotel site: rooms and bookings requests are
//! relayed to the backend with the visitor's bearer token attached.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub backend_url: Arc<str>,
    pub auth_cookie: Arc<str>,
}

impl AppState {
    pub fn new(http: reqwest::Client, backend_url: &str, auth_cookie: &str) -> Self {
        Self {
            http,
            backend_url: Arc::from(backend_url.trim_end_matches('/')),
            auth_cookie: Arc::from(auth_cookie),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(Self::new(http, &config.backend_url, &config.auth_cookie))
    }

    /// `{backend}/api/{path}`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.backend_url)
    }
}

pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(healthz))
        .route(
            "/api/rooms",
            get(routes::rooms::list_rooms).post(routes::rooms::create_room),
        )
        .route(
            "/api/bookings",
            get(routes::bookings::list_bookings).post(routes::bookings::create_booking),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::AppState;

    #[test]
    fn api_url_joins_without_double_slash() {
        let state = AppState::new(reqwest::Client::new(), "http://backend:8000/", "auth_token");
        assert_eq!(state.api_url("rooms"), "http://backend:8000/api/rooms");
    }
}
