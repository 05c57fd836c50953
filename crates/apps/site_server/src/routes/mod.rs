pub mod bookings;
pub mod rooms;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::CookieJar;
use serde_json::Value;

use crate::AppState;

/// Bearer token from the auth cookie; an empty value counts as absent.
pub(crate) fn bearer_token(state: &AppState, jar: &CookieJar) -> Option<String> {
    jar.get(&state.auth_cookie)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// Re-emits an upstream response with its status and JSON body.
pub(crate) async fn relay_json(resp: reqwest::Response) -> Result<Response, reqwest::Error> {
    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await?;
    Ok((status, Json(body)).into_response())
}
