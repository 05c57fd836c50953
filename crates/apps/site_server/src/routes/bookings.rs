use axum::extract::State;
use axum::http::header;
use axum::response::Response;
use axum_extra::extract::CookieJar;
use bytes::Bytes;
use serde_json::{Map, Value};
use tracing::error;

use super::{bearer_token, relay_json};
use crate::error::{Envelope, ProxyError};
use crate::AppState;

/// Fields the backend accepts on a new booking.
pub const BOOKING_FIELDS: [&str; 7] = [
    "room_id",
    "room_name",
    "check_in",
    "check_out",
    "guests",
    "price_per_night",
    "special_requests",
];

fn server_error() -> ProxyError {
    ProxyError::upstream(Envelope::Bookings, "Server error")
}

fn unauthorized(message: &'static str) -> ProxyError {
    ProxyError::Unauthorized {
        envelope: Envelope::Bookings,
        message,
    }
}

/// Keeps only [`BOOKING_FIELDS`]; absent keys stay absent. `None` for a
/// `null` document, which has no fields to read.
pub fn pick_booking_fields(incoming: &Value) -> Option<Map<String, Value>> {
    if incoming.is_null() {
        return None;
    }
    Some(
        BOOKING_FIELDS
            .iter()
            .filter_map(|key| incoming.get(*key).map(|v| (key.to_string(), v.clone())))
            .collect(),
    )
}

/// `GET /api/bookings`: the visitor's bookings.
pub async fn list_bookings(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Response, ProxyError> {
    let token = bearer_token(&state, &jar).ok_or_else(|| unauthorized("Unauthorized"))?;

    let resp = state
        .http
        .get(state.api_url("bookings"))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json")
        .bearer_auth(token)
        .send()
        .await
        .map_err(|err| {
            error!("bookings GET failed: {err}");
            server_error()
        })?;
    relay_json(resp).await.map_err(|err| {
        error!("bookings GET body unreadable: {err}");
        server_error()
    })
}

/// `POST /api/bookings`.
pub async fn create_booking(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let token = bearer_token(&state, &jar)
        .ok_or_else(|| unauthorized("Unauthorized. Please login first."))?;

    let incoming: Value = serde_json::from_slice(&body).map_err(|err| {
        error!("booking request is not JSON: {err}");
        server_error()
    })?;
    let booking = pick_booking_fields(&incoming).ok_or_else(|| {
        error!("booking request is null");
        server_error()
    })?;

    let resp = state
        .http
        .post(state.api_url("bookings"))
        .bearer_auth(token)
        .json(&booking)
        .send()
        .await
        .map_err(|err| {
            error!("bookings POST failed: {err}");
            server_error()
        })?;
    relay_json(resp).await.map_err(|err| {
        error!("bookings POST body unreadable: {err}");
        server_error()
    })
}
