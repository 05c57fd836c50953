use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::CookieJar;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, warn};

use super::{bearer_token, relay_json};
use crate::error::{Envelope, ProxyError};
use crate::AppState;

const FETCH_FAILED: &str = "Failed to fetch rooms";
const CREATE_FAILED: &str = "Failed to create room";

#[derive(Debug, Default, Deserialize)]
pub struct RoomsQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    pub per_page: Option<String>,
}

impl RoomsQuery {
    /// Upstream query with the listing defaults filled in. An empty value
    /// counts as missing.
    pub fn upstream_params(&self) -> [(&'static str, &str); 3] {
        [
            ("page", or_default(&self.page, "1")),
            ("search", or_default(&self.search, "")),
            ("per_page", or_default(&self.per_page, "10")),
        ]
    }
}

fn or_default<'a>(value: &'a Option<String>, default: &'static str) -> &'a str {
    value.as_deref().filter(|v| !v.is_empty()).unwrap_or(default)
}

/// `GET /api/rooms`. Public; the token is attached when present.
pub async fn list_rooms(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<RoomsQuery>,
) -> Result<Response, ProxyError> {
    let fetch_failed = || ProxyError::upstream(Envelope::Rooms, FETCH_FAILED);

    let mut req = state
        .http
        .get(state.api_url("rooms"))
        .query(&query.upstream_params())
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = bearer_token(&state, &jar) {
        req = req.bearer_auth(token);
    }

    let resp = req.send().await.map_err(|err| {
        error!("rooms GET failed: {err}");
        fetch_failed()
    })?;
    if !resp.status().is_success() {
        warn!(status = resp.status().as_u16(), "rooms GET rejected upstream");
        return Err(fetch_failed());
    }
    relay_json(resp).await.map_err(|err| {
        error!("rooms GET body unreadable: {err}");
        fetch_failed()
    })
}

/// `POST /api/rooms`. The multipart body is forwarded byte for byte with
/// its original boundary.
pub async fn create_room(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let Some(token) = bearer_token(&state, &jar) else {
        return Err(ProxyError::Unauthorized {
            envelope: Envelope::Rooms,
            message: "Unauthorized",
        });
    };

    let mut req = state.http.post(state.api_url("rooms")).bearer_auth(token);
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        req = req.header(header::CONTENT_TYPE, content_type.clone());
    }

    let resp = req.body(body).send().await.map_err(|err| {
        error!("rooms POST failed: {err}");
        ProxyError::upstream(Envelope::Rooms, err.to_string())
    })?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let message = resp
            .json::<Value>()
            .await
            .ok()
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(Value::as_str)
            .unwrap_or(CREATE_FAILED)
            .to_string();
        warn!(status, "rooms POST rejected upstream: {message}");
        return Err(ProxyError::upstream(Envelope::Rooms, message));
    }

    let created: Value = resp.json().await.map_err(|err| {
        error!("rooms POST body unreadable: {err}");
        ProxyError::upstream(Envelope::Rooms, CREATE_FAILED)
    })?;
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::RoomsQuery;
    use crate::routes::stub::{dead_backend, send, spawn_backend};

    #[test]
    fn query_defaults_fill_missing_params() {
        let query = RoomsQuery {
            search: Some("suite".to_string()),
            ..RoomsQuery::default()
        };
        assert_eq!(
            query.upstream_params(),
            [("page", "1"), ("search", "suite"), ("per_page", "10")]
        );
    }

    #[tokio::test]
    async fn list_relays_body_and_forwards_token() {
        let backend = spawn_backend().await;
        let request = Request::get("/api/rooms?page=2&search=deluxe")
            .header(header::COOKIE, "auth_token=good")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&backend, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["auth"], json!("Bearer good"));
        assert_eq!(
            body["query"],
            json!({ "page": "2", "search": "deluxe", "per_page": "10" })
        );
    }

    #[test]
    fn empty_query_values_take_defaults() {
        let query = RoomsQuery {
            page: Some(String::new()),
            search: Some(String::new()),
            per_page: Some(String::new()),
        };
        assert_eq!(
            query.upstream_params(),
            [("page", "1"), ("search", ""), ("per_page", "10")]
        );
    }

    #[tokio::test]
    async fn list_sends_defaults_for_blank_params() {
        let backend = spawn_backend().await;
        let request = Request::get("/api/rooms?page=&per_page=")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&backend, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["query"],
            json!({ "page": "1", "search": "", "per_page": "10" })
        );
    }

    #[tokio::test]
    async fn list_without_cookie_sends_no_authorization() {
        let backend = spawn_backend().await;
        let request = Request::get("/api/rooms").body(Body::empty()).unwrap();
        let (status, body) = send(&backend, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["auth"], json!(null));
        assert_eq!(body["query"]["page"], json!("1"));
    }

    #[tokio::test]
    async fn list_failures_collapse_to_fetch_error() {
        let backend = spawn_backend().await;
        for uri in ["/api/rooms?search=broken", "/api/rooms?search=garbled"] {
            let request = Request::get(uri).body(Body::empty()).unwrap();
            let (status, body) = send(&backend, request).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
            assert_eq!(body, json!({ "error": "Failed to fetch rooms" }), "{uri}");
        }

        let request = Request::get("/api/rooms").body(Body::empty()).unwrap();
        let (status, body) = send(&dead_backend(), request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to fetch rooms" }));
    }

    #[tokio::test]
    async fn create_requires_token() {
        let backend = spawn_backend().await;
        let request = Request::post("/api/rooms")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=x")
            .body(Body::from("--x--"))
            .unwrap();
        let (status, body) = send(&backend, request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }

    #[tokio::test]
    async fn create_forwards_multipart_unchanged() {
        let backend = spawn_backend().await;
        let form = "--XyZ\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nGarden Suite\r\n--XyZ--\r\n";
        let request = Request::post("/api/rooms")
            .header(header::COOKIE, "auth_token=good")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XyZ")
            .body(Body::from(form))
            .unwrap();
        let (status, body) = send(&backend, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({
                "id": 7,
                "auth": "Bearer good",
                "content_type": "multipart/form-data; boundary=XyZ",
                "received_bytes": form.len(),
            })
        );
    }

    #[tokio::test]
    async fn create_surfaces_upstream_message() {
        let backend = spawn_backend().await;
        let request = Request::post("/api/rooms")
            .header(header::COOKIE, "auth_token=good")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let (status, body) = send(&backend, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "The name field is required." }));
    }
}
