use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Shape of the JSON error body; each route family keeps the contract the
/// site's pages already parse.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// `{"error": "..."}`
    Rooms,
    /// `{"success": false, "message": "..."}`
    Bookings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// No bearer token cookie on the request.
    Unauthorized { envelope: Envelope, message: &'static str },
    /// Network failure, non-OK upstream, or an unreadable body.
    Upstream { envelope: Envelope, message: String },
}

impl ProxyError {
    pub fn upstream(envelope: Envelope, message: impl Into<String>) -> Self {
        ProxyError::Upstream {
            envelope,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ProxyError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> serde_json::Value {
        let (envelope, message) = match self {
            ProxyError::Unauthorized { envelope, message } => (*envelope, *message),
            ProxyError::Upstream { envelope, message } => (*envelope, message.as_str()),
        };
        match envelope {
            Envelope::Rooms => json!({ "error": message }),
            Envelope::Bookings => json!({ "success": false, "message": message }),
        }
    }
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProxyError::Unauthorized { message, .. } => write!(f, "unauthorized: {message}"),
            ProxyError::Upstream { message, .. } => write!(f, "upstream failure: {message}"),
        }
    }
}

impl std::error::Error for ProxyError {}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::{Envelope, ProxyError};
    use axum::http::StatusCode;
    use serde_json::json;

    #[test]
    fn rooms_envelope_uses_error_key() {
        let err = ProxyError::upstream(Envelope::Rooms, "Failed to fetch rooms");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), json!({ "error": "Failed to fetch rooms" }));
    }

    #[test]
    fn bookings_envelope_reports_failure_flag() {
        let err = ProxyError::Unauthorized {
            envelope: Envelope::Bookings,
            message: "Unauthorized",
        };
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.body(),
            json!({ "success": false, "message": "Unauthorized" })
        );
    }
}
