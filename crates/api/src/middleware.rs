//! Envelope middleware: buffers the inner response and rewraps it.
//!
//! The inner service writes to a buffered body only; nothing reaches the
//! real output until the final envelope is known. Responses produced by the
//! fault path are already envelopes (marked with [`EnvelopeComplete`]) and
//! pass through untouched; everything else — success payloads, bare error
//! statuses, bodies left behind by a caught panic — is rewrapped here with
//! the true status code preserved.

use axum::body::to_bytes;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::{ErrorCode, ErrorKind, ErrorRecord, ErrorType};
use serde_json::Value;

use crate::envelope::Envelope;
use crate::error::EnvelopeComplete;

/// Canonical message for responses that reach the boundary as bare statuses.
fn canonical_message(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "Bad Request - The server could not understand the request due to invalid syntax.",
        401 => "Unauthorized - The client must authenticate itself to get the requested response.",
        403 => "Forbidden - The client does not have access rights to the content.",
        404 => "Not Found - The server can not find the requested resource.",
        422 => "Unprocessable Entity - The request was well-formed but could not be processed.",
        500 => "Internal Server Error - The server has encountered a situation it doesn't know how to handle.",
        502 => "Bad Gateway - The server, while acting as a gateway or proxy, received an invalid response from the upstream server.",
        503 => "Service Unavailable - The server is not ready to handle the request.",
        504 => "Gateway Timeout - The server is acting as a gateway and cannot get a response in time.",
        _ => "An error occurred.",
    }
}

fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status.as_u16() {
        400 | 422 => ErrorKind::ValidationFailed,
        401 | 403 => ErrorKind::Unauthorized,
        404 => ErrorKind::NotFound,
        _ => ErrorKind::Internal,
    }
}

fn bare_status_envelope(status: StatusCode, instance: String) -> Envelope<Value> {
    Envelope::failure(ErrorRecord {
        message: canonical_message(status).to_string(),
        kind: kind_for_status(status),
        code: ErrorCode::Unknown,
        error_type: ErrorType::Unknown,
        status: status.as_u16(),
        instance,
    })
}

/// Wraps every response into the uniform envelope.
pub async fn wrap_envelope(request: Request, next: Next) -> Response {
    let instance = request.uri().path().to_string();
    let response = next.run(request).await;

    if response.extensions().get::<EnvelopeComplete>().is_some() {
        return response;
    }

    let status = response.status();
    let bytes = match to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!(error = %error, "failed to buffer response body");
            let envelope =
                bare_status_envelope(StatusCode::INTERNAL_SERVER_ERROR, instance);
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(envelope)).into_response();
        }
    };

    let envelope = if status.is_success() {
        let data = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        Envelope::success(status.as_u16(), instance, data)
    } else {
        bare_status_envelope(status, instance)
    };

    (status, Json(envelope)).into_response()
}
