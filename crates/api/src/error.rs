//! Fault-to-envelope conversion at the response boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::{ErrorRecord, Fault};
use serde_json::Value;

use crate::envelope::Envelope;

/// Response extension marking a body that is already a complete envelope.
///
/// The envelope middleware passes such responses through untouched.
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeComplete;

/// A fault paired with the request path that produced it.
///
/// This is the single point where faults become wire responses; handlers
/// never serialize errors themselves.
#[derive(Debug)]
pub struct ApiError {
    fault: Fault,
    instance: String,
}

impl ApiError {
    pub fn new(fault: Fault, instance: impl Into<String>) -> Self {
        Self {
            fault,
            instance: instance.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Fault::Internal(message) = &self.fault {
            tracing::error!(error = %message, "internal server error");
        }

        let record = ErrorRecord::from_fault(&self.fault, self.instance);
        let status =
            StatusCode::from_u16(record.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = Envelope::<Value>::failure(record);

        let mut response = (status, Json(envelope)).into_response();
        response.extensions_mut().insert(EnvelopeComplete);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fault_responses_carry_the_mapped_status_and_marker() {
        let error = ApiError::new(Fault::NotFound("Order x not found".to_string()), "/orders/x");
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<EnvelopeComplete>().is_some());

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let wire: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(wire["isSuccess"], Value::Bool(false));
        assert_eq!(wire["statusCode"], Value::from(404));
        assert_eq!(wire["instance"], Value::from("/orders/x"));
    }
}
