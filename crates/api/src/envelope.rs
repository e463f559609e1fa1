//! The uniform response envelope written to the wire.

use common::{ErrorCode, ErrorRecord, ErrorType};
use serde::{Deserialize, Serialize};

/// Wire structure wrapping every response.
///
/// Exactly one of `data`/`error_detail` is populated. The field names are
/// part of the external contract and must not change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub is_success: bool,
    pub status_code: u16,
    /// The request path that produced this response.
    pub instance: String,
    pub data: Option<T>,
    pub error_detail: Option<ErrorDetail>,
}

/// Error block carried by failure envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    pub error_message: String,
    pub error_code: ErrorCode,
    pub error_type: ErrorType,
}

impl<T> Envelope<T> {
    /// Builds a success envelope carrying the payload.
    pub fn success(status_code: u16, instance: impl Into<String>, data: T) -> Self {
        Self {
            is_success: true,
            status_code,
            instance: instance.into(),
            data: Some(data),
            error_detail: None,
        }
    }

    /// Builds a failure envelope from a normalized error record.
    pub fn failure(record: ErrorRecord) -> Self {
        Self {
            is_success: false,
            status_code: record.status,
            instance: record.instance,
            data: None,
            error_detail: Some(ErrorDetail {
                error_message: record.message,
                error_code: record.code,
                error_type: record.error_type,
            }),
        }
    }
}
