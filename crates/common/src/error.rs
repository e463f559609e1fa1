//! Error taxonomy shared by every service.
//!
//! Failures anywhere in the pipeline are carried as [`Fault`] values and
//! normalized into an [`ErrorRecord`] exactly once, at the response boundary.
//! The taxonomy is closed: anything that does not fit one of the first three
//! kinds is reported as [`ErrorKind::Internal`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A failure propagated by value through the dispatch pipeline.
///
/// Handlers and behaviors return these instead of panicking; panics are
/// reserved for genuinely unexpected conditions and are caught once at the
/// transport boundary.
#[derive(Debug, Clone, Error)]
pub enum Fault {
    /// A request failed validation before its handler ran.
    ///
    /// Only the first failing field is surfaced, even when several failed.
    #[error("{message}")]
    Validation {
        message: String,
        field: String,
        request: &'static str,
    },

    /// The referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The caller lacks the required permission.
    #[error("{0}")]
    Unauthorized(String),

    /// Any other unrecovered failure.
    #[error("{0}")]
    Internal(String),
}

impl Fault {
    /// Returns the taxonomy kind of this fault.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Fault::Validation { .. } => ErrorKind::ValidationFailed,
            Fault::NotFound(_) => ErrorKind::NotFound,
            Fault::Unauthorized(_) => ErrorKind::Unauthorized,
            Fault::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Builds a validation fault for a single failing field.
    pub fn validation(
        message: impl Into<String>,
        field: impl Into<String>,
        request: &'static str,
    ) -> Self {
        Fault::Validation {
            message: message.into(),
            field: field.into(),
            request,
        }
    }
}

impl From<serde_json::Error> for Fault {
    fn from(err: serde_json::Error) -> Self {
        Fault::Internal(format!("serialization error: {err}"))
    }
}

/// The closed set of error kinds, each with a canonical HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationFailed,
    NotFound,
    Unauthorized,
    Internal,
}

impl ErrorKind {
    /// Maps the kind to its canonical HTTP status code.
    ///
    /// Total over all kinds; there is no fallthrough to handle because the
    /// set is closed.
    pub fn status(&self) -> u16 {
        match self {
            ErrorKind::ValidationFailed => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Internal => 500,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::ValidationFailed => "ValidationFailed",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Internal => "Internal",
        };
        write!(f, "{name}")
    }
}

/// Machine-readable code derived from the failing field of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Unknown,
    ProductId,
    ProductName,
    ProductCategory,
    ProductImageFile,
    ProductPrice,
}

impl ErrorCode {
    /// Looks up the code for a field name, case-insensitively.
    ///
    /// Unrecognized field names map to `Unknown`, never to an error.
    pub fn for_field(field: &str) -> Self {
        match field.to_lowercase().as_str() {
            "id" => ErrorCode::ProductId,
            "name" => ErrorCode::ProductName,
            "category" => ErrorCode::ProductCategory,
            "imagefile" => ErrorCode::ProductImageFile,
            "price" => ErrorCode::ProductPrice,
            _ => ErrorCode::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorCode::Unknown => "Unknown",
            ErrorCode::ProductId => "ProductId",
            ErrorCode::ProductName => "ProductName",
            ErrorCode::ProductCategory => "ProductCategory",
            ErrorCode::ProductImageFile => "ProductImageFile",
            ErrorCode::ProductPrice => "ProductPrice",
        };
        write!(f, "{name}")
    }
}

/// Machine-readable code derived from the request kind that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorType {
    Unknown,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    CreateOrder,
    UpdateOrder,
    DeleteOrder,
}

impl ErrorType {
    /// Looks up the type for a request kind name, case-insensitively.
    ///
    /// Unrecognized names map to `Unknown`, never to an error.
    pub fn for_request(request: &str) -> Self {
        match request.to_lowercase().as_str() {
            "createproduct" => ErrorType::CreateProduct,
            "updateproduct" => ErrorType::UpdateProduct,
            "deleteproduct" => ErrorType::DeleteProduct,
            "createorder" => ErrorType::CreateOrder,
            "updateorder" => ErrorType::UpdateOrder,
            "deleteorder" => ErrorType::DeleteOrder,
            _ => ErrorType::Unknown,
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorType::Unknown => "Unknown",
            ErrorType::CreateProduct => "CreateProduct",
            ErrorType::UpdateProduct => "UpdateProduct",
            ErrorType::DeleteProduct => "DeleteProduct",
            ErrorType::CreateOrder => "CreateOrder",
            ErrorType::UpdateOrder => "UpdateOrder",
            ErrorType::DeleteOrder => "DeleteOrder",
        };
        write!(f, "{name}")
    }
}

/// Canonical, immutable representation of a failure.
///
/// Built once per failure at the response boundary and written into exactly
/// one envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Human-readable message, taken from the fault itself.
    pub message: String,

    /// The taxonomy kind.
    pub kind: ErrorKind,

    /// Structured code derived from the failing field, if any.
    pub code: ErrorCode,

    /// Structured type derived from the originating request kind, if any.
    pub error_type: ErrorType,

    /// HTTP status derived from the kind.
    pub status: u16,

    /// The request path that produced the failure.
    pub instance: String,
}

impl ErrorRecord {
    /// Normalizes a fault into a record for the given request path.
    ///
    /// Pure: the same fault and instance always produce the same record.
    pub fn from_fault(fault: &Fault, instance: impl Into<String>) -> Self {
        let kind = fault.kind();
        let (code, error_type) = match fault {
            Fault::Validation { field, request, .. } => {
                (ErrorCode::for_field(field), ErrorType::for_request(request))
            }
            _ => (ErrorCode::Unknown, ErrorType::Unknown),
        };

        Self {
            message: fault.to_string(),
            kind,
            code,
            error_type,
            status: kind.status(),
            instance: instance.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_status_mapping_is_total() {
        assert_eq!(ErrorKind::ValidationFailed.status(), 400);
        assert_eq!(ErrorKind::NotFound.status(), 404);
        assert_eq!(ErrorKind::Unauthorized.status(), 401);
        assert_eq!(ErrorKind::Internal.status(), 500);
    }

    #[test]
    fn field_lookup_is_case_insensitive() {
        assert_eq!(ErrorCode::for_field("Name"), ErrorCode::ProductName);
        assert_eq!(ErrorCode::for_field("name"), ErrorCode::ProductName);
        assert_eq!(ErrorCode::for_field("NAME"), ErrorCode::ProductName);
        assert_eq!(ErrorCode::for_field("ImageFile"), ErrorCode::ProductImageFile);
    }

    #[test]
    fn unknown_field_maps_to_unknown() {
        assert_eq!(ErrorCode::for_field("bogus"), ErrorCode::Unknown);
        assert_eq!(ErrorCode::for_field(""), ErrorCode::Unknown);
    }

    #[test]
    fn request_lookup_is_case_insensitive() {
        assert_eq!(ErrorType::for_request("CreateProduct"), ErrorType::CreateProduct);
        assert_eq!(ErrorType::for_request("createproduct"), ErrorType::CreateProduct);
        assert_eq!(ErrorType::for_request("DeleteOrder"), ErrorType::DeleteOrder);
        assert_eq!(ErrorType::for_request("NoSuchRequest"), ErrorType::Unknown);
    }

    #[test]
    fn validation_fault_derives_code_and_type() {
        let fault = Fault::validation("Name is required", "Name", "CreateProduct");
        let record = ErrorRecord::from_fault(&fault, "/products");

        assert_eq!(record.kind, ErrorKind::ValidationFailed);
        assert_eq!(record.status, 400);
        assert_eq!(record.code, ErrorCode::ProductName);
        assert_eq!(record.error_type, ErrorType::CreateProduct);
        assert_eq!(record.instance, "/products");
        assert_eq!(record.message, "Name is required");
    }

    #[test]
    fn non_validation_faults_carry_unknown_codes() {
        let fault = Fault::NotFound("Product not found".to_string());
        let record = ErrorRecord::from_fault(&fault, "/products/x");

        assert_eq!(record.kind, ErrorKind::NotFound);
        assert_eq!(record.status, 404);
        assert_eq!(record.code, ErrorCode::Unknown);
        assert_eq!(record.error_type, ErrorType::Unknown);
    }

    #[test]
    fn internal_is_the_default_kind() {
        let fault = Fault::Internal("boom".to_string());
        assert_eq!(fault.kind(), ErrorKind::Internal);
        assert_eq!(ErrorRecord::from_fault(&fault, "/").status, 500);
    }
}
