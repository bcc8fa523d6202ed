//! API Response types
//!
//! Standardized API response structure for the entire backend

use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Standard API response code for success
pub const API_CODE_SUCCESS: u16 = 0;

/// Unified API response structure
///
/// All API responses follow this format:
/// ```json
/// {
///     "code": 0,
///     "message": "Success",
///     "data": { ... },
///     "warnings": ["..."]
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Response code (0 = success, others = error codes)
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Soft warnings attached to an otherwise successful response
    /// (e.g. a split whose parts do not sum to the original payment)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            code: API_CODE_SUCCESS,
            message: "Success".to_string(),
            data: Some(data),
            warnings: Vec::new(),
        }
    }

    /// Create a successful response carrying soft warnings
    pub fn ok_with_warnings(data: T, warnings: Vec<String>) -> Self {
        Self {
            code: API_CODE_SUCCESS,
            message: "Success".to_string(),
            data: Some(data),
            warnings,
        }
    }

    /// Create an error response from an [`AppError`]
    pub fn from_error(err: &AppError) -> Self {
        Self {
            code: err.code.value(),
            message: err.message.clone(),
            data: None,
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_shape() {
        let resp = ApiResponse::ok(42u32);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], 42);
        assert!(json.get("warnings").is_none());
    }

    #[test]
    fn test_warnings_serialized_when_present() {
        let resp = ApiResponse::ok_with_warnings((), vec!["parts do not sum".into()]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["warnings"][0], "parts do not sum");
    }
}
