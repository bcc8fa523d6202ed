//! HTTP status code mapping and axum response conversion

use super::codes::ErrorCode;
use super::types::AppError;
use crate::response::ApiResponse;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::OrderNotFound
            | Self::PlayerNotFound
            | Self::PaymentNotFound
            | Self::TemplateNotFound
            | Self::CalendarEntryNotFound
            | Self::TenantNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::PaymentAlreadyConfirmed
            | Self::CalendarEntryExists => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::TenantNotSelected
            | Self::StoreAccessDenied => StatusCode::FORBIDDEN,

            // 422 Unprocessable Entity (state-machine violations)
            Self::OrderNotMultiPayment
            | Self::PaymentNotPending
            | Self::PaymentStatusMixed => StatusCode::UNPROCESSABLE_ENTITY,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/business errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, error = %self.message, "request failed");
        }
        let body = Json(ApiResponse::<()>::from_error(&self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_buckets() {
        assert_eq!(ErrorCode::PaymentNotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::CalendarEntryExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::PaymentNotPending.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ErrorCode::DatabaseError.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCode::RoleSelectionExceedsSeats.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
