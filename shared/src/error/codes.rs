//! Unified error codes for the venue booking backend
//!
//! Error codes are shared between the server and its clients and are
//! organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Tenant errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Pricing/catalog errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Value out of range
    ValueOutOfRange = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 3xxx: Tenant ====================
    /// Tenant (company) not resolved for the caller
    TenantNotSelected = 3001,
    /// Tenant not found
    TenantNotFound = 3002,
    /// Store is outside the caller's accessible scope
    StoreAccessDenied = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order does not use the multi-payment ledger
    OrderNotMultiPayment = 4002,
    /// Player (seat) not found
    PlayerNotFound = 4003,
    /// Role selections assign more seats than the order has
    RoleSelectionExceedsSeats = 4004,

    // ==================== 5xxx: Payment ====================
    /// Payment not found
    PaymentNotFound = 5001,
    /// Payment is not in the pending state
    PaymentNotPending = 5002,
    /// Payment has already been confirmed
    PaymentAlreadyConfirmed = 5003,
    /// Payment amount is zero, negative or not finite
    PaymentInvalidAmount = 5004,
    /// Payment covers players that do not belong to the order
    PaymentCoverageInvalid = 5005,
    /// Merge requires at least one payment
    PaymentMergeEmpty = 5006,
    /// Payments with mixed statuses cannot be merged
    PaymentStatusMixed = 5007,

    // ==================== 6xxx: Pricing/Catalog ====================
    /// Role pricing template not found
    TemplateNotFound = 6001,
    /// Pricing calendar entry not found
    CalendarEntryNotFound = 6002,
    /// A company-wide calendar entry already exists for the date
    CalendarEntryExists = 6003,
    /// Discount value is invalid for the discount kind
    DiscountValueInvalid = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the numeric value of this error code
    pub fn value(&self) -> u16 {
        *self as u16
    }

    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::ValueOutOfRange => "Value out of range",
            Self::NotAuthenticated => "Not authenticated",
            Self::PermissionDenied => "Permission denied",
            Self::TenantNotSelected => "Tenant not selected",
            Self::TenantNotFound => "Tenant not found",
            Self::StoreAccessDenied => "Store access denied",
            Self::OrderNotFound => "Order not found",
            Self::OrderNotMultiPayment => "Order does not use the multi-payment ledger",
            Self::PlayerNotFound => "Player not found",
            Self::RoleSelectionExceedsSeats => "Role selections exceed player count",
            Self::PaymentNotFound => "Payment not found",
            Self::PaymentNotPending => "Payment is not pending",
            Self::PaymentAlreadyConfirmed => "Payment already confirmed",
            Self::PaymentInvalidAmount => "Invalid payment amount",
            Self::PaymentCoverageInvalid => "Payment covers invalid players",
            Self::PaymentMergeEmpty => "Merge requires at least one payment",
            Self::PaymentStatusMixed => "Cannot merge payments with mixed statuses",
            Self::TemplateNotFound => "Role pricing template not found",
            Self::CalendarEntryNotFound => "Pricing calendar entry not found",
            Self::CalendarEntryExists => "Calendar entry already exists for this date",
            Self::DiscountValueInvalid => "Invalid discount value",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.value())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::ValueOutOfRange,
            1001 => Self::NotAuthenticated,
            2001 => Self::PermissionDenied,
            3001 => Self::TenantNotSelected,
            3002 => Self::TenantNotFound,
            3003 => Self::StoreAccessDenied,
            4001 => Self::OrderNotFound,
            4002 => Self::OrderNotMultiPayment,
            4003 => Self::PlayerNotFound,
            4004 => Self::RoleSelectionExceedsSeats,
            5001 => Self::PaymentNotFound,
            5002 => Self::PaymentNotPending,
            5003 => Self::PaymentAlreadyConfirmed,
            5004 => Self::PaymentInvalidAmount,
            5005 => Self::PaymentCoverageInvalid,
            5006 => Self::PaymentMergeEmpty,
            5007 => Self::PaymentStatusMixed,
            6001 => Self::TemplateNotFound,
            6002 => Self::CalendarEntryNotFound,
            6003 => Self::CalendarEntryExists,
            6004 => Self::DiscountValueInvalid,
            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
