//! Workflow error types for request review and account administration.
//!
//! Three families of failure exist: the target entity does not exist, the
//! entity is in a state that forbids the operation, or the input is invalid.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::workflow::types::ReviewStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No entity with the given id exists.
    #[error("{kind} {id} not found")]
    NotFound {
        /// The entity kind (e.g. "deposit request").
        kind: &'static str,
        /// The requested id.
        id: u64,
    },

    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ReviewStatus,
        /// The attempted target status.
        to: ReviewStatus,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Amount is zero, negative, or otherwise unusable.
    #[error("Invalid amount {amount}: {message}")]
    InvalidAmount {
        /// The offending amount.
        amount: Decimal,
        /// What is wrong with it.
        message: &'static str,
    },

    /// Balance adjustment would leave the balance below zero.
    #[error("Adjusting balance {balance} by {delta} would make it negative")]
    NegativeBalance {
        /// The balance before the adjustment.
        balance: Decimal,
        /// The requested adjustment.
        delta: Decimal,
    },

    /// Limit specification is malformed.
    #[error("Invalid limit: {0}")]
    InvalidLimit(String),

    /// Other malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Username already taken by another account.
    #[error("Username {0} is already taken")]
    DuplicateUsername(String),
}

impl WorkflowError {
    /// Builds a `NotFound` error for an entity kind.
    pub fn not_found(kind: &'static str, id: impl Into<u64>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Returns true for errors caused by invalid caller input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::RejectionReasonRequired
                | Self::InvalidAmount { .. }
                | Self::NegativeBalance { .. }
                | Self::InvalidLimit(_)
                | Self::InvalidInput(_)
        )
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            _ if self.is_validation() => 400,
            _ => 409,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidTransition { .. } => "INVALID_STATE",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::InvalidAmount { .. } => "INVALID_AMOUNT",
            Self::NegativeBalance { .. } => "NEGATIVE_BALANCE",
            Self::InvalidLimit(_) => "INVALID_LIMIT",
            Self::InvalidInput(_) => "VALIDATION_ERROR",
            Self::DuplicateUsername(_) => "DUPLICATE_USERNAME",
        }
    }
}

impl From<validator::ValidationErrors> for WorkflowError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
