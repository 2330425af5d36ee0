//! Subscription store error types

use thiserror::Error;

use super::types::SubscriptionId;

/// Errors that can occur in the subscription store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Candidate rejected by `add` (empty name or non-positive amount)
    #[error("Subscription rejected: {reason}")]
    ValidationRejected { reason: String },

    /// No live record carries this id
    #[error("Subscription not found: {0}")]
    NotFound(SubscriptionId),

    /// Frequency text was neither `monthly` nor `yearly`
    #[error("Unknown frequency '{0}' (expected monthly or yearly)")]
    UnknownFrequency(String),
}

impl StoreError {
    pub(crate) fn rejected(reason: impl Into<String>) -> Self {
        StoreError::ValidationRejected {
            reason: reason.into(),
        }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
