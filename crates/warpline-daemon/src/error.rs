//! Errors surfaced by the account and endpoint operations.

use thiserror::Error;

use crate::endpoints::QualityParseError;
use crate::registration::RegistrationError;
use crate::storage::DatabaseError;

/// Failure of a provisioning or endpoint-selection operation.
///
/// Nothing is retried; callers decide what a failure means to them.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Reading from or writing to the account store or endpoint catalog failed.
    #[error("Store failure: {0}")]
    Store(#[from] DatabaseError),

    /// The remote registration call failed or returned an unusable response.
    #[error("Registration failure: {0}")]
    Registration(#[from] RegistrationError),

    /// An endpoint row could not be parsed.
    #[error("Malformed endpoint record {address:?}: {reason}")]
    MalformedRecord {
        address: String,
        #[source]
        reason: QualityParseError,
    },
}
