use thiserror::Error;

use crate::store::StoreError;

/// Ways a presented token can be rejected. All of them collapse to
/// `CoreError::Unauthorized` once identity resolution gives up.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token could not be parsed")]
    Malformed,
    #[error("token signature did not verify")]
    InvalidSignature,
    #[error("token has expired")]
    Expired,
}

/// The full failure taxonomy of the core. Every variant is terminal for
/// the current call: the boundary maps it to a response and the call ends,
/// with no partial mutation left behind.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("not authenticated")]
    Unauthorized,
    #[error("not permitted to modify this resource")]
    Forbidden,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("duplicate {0}")]
    Conflict(&'static str),
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl From<TokenError> for CoreError {
    fn from(_: TokenError) -> Self {
        CoreError::Unauthorized
    }
}
