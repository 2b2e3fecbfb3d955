use thiserror::Error;

/// Error type for token operations.
///
/// Parse-side failures are collapsed into the single `Invalid` variant:
/// callers must not be able to distinguish a malformed token from one with
/// a bad signature.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to mint token: {0}")]
    Minting(String),

    #[error("Token is invalid")]
    Invalid,
}
