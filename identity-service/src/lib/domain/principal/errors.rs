use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Top-level error for identity operations
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    // Never surfaced verbatim at the login boundary; folded into a single
    // Unauthorized outcome there so usernames cannot be enumerated.
    #[error("No principal with username: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    Database(String),
}
