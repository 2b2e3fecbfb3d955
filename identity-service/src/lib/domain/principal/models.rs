use std::fmt;

use crate::principal::errors::UsernameError;

/// Default role granted at registration. Roles are free-form labels, not a
/// closed enum, so new roles can appear without a schema change.
pub const DEFAULT_ROLE: &str = "USER";

/// Resolved identity record used for authorization decisions.
///
/// Created at registration and immutable afterwards. The credential digest
/// is an opaque PHC string; plaintext passwords never appear here.
#[derive(Debug, Clone)]
pub struct Principal {
    pub username: Username,
    pub password_hash: String,
    pub role: String,
}

/// Username value type
///
/// The unique identity key. 3-32 characters, alphanumeric plus underscore
/// and hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 3 characters
    /// * `TooLong` - More than 32 characters
    /// * `InvalidCharacters` - Contains characters outside [a-zA-Z0-9_-]
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to register a new principal with a validated username.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub password: String,
}

impl RegisterCommand {
    /// # Arguments
    /// * `username` - Validated username
    /// * `password` - Plaintext password (hashed by the service, never stored)
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}
