use chrono::Duration;

use crate::jwt::TokenCodec;
use crate::jwt::TokenError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// Owns the signing secret (inside the codec) and the configured token
/// lifetime; everything else is per-call input. Holds no mutable state and
/// is shared across requests behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    token_ttl: Duration,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed bearer token; opaque to callers.
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Token signing key, externally supplied
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_codec: TokenCodec::new(secret),
            token_ttl,
        }
    }

    /// Hash a password for storage at registration time.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and mint a bearer token for the subject.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `Password` - Stored hash could not be parsed
    /// * `Token` - Token signing failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_codec.mint(subject, self.token_ttl)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Verify a presented token's signature and return its subject.
    ///
    /// See [`TokenCodec::parse_subject`].
    pub fn parse_subject(&self, token: &str) -> Result<String, TokenError> {
        self.token_codec.parse_subject(token)
    }

    /// Full token validation against an expected subject.
    ///
    /// See [`TokenCodec::validate`].
    pub fn validate(&self, token: &str, expected_subject: &str) -> bool {
        self.token_codec.validate(token, expected_subject)
    }
}
