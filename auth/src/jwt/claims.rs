use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by every issued token.
///
/// Deliberately closed: subject, issued-at, and expiry are the only claims
/// this service signs or trusts. Unknown fields in a presented token are
/// ignored by deserialization and never reach authorization decisions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject — the username the token was minted for.
    pub sub: String,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

impl Claims {
    /// Build the claim set for a freshly minted token.
    ///
    /// # Arguments
    /// * `subject` - Username the token identifies
    /// * `ttl` - Token lifetime; a non-positive duration produces an
    ///   already-expired token (used by expiry tests)
    pub fn for_subject(subject: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Check whether the token has expired at the given instant.
    ///
    /// A token is expired the moment `exp` is reached, not one second after.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
