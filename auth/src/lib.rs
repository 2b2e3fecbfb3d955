//! Authentication library for the identity service.
//!
//! Provides the stateless core of bearer-token authentication:
//! - Password hashing (Argon2id, salted, one-way)
//! - Signed token minting and verification (JWT, HS256)
//! - An [`Authenticator`] coordinating the two
//!
//! Everything here is pure computation over a configured secret; no I/O,
//! no storage, no per-request mutable state. Confirming that a token's
//! subject still exists is deliberately left to the service layer.
//!
//! # Examples
//!
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(1));
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify credentials and mint a token
//! let result = auth.authenticate("password123", &hash, "alice").unwrap();
//!
//! // Protected request: verify the presented token
//! assert_eq!(auth.parse_subject(&result.access_token).unwrap(), "alice");
//! assert!(auth.validate(&result.access_token, "alice"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
