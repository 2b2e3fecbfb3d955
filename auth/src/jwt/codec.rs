use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Mints and verifies compact signed bearer tokens.
///
/// Tokens are self-contained JWTs (HS256): three dot-delimited base64url
/// segments — header, claims, MAC over the first two. Verification needs no
/// server-side state beyond the signing secret; signature comparison is
/// constant-time inside the underlying verifier.
///
/// Holds no mutable state, so a single instance is shared freely across
/// request handlers.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a codec bound to a signing secret.
    ///
    /// # Arguments
    /// * `secret` - HMAC key; at least 32 bytes for HS256, supplied from
    ///   configuration and never hardcoded in production
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Mint a signed token for a subject.
    ///
    /// Sets `iat` to now and `exp` to now + `ttl`, then signs the claim set.
    /// Pure computation, no side effects.
    ///
    /// # Errors
    /// * `Minting` - Serialization or signing failed
    pub fn mint(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);
        let claims = Claims::for_subject(subject, ttl);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::Minting(e.to_string()))
    }

    /// Verify a token's structure and signature, returning its subject.
    ///
    /// Expiry is not checked here; an expired but authentic token still
    /// yields its subject. Use [`is_expired`](Self::is_expired) or
    /// [`validate`](Self::validate) for the time check.
    ///
    /// # Errors
    /// * `Invalid` - Malformed structure, undecodable claims, or signature
    ///   mismatch (indistinguishable by design)
    pub fn parse_subject(&self, token: &str) -> Result<String, TokenError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    /// Check whether an authentic token has expired.
    ///
    /// True iff `exp <= now`. Fails under the same conditions as
    /// [`parse_subject`](Self::parse_subject).
    pub fn is_expired(&self, token: &str) -> Result<bool, TokenError> {
        let claims = self.decode_claims(token)?;

        Ok(claims.is_expired(Utc::now().timestamp()))
    }

    /// Full validation: authentic, unexpired, and minted for the expected
    /// subject. Both checks are mandatory; any parse failure is `false`.
    pub fn validate(&self, token: &str, expected_subject: &str) -> bool {
        match self.decode_claims(token) {
            Ok(claims) => {
                claims.sub == expected_subject && !claims.is_expired(Utc::now().timestamp())
            }
            Err(_) => false,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        // Expiry is evaluated by the caller, not the decoder, so that
        // parse_subject can still read expired-but-authentic tokens.
        validation.validate_exp = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}
