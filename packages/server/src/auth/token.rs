//! Signed session tokens (HMAC-SHA-256 JWTs).
//!
//! Tokens are stateless bearer credentials: signature plus expiry is the
//! whole validity story, there is no revocation list. `validate` collapses
//! every failure mode to `false` for callers; the specific rejection
//! reason exists only for diagnostics and is logged here, never returned.
//!
//! `iat`/`exp` are unix *milliseconds*, matching the millisecond TTL
//! configuration. Expiry is checked by this module itself against an
//! injectable clock (`now >= exp` is expired, exact boundary), not by the
//! JWT library's seconds-based, leeway-padded check.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use autolot_core::{AdminRole, AdminUserId, DealershipId, Error};

use super::config::AuthConfig;

/// Claims embedded in every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the admin user id.
    pub sub: AdminUserId,
    /// Tenant the subject belongs to.
    #[serde(rename = "dealershipId")]
    pub dealership_id: DealershipId,
    pub email: String,
    pub role: AdminRole,
    /// Issued-at, unix milliseconds.
    pub iat: i64,
    /// Expiry, unix milliseconds. Invalid from this instant on.
    pub exp: i64,
}

/// Why a token was rejected. Logged only; callers of `validate` see a
/// plain `false` whatever the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// Signature did not verify against the current key.
    Signature,
    /// Token or claims were structurally undecodable.
    Malformed,
    /// Signature fine, `exp` in the past.
    Expired,
    /// Signed with an algorithm this service does not accept.
    Unsupported,
    /// Empty credential string.
    Empty,
}

impl TokenRejection {
    fn as_str(self) -> &'static str {
        match self {
            Self::Signature => "signature",
            Self::Malformed => "malformed",
            Self::Expired => "expired",
            Self::Unsupported => "unsupported",
            Self::Empty => "empty",
        }
    }
}

/// Issues and validates session tokens. Stateless: a pure function of the
/// configured secret, shareable across the whole server.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_ms: i64,
}

impl TokenService {
    /// Builds the service, enforcing key strength up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the secret is shorter than the
    /// HS256 floor or the TTL is zero -- the server must not start with a
    /// weak signing key.
    pub fn new(config: &AuthConfig) -> Result<Self, Error> {
        config.validate()?;
        let ttl_ms = i64::try_from(config.token_ttl_ms)
            .map_err(|_| Error::Validation {
                field: "token_ttl_ms",
                message: "does not fit a signed 64-bit millisecond value".to_string(),
            })?;
        Ok(Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_ms,
        })
    }

    /// Issues a signed token for the given identity, valid from `now` for
    /// the configured TTL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] if encoding fails (never expected with
    /// a validated key).
    pub fn issue(
        &self,
        admin_user_id: AdminUserId,
        dealership_id: DealershipId,
        email: &str,
        role: AdminRole,
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        let iat = now.timestamp_millis();
        let claims = Claims {
            sub: admin_user_id,
            dealership_id,
            email: email.to_string(),
            role,
            iat,
            exp: iat + self.ttl_ms,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(Error::internal)
    }

    /// Whether `token` is valid right now. Never errors: any failure is
    /// `false`, with the subtype logged for diagnostics.
    #[must_use]
    pub fn validate(&self, token: &str) -> bool {
        self.validate_at(token, Utc::now())
    }

    /// Clock-injected variant of [`validate`](Self::validate).
    #[must_use]
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> bool {
        match self.check(token, now) {
            Ok(_) => true,
            Err(rejection) => {
                debug!(reason = rejection.as_str(), "rejected bearer token");
                false
            }
        }
    }

    /// Decodes the claims without re-verifying trust.
    ///
    /// Only meaningful after [`validate`](Self::validate) has succeeded;
    /// returns `None` for structurally undecodable input.
    #[must_use]
    pub fn extract_claims(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Full verification with classified failures. Internal: the public
    /// surface collapses the classification to a boolean.
    fn check(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenRejection> {
        if token.is_empty() {
            return Err(TokenRejection::Empty);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below in milliseconds against the injected
        // clock; the library check is seconds-based with default leeway.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(classify_decode_error)?;

        if now.timestamp_millis() >= data.claims.exp {
            return Err(TokenRejection::Expired);
        }
        Ok(data.claims)
    }
}

fn classify_decode_error(err: jsonwebtoken::errors::Error) -> TokenRejection {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::InvalidSignature => TokenRejection::Signature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenRejection::Unsupported
        }
        ErrorKind::ExpiredSignature => TokenRejection::Expired,
        _ => TokenRejection::Malformed,
    }
}
