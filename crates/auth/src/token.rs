//! HS256 token service.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;

use equipe_core::UserId;

use crate::{Claims, Role};

/// Token lifetime: one hour from issuance.
pub const TOKEN_TTL_SECS: i64 = 3600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Signature mismatch, malformed token, or missing required claims.
    #[error("invalid token")]
    Invalid,

    /// Structurally valid and correctly signed, but past its expiry.
    #[error("expired token")]
    Expired,

    /// Signing failed (should not happen with a well-formed secret).
    #[error("token encoding failed")]
    Encoding,
}

/// Verification seam used by the request gate.
///
/// The gate holds `Arc<dyn TokenVerifier>` so tests can substitute a stub
/// without standing up real key material.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Issues and verifies HS256-signed tokens with a shared secret.
#[derive(Clone)]
pub struct Hs256TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Hs256TokenService {
    /// Build from the server-held signing secret.
    ///
    /// Callers are responsible for refusing to start when the secret is
    /// absent; an empty secret is not special-cased here.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Sign a token for `user_id` with a one-hour expiry.
    pub fn issue(
        &self,
        user_id: UserId,
        role: Role,
        email: Option<String>,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            role,
            email,
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::Encoding)
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        // Exact expiry: a token is invalid the second it lapses.
        validation.leeway = 0;
        validation
    }
}

impl TokenVerifier for Hs256TokenService {
    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &Self::validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Hs256TokenService {
        Hs256TokenService::new(b"test-secret")
    }

    #[test]
    fn issue_then_verify_round_trips() {
        let svc = service();
        let user_id = UserId::new();

        let token = svc.issue(user_id, Role::Coordinator, None).unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Coordinator);
        assert_eq!(claims.email, None);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn email_claim_survives_the_round_trip() {
        let svc = service();
        let token = svc
            .issue(UserId::new(), Role::Admin, Some("ana@example.com".to_string()))
            .unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = service().issue(UserId::new(), Role::Admin, None).unwrap();
        let other = Hs256TokenService::new(b"other-secret");
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn any_byte_mutation_invalidates_the_token() {
        let svc = service();
        let token = svc.issue(UserId::new(), Role::Common, None).unwrap();

        let bytes = token.as_bytes();
        for pos in 0..bytes.len() {
            let mut mutated = bytes.to_vec();
            // Flip within the base64url alphabet so the structure stays parseable.
            mutated[pos] = if mutated[pos] == b'A' { b'B' } else { b'A' };
            let mutated = String::from_utf8(mutated).unwrap();
            if mutated == token {
                continue;
            }
            assert!(
                svc.verify(&mutated).is_err(),
                "mutation at byte {pos} was accepted"
            );
        }
    }

    #[test]
    fn expired_token_reports_expiry_specifically() {
        let svc = service();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: UserId::new(),
            role: Role::Common,
            email: None,
            iat: now - 2 * TOKEN_TTL_SECS,
            exp: now - TOKEN_TTL_SECS,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(svc.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn tokens_missing_required_claims_are_invalid() {
        // A payload without `role` must not decode into half-empty claims.
        #[derive(serde::Serialize)]
        struct Partial {
            sub: UserId,
            iat: i64,
            exp: i64,
        }
        let now = Utc::now().timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                sub: UserId::new(),
                iat: now,
                exp: now + 60,
            },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert_eq!(service().verify(&token), Err(TokenError::Invalid));
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(service().verify("not-a-token"), Err(TokenError::Invalid));
        assert_eq!(service().verify(""), Err(TokenError::Invalid));
    }
}
