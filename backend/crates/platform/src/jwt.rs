//! HS256 JSON Web Tokens
//!
//! Thin wrapper over `jsonwebtoken` that fixes the algorithm and keeps the
//! key material in one place. Claim types are defined by the caller.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token signing failed: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(jsonwebtoken::errors::Error),
}

/// Signs and verifies HS256 tokens with a shared secret
#[derive(Clone)]
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(JwtError::Signing)
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, JwtError> {
        decode::<C>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e),
            })
    }
}

impl std::fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec").field("key", &"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestClaims {
        role: String,
        exp: u64,
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test]
    fn test_sign_and_verify() {
        let codec = JwtCodec::new(b"secret");
        let claims = TestClaims {
            role: "employee".to_string(),
            exp: now() + 60,
        };
        let token = codec.sign(&claims).unwrap();
        let decoded: TestClaims = codec.verify(&token).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = JwtCodec::new(b"secret")
            .sign(&TestClaims {
                role: "moderator".to_string(),
                exp: now() + 60,
            })
            .unwrap();
        let result = JwtCodec::new(b"other").verify::<TestClaims>(&token);
        assert!(matches!(result, Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let codec = JwtCodec::new(b"secret");
        let token = codec
            .sign(&TestClaims {
                role: "employee".to_string(),
                exp: now() - 10,
            })
            .unwrap();
        assert!(matches!(
            codec.verify::<TestClaims>(&token),
            Err(JwtError::Expired)
        ));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let codec = JwtCodec::new(b"secret");
        assert!(matches!(
            codec.verify::<TestClaims>("not.a.token"),
            Err(JwtError::Invalid(_))
        ));
    }
}
