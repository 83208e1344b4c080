//! Bearer Tokens
//!
//! Issues and verifies the HS256 tokens carried in `Authorization: Bearer`.

use chrono::Utc;
use platform::jwt::JwtCodec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::policy::Identity;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<Uuid>,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone)]
pub struct TokenService {
    codec: JwtCodec,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            codec: JwtCodec::new(&config.jwt_secret),
            ttl_secs: i64::try_from(config.token_ttl.as_secs()).unwrap_or(i64::MAX / 2),
        }
    }

    pub fn issue(&self, identity: &Identity) -> AuthResult<String> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            role: identity.role,
            sub: identity.user_id.map(Uuid::from),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };
        Ok(self.codec.sign(&claims)?)
    }

    pub fn verify(&self, token: &str) -> AuthResult<Identity> {
        let claims: Claims = self.codec.verify(token)?;
        Ok(Identity {
            role: claims.role,
            user_id: claims.sub.map(Into::into),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;
    use kernel::id::UserId;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig::new("test-secret"))
    }

    #[test]
    fn test_issue_and_verify_dummy_identity() {
        let tokens = service();
        let identity = Identity {
            role: UserRole::Moderator,
            user_id: None,
        };

        let token = tokens.issue(&identity).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), identity);
    }

    #[test]
    fn test_issue_and_verify_user_identity() {
        let tokens = service();
        let identity = Identity {
            role: UserRole::Employee,
            user_id: Some(UserId::new()),
        };

        let token = tokens.issue(&identity).unwrap();
        assert_eq!(tokens.verify(&token).unwrap(), identity);
    }

    #[test]
    fn test_foreign_token_is_invalid() {
        let token = TokenService::new(&AuthConfig::new("other-secret"))
            .issue(&Identity {
                role: UserRole::Employee,
                user_id: None,
            })
            .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token() {
        let now = Utc::now().timestamp();
        let token = JwtCodec::new(b"test-secret")
            .sign(&Claims {
                role: UserRole::Employee,
                sub: None,
                iat: now - 7200,
                exp: now - 3600,
            })
            .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_unknown_role_claim_is_invalid() {
        #[derive(Serialize)]
        struct Forged {
            role: &'static str,
            exp: i64,
        }

        let token = JwtCodec::new(b"test-secret")
            .sign(&Forged {
                role: "admin",
                exp: Utc::now().timestamp() + 60,
            })
            .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }
}
