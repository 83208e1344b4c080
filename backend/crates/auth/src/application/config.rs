//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing key
    pub jwt_secret: Vec<u8>,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3600);

    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            token_ttl: Self::DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }

    /// Config with a random signing key; tokens do not survive a restart
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self::new(secret)
    }

    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_pepper(mut self, pepper: impl Into<Vec<u8>>) -> Self {
        self.password_pepper = Some(pepper.into());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
