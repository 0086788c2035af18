use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String, // author name
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Issues and checks HS256 bearer tokens signed with a shared secret.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenProvider {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, username: &str) -> Result<String> {
        let claims = Claims::new(username, self.ttl);
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Verifies the signature and expiry and returns the claims.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// True when `token` is authentic, unexpired and issued for `username`.
    pub fn validate(&self, token: &str, username: &str) -> bool {
        match self.decode(token) {
            Ok(claims) => claims.sub == username && !claims.is_expired(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(ttl: Duration) -> TokenProvider {
        TokenProvider::new(b"test-secret", ttl)
    }

    #[test]
    fn issued_token_validates_for_its_subject() {
        let tokens = provider(Duration::minutes(5));
        let token = tokens.issue("alice").unwrap();

        assert!(tokens.validate(&token, "alice"));
        assert_eq!(tokens.decode(&token).unwrap().sub, "alice");
    }

    #[test]
    fn token_fails_for_other_username() {
        let tokens = provider(Duration::minutes(5));
        let token = tokens.issue("alice").unwrap();

        assert!(!tokens.validate(&token, "bob"));
    }

    #[test]
    fn token_fails_after_ttl() {
        let tokens = provider(Duration::seconds(-5));
        let token = tokens.issue("alice").unwrap();

        assert!(!tokens.validate(&token, "alice"));
        assert!(tokens.decode(&token).is_err());
    }

    #[test]
    fn token_fails_with_other_secret() {
        let token = provider(Duration::minutes(5)).issue("alice").unwrap();
        let other = TokenProvider::new(b"another-secret", Duration::minutes(5));

        assert!(!other.validate(&token, "alice"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(!provider(Duration::minutes(5)).validate("not.a.token", "alice"));
    }
}
