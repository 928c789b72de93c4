//! JWT issuance and verification.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{JwtConfig, TOKEN_LIFETIME_HOURS};
use crate::domain::User;
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id in string form
    pub sub: String,
    pub email: String,
    #[serde(rename = "UserName")]
    pub user_name: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Signs HS256 tokens with a fixed lifetime and verifies them.
///
/// Keys, issuer and audience are fixed at construction.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        Self {
            encoding: EncodingKey::from_secret(config.key_bytes()),
            decoding: DecodingKey::from_secret(config.key_bytes()),
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }

    /// Issue a token for `user` valid for `TOKEN_LIFETIME_HOURS` from now.
    pub fn issue(&self, user: &User) -> AppResult<String> {
        self.issue_at(user, Utc::now())
    }

    fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AppResult<String> {
        let expires_at = now + Duration::hours(TOKEN_LIFETIME_HOURS);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            user_name: user.username.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify signature, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(token_data.claims)
    }
}
