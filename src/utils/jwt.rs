use chrono::{TimeDelta, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::middleware::error::{AppError, AppResult};

/// Access token claims as issued by the hosted auth backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

pub struct JWT {
    key_enc: EncodingKey,
    key_dec: DecodingKey,
    duration: TimeDelta,
}

impl JWT {
    pub fn new(secret: String, duration: TimeDelta) -> Self {
        Self {
            duration,
            key_enc: EncodingKey::from_secret(secret.as_ref()),
            key_dec: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Used by dev seeding and tests; production tokens come from the auth backend.
    pub fn create(&self, user_id: &str, email: Option<&str>) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.map(|e| e.to_string()),
            exp: (now + self.duration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(&Header::default(), &claims, &self.key_enc)?)
    }

    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        let data = decode::<Claims>(token, &self.key_dec, &Validation::new(Algorithm::HS256))?;
        if data.claims.sub.is_empty() {
            return Err(AppError::AuthFailJwtInvalid {
                source: "empty subject".to_string(),
            });
        }
        Ok(data.claims)
    }
}
