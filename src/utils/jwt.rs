use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;

/// Claims carried by an access token issued by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Uuid {
        Uuid::parse_str(&self.sub).unwrap_or_default()
    }
}

/// Verify a bearer token and return its claims. Expiry is enforced by the
/// default validation; issuance happens outside this service.
pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn issue(secret: &str, exp_offset: Duration) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            email: "member@example.com".to_string(),
            exp: (now + exp_offset).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_round_trips() {
        let token = issue("test-secret", Duration::hours(1));
        let claims = verify_token(&token, "test-secret").unwrap();
        assert_eq!(claims.email, "member@example.com");
        assert_ne!(claims.user_id(), Uuid::nil());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue("test-secret", Duration::hours(1));
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue("test-secret", Duration::hours(-2));
        assert!(verify_token(&token, "test-secret").is_err());
    }

    #[test]
    fn malformed_subject_maps_to_nil_uuid() {
        let claims = Claims {
            sub: "not-a-uuid".to_string(),
            email: "member@example.com".to_string(),
            exp: 0,
            iat: 0,
        };
        assert_eq!(claims.user_id(), Uuid::nil());
    }
}
