use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domains::accounts::Role;

/// JWT Claims - data stored in the token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,          // Subject (account_id as string)
    pub account_id: Uuid,     // Account UUID
    pub phone_number: String, // Phone number (for logging/debugging)
    pub role: Role,           // Role at issue time
    pub token_use: String,    // "access" or "refresh"
    pub exp: i64,             // Expiration timestamp
    pub iat: i64,             // Issued at timestamp
    pub iss: String,          // Issuer
    pub jti: String,          // JWT ID (unique token identifier)
}

/// Access + refresh token pair returned by login/register/refresh.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT Service - creates and verifies JWT tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

const ACCESS_TOKEN_HOURS: i64 = 24;
const REFRESH_TOKEN_DAYS: i64 = 7;

impl JwtService {
    /// Create new JWT service with secret and issuer
    pub fn new(secret: &str, issuer: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
        }
    }

    /// Create an access (24h) + refresh (7d) pair for an account.
    pub fn create_token_pair(
        &self,
        account_id: Uuid,
        phone_number: &str,
        role: Role,
    ) -> Result<TokenPair> {
        let access_token = self.create_token(
            account_id,
            phone_number,
            role,
            "access",
            chrono::Duration::hours(ACCESS_TOKEN_HOURS),
        )?;
        let refresh_token = self.create_token(
            account_id,
            phone_number,
            role,
            "refresh",
            chrono::Duration::days(REFRESH_TOKEN_DAYS),
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    fn create_token(
        &self,
        account_id: Uuid,
        phone_number: &str,
        role: Role,
        token_use: &str,
        ttl: chrono::Duration,
    ) -> Result<String> {
        let now = chrono::Utc::now();
        let exp = now + ttl;

        let claims = Claims {
            sub: account_id.to_string(),
            account_id,
            phone_number: phone_number.to_string(),
            role,
            token_use: token_use.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            jti: Uuid::new_v4().to_string(), // Unique token ID
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Into::into)
    }

    /// Verify and decode a token, enforcing issuer and expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.issuer]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(Into::into)
    }

    /// Verify an access token (refresh tokens are rejected here).
    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;
        if claims.token_use != "access" {
            anyhow::bail!("Not an access token");
        }
        Ok(claims)
    }

    /// Verify a refresh token (access tokens are rejected here).
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;
        if claims.token_use != "refresh" {
            anyhow::bail!("Not a refresh token");
        }
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test_secret_key", "test_issuer".to_string())
    }

    #[test]
    fn test_create_and_verify_pair() {
        let service = service();
        let account_id = Uuid::new_v4();

        let pair = service
            .create_token_pair(account_id, "+998901234567", Role::Seller)
            .unwrap();

        let claims = service.verify_access_token(&pair.access_token).unwrap();
        assert_eq!(claims.account_id, account_id);
        assert_eq!(claims.phone_number, "+998901234567");
        assert_eq!(claims.role, Role::Seller);
        assert_eq!(claims.iss, "test_issuer");

        let refresh = service.verify_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.account_id, account_id);
    }

    #[test]
    fn test_token_use_is_enforced() {
        let service = service();
        let pair = service
            .create_token_pair(Uuid::new_v4(), "+998901234567", Role::User)
            .unwrap();

        assert!(service.verify_access_token(&pair.refresh_token).is_err());
        assert!(service.verify_refresh_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_invalid_token() {
        assert!(service().verify_token("invalid_token").is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let service1 = JwtService::new("secret1", "test_issuer".to_string());
        let service2 = JwtService::new("secret2", "test_issuer".to_string());

        let pair = service1
            .create_token_pair(Uuid::new_v4(), "+998901234567", Role::User)
            .unwrap();

        // Token created with secret1 should not verify with secret2
        assert!(service2.verify_token(&pair.access_token).is_err());
    }

    #[test]
    fn test_access_expiry_window() {
        let service = service();
        let pair = service
            .create_token_pair(Uuid::new_v4(), "+998901234567", Role::User)
            .unwrap();
        let claims = service.verify_access_token(&pair.access_token).unwrap();

        let now = chrono::Utc::now().timestamp();
        let expires_in = claims.exp - now;
        assert!(expires_in > 23 * 3600);
        assert!(expires_in <= 24 * 3600);
    }
}
