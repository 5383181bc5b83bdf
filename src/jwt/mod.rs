//! Identity token handling
//!
//! Tokens are issued by the external identity provider; this service
//! only verifies them (HS256 shared secret or RS256 public key) and
//! reads the claims. The organization claims are optional at this
//! layer: a freshly signed-up user has no organization yet.

use crate::config::AuthConfig;
use crate::error::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity token claims as issued by the auth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject (identity-provider user id)
    pub sub: String,
    /// Email
    pub email: String,
    /// Display name
    pub name: String,
    /// Organization (tenant) id, absent until the user joins one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    /// Raw organization role claim (e.g. "org:member")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_role: Option<String>,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Verifies identity tokens and, for tests and local tooling, issues them.
#[derive(Clone)]
pub struct JwtManager {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtManager {
    pub fn new(config: AuthConfig) -> Self {
        let algorithm = if config.public_key_pem.is_some() {
            Algorithm::RS256
        } else {
            Algorithm::HS256
        };
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = match config.public_key_pem.as_ref() {
            Some(public_key) => DecodingKey::from_rsa_pem(public_key.as_bytes())
                .expect("Failed to load identity provider public key"),
            None => DecodingKey::from_secret(config.secret.as_bytes()),
        };
        Self {
            config,
            encoding_key,
            decoding_key,
            algorithm,
        }
    }

    /// Create a Validation with a strict leeway (5 seconds) instead of the
    /// default 60 seconds, so revoked sessions expire promptly while still
    /// tolerating minor clock skew.
    fn strict_validation(&self) -> Validation {
        let mut v = Validation::new(self.algorithm);
        v.leeway = 5;
        v.set_issuer(&[&self.config.issuer]);
        v.set_audience(&[&self.config.audience]);
        v
    }

    /// Verify an identity token and return its claims
    pub fn verify_identity_token(&self, token: &str) -> Result<IdentityClaims> {
        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.strict_validation())?;
        Ok(data.claims)
    }

    /// Issue an identity token. Production tokens come from the external
    /// provider; this mirrors its claim layout for tests and local dev.
    pub fn issue_identity_token(
        &self,
        user_id: &str,
        email: &str,
        name: &str,
        organization: Option<(&str, &str)>,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::hours(1);

        let (org_id, org_role) = match organization {
            Some((id, role)) => (Some(id.to_string()), Some(role.to_string())),
            None => (None, None),
        };

        let claims = IdentityClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            org_id,
            org_role,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(if self.config.public_key_pem.is_some() {
            // Issuing with RS256 would need the private key; local issuance
            // is HS256 only.
            Algorithm::HS256
        } else {
            self.algorithm
        });
        encode(&header, &claims, &self.encoding_key).map_err(|e| AppError::Internal(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;

    fn manager() -> JwtManager {
        JwtManager::new(AuthConfig {
            secret: "test-secret".to_string(),
            issuer: "https://auth.test".to_string(),
            audience: "slicks".to_string(),
            public_key_pem: None,
        })
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let jwt = manager();
        let token = jwt
            .issue_identity_token(
                "user_1",
                "owner@example.com",
                "Rome",
                Some(("3d1f8a04-5b2c-4f3e-9a1d-8e7f6c5b4a30", "org:admin")),
            )
            .unwrap();

        let claims = jwt.verify_identity_token(&token).unwrap();
        assert_eq!(claims.sub, "user_1");
        assert_eq!(claims.email, "owner@example.com");
        assert_eq!(
            claims.org_id.as_deref(),
            Some("3d1f8a04-5b2c-4f3e-9a1d-8e7f6c5b4a30")
        );
        assert_eq!(claims.org_role.as_deref(), Some("org:admin"));
    }

    #[test]
    fn test_token_without_organization() {
        let jwt = manager();
        let token = jwt
            .issue_identity_token("user_2", "new@example.com", "New User", None)
            .unwrap();

        let claims = jwt.verify_identity_token(&token).unwrap();
        assert!(claims.org_id.is_none());
        assert!(claims.org_role.is_none());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let jwt = manager();
        assert!(jwt.verify_identity_token("not.a.token").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuing = manager();
        let verifying = JwtManager::new(AuthConfig {
            secret: "other-secret".to_string(),
            issuer: "https://auth.test".to_string(),
            audience: "slicks".to_string(),
            public_key_pem: None,
        });

        let token = issuing
            .issue_identity_token("user_1", "a@b.c", "A", None)
            .unwrap();
        assert!(verifying.verify_identity_token(&token).is_err());
    }
}
