//! Authentication extractors
//!
//! Provides:
//! - `AuthUser`: validates the Bearer token and exposes the typed user
//!   record every handler and service works with
//! - `OptionalAuth`: same, but absence of a token is not an error

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::domain::{OrgRole, StringUuid};
use crate::jwt::IdentityClaims;
use crate::server::AppState;

/// Authenticated user information extracted from the identity token.
///
/// `tenant_id` and `role` are both absent for a user who has not joined
/// an organization yet; `role` alone is `None` when the provider sent a
/// role string outside the known set. Either way, tenant-scoped
/// operations fail closed downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Identity-provider subject
    pub user_id: String,
    /// The caller's organization (tenant), if any
    pub tenant_id: Option<StringUuid>,
    /// Parsed organization role; `None` means unknown or absent
    pub role: Option<OrgRole>,
    pub email: String,
    pub name: String,
}

impl AuthUser {
    /// Build the typed user record from verified claims.
    ///
    /// Fails when a claim that must be a well-formed string is not:
    /// empty subject/email/name, or an organization id that is not a
    /// UUID. An unknown role string is NOT a failure here; it is kept
    /// as `None` so the portal can render the permission-denied state.
    pub fn from_claims(claims: IdentityClaims) -> Result<Self, AuthError> {
        if claims.sub.is_empty() || claims.email.is_empty() || claims.name.is_empty() {
            return Err(AuthError::InvalidToken("Invalid token format".to_string()));
        }

        let tenant_id = match claims.org_id.as_deref() {
            Some(raw) => Some(raw.parse::<StringUuid>().map_err(|_| {
                AuthError::InvalidToken("Invalid organization ID in token".to_string())
            })?),
            None => None,
        };

        let role = claims.org_role.as_deref().and_then(OrgRole::from_claim);

        Ok(Self {
            user_id: claims.sub,
            tenant_id,
            role,
            email: claims.email,
            name: claims.name,
        })
    }
}

/// Authentication errors
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header present
    MissingToken,
    /// Invalid Authorization header format
    InvalidHeader(String),
    /// Token validation failed
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match &self {
            AuthError::MissingToken => "Missing authorization token",
            AuthError::InvalidHeader(_) => "Invalid authorization header",
            AuthError::InvalidToken(_) => "Invalid token",
        };

        let body = serde_json::json!({
            "error": "unauthorized",
            "message": message,
        });

        (StatusCode::UNAUTHORIZED, axum::Json(body)).into_response()
    }
}

/// Extract and validate Bearer token from Authorization header
pub(crate) fn extract_bearer_token(headers: &axum::http::HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::InvalidHeader("Invalid header encoding".to_string()))?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AuthError::InvalidHeader(
            "Authorization header must use Bearer scheme".to_string(),
        ));
    }

    Ok(&auth_header[7..])
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;
        let claims = state
            .jwt_manager
            .verify_identity_token(token)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;
        AuthUser::from_claims(claims)
    }
}

/// Optional authentication extractor
///
/// Returns `Some(AuthUser)` if a valid token is present, `None` otherwise.
/// Used by the portal resolver, which renders a signed-out view rather
/// than rejecting unauthenticated callers.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthUser>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match AuthUser::from_request_parts(parts, state).await {
            Ok(user) => Ok(OptionalAuth(Some(user))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(org_id: Option<&str>, org_role: Option<&str>) -> IdentityClaims {
        IdentityClaims {
            sub: "user_1".to_string(),
            email: "staff@example.com".to_string(),
            name: "Staff Member".to_string(),
            org_id: org_id.map(String::from),
            org_role: org_role.map(String::from),
            iss: "https://auth.test".to_string(),
            aud: "slicks".to_string(),
            iat: 1_000_000,
            exp: 1_003_600,
        }
    }

    #[test]
    fn test_from_claims_with_organization() {
        let user = AuthUser::from_claims(claims(
            Some("550e8400-e29b-41d4-a716-446655440000"),
            Some("org:member"),
        ))
        .unwrap();

        assert_eq!(user.user_id, "user_1");
        assert_eq!(
            user.tenant_id.unwrap().to_string(),
            "550e8400-e29b-41d4-a716-446655440000"
        );
        assert_eq!(user.role, Some(OrgRole::Member));
    }

    #[test]
    fn test_from_claims_without_organization() {
        let user = AuthUser::from_claims(claims(None, None)).unwrap();
        assert!(user.tenant_id.is_none());
        assert!(user.role.is_none());
    }

    #[test]
    fn test_from_claims_unknown_role_is_kept_as_none() {
        let user = AuthUser::from_claims(claims(
            Some("550e8400-e29b-41d4-a716-446655440000"),
            Some("org:superuser"),
        ))
        .unwrap();
        assert!(user.tenant_id.is_some());
        assert!(user.role.is_none());
    }

    #[test]
    fn test_from_claims_rejects_malformed_org_id() {
        let result = AuthUser::from_claims(claims(Some("not-a-uuid"), Some("org:member")));
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_from_claims_rejects_empty_subject() {
        let mut c = claims(None, None);
        c.sub = String::new();
        let result = AuthUser::from_claims(c);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer test-token-123".parse().unwrap());

        let token = extract_bearer_token(&headers).unwrap();
        assert_eq!(token, "test-token-123");
    }

    #[test]
    fn test_extract_bearer_token_missing() {
        let headers = axum::http::HeaderMap::new();
        let result = extract_bearer_token(&headers);
        assert!(matches!(result, Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        let result = extract_bearer_token(&headers);
        assert!(matches!(result, Err(AuthError::InvalidHeader(_))));
    }

    #[test]
    fn test_auth_error_into_response() {
        let errors = vec![
            AuthError::MissingToken,
            AuthError::InvalidHeader("test".to_string()),
            AuthError::InvalidToken("test".to_string()),
        ];

        for error in errors {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
