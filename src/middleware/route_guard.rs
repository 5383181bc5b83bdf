//! Route-prefix authorization guard
//!
//! Maps dashboard URL prefixes to required-role sets at the edge, before
//! any handler runs. The comparison itself goes through the central
//! policy, so an Admin passes every prefix.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::domain::OrgRole;
use crate::middleware::auth::{extract_bearer_token, AuthUser};
use crate::policy;
use crate::server::AppState;

/// Prefix-to-requirement table, first match wins.
const ROUTE_RULES: &[(&str, &[OrgRole])] = &[
    ("/admin", &[OrgRole::Admin]),
    ("/manager", &[OrgRole::Manager]),
    ("/client", &[OrgRole::Client]),
    ("/dashboard", &[OrgRole::Member]),
];

fn required_roles_for(path: &str) -> Option<&'static [OrgRole]> {
    ROUTE_RULES
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
        .map(|(_, roles)| *roles)
}

/// Middleware enforcing the prefix table above.
pub async fn route_guard_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(required) = required_roles_for(request.uri().path()) else {
        return next.run(request).await;
    };

    let token = match extract_bearer_token(request.headers()) {
        Ok(token) => token,
        Err(rejection) => return rejection.into_response(),
    };

    let claims = match state.jwt_manager.verify_identity_token(token) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    let auth = match AuthUser::from_claims(claims) {
        Ok(auth) => auth,
        Err(rejection) => return rejection.into_response(),
    };

    if let Err(err) = policy::authorize(&auth, required) {
        return err.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_map_to_expected_roles() {
        assert_eq!(required_roles_for("/admin"), Some(&[OrgRole::Admin][..]));
        assert_eq!(
            required_roles_for("/manager/jobs"),
            Some(&[OrgRole::Manager][..])
        );
        assert_eq!(
            required_roles_for("/client/estimates"),
            Some(&[OrgRole::Client][..])
        );
        assert_eq!(
            required_roles_for("/dashboard"),
            Some(&[OrgRole::Member][..])
        );
    }

    #[test]
    fn test_unguarded_paths_fall_through() {
        assert_eq!(required_roles_for("/health"), None);
        assert_eq!(required_roles_for("/api/v1/estimates"), None);
        assert_eq!(required_roles_for("/"), None);
    }
}
