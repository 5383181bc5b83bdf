//! Shared helpers for the integration test suites
#![allow(dead_code)]

use slicks_core::domain::{OrgRole, StringUuid};
use slicks_core::middleware::auth::AuthUser;

/// An authenticated user inside a (random) organization
pub fn member_of_some_org(role: OrgRole) -> AuthUser {
    AuthUser {
        user_id: "user_test".to_string(),
        tenant_id: Some(StringUuid::new_v4()),
        role: Some(role),
        email: "someone@example.com".to_string(),
        name: "Someone".to_string(),
    }
}

/// An authenticated user whose role claim was unknown or absent
pub fn member_with_unknown_role() -> AuthUser {
    AuthUser {
        user_id: "user_test".to_string(),
        tenant_id: Some(StringUuid::new_v4()),
        role: None,
        email: "someone@example.com".to_string(),
        name: "Someone".to_string(),
    }
}

/// An authenticated user who has not joined an organization yet
pub fn user_without_org() -> AuthUser {
    AuthUser {
        user_id: "user_test".to_string(),
        tenant_id: None,
        role: None,
        email: "someone@example.com".to_string(),
        name: "Someone".to_string(),
    }
}
