//! Role-routed portal dispatch
//!
//! The web app renders one of several dashboards depending on who is
//! signed in. The selection is a small state machine over the resolved
//! role, driven entirely by the identity resolution upstream; this
//! module is the single place that mapping lives.

use crate::domain::OrgRole;
use crate::middleware::auth::AuthUser;
use serde::{Deserialize, Serialize};

/// Which surface the caller should see.
///
/// `PermissionDenied` is terminal and display-only: it is reached
/// whenever the role claim matches none of the known variants,
/// including when it is absent entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PortalView {
    /// No valid session; the app shows sign-in/sign-up.
    SignedOut,
    /// Signed in, organization membership not yet resolved.
    OrganizationPending,
    Admin,
    Manager,
    ClientPortal,
    Member,
    NonMember,
    PermissionDenied { required_role: String },
}

/// Resolve the portal view for an (optionally) authenticated caller.
pub fn resolve_view(auth: Option<&AuthUser>) -> PortalView {
    let Some(user) = auth else {
        return PortalView::SignedOut;
    };

    if user.tenant_id.is_none() {
        return PortalView::OrganizationPending;
    }

    match user.role {
        Some(OrgRole::Admin) => PortalView::Admin,
        Some(OrgRole::Manager) => PortalView::Manager,
        Some(OrgRole::Client) => PortalView::ClientPortal,
        Some(OrgRole::Member) => PortalView::Member,
        Some(OrgRole::NonMember) => PortalView::NonMember,
        None => PortalView::PermissionDenied {
            required_role: "Any valid role".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StringUuid;

    fn user(tenant: bool, role: Option<OrgRole>) -> AuthUser {
        AuthUser {
            user_id: "user_1".to_string(),
            tenant_id: tenant.then(StringUuid::new_v4),
            role,
            email: "someone@example.com".to_string(),
            name: "Someone".to_string(),
        }
    }

    #[test]
    fn test_signed_out() {
        assert_eq!(resolve_view(None), PortalView::SignedOut);
    }

    #[test]
    fn test_organization_pending() {
        let u = user(false, None);
        assert_eq!(resolve_view(Some(&u)), PortalView::OrganizationPending);
    }

    #[test]
    fn test_each_role_routes_to_its_dashboard() {
        let cases = [
            (OrgRole::Admin, PortalView::Admin),
            (OrgRole::Manager, PortalView::Manager),
            (OrgRole::Client, PortalView::ClientPortal),
            (OrgRole::Member, PortalView::Member),
            (OrgRole::NonMember, PortalView::NonMember),
        ];
        for (role, expected) in cases {
            let u = user(true, Some(role));
            assert_eq!(resolve_view(Some(&u)), expected);
        }
    }

    #[test]
    fn test_unknown_role_renders_permission_denied() {
        let u = user(true, None);
        assert_eq!(
            resolve_view(Some(&u)),
            PortalView::PermissionDenied {
                required_role: "Any valid role".to_string()
            }
        );
    }

    #[test]
    fn test_view_serialization_tag() {
        let json = serde_json::to_string(&PortalView::Admin).unwrap();
        assert_eq!(json, "{\"view\":\"admin\"}");

        let denied = serde_json::to_string(&PortalView::PermissionDenied {
            required_role: "Any valid role".to_string(),
        })
        .unwrap();
        assert!(denied.contains("permission_denied"));
        assert!(denied.contains("Any valid role"));
    }
}
