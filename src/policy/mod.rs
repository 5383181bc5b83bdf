//! Centralized authorization policy
//!
//! Every tenant-scoped operation resolves the caller through
//! [`authorize`] before touching data. This is the only place a role is
//! compared against a requirement; handlers and services never repeat
//! the check inline.

use crate::domain::{OrgRole, StringUuid};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;

/// Staff operations: dashboards, rosters, estimates, the shop floor.
pub const STAFF: &[OrgRole] = &[OrgRole::Member];

/// Management operations: settings, estimate approval, job sign-off.
pub const MANAGEMENT: &[OrgRole] = &[OrgRole::Manager];

/// Operations shared between staff and the customer portal: chat,
/// assessments, reports.
pub const STAFF_OR_CLIENT: &[OrgRole] = &[OrgRole::Member, OrgRole::Client];

/// The caller's resolved tenant context. Every repository call scopes
/// its reads and writes to `tenant_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub user_id: String,
    pub tenant_id: StringUuid,
    pub role: OrgRole,
    pub email: String,
    pub name: String,
}

/// Decide whether the caller may perform an operation guarded by
/// `required` and, if so, resolve their tenant context.
///
/// Rules, in order:
/// 1. no organization on the token -> Unauthorized (invalid token format)
/// 2. Admin -> allowed for any requirement
/// 3. a Member requirement is satisfied by Member, Manager, or Admin
/// 4. any other requirement needs an exact role match
/// 5. unknown roles always deny
pub fn authorize(auth: &AuthUser, required: &[OrgRole]) -> Result<TenantContext> {
    let tenant_id = auth.tenant_id.ok_or_else(|| {
        AppError::Unauthorized("Invalid token format: missing organization claims".to_string())
    })?;

    let role = match auth.role {
        Some(role) => role,
        None => return Err(insufficient_permission(required)),
    };

    let allowed = role == OrgRole::Admin
        || (required.contains(&OrgRole::Member)
            && matches!(role, OrgRole::Member | OrgRole::Manager | OrgRole::Admin))
        || required.contains(&role);

    if !allowed {
        return Err(insufficient_permission(required));
    }

    Ok(TenantContext {
        user_id: auth.user_id.clone(),
        tenant_id,
        role,
        email: auth.email.clone(),
        name: auth.name.clone(),
    })
}

fn insufficient_permission(required: &[OrgRole]) -> AppError {
    let names = required
        .iter()
        .map(|r| r.display_name())
        .collect::<Vec<_>>()
        .join(", ");
    AppError::Forbidden(format!("Access denied: requires one of [{}]", names))
}
