//! Organization roles
//!
//! The identity provider encodes the caller's role inside their
//! organization as an `org:*` claim string. The string is parsed into
//! this closed enumeration exactly once, at token extraction; everything
//! downstream works with the enum. Unknown strings parse to `None` and
//! fail closed wherever a role is required.

use serde::{Deserialize, Serialize};

/// The caller's permission level within their tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrgRole {
    /// Business owner; satisfies every role requirement.
    Admin,
    /// Shop manager; approves estimates and closes out jobs.
    Manager,
    /// Customer of the detailing business.
    Client,
    /// Verified staff member.
    Member,
    /// Signed in, not yet attached to an organization.
    NonMember,
}

impl OrgRole {
    /// Parse the raw claim string from the identity provider.
    /// Returns `None` for anything outside the known set.
    pub fn from_claim(claim: &str) -> Option<Self> {
        match claim {
            "org:admin" => Some(OrgRole::Admin),
            "org:manager_organization" => Some(OrgRole::Manager),
            "org:clients" => Some(OrgRole::Client),
            "org:member" => Some(OrgRole::Member),
            "org:non_member" => Some(OrgRole::NonMember),
            _ => None,
        }
    }

    /// The raw claim string this role corresponds to.
    pub fn as_claim(&self) -> &'static str {
        match self {
            OrgRole::Admin => "org:admin",
            OrgRole::Manager => "org:manager_organization",
            OrgRole::Client => "org:clients",
            OrgRole::Member => "org:member",
            OrgRole::NonMember => "org:non_member",
        }
    }

    /// Human-readable name used in access-denied messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            OrgRole::Admin => "Admin",
            OrgRole::Manager => "Manager",
            OrgRole::Client => "Client",
            OrgRole::Member => "Member",
            OrgRole::NonMember => "NonMember",
        }
    }
}

impl std::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
