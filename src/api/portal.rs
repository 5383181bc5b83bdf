//! Portal dispatch endpoints
//!
//! `/api/v1/portal` resolves which dashboard the caller should see.
//! The `/dashboard`, `/admin`, `/manager`, and `/client` pages echo the
//! same resolution; the route guard has already enforced their
//! role requirements before these handlers run.

use crate::api::SuccessResponse;
use crate::error::Result;
use crate::middleware::auth::{AuthUser, OptionalAuth};
use crate::portal::{resolve_view, PortalView};
use axum::{response::IntoResponse, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PortalResponse {
    #[serde(flatten)]
    pub view: PortalView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Resolve the caller's portal view; signed-out callers are not an error
pub async fn resolve(OptionalAuth(auth): OptionalAuth) -> Result<impl IntoResponse> {
    let view = resolve_view(auth.as_ref());
    let display_name = auth.map(|u| u.name);
    Ok(Json(SuccessResponse::new(PortalResponse {
        view,
        display_name,
    })))
}

/// Guarded page-data endpoint shared by the four dashboard prefixes
pub async fn area(auth: AuthUser) -> Result<impl IntoResponse> {
    let view = resolve_view(Some(&auth));
    Ok(Json(SuccessResponse::new(PortalResponse {
        view,
        display_name: Some(auth.name),
    })))
}
