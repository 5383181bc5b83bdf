//! Tenant API handlers

use crate::api::SuccessResponse;
use crate::domain::UpdateTenantSettingsInput;
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

/// Return the caller's tenant, provisioning it on first sign-in
pub async fn ensure(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse> {
    let tenant = state.tenant_service.ensure_for_owner(&auth).await?;
    Ok((StatusCode::OK, Json(SuccessResponse::new(tenant))))
}

/// Get the caller's tenant
pub async fn get(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse> {
    let tenant = state.tenant_service.get(&auth).await?;
    Ok(Json(SuccessResponse::new(tenant)))
}

/// Update the caller's tenant settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateTenantSettingsInput>,
) -> Result<impl IntoResponse> {
    let tenant = state.tenant_service.update_settings(&auth, input).await?;
    Ok(Json(SuccessResponse::new(tenant)))
}
