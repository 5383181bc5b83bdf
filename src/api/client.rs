//! Client roster API handlers

use crate::api::SuccessResponse;
use crate::domain::{AddVehicleInput, CreateClientInput, StringUuid};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Create a client contact
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateClientInput>,
) -> Result<impl IntoResponse> {
    let client = state.client_service.create_client(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(client))))
}

/// List the tenant's clients
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> Result<impl IntoResponse> {
    let clients = state.client_service.list_clients(&auth).await?;
    Ok(Json(SuccessResponse::new(clients)))
}

/// Register a vehicle under a client
pub async fn add_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AddVehicleInput>,
) -> Result<impl IntoResponse> {
    let vehicle = state.client_service.add_vehicle(&auth, input).await?;
    Ok((StatusCode::CREATED, Json(SuccessResponse::new(vehicle))))
}

/// List a client's vehicles
pub async fn list_vehicles(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(client_id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let vehicles = state.client_service.list_vehicles(&auth, client_id).await?;
    Ok(Json(SuccessResponse::new(vehicles)))
}
