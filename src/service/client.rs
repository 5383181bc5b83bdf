//! Client roster business logic

use crate::domain::{AddVehicleInput, Client, CreateClientInput, StringUuid, Vehicle};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::repository::{ClientRepository, VehicleRepository};
use std::sync::Arc;
use validator::Validate;

pub struct ClientService<CR: ClientRepository, VR: VehicleRepository> {
    client_repo: Arc<CR>,
    vehicle_repo: Arc<VR>,
}

impl<CR: ClientRepository, VR: VehicleRepository> ClientService<CR, VR> {
    pub fn new(client_repo: Arc<CR>, vehicle_repo: Arc<VR>) -> Self {
        Self {
            client_repo,
            vehicle_repo,
        }
    }

    pub async fn create_client(&self, auth: &AuthUser, input: CreateClientInput) -> Result<Client> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        input.validate()?;
        self.client_repo.create(ctx.tenant_id, &input).await
    }

    pub async fn list_clients(&self, auth: &AuthUser) -> Result<Vec<Client>> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        self.client_repo.list_by_tenant(ctx.tenant_id).await
    }

    pub async fn add_vehicle(&self, auth: &AuthUser, input: AddVehicleInput) -> Result<Vehicle> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        input.validate()?;

        self.client_repo
            .find_by_id(ctx.tenant_id, input.client_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Client {} not found", input.client_id)))?;

        self.vehicle_repo.create(ctx.tenant_id, &input).await
    }

    pub async fn list_vehicles(&self, auth: &AuthUser, client_id: StringUuid) -> Result<Vec<Vehicle>> {
        let ctx = policy::authorize(auth, policy::STAFF_OR_CLIENT)?;
        self.vehicle_repo.list_by_client(ctx.tenant_id, client_id).await
    }
}
