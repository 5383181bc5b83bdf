//! Data access layer (Repository pattern)
//!
//! Every accessor for tenant-owned data takes the caller's tenant id
//! and binds it into the query; there is no unscoped path to another
//! tenant's rows. The one deliberate exception is
//! [`EstimateRepository::find_by_id`], which services use to tell a
//! missing parent apart from a cross-tenant one.

pub mod appointment;
pub mod assessment;
pub mod client;
pub mod estimate;
pub mod message;
pub mod ongoing_service;
pub mod report;
pub mod tenant;
pub mod vehicle;

pub use appointment::AppointmentRepository;
pub use assessment::AssessmentRepository;
pub use client::ClientRepository;
pub use estimate::EstimateRepository;
pub use message::MessageRepository;
pub use ongoing_service::OngoingServiceRepository;
pub use report::ReportRepository;
pub use tenant::TenantRepository;
pub use vehicle::VehicleRepository;
