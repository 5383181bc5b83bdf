//! Domain models

pub mod appointment;
pub mod assessment;
pub mod client;
pub mod common;
pub mod estimate;
pub mod message;
pub mod ongoing_service;
pub mod pricing;
pub mod report;
pub mod role;
pub mod tenant;
pub mod vehicle;

pub use appointment::{
    appointment_end, Appointment, AppointmentStatus, NewAppointment, ScheduleAppointmentInput,
};
pub use assessment::{NewAssessment, VehicleAssessment};
pub use client::{Client, CreateClientInput};
pub use common::StringUuid;
pub use estimate::{Estimate, EstimateStatus, GenerateEstimateInput, NewEstimate};
pub use message::{Message, MessageSender, NewMessage, SendMessageInput};
pub use ongoing_service::{JobStatus, NewOngoingService, OngoingService, StartServiceInput};
pub use pricing::{compute_total, CostItem, PriceEntry, SizeMultiplier};
pub use report::{GenerateReportInput, NewServiceReport, ServiceReport};
pub use role::OrgRole;
pub use tenant::{CreateTenantInput, Tenant, UpdateTenantSettingsInput};
pub use vehicle::{AddVehicleInput, Vehicle, VehicleSize};
