//! Business logic layer
//!
//! Every operation here resolves the caller through the central policy
//! first, then works exclusively inside the resolved tenant partition.

pub mod appointment;
pub mod assessment;
pub mod client;
pub mod estimate;
pub mod message;
pub mod report;
pub mod tenant;
pub mod workshop;

pub use appointment::AppointmentService;
pub use assessment::{AssessmentService, AssessmentView};
pub use client::ClientService;
pub use estimate::EstimateService;
pub use message::MessageService;
pub use report::{ReportService, ReportView};
pub use tenant::TenantService;
pub use workshop::WorkshopService;
