//! Service report business logic
//!
//! A report is derived from an assessment: the performed services and
//! total cost are laid onto a PDF, the PDF goes to the blob store, and
//! the row records the document reference. Immutable once generated.

use crate::domain::{GenerateReportInput, NewServiceReport, ServiceReport, StringUuid};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::pdf::{self, ReportContent};
use crate::policy;
use crate::repository::{AssessmentRepository, ReportRepository};
use crate::storage::BlobStore;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

/// Report plus the resolvable document URL
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: ServiceReport,
    pub document_url: String,
}

pub struct ReportService<RR, AR, B>
where
    RR: ReportRepository,
    AR: AssessmentRepository,
    B: BlobStore + ?Sized,
{
    report_repo: Arc<RR>,
    assessment_repo: Arc<AR>,
    blobs: Arc<B>,
}

impl<RR, AR, B> ReportService<RR, AR, B>
where
    RR: ReportRepository,
    AR: AssessmentRepository,
    B: BlobStore + ?Sized,
{
    pub fn new(report_repo: Arc<RR>, assessment_repo: Arc<AR>, blobs: Arc<B>) -> Self {
        Self {
            report_repo,
            assessment_repo,
            blobs,
        }
    }

    /// Render and persist a report for an assessment in the caller's tenant
    pub async fn generate(
        &self,
        auth: &AuthUser,
        input: GenerateReportInput,
    ) -> Result<ServiceReport> {
        let ctx = policy::authorize(auth, policy::STAFF)?;
        input.validate()?;

        let assessment = self
            .assessment_repo
            .find_by_id(ctx.tenant_id, input.assessment_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Assessment {} not found", input.assessment_id))
            })?;

        let content = ReportContent {
            vehicle_description: &assessment.description,
            condition: &assessment.condition,
            services_performed: &input.services_performed,
            total_cost: input.total_cost,
        };
        let document = pdf::render_service_report(&content)?;
        let document_ref = self.blobs.store(&document, "application/pdf").await?;

        self.report_repo
            .create(&NewServiceReport {
                tenant_id: ctx.tenant_id,
                assessment_id: input.assessment_id,
                client_id: assessment.client_id,
                vehicle_id: assessment.vehicle_id,
                services_performed: input.services_performed,
                total_cost: input.total_cost,
                document_ref,
            })
            .await
    }

    /// A report with its document URL
    pub async fn get(&self, auth: &AuthUser, id: StringUuid) -> Result<ReportView> {
        let ctx = policy::authorize(auth, policy::STAFF_OR_CLIENT)?;

        let report = self
            .report_repo
            .find_by_id(ctx.tenant_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service report {} not found", id)))?;

        let document_url = self.blobs.url_for(&report.document_ref);
        Ok(ReportView {
            report,
            document_url,
        })
    }
}
