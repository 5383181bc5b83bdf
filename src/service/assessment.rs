//! AI vehicle assessment business logic
//!
//! Pipeline per uploaded photo: store the blob, ask the vision model
//! for a description/condition/recommendations, embed the result for
//! similarity search, persist the assessment row. The row is immutable
//! afterwards.

use crate::domain::{NewAssessment, StringUuid, VehicleAssessment};
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::policy;
use crate::repository::{AssessmentRepository, VehicleRepository};
use crate::storage::BlobStore;
use crate::vision::VisionApi;
use serde::Serialize;
use std::sync::Arc;

/// Assessment plus the resolvable image URL the dashboards display
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    #[serde(flatten)]
    pub assessment: VehicleAssessment,
    pub image_url: String,
}

pub struct AssessmentService<AR, VR, V, B>
where
    AR: AssessmentRepository,
    VR: VehicleRepository,
    V: VisionApi + ?Sized,
    B: BlobStore + ?Sized,
{
    assessment_repo: Arc<AR>,
    vehicle_repo: Arc<VR>,
    vision: Arc<V>,
    blobs: Arc<B>,
}

impl<AR, VR, V, B> AssessmentService<AR, VR, V, B>
where
    AR: AssessmentRepository,
    VR: VehicleRepository,
    V: VisionApi + ?Sized,
    B: BlobStore + ?Sized,
{
    pub fn new(
        assessment_repo: Arc<AR>,
        vehicle_repo: Arc<VR>,
        vision: Arc<V>,
        blobs: Arc<B>,
    ) -> Self {
        Self {
            assessment_repo,
            vehicle_repo,
            vision,
            blobs,
        }
    }

    /// Analyze an uploaded vehicle photo and persist the assessment
    pub async fn process_image(
        &self,
        auth: &AuthUser,
        client_id: StringUuid,
        vehicle_id: StringUuid,
        image: &[u8],
        content_type: &str,
    ) -> Result<VehicleAssessment> {
        let ctx = policy::authorize(auth, policy::STAFF_OR_CLIENT)?;

        let vehicle = self
            .vehicle_repo
            .find_by_id(ctx.tenant_id, vehicle_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {} not found", vehicle_id)))?;

        if vehicle.client_id != client_id {
            return Err(AppError::Validation(
                "Vehicle does not belong to the given client".to_string(),
            ));
        }

        let image_ref = self.blobs.store(image, content_type).await?;

        let insight = self.vision.analyze_image(image).await?;
        let embedding_input = format!(
            "{}\n{}\n{}",
            insight.description,
            insight.condition,
            insight.recommended_services.join("\n")
        );
        let embedding = self.vision.embed(&embedding_input).await?;

        self.assessment_repo
            .create(&NewAssessment {
                tenant_id: ctx.tenant_id,
                client_id,
                vehicle_id,
                image_ref,
                description: insight.description,
                condition: insight.condition,
                recommended_services: insight.recommended_services,
                embedding,
            })
            .await
    }

    /// An assessment with its display URL; cross-tenant ids resolve to
    /// NotFound because the lookup is scoped to the caller's tenant.
    pub async fn get(&self, auth: &AuthUser, id: StringUuid) -> Result<AssessmentView> {
        let ctx = policy::authorize(auth, policy::STAFF_OR_CLIENT)?;

        let assessment = self
            .assessment_repo
            .find_by_id(ctx.tenant_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Assessment {} not found", id)))?;

        let image_url = self.blobs.url_for(&assessment.image_ref);
        Ok(AssessmentView {
            assessment,
            image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OrgRole, Vehicle, VehicleSize};
    use crate::repository::assessment::MockAssessmentRepository;
    use crate::repository::vehicle::MockVehicleRepository;
    use crate::storage::MockBlobStore;
    use crate::vision::{MockVisionApi, VehicleInsight};
    use chrono::Utc;
    use mockall::predicate::*;

    fn staff_user(tenant_id: StringUuid) -> AuthUser {
        AuthUser {
            user_id: "user_staff".to_string(),
            tenant_id: Some(tenant_id),
            role: Some(OrgRole::Member),
            email: "staff@example.com".to_string(),
            name: "Staff".to_string(),
        }
    }

    fn assessment_from(input: &NewAssessment, id: StringUuid) -> VehicleAssessment {
        VehicleAssessment {
            id,
            tenant_id: input.tenant_id,
            client_id: input.client_id,
            vehicle_id: input.vehicle_id,
            image_ref: input.image_ref.clone(),
            description: input.description.clone(),
            condition: input.condition.clone(),
            recommended_services: input.recommended_services.clone(),
            embedding: input.embedding.clone(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_process_image_runs_the_full_pipeline() {
        let tenant_id = StringUuid::new_v4();
        let client_id = StringUuid::new_v4();
        let vehicle_id = StringUuid::new_v4();

        let mut vehicle_repo = MockVehicleRepository::new();
        vehicle_repo
            .expect_find_by_id()
            .with(eq(tenant_id), eq(vehicle_id))
            .returning(move |tid, vid| {
                Ok(Some(Vehicle {
                    id: vid,
                    tenant_id: tid,
                    client_id,
                    make: "Subaru".to_string(),
                    model: "Outback".to_string(),
                    year: 2018,
                    size: VehicleSize::Medium,
                }))
            });

        let mut blobs = MockBlobStore::new();
        blobs
            .expect_store()
            .withf(|bytes, content_type| bytes == b"jpeg" && content_type == "image/jpeg")
            .returning(|_, _| Ok("img-ref.jpg".to_string()));

        let mut vision = MockVisionApi::new();
        vision.expect_analyze_image().returning(|_| {
            Ok(VehicleInsight {
                description: "Green wagon, muddy".to_string(),
                condition: "fair".to_string(),
                recommended_services: vec!["undercarriage wash".to_string()],
            })
        });
        vision
            .expect_embed()
            .withf(|text: &str| text.contains("Green wagon") && text.contains("undercarriage"))
            .returning(|_| Ok(vec![0.1, 0.2]));

        let mut assessment_repo = MockAssessmentRepository::new();
        assessment_repo
            .expect_create()
            .withf(move |input: &NewAssessment| {
                input.tenant_id == tenant_id
                    && input.image_ref == "img-ref.jpg"
                    && input.embedding == vec![0.1, 0.2]
            })
            .returning(|input| Ok(assessment_from(input, StringUuid::new_v4())));

        let service = AssessmentService::new(
            Arc::new(assessment_repo),
            Arc::new(vehicle_repo),
            Arc::new(vision),
            Arc::new(blobs),
        );
        let assessment = service
            .process_image(
                &staff_user(tenant_id),
                client_id,
                vehicle_id,
                b"jpeg",
                "image/jpeg",
            )
            .await
            .unwrap();

        assert_eq!(assessment.condition, "fair");
    }

    #[tokio::test]
    async fn test_process_image_denied_for_non_member() {
        let tenant_id = StringUuid::new_v4();
        let mut assessment_repo = MockAssessmentRepository::new();
        assessment_repo.expect_create().times(0);
        let mut blobs = MockBlobStore::new();
        blobs.expect_store().times(0);

        let mut outsider = staff_user(tenant_id);
        outsider.role = Some(OrgRole::NonMember);

        let service = AssessmentService::new(
            Arc::new(assessment_repo),
            Arc::new(MockVehicleRepository::new()),
            Arc::new(MockVisionApi::new()),
            Arc::new(blobs),
        );
        let err = service
            .process_image(
                &outsider,
                StringUuid::new_v4(),
                StringUuid::new_v4(),
                b"jpeg",
                "image/jpeg",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_get_resolves_image_url() {
        let tenant_id = StringUuid::new_v4();
        let assessment_id = StringUuid::new_v4();

        let mut assessment_repo = MockAssessmentRepository::new();
        assessment_repo
            .expect_find_by_id()
            .with(eq(tenant_id), eq(assessment_id))
            .returning(move |tid, id| {
                Ok(Some(VehicleAssessment {
                    id,
                    tenant_id: tid,
                    client_id: StringUuid::new_v4(),
                    vehicle_id: StringUuid::new_v4(),
                    image_ref: "img.jpg".to_string(),
                    description: "desc".to_string(),
                    condition: "good".to_string(),
                    recommended_services: vec![],
                    embedding: vec![],
                    created_at: Utc::now(),
                }))
            });

        let mut blobs = MockBlobStore::new();
        blobs
            .expect_url_for()
            .with(eq("img.jpg"))
            .returning(|r| format!("http://localhost:8080/blobs/{}", r));

        let service = AssessmentService::new(
            Arc::new(assessment_repo),
            Arc::new(MockVehicleRepository::new()),
            Arc::new(MockVisionApi::new()),
            Arc::new(blobs),
        );
        let view = service
            .get(&staff_user(tenant_id), assessment_id)
            .await
            .unwrap();
        assert_eq!(view.image_url, "http://localhost:8080/blobs/img.jpg");
    }

    #[tokio::test]
    async fn test_get_missing_or_cross_tenant_is_not_found() {
        let tenant_id = StringUuid::new_v4();
        let mut assessment_repo = MockAssessmentRepository::new();
        assessment_repo
            .expect_find_by_id()
            .returning(|_, _| Ok(None));

        let service = AssessmentService::new(
            Arc::new(assessment_repo),
            Arc::new(MockVehicleRepository::new()),
            Arc::new(MockVisionApi::new()),
            Arc::new(MockBlobStore::new()),
        );
        let err = service
            .get(&staff_user(tenant_id), StringUuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
