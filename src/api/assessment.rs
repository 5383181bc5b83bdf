//! Vehicle assessment API handlers

use crate::api::SuccessResponse;
use crate::domain::StringUuid;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::server::AppState;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

/// Upload a vehicle photo and run the assessment pipeline.
///
/// Multipart fields: `client_id`, `vehicle_id`, `image`.
pub async fn process_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut client_id: Option<StringUuid> = None;
    let mut vehicle_id: Option<StringUuid> = None;
    let mut image: Option<(Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("client_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid client_id field: {}", e)))?;
                client_id = Some(
                    text.parse()
                        .map_err(|_| AppError::BadRequest("client_id must be a UUID".to_string()))?,
                );
            }
            Some("vehicle_id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid vehicle_id field: {}", e)))?;
                vehicle_id = Some(
                    text.parse()
                        .map_err(|_| AppError::BadRequest("vehicle_id must be a UUID".to_string()))?,
                );
            }
            Some("image") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("image/jpeg")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid image field: {}", e)))?;
                image = Some((bytes.to_vec(), content_type));
            }
            _ => {}
        }
    }

    let client_id =
        client_id.ok_or_else(|| AppError::BadRequest("Missing client_id field".to_string()))?;
    let vehicle_id =
        vehicle_id.ok_or_else(|| AppError::BadRequest("Missing vehicle_id field".to_string()))?;
    let (image_bytes, content_type) =
        image.ok_or_else(|| AppError::BadRequest("Missing image field".to_string()))?;

    let assessment = state
        .assessment_service
        .process_image(&auth, client_id, vehicle_id, &image_bytes, &content_type)
        .await?;

    Ok((StatusCode::CREATED, Json(SuccessResponse::new(assessment))))
}

/// Fetch an assessment with its image URL
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StringUuid>,
) -> Result<impl IntoResponse> {
    let view = state.assessment_service.get(&auth, id).await?;
    Ok(Json(SuccessResponse::new(view)))
}
