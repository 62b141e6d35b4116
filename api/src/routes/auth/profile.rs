use actix_web::{web, HttpResponse};

use stazy_shared::types::ApiResponse;

use crate::dto::auth::CompleteProfileRequest;
use crate::handlers::{validated, ApiError};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/auth/complete-profile
pub async fn complete_profile(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<CompleteProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;

    let profile = state
        .auth_service
        .complete_profile(
            &auth.email,
            &request.first_name,
            &request.last_name,
            &request.phone_number,
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}

/// Handler for GET /api/auth/profile
pub async fn profile(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let profile = state.auth_service.profile(&auth.email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}
