use actix_web::{web, HttpResponse};

use stazy_shared::types::ApiResponse;

use crate::dto::auth::LoginRequest;
use crate::handlers::{validated, ApiError};
use crate::state::AppState;

/// Handler for POST /api/auth/login
///
/// Unknown emails and wrong passwords both answer 401
/// `invalid_credentials`.
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;

    let response = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
