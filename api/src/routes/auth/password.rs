use actix_web::{web, HttpResponse};

use stazy_shared::types::MessageResponse;

use crate::dto::auth::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::handlers::{validated, ApiError};
use crate::state::AppState;

/// Handler for POST /api/auth/forgot-password
///
/// Always answers 200 for a well-formed email so callers cannot probe
/// which addresses have accounts.
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;

    state.auth_service.send_password_reset(&request.email).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok(
        "If an account exists for this email, a reset code has been sent",
    )))
}

/// Handler for POST /api/auth/reset-password
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;

    state
        .auth_service
        .reset_password(&request.email, &request.code, &request.new_password)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok("Password has been reset")))
}
