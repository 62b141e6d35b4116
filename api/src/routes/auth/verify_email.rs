use actix_web::{web, HttpResponse};

use stazy_shared::types::ApiResponse;

use crate::dto::auth::{VerificationSentResponse, VerifyEmailRequest};
use crate::handlers::{validated, ApiError};
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/auth/verify-email
///
/// Checks the mailed code for the authenticated account and returns the
/// updated profile.
pub async fn verify_email(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<VerifyEmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;

    let profile = state
        .auth_service
        .verify_email(&auth.email, &request.code)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(profile).with_message("Email verified")))
}

/// Handler for POST /api/auth/resend-verification
pub async fn resend_verification(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let expires_at = state
        .auth_service
        .send_email_verification(&auth.email)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(VerificationSentResponse {
        message: "Verification code sent".to_string(),
        expires_at,
    })))
}
