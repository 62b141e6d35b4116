use actix_web::{web, HttpResponse};

use stazy_shared::types::ApiResponse;
use stazy_shared::validation::mask_email;

use crate::dto::auth::SignupRequest;
use crate::handlers::{validated, ApiError};
use crate::state::AppState;

/// Handler for POST /api/auth/signup
///
/// Creates an unverified account, mails a verification code and returns an
/// identity token right away.
///
/// ## Success (201 Created)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "token": "eyJ...",
///         "tokenType": "Bearer",
///         "expiresIn": 3600,
///         "email": "jane@example.com",
///         "emailVerified": false,
///         "profileCompleted": false
///     },
///     "timestamp": "2025-01-01T10:00:00Z"
/// }
/// ```
pub async fn signup(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;
    tracing::info!(email = %mask_email(&request.email), "Processing signup request");

    let response = state
        .auth_service
        .signup(&request.email, &request.password)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}
