use actix_web::{web, HttpResponse};

use stazy_shared::types::ApiResponse;

use crate::dto::chat::{ChatMessageResponse, ChatThreadResponse};
use crate::handlers::ApiError;
use crate::middleware::AuthContext;
use crate::state::AppState;

/// Handler for GET /api/chats/threads
pub async fn threads(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let threads: Vec<ChatThreadResponse> = state
        .chat_service
        .threads(&auth.email)
        .await?
        .into_iter()
        .map(|email| ChatThreadResponse { email })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(threads)))
}

/// Handler for GET /api/chats/{other_email}
pub async fn history(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let messages: Vec<ChatMessageResponse> = state
        .chat_service
        .history(&auth.email, &path.into_inner())
        .await?
        .into_iter()
        .map(ChatMessageResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(messages)))
}
