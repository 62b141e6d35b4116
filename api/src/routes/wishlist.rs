//! Wishlist route handlers

use actix_web::{web, HttpResponse};

use stazy_shared::types::{ApiResponse, MessageResponse};

use crate::dto::wishlist::{
    WishlistCheckResponse, WishlistCountResponse, WishlistItemResponse, WishlistTargetRequest,
};
use crate::handlers::{validated, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

/// Mount `/wishlist` routes
pub fn configure(cfg: &mut web::ServiceConfig, jwt: JwtAuth) {
    cfg.service(
        web::scope("/wishlist")
            .wrap(jwt)
            .route("/add", web::post().to(add))
            .route("/remove", web::delete().to(remove))
            .route("/items", web::get().to(items))
            .route("/count", web::get().to(count))
            .route("/check", web::get().to(check)),
    );
}

/// Handler for POST /api/wishlist/add
pub async fn add(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<WishlistTargetRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;

    let item = state
        .wishlist_service
        .add(&auth.email, &request.item_type, request.entity_id)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(WishlistItemResponse::from(item))))
}

/// Handler for DELETE /api/wishlist/remove?entityId=..&itemType=..
pub async fn remove(
    auth: AuthContext,
    state: web::Data<AppState>,
    query: web::Query<WishlistTargetRequest>,
) -> Result<HttpResponse, ApiError> {
    let query = validated(query.into_inner())?;

    state
        .wishlist_service
        .remove(&auth.email, &query.item_type, query.entity_id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok("Removed from wishlist")))
}

/// Handler for GET /api/wishlist/items
pub async fn items(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let items: Vec<WishlistItemResponse> = state
        .wishlist_service
        .list(&auth.email)
        .await?
        .into_iter()
        .map(WishlistItemResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(items)))
}

/// Handler for GET /api/wishlist/count
pub async fn count(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let count = state.wishlist_service.count(&auth.email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(WishlistCountResponse { count })))
}

/// Handler for GET /api/wishlist/check?entityId=..&itemType=..
pub async fn check(
    auth: AuthContext,
    state: web::Data<AppState>,
    query: web::Query<WishlistTargetRequest>,
) -> Result<HttpResponse, ApiError> {
    let query = validated(query.into_inner())?;

    let in_wishlist = state
        .wishlist_service
        .contains(&auth.email, &query.item_type, query.entity_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(WishlistCheckResponse { in_wishlist })))
}
