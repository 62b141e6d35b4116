//! Listing management route handlers
//!
//! `{kind}` is PROPERTY, SERVICE or EXPERIENCE in any case. Every write is
//! restricted to the listing's owner.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use stazy_core::domain::entities::listing::{Listing, ListingKind};
use stazy_core::errors::{DomainError, ListingError};
use stazy_shared::types::{ApiResponse, MessageResponse};

use crate::dto::listing::{ListingRequest, ListingResponse};
use crate::handlers::{validated, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

/// Mount `/listings` routes
pub fn configure(cfg: &mut web::ServiceConfig, jwt: JwtAuth) {
    cfg.service(
        web::scope("/listings")
            .wrap(jwt)
            .route("/{kind}", web::post().to(create_listing))
            .route("/{kind}/mine", web::get().to(my_listings))
            .route("/{kind}/{id}", web::put().to(update_listing))
            .route("/{kind}/{id}", web::delete().to(delete_listing))
            .route(
                "/{kind}/{id}/toggle-availability",
                web::patch().to(toggle_availability),
            ),
    );
}

fn parse_kind(kind: &str) -> Result<ListingKind, ApiError> {
    kind.parse()
        .map_err(|_| ApiError::from(DomainError::from(ListingError::InvalidKind)))
}

fn ok(listing: Listing) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(ListingResponse::from(listing)))
}

/// Handler for POST /api/listings/{kind}
pub async fn create_listing(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<ListingRequest>,
) -> Result<HttpResponse, ApiError> {
    let kind = path.into_inner();
    let draft = validated(request.into_inner())?.into_draft(parse_kind(&kind)?)?;

    let listing = state
        .listing_service
        .create(&auth.email, &kind, draft)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(ListingResponse::from(listing))))
}

/// Handler for GET /api/listings/{kind}/mine
pub async fn my_listings(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let listings: Vec<ListingResponse> = state
        .listing_service
        .owned_by(&auth.email, &path.into_inner())
        .await?
        .into_iter()
        .map(ListingResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(listings)))
}

/// Handler for PUT /api/listings/{kind}/{id}
pub async fn update_listing(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
    request: web::Json<ListingRequest>,
) -> Result<HttpResponse, ApiError> {
    let (kind, id) = path.into_inner();
    let draft = validated(request.into_inner())?.into_draft(parse_kind(&kind)?)?;

    let listing = state
        .listing_service
        .update(&auth.email, &kind, id, draft)
        .await?;

    Ok(ok(listing))
}

/// Handler for PATCH /api/listings/{kind}/{id}/toggle-availability
pub async fn toggle_availability(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (kind, id) = path.into_inner();
    let listing = state
        .listing_service
        .toggle_availability(&auth.email, &kind, id)
        .await?;

    Ok(ok(listing))
}

/// Handler for DELETE /api/listings/{kind}/{id}
pub async fn delete_listing(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<(String, Uuid)>,
) -> Result<HttpResponse, ApiError> {
    let (kind, id) = path.into_inner();
    state
        .listing_service
        .delete(&auth.email, &kind, id)
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::ok("Listing deleted")))
}
