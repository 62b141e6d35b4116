//! Booking route handlers
//!
//! Every booking endpoint requires a bearer token; the acting user is
//! always the token subject.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use stazy_shared::types::{ApiResponse, MessageResponse};

use crate::dto::booking::{BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest};
use crate::handlers::{validated, ApiError};
use crate::middleware::{AuthContext, JwtAuth};
use crate::state::AppState;

/// Mount `/bookings` routes
pub fn configure(cfg: &mut web::ServiceConfig, jwt: JwtAuth) {
    cfg.service(
        web::scope("/bookings")
            .wrap(jwt)
            .route("", web::post().to(create_booking))
            .route("/status", web::patch().to(update_status))
            .route("/my-bookings", web::get().to(my_bookings))
            .route("/host-bookings", web::get().to(host_bookings))
            .route("/property/{id}", web::get().to(property_bookings))
            .route("/{id}", web::delete().to(delete_booking)),
    );
}

fn to_responses(bookings: Vec<stazy_core::Booking>) -> Vec<BookingResponse> {
    bookings.into_iter().map(BookingResponse::from).collect()
}

/// Handler for POST /api/bookings
pub async fn create_booking(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;

    let booking = state
        .booking_service
        .create_booking(&auth.email, request.into())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// Handler for PATCH /api/bookings/status
///
/// Only the owner of the booked listing may change the status.
pub async fn update_status(
    auth: AuthContext,
    state: web::Data<AppState>,
    request: web::Json<UpdateBookingStatusRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = validated(request.into_inner())?;

    let booking = state
        .booking_service
        .update_status(request.booking_id, &request.status, &auth.email)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// Handler for GET /api/bookings/my-bookings
pub async fn my_bookings(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let bookings = state.booking_service.bookings_for_user(&auth.email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(to_responses(bookings))))
}

/// Handler for GET /api/bookings/host-bookings
pub async fn host_bookings(
    auth: AuthContext,
    state: web::Data<AppState>,
) -> Result<HttpResponse, ApiError> {
    let bookings = state.booking_service.bookings_for_host(&auth.email).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(to_responses(bookings))))
}

/// Handler for GET /api/bookings/property/{id}
pub async fn property_bookings(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let bookings = state
        .booking_service
        .bookings_for_property(path.into_inner(), &auth.email)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(to_responses(bookings))))
}

/// Handler for DELETE /api/bookings/{id}
pub async fn delete_booking(
    auth: AuthContext,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state
        .booking_service
        .delete_booking(path.into_inner(), &auth.email)
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Booking deleted")))
}
