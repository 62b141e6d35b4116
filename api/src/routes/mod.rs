//! Route table

pub mod auth;
pub mod bookings;
pub mod chat;
pub mod health;
pub mod listings;
pub mod wishlist;

use actix_web::web;

use crate::middleware::JwtAuth;

/// Mount every `/api` route
pub fn configure_api(cfg: &mut web::ServiceConfig, jwt: JwtAuth) {
    auth::configure(cfg, jwt.clone());
    bookings::configure(cfg, jwt.clone());
    listings::configure(cfg, jwt.clone());
    wishlist::configure(cfg, jwt.clone());
    chat::configure(cfg, jwt);
}
