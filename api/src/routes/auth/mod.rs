//! Authentication route handlers
//!
//! This module contains the account endpoints:
//! - Signup and login
//! - Email verification (verify and resend)
//! - Password reset (request and complete)
//! - Profile completion and lookup

pub mod login;
pub mod password;
pub mod profile;
pub mod signup;
pub mod verify_email;

use actix_web::web;

use crate::middleware::JwtAuth;

pub use login::login;
pub use password::{forgot_password, reset_password};
pub use profile::{complete_profile, profile};
pub use signup::signup;
pub use verify_email::{resend_verification, verify_email};

/// Mount `/auth` routes
pub fn configure(cfg: &mut web::ServiceConfig, jwt: JwtAuth) {
    cfg.service(
        web::scope("/auth")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/forgot-password", web::post().to(forgot_password))
            .route("/reset-password", web::post().to(reset_password))
            .route(
                "/verify-email",
                web::post().to(verify_email).wrap(jwt.clone()),
            )
            .route(
                "/resend-verification",
                web::post().to(resend_verification).wrap(jwt.clone()),
            )
            .route(
                "/complete-profile",
                web::post().to(complete_profile).wrap(jwt.clone()),
            )
            .route("/profile", web::get().to(profile).wrap(jwt)),
    );
}
