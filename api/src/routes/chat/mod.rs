//! Chat endpoints: REST history plus a live WebSocket feed

pub mod rest;
pub mod ws;

use actix_web::web;

use crate::middleware::JwtAuth;

pub use rest::{history, threads};
pub use ws::chat_socket;

/// Mount `/chats` routes
///
/// The socket authenticates from its query string, so it sits outside the
/// bearer middleware.
pub fn configure(cfg: &mut web::ServiceConfig, jwt: JwtAuth) {
    cfg.service(
        web::scope("/chats")
            .route("/ws", web::get().to(chat_socket))
            .route("/threads", web::get().to(threads).wrap(jwt.clone()))
            .route("/{other_email}", web::get().to(history).wrap(jwt)),
    );
}
