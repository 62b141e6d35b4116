use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;

use stazy_api::telemetry::init_tracing;
use stazy_api::{create_app, AppState, Repositories};
use stazy_core::services::{
    AuthServiceConfig, BookingPolicy, CredentialHasher, CredentialHasherConfig, TokenService,
};
use stazy_infra::database::{
    DatabasePool, MySqlBookingRepository, MySqlListingRepository, MySqlMessageRepository,
    MySqlUserRepository, MySqlWishlistRepository,
};
use stazy_infra::mail::create_mail_service;
use stazy_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting Stazy API server");

    let token_service = TokenService::new(config.jwt.clone().into())
        .context("JWT_SECRET is not usable as a signing key")?;

    let pool = DatabasePool::new(config.database.clone())
        .await
        .context("Failed to connect to the database")?;
    if config.database.run_migrations {
        pool.run_migrations()
            .await
            .context("Failed to apply database migrations")?;
    }

    let db = pool.get_pool().clone();
    let repositories = Repositories {
        users: Arc::new(MySqlUserRepository::new(db.clone())),
        listings: Arc::new(MySqlListingRepository::new(db.clone())),
        bookings: Arc::new(MySqlBookingRepository::new(db.clone())),
        wishlist: Arc::new(MySqlWishlistRepository::new(db.clone())),
        messages: Arc::new(MySqlMessageRepository::new(db)),
    };

    let mail_service = create_mail_service(&config.mail).context("Failed to set up mail delivery")?;

    let state = AppState::new(
        repositories,
        mail_service,
        Arc::new(token_service),
        Arc::new(CredentialHasher::new(CredentialHasherConfig::default())),
        AuthServiceConfig::from_otp(&config.otp),
        BookingPolicy::default(),
    )
    .with_health_probe(Arc::new(pool.clone()));
    let state = web::Data::new(state);

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let cors = config.cors.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, environment))
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.run().await?;

    tracing::info!(stats = %pool.get_statistics(), "Server stopped");
    pool.close().await;
    Ok(())
}
