//! Shared fixtures for API integration tests
//!
//! Builds the real application over the in-memory repositories from
//! `stazy_core`, with a recording mail service.

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use stazy_api::{AppState, HealthProbe, Repositories};
use stazy_core::domain::entities::listing::{Experience, Listing, Property, ServiceOffer};
use stazy_core::domain::entities::user::User;
use stazy_core::repositories::{
    ListingRepository, MockBookingRepository, MockListingRepository, MockMessageRepository,
    MockUserRepository, MockWishlistRepository, UserRepository,
};
use stazy_core::services::{
    AuthServiceConfig, BookingPolicy, CredentialHasher, CredentialHasherConfig, MockMailService,
    TokenService, TokenServiceConfig,
};
use stazy_shared::config::{CorsConfig, Environment};

pub const SECRET: &str = "integration-test-secret-that-is-long-enough";
pub const GUEST: &str = "guest@example.com";
pub const HOST: &str = "host@example.com";
pub const STRANGER: &str = "stranger@example.com";

pub struct TestApp {
    pub state: web::Data<AppState>,
    pub mail: MockMailService,
    pub users: Arc<MockUserRepository>,
    pub listings: Arc<MockListingRepository>,
    pub tokens: Arc<TokenService>,
    pub property_id: Uuid,
    pub service_id: Uuid,
    pub experience_id: Uuid,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_probes(Vec::new()).await
    }

    /// Like [`TestApp::new`] with extra `/health` probes registered
    pub async fn with_probes(probes: Vec<Arc<dyn HealthProbe>>) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let listings = Arc::new(MockListingRepository::new());
        let mail = MockMailService::new();
        let tokens = Arc::new(
            TokenService::new(TokenServiceConfig {
                secret: SECRET.to_string(),
                ttl_seconds: 3600,
                issuer: "stazy-test".to_string(),
            })
            .unwrap(),
        );

        for email in [GUEST, HOST, STRANGER] {
            users
                .create(User::new(email.to_string(), "hash".to_string(), "salt".to_string()))
                .await
                .unwrap();
        }

        let property = Property {
            id: Uuid::new_v4(),
            title: "Lake cabin".to_string(),
            description: "Quiet cabin by the lake".to_string(),
            location: "Bled".to_string(),
            price: Decimal::from(100),
            weekend_price: None,
            category: "Cabins".to_string(),
            property_type: "Cabin".to_string(),
            max_guests: 4,
            host_email: HOST.to_string(),
            is_available: true,
            created_at: Utc::now(),
        };
        let offer = ServiceOffer {
            id: Uuid::new_v4(),
            title: "Airport pickup".to_string(),
            description: "Pickup from the airport".to_string(),
            location: "Ljubljana".to_string(),
            price: Decimal::new(4550, 2),
            duration_minutes: 45,
            provider_email: HOST.to_string(),
            is_available: true,
            created_at: Utc::now(),
        };
        let experience = Experience {
            id: Uuid::new_v4(),
            title: "Cooking class".to_string(),
            description: "Local dishes".to_string(),
            location: "Bled".to_string(),
            price: Decimal::from(60),
            duration_hours: 3,
            host_email: HOST.to_string(),
            host_name: "Ana".to_string(),
            max_participants: 8,
            is_available: true,
            created_at: Utc::now(),
        };
        let (property_id, service_id, experience_id) = (property.id, offer.id, experience.id);
        listings.create(Listing::Property(property)).await.unwrap();
        listings.create(Listing::Service(offer)).await.unwrap();
        listings.create(Listing::Experience(experience)).await.unwrap();

        let repositories = Repositories {
            users: users.clone(),
            listings: listings.clone(),
            bookings: Arc::new(MockBookingRepository::new()),
            wishlist: Arc::new(MockWishlistRepository::new()),
            messages: Arc::new(MockMessageRepository::new()),
        };

        let state = AppState::new(
            repositories,
            Arc::new(mail.clone()),
            tokens.clone(),
            Arc::new(CredentialHasher::new(CredentialHasherConfig::minimal())),
            AuthServiceConfig::default(),
            BookingPolicy::default(),
        );
        let state = web::Data::new(
            probes
                .into_iter()
                .fold(state, |state, probe| state.with_health_probe(probe)),
        );

        Self {
            state,
            mail,
            users,
            listings,
            tokens,
            property_id,
            service_id,
            experience_id,
        }
    }

    /// `Authorization` header value for `email`
    pub fn bearer(&self, email: &str) -> (&'static str, String) {
        let token = self.tokens.issue(email).unwrap();
        ("Authorization", format!("Bearer {}", token))
    }
}

pub fn cors() -> CorsConfig {
    CorsConfig::development()
}

pub fn environment() -> Environment {
    Environment::Development
}

/// Build the service under test from a [`TestApp`]
#[macro_export]
macro_rules! init_app {
    ($ctx:expr) => {
        actix_web::test::init_service(stazy_api::create_app(
            $ctx.state.clone(),
            &common::cors(),
            common::environment(),
        ))
        .await
    };
}
