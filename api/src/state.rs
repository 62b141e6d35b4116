//! Shared application state
//!
//! Services are wired over trait objects so the same routes run against
//! MySQL in production and the in-memory mocks in tests.

use std::sync::Arc;

use async_trait::async_trait;

use stazy_core::repositories::{
    BookingRepository, ListingRepository, MessageRepository, UserRepository, WishlistRepository,
};
use stazy_core::services::{
    AuthService, AuthServiceConfig, BookingPolicy, BookingService, ChatHub, ChatService,
    CredentialHasher, ListingService, MailServiceTrait, TokenService, WishlistService,
};

use stazy_infra::database::DatabasePool;

pub type DynAuthService = AuthService<dyn UserRepository, dyn MailServiceTrait>;
pub type DynBookingService =
    BookingService<dyn UserRepository, dyn ListingRepository, dyn BookingRepository>;
pub type DynListingService = ListingService<dyn ListingRepository, dyn BookingRepository>;
pub type DynWishlistService = WishlistService<dyn ListingRepository, dyn WishlistRepository>;
pub type DynChatService = ChatService<dyn MessageRepository>;

/// Storage backends the services run on
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub listings: Arc<dyn ListingRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub wishlist: Arc<dyn WishlistRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

/// Readiness check for a backing dependency, reported by `/health`
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Key the result is reported under
    fn name(&self) -> &'static str;

    async fn is_healthy(&self) -> bool;
}

#[async_trait]
impl HealthProbe for DatabasePool {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn is_healthy(&self) -> bool {
        self.health_check().await.unwrap_or(false)
    }
}

/// Application state that holds shared services
pub struct AppState {
    pub auth_service: Arc<DynAuthService>,
    pub booking_service: Arc<DynBookingService>,
    pub listing_service: Arc<DynListingService>,
    pub wishlist_service: Arc<DynWishlistService>,
    pub chat_service: Arc<DynChatService>,
    pub token_service: Arc<TokenService>,
    pub health_probes: Vec<Arc<dyn HealthProbe>>,
}

impl AppState {
    pub fn new(
        repositories: Repositories,
        mail_service: Arc<dyn MailServiceTrait>,
        token_service: Arc<TokenService>,
        hasher: Arc<CredentialHasher>,
        auth_config: AuthServiceConfig,
        booking_policy: BookingPolicy,
    ) -> Self {
        let auth_service = AuthService::new(
            repositories.users.clone(),
            mail_service,
            token_service.clone(),
            hasher,
            auth_config,
        );
        let booking_service = BookingService::new(
            repositories.users.clone(),
            repositories.listings.clone(),
            repositories.bookings.clone(),
            booking_policy,
        );
        let listing_service =
            ListingService::new(repositories.listings.clone(), repositories.bookings.clone());
        let wishlist_service =
            WishlistService::new(repositories.listings.clone(), repositories.wishlist.clone());
        let chat_service = ChatService::new(repositories.messages.clone(), Arc::new(ChatHub::new()));

        Self {
            auth_service: Arc::new(auth_service),
            booking_service: Arc::new(booking_service),
            listing_service: Arc::new(listing_service),
            wishlist_service: Arc::new(wishlist_service),
            chat_service: Arc::new(chat_service),
            token_service,
            health_probes: Vec::new(),
        }
    }

    /// Register a dependency checked by the health endpoint
    pub fn with_health_probe(mut self, probe: Arc<dyn HealthProbe>) -> Self {
        self.health_probes.push(probe);
        self
    }
}
