//! Test fixtures for booking service

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::domain::entities::listing::{Experience, Listing, ListingRef, Property, ServiceOffer};
use crate::domain::entities::user::User;
use crate::errors::DomainError;
use crate::repositories::{
    BookingRepository, ListingRepository, MockBookingRepository, MockListingRepository,
    MockUserRepository, UserRepository,
};
use crate::services::booking::{BookingPolicy, BookingService, CreateBookingCommand};

pub const GUEST: &str = "guest@example.com";
pub const HOST: &str = "host@example.com";
pub const PROVIDER: &str = "provider@example.com";
pub const STRANGER: &str = "stranger@example.com";

pub type TestBookingService =
    BookingService<MockUserRepository, MockListingRepository, MockBookingRepository>;

pub struct TestContext {
    pub service: TestBookingService,
    pub users: Arc<MockUserRepository>,
    pub listings: Arc<MockListingRepository>,
    pub bookings: Arc<MockBookingRepository>,
    pub property_id: Uuid,
    pub service_id: Uuid,
    pub experience_id: Uuid,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_policy(BookingPolicy::default()).await
    }

    pub async fn with_policy(policy: BookingPolicy) -> Self {
        let users = Arc::new(MockUserRepository::new());
        let listings = Arc::new(MockListingRepository::new());
        let bookings = Arc::new(MockBookingRepository::new());

        for email in [GUEST, HOST, PROVIDER, STRANGER] {
            users
                .create(User::new(email.to_string(), "hash".to_string(), "salt".to_string()))
                .await
                .unwrap();
        }

        let property = property(HOST, Decimal::from(100));
        let property_id = property.id;
        listings.create(property.into()).await.unwrap();

        let offer = service_offer(PROVIDER, Decimal::new(4550, 2));
        let service_id = offer.id;
        listings.create(offer.into()).await.unwrap();

        let experience = experience(HOST, Decimal::from(75));
        let experience_id = experience.id;
        listings.create(experience.into()).await.unwrap();

        let service = BookingService::new(
            users.clone(),
            listings.clone(),
            bookings.clone(),
            policy,
        );

        Self {
            service,
            users,
            listings,
            bookings,
            property_id,
            service_id,
            experience_id,
        }
    }

    pub async fn add_listing(&self, listing: Listing) {
        self.listings.create(listing).await.unwrap();
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn stay(entity_id: Uuid, start: NaiveDate, end: NaiveDate) -> CreateBookingCommand {
    CreateBookingCommand {
        booking_type: "PROPERTY".to_string(),
        entity_id,
        start_date: Some(start),
        end_date: Some(end),
        number_of_guests: 2,
        special_requests: None,
    }
}

pub fn flat(booking_type: &str, entity_id: Uuid) -> CreateBookingCommand {
    CreateBookingCommand {
        booking_type: booking_type.to_string(),
        entity_id,
        start_date: None,
        end_date: None,
        number_of_guests: 1,
        special_requests: None,
    }
}

pub fn property(host_email: &str, price: Decimal) -> Property {
    Property {
        id: Uuid::new_v4(),
        title: "Sea view loft".to_string(),
        description: "Two rooms by the beach".to_string(),
        location: "Lisbon".to_string(),
        price,
        weekend_price: None,
        category: "Beach".to_string(),
        property_type: "Apartment".to_string(),
        max_guests: 4,
        host_email: host_email.to_string(),
        is_available: true,
        created_at: Utc::now(),
    }
}

pub fn service_offer(provider_email: &str, price: Decimal) -> ServiceOffer {
    ServiceOffer {
        id: Uuid::new_v4(),
        title: "Airport pickup".to_string(),
        description: "Door to door".to_string(),
        location: "Lisbon".to_string(),
        price,
        duration_minutes: 60,
        provider_email: provider_email.to_string(),
        is_available: true,
        created_at: Utc::now(),
    }
}

pub fn experience(host_email: &str, price: Decimal) -> Experience {
    Experience {
        id: Uuid::new_v4(),
        title: "Fado night".to_string(),
        description: "Dinner and live music".to_string(),
        location: "Lisbon".to_string(),
        price,
        duration_hours: 3,
        host_email: host_email.to_string(),
        host_name: "Ana".to_string(),
        max_participants: 10,
        is_available: true,
        created_at: Utc::now(),
    }
}

/// Booking store that hands control back to the scheduler after every
/// read, so concurrent service calls interleave between read and write
#[derive(Clone, Default)]
pub struct YieldingBookingRepository {
    inner: MockBookingRepository,
}

#[async_trait]
impl BookingRepository for YieldingBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let found = self.inner.find_by_id(id).await;
        tokio::task::yield_now().await;
        found
    }

    async fn create_checked(&self, booking: Booking) -> Result<Booking, DomainError> {
        self.inner.create_checked(booking).await
    }

    async fn update_status_checked(
        &self,
        id: Uuid,
        status: BookingStatus,
        enforce_transitions: bool,
    ) -> Result<Booking, DomainError> {
        self.inner
            .update_status_checked(id, status, enforce_transitions)
            .await
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        self.inner.find_by_user(user_id).await
    }

    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        self.inner.find_by_host(host_id).await
    }

    async fn find_by_listing(&self, target: ListingRef) -> Result<Vec<Booking>, DomainError> {
        self.inner.find_by_listing(target).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        self.inner.delete(id).await
    }
}
