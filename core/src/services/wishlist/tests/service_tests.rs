//! Unit tests for wishlist service

use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::listing::{Experience, ListingKind, Property};
use crate::errors::{DomainError, WishlistError};
use crate::repositories::{ListingRepository, MockListingRepository, MockWishlistRepository};
use crate::services::wishlist::WishlistService;

const USER: &str = "guest@example.com";

struct TestContext {
    service: WishlistService<MockListingRepository, MockWishlistRepository>,
    property_id: Uuid,
    experience_id: Uuid,
}

async fn setup() -> TestContext {
    let listings = Arc::new(MockListingRepository::new());
    let wishlist = Arc::new(MockWishlistRepository::new());

    let property = Property {
        id: Uuid::new_v4(),
        title: "Cabin".to_string(),
        description: "Quiet cabin".to_string(),
        location: "Oslo".to_string(),
        price: Decimal::from(120),
        weekend_price: Some(Decimal::from(150)),
        category: "Mountain".to_string(),
        property_type: "Cabin".to_string(),
        max_guests: 3,
        host_email: "host@example.com".to_string(),
        is_available: true,
        created_at: Utc::now(),
    };
    let experience = Experience {
        id: Uuid::new_v4(),
        title: "Fjord kayak".to_string(),
        description: "Half-day tour".to_string(),
        location: "Oslo".to_string(),
        price: Decimal::from(60),
        duration_hours: 4,
        host_email: "host@example.com".to_string(),
        host_name: "Ola".to_string(),
        max_participants: 8,
        is_available: true,
        created_at: Utc::now(),
    };
    let property_id = property.id;
    let experience_id = experience.id;
    listings.create(property.into()).await.unwrap();
    listings.create(experience.into()).await.unwrap();

    TestContext {
        service: WishlistService::new(listings, wishlist),
        property_id,
        experience_id,
    }
}

#[tokio::test]
async fn test_add_list_count_contains() {
    let ctx = setup().await;

    let item = ctx.service.add(USER, "property", ctx.property_id).await.unwrap();
    assert_eq!(item.target.kind, ListingKind::Property);
    ctx.service
        .add(" Guest@Example.com", "EXPERIENCE", ctx.experience_id)
        .await
        .unwrap();

    assert_eq!(ctx.service.count(USER).await.unwrap(), 2);
    assert_eq!(ctx.service.list(USER).await.unwrap().len(), 2);
    assert!(ctx.service.contains(USER, "PROPERTY", ctx.property_id).await.unwrap());
    assert!(!ctx.service.contains(USER, "SERVICE", ctx.property_id).await.unwrap());
    assert_eq!(ctx.service.count("other@example.com").await.unwrap(), 0);
}

#[tokio::test]
async fn test_add_twice_is_rejected() {
    let ctx = setup().await;
    ctx.service.add(USER, "PROPERTY", ctx.property_id).await.unwrap();

    let result = ctx.service.add(USER, "PROPERTY", ctx.property_id).await;

    assert!(matches!(
        result,
        Err(DomainError::Wishlist(WishlistError::AlreadyInWishlist))
    ));
}

#[tokio::test]
async fn test_add_validates_target() {
    let ctx = setup().await;

    let result = ctx.service.add(USER, "BOAT", ctx.property_id).await;
    assert!(matches!(result, Err(DomainError::Wishlist(WishlistError::InvalidItemType))));

    let result = ctx.service.add(USER, "SERVICE", Uuid::new_v4()).await;
    match result {
        Err(DomainError::Wishlist(WishlistError::EntityNotFound { kind })) => {
            assert_eq!(kind, "Service")
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_remove_is_idempotent() {
    let ctx = setup().await;
    ctx.service.add(USER, "PROPERTY", ctx.property_id).await.unwrap();

    ctx.service.remove(USER, "PROPERTY", ctx.property_id).await.unwrap();
    ctx.service.remove(USER, "PROPERTY", ctx.property_id).await.unwrap();

    assert_eq!(ctx.service.count(USER).await.unwrap(), 0);
    assert!(!ctx.service.contains(USER, "PROPERTY", ctx.property_id).await.unwrap());
}
