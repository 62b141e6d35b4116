//! Unit tests for listings

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::listing::{
    Bookable, Experience, Listing, ListingKind, Property, ServiceOffer,
};

#[test]
fn test_listing_kind_parsing_is_case_insensitive() {
    assert_eq!("property".parse::<ListingKind>().unwrap(), ListingKind::Property);
    assert_eq!(" SERVICE ".parse::<ListingKind>().unwrap(), ListingKind::Service);
    assert_eq!("Experience".parse::<ListingKind>().unwrap(), ListingKind::Experience);
    assert!("CAR".parse::<ListingKind>().is_err());
}

#[test]
fn test_listing_kind_serializes_uppercase() {
    let json = serde_json::to_string(&ListingKind::Service).unwrap();
    assert_eq!(json, "\"SERVICE\"");
}

#[test]
fn test_bookable_dispatch_over_variants() {
    let offer = ServiceOffer {
        id: Uuid::new_v4(),
        title: "Surf lesson".to_string(),
        description: String::new(),
        location: "Ericeira".to_string(),
        price: Decimal::new(4500, 2),
        duration_minutes: 90,
        provider_email: "coach@example.com".to_string(),
        is_available: true,
        created_at: Utc::now(),
    };
    let listing = Listing::from(offer.clone());

    assert_eq!(listing.kind(), ListingKind::Service);
    assert_eq!(listing.owner_email(), "coach@example.com");
    assert_eq!(listing.price(), Decimal::new(4500, 2));
    assert_eq!(listing.listing_ref().id, offer.id);

    let experience = Listing::from(Experience {
        id: Uuid::new_v4(),
        title: "Wine tour".to_string(),
        description: String::new(),
        location: "Douro".to_string(),
        price: Decimal::from(80),
        duration_hours: 4,
        host_email: "guide@example.com".to_string(),
        host_name: "Rui".to_string(),
        max_participants: 8,
        is_available: false,
        created_at: Utc::now(),
    });
    assert_eq!(experience.owner_email(), "guide@example.com");
    assert!(!experience.is_available());

    let property = Listing::from(Property {
        id: Uuid::new_v4(),
        title: "Loft".to_string(),
        description: String::new(),
        location: "Porto".to_string(),
        price: Decimal::from(100),
        weekend_price: None,
        category: "city".to_string(),
        property_type: "apartment".to_string(),
        max_guests: 2,
        host_email: "host@example.com".to_string(),
        is_available: true,
        created_at: Utc::now(),
    });
    assert_eq!(property.kind(), ListingKind::Property);
    assert_eq!(property.title(), "Loft");
}

#[test]
fn test_toggle_availability_flips_flag() {
    let mut listing = Listing::from(ServiceOffer {
        id: Uuid::new_v4(),
        title: "Bike rental".to_string(),
        description: String::new(),
        location: "Bled".to_string(),
        price: Decimal::from(20),
        duration_minutes: 240,
        provider_email: "bikes@example.com".to_string(),
        is_available: true,
        created_at: Utc::now(),
    });

    assert!(!listing.toggle_availability());
    assert!(!listing.is_available());
    assert!(listing.toggle_availability());
    assert!(listing.is_available());
}
