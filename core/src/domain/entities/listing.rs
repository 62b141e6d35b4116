//! Bookable listings: properties, service offers and experiences.
//!
//! Bookings and wishlist entries point at a listing through a [`ListingRef`]
//! (kind + id) instead of one nullable foreign key per kind.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three kinds of bookable listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ListingKind {
    Property,
    Service,
    Experience,
}

impl ListingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingKind::Property => "PROPERTY",
            ListingKind::Service => "SERVICE",
            ListingKind::Experience => "EXPERIENCE",
        }
    }

    /// Human-readable name used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ListingKind::Property => "Property",
            ListingKind::Service => "Service",
            ListingKind::Experience => "Experience",
        }
    }
}

impl std::fmt::Display for ListingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ListingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PROPERTY" => Ok(ListingKind::Property),
            "SERVICE" | "SERVICE_OFFER" => Ok(ListingKind::Service),
            "EXPERIENCE" => Ok(ListingKind::Experience),
            _ => Err(format!("Invalid listing kind: {}", s)),
        }
    }
}

/// Tagged reference to exactly one listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRef {
    pub kind: ListingKind,
    pub id: Uuid,
}

impl ListingRef {
    pub fn new(kind: ListingKind, id: Uuid) -> Self {
        Self { kind, id }
    }
}

/// Capabilities the booking workflow needs from any listing
pub trait Bookable {
    fn kind(&self) -> ListingKind;
    fn id(&self) -> Uuid;
    /// Email of the host or provider that owns the listing
    fn owner_email(&self) -> &str;
    /// Nightly price for properties, flat price otherwise
    fn price(&self) -> Decimal;
    fn is_available(&self) -> bool;
    fn title(&self) -> &str;
    fn location(&self) -> &str;

    fn listing_ref(&self) -> ListingRef {
        ListingRef::new(self.kind(), self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Price per night
    pub price: Decimal,
    pub weekend_price: Option<Decimal>,
    pub category: String,
    pub property_type: String,
    pub max_guests: u32,
    pub host_email: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffer {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: Decimal,
    pub duration_minutes: u32,
    pub provider_email: String,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: Decimal,
    pub duration_hours: u32,
    pub host_email: String,
    pub host_name: String,
    pub max_participants: u32,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

macro_rules! impl_bookable {
    ($ty:ty, $kind:expr, $owner:ident) => {
        impl Bookable for $ty {
            fn kind(&self) -> ListingKind {
                $kind
            }
            fn id(&self) -> Uuid {
                self.id
            }
            fn owner_email(&self) -> &str {
                &self.$owner
            }
            fn price(&self) -> Decimal {
                self.price
            }
            fn is_available(&self) -> bool {
                self.is_available
            }
            fn title(&self) -> &str {
                &self.title
            }
            fn location(&self) -> &str {
                &self.location
            }
        }
    };
}

impl_bookable!(Property, ListingKind::Property, host_email);
impl_bookable!(ServiceOffer, ListingKind::Service, provider_email);
impl_bookable!(Experience, ListingKind::Experience, host_email);

/// Any one of the bookable listing kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Listing {
    Property(Property),
    Service(ServiceOffer),
    Experience(Experience),
}

impl Listing {
    fn inner(&self) -> &dyn Bookable {
        match self {
            Listing::Property(p) => p,
            Listing::Service(s) => s,
            Listing::Experience(e) => e,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Listing::Property(p) => p.created_at,
            Listing::Service(s) => s.created_at,
            Listing::Experience(e) => e.created_at,
        }
    }

    /// Flip the availability flag and return the new value
    pub fn toggle_availability(&mut self) -> bool {
        let flag = match self {
            Listing::Property(p) => &mut p.is_available,
            Listing::Service(s) => &mut s.is_available,
            Listing::Experience(e) => &mut e.is_available,
        };
        *flag = !*flag;
        *flag
    }
}

impl Bookable for Listing {
    fn kind(&self) -> ListingKind {
        self.inner().kind()
    }
    fn id(&self) -> Uuid {
        self.inner().id()
    }
    fn owner_email(&self) -> &str {
        self.inner().owner_email()
    }
    fn price(&self) -> Decimal {
        self.inner().price()
    }
    fn is_available(&self) -> bool {
        self.inner().is_available()
    }
    fn title(&self) -> &str {
        self.inner().title()
    }
    fn location(&self) -> &str {
        self.inner().location()
    }
}

impl From<Property> for Listing {
    fn from(p: Property) -> Self {
        Listing::Property(p)
    }
}

impl From<ServiceOffer> for Listing {
    fn from(s: ServiceOffer) -> Self {
        Listing::Service(s)
    }
}

impl From<Experience> for Listing {
    fn from(e: Experience) -> Self {
        Listing::Experience(e)
    }
}
