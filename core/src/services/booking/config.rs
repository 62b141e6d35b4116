//! Policy switches for the booking service

/// Optional hardening of the booking workflow; both off by default
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingPolicy {
    /// Refuse bookings on listings whose availability flag is off
    pub reject_unavailable_listings: bool,
    /// Only allow moves along the status graph (see `BookingStatus::can_transition_to`)
    pub strict_transitions: bool,
}

impl BookingPolicy {
    pub fn strict() -> Self {
        Self {
            reject_unavailable_listings: true,
            strict_transitions: true,
        }
    }
}
