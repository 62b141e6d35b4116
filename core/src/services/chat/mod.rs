//! Chat service module
//!
//! Messages are persisted first and then pushed to live subscribers
//! through an in-process [`ChatHub`]. Live delivery is best effort: a
//! subscriber that falls behind loses messages and can reload history.

mod hub;
mod service;

#[cfg(test)]
mod tests;

pub use hub::{ChatHub, TOPIC_CAPACITY};
pub use service::{ChatService, MAX_MESSAGE_LENGTH};
