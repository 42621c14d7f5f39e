//! Fixtures shared by handler tests.

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use crate::adapters::memory::{InMemoryStore, RecordingTicketRenderer};
use crate::domain::event::{Capacity, Event, TicketingPolicy};
use crate::domain::foundation::{EventId, Timestamp, UserId};
use crate::domain::ticket::SignedCredentialGenerator;
use crate::domain::user::UserProfile;
use crate::ports::TicketRenderer;

use super::ticket::TicketIssuer;

pub(crate) const ORGANIZER: &str = "organizer";

pub(crate) fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

pub(crate) fn ticketing(requires_approval: bool) -> TicketingPolicy {
    TicketingPolicy::Enabled {
        requires_approval,
        price_cents: Some(1500),
    }
}

/// Stores an event owned by [`ORGANIZER`] plus the organizer's profile.
pub(crate) async fn event_with(
    store: &InMemoryStore,
    capacity: i64,
    ticketing: TicketingPolicy,
) -> Event {
    let event = Event::new(
        EventId::new(),
        user(ORGANIZER),
        "Rust Meetup",
        "Community Hall",
        Timestamp::now().add_days(3),
        Capacity::new(capacity).unwrap(),
        ticketing,
    )
    .unwrap();
    store.insert_event(event.clone()).await;
    store
        .insert_user(UserProfile::new(user(ORGANIZER), "Olivia Organizer", "olivia@example.com"))
        .await;
    event
}

/// Stores a profile whose full name is the capitalised id.
pub(crate) async fn member(store: &InMemoryStore, id: &str) -> UserId {
    let mut name = id.to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    store
        .insert_user(UserProfile::new(user(id), name, format!("{}@example.com", id)))
        .await;
    user(id)
}

pub(crate) fn issuer(
    store: &InMemoryStore,
    renderer: Option<Arc<RecordingTicketRenderer>>,
) -> TicketIssuer {
    TicketIssuer::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(SignedCredentialGenerator::new(SecretString::new(
            "test-signing-key".to_string(),
        ))),
        renderer.map(|r| r as Arc<dyn TicketRenderer>),
        Duration::from_millis(500),
    )
}
