//! Integration tests for capacity under concurrent admission.
//!
//! Many joins and purchases race for the same event; the number of
//! admitted seats must never exceed capacity.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use proptest::prelude::*;
use secrecy::SecretString;

use gatherup::adapters::http::AppState;
use gatherup::adapters::memory::InMemoryStore;
use gatherup::application::handlers::attendance::JoinEventCommand;
use gatherup::application::handlers::ticket::{PurchaseTicketCommand, TicketIssuer};
use gatherup::application::NotificationEmitter;
use gatherup::domain::attendance::{AttendanceError, LeavePolicy};
use gatherup::domain::event::{Capacity, Event, TicketingPolicy};
use gatherup::domain::foundation::{EventId, Timestamp, UserId};
use gatherup::domain::ticket::{SignedCredentialGenerator, TicketError};
use gatherup::domain::user::UserProfile;
use gatherup::ports::{AttendanceRepository, TicketRepository};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_state(store: &InMemoryStore) -> AppState {
    let credentials = Arc::new(SignedCredentialGenerator::new(SecretString::new(
        "concurrency-signing-key-0123456789".to_string(),
    )));
    let timeout = Duration::from_millis(500);
    AppState {
        events: Arc::new(store.clone()),
        users: Arc::new(store.clone()),
        attendance: Arc::new(store.clone()),
        tickets: Arc::new(store.clone()),
        notifications: Arc::new(store.clone()),
        credentials: credentials.clone(),
        issuer: Arc::new(TicketIssuer::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            credentials,
            None,
            timeout,
        )),
        notifier: Arc::new(NotificationEmitter::new(Arc::new(store.clone()), timeout)),
        leave_policy: LeavePolicy::KeepTicket,
    }
}

fn user(id: &str) -> UserId {
    UserId::new(id).unwrap()
}

async fn seed(store: &InMemoryStore, capacity: i64, ticketing: TicketingPolicy, users: usize) -> Event {
    let event = Event::new(
        EventId::new(),
        user("organizer"),
        "Launch Party",
        "Rooftop",
        Timestamp::now().add_days(7),
        Capacity::new(capacity).unwrap(),
        ticketing,
    )
    .unwrap();
    store.insert_event(event.clone()).await;
    store
        .insert_user(UserProfile::new(user("organizer"), "Olivia", "olivia@example.com"))
        .await;
    for i in 0..users {
        let id = format!("guest-{}", i);
        store
            .insert_user(UserProfile::new(user(&id), format!("Guest {}", i), format!("{}@example.com", id)))
            .await;
    }
    event
}

async fn concurrent_joins(state: &AppState, event_id: EventId, users: usize) -> (usize, usize) {
    let handler = Arc::new(state.join_event_handler());
    let tasks = (0..users).map(|i| {
        let handler = handler.clone();
        tokio::spawn(async move {
            handler
                .handle(JoinEventCommand {
                    event_id,
                    user_id: user(&format!("guest-{}", i)),
                })
                .await
        })
    });

    let mut admitted = 0;
    let mut full = 0;
    for result in join_all(tasks).await {
        match result.unwrap() {
            Ok(_) => admitted += 1,
            Err(AttendanceError::EventFull { .. }) => full += 1,
            Err(other) => panic!("unexpected join error: {:?}", other),
        }
    }
    (admitted, full)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn fifty_racing_joins_fill_exactly_five_seats() {
    let store = InMemoryStore::new();
    let event = seed(&store, 5, TicketingPolicy::Disabled, 50).await;
    let state = app_state(&store);

    let (admitted, full) = concurrent_joins(&state, event.id, 50).await;

    assert_eq!(admitted, 5);
    assert_eq!(full, 45);
    assert_eq!(store.attendance_count(&event.id).await, 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn zero_capacity_admits_nobody() {
    let store = InMemoryStore::new();
    let event = seed(&store, 0, TicketingPolicy::Disabled, 10).await;
    let state = app_state(&store);

    let (admitted, full) = concurrent_joins(&state, event.id, 10).await;

    assert_eq!(admitted, 0);
    assert_eq!(full, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn joins_and_purchases_share_the_same_seats() {
    let store = InMemoryStore::new();
    let ticketing = TicketingPolicy::Enabled {
        requires_approval: false,
        price_cents: None,
    };
    let event = seed(&store, 3, ticketing, 20).await;
    let state = app_state(&store);

    let join = Arc::new(state.join_event_handler());
    let purchase = Arc::new(state.purchase_ticket_handler());
    let event_id = event.id;

    let joins = (0..10).map(|i| {
        let join = join.clone();
        tokio::spawn(async move {
            join.handle(JoinEventCommand {
                event_id,
                user_id: user(&format!("guest-{}", i)),
            })
            .await
            .is_ok()
        })
    });
    let purchases = (10..20).map(|i| {
        let purchase = purchase.clone();
        tokio::spawn(async move {
            match purchase
                .handle(PurchaseTicketCommand {
                    event_id,
                    user_id: user(&format!("guest-{}", i)),
                })
                .await
            {
                Ok(_) => true,
                Err(TicketError::EventFull { .. }) => false,
                Err(other) => panic!("unexpected purchase error: {:?}", other),
            }
        })
    });
    let (joined, purchased) = tokio::join!(join_all(joins), join_all(purchases));
    let admitted = joined
        .into_iter()
        .chain(purchased)
        .filter(|r| *r.as_ref().unwrap())
        .count();

    let attendees = store.list_attendees(&event.id).await.unwrap();
    let tickets = store.list_for_event(&event.id).await.unwrap();
    let seat_holders: HashSet<UserId> = attendees
        .into_iter()
        .map(|a| a.user_id)
        .chain(
            tickets
                .into_iter()
                .filter(|t| t.consumes_capacity())
                .map(|t| t.user_id),
        )
        .collect();

    assert_eq!(admitted, 3);
    assert_eq!(seat_holders.len(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn admitted_joins_never_exceed_capacity(capacity in 0i64..8, users in 0usize..24) {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(4)
            .enable_all()
            .build()
            .unwrap();

        let (admitted, full, stored) = runtime.block_on(async {
            let store = InMemoryStore::new();
            let event = seed(&store, capacity, TicketingPolicy::Disabled, users).await;
            let state = app_state(&store);
            let (admitted, full) = concurrent_joins(&state, event.id, users).await;
            (admitted, full, store.attendance_count(&event.id).await)
        });

        let expected = users.min(capacity as usize);
        prop_assert_eq!(admitted, expected);
        prop_assert_eq!(full, users - expected);
        prop_assert_eq!(stored, expected);
    }
}
