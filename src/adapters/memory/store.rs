//! In-memory store implementing every persistence port.
//!
//! All state sits behind one async mutex, which makes each admission's
//! count-and-insert trivially serialized. Used by tests and local runs
//! without a database.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::attendance::Attendance;
use crate::domain::event::{Admission, CapacityLedger, Event, OccupancyBasis};
use crate::domain::foundation::{DomainError, ErrorCode, EventId, NotificationId, TicketId, UserId};
use crate::domain::notification::Notification;
use crate::domain::ticket::{ArtifactRef, Ticket, TicketNumber, TicketStatus, VerificationToken};
use crate::domain::user::UserProfile;
use crate::ports::{
    AttendanceRepository, AttendeeView, EventReader, IssueOutcome, JoinOutcome, JoinedEventView,
    NotificationRepository, TicketRepository, TransitionOutcome, UserDirectory,
};

#[derive(Debug, Default)]
struct StoreState {
    events: HashMap<EventId, Event>,
    users: HashMap<UserId, UserProfile>,
    attendances: HashMap<(EventId, UserId), Attendance>,
    tickets: HashMap<TicketId, Ticket>,
    notifications: Vec<Notification>,
}

impl StoreState {
    fn occupancy(&self, event: &Event, excluding: &UserId) -> u64 {
        let attendees = self
            .attendances
            .keys()
            .filter(|(event_id, user_id)| *event_id == event.id && user_id != excluding)
            .map(|(_, user_id)| user_id);

        match event.occupancy_basis() {
            OccupancyBasis::Attendance => attendees.count() as u64,
            OccupancyBasis::SeatHolders => {
                let event_tickets: Vec<&Ticket> = self
                    .tickets
                    .values()
                    .filter(|t| t.event_id == event.id && &t.user_id != excluding)
                    .collect();
                // An attendee whose ticket was revoked or cancelled no longer holds a seat
                let unticketed = attendees
                    .filter(|user_id| !event_tickets.iter().any(|t| &t.user_id == *user_id));
                let holders = event_tickets
                    .iter()
                    .filter(|t| t.consumes_capacity())
                    .map(|t| &t.user_id);
                unticketed.chain(holders).collect::<HashSet<_>>().len() as u64
            }
        }
    }

    fn live_ticket(&self, event_id: &EventId, user_id: &UserId) -> Option<&Ticket> {
        self.tickets
            .values()
            .find(|t| &t.event_id == event_id && &t.user_id == user_id && t.is_live())
    }

    fn credentials_taken(&self, ticket: &Ticket) -> bool {
        self.tickets.values().any(|t| {
            t.ticket_number == ticket.ticket_number
                || t.verification_token == ticket.verification_token
        })
    }
}

/// Shared in-memory store. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an event.
    pub async fn insert_event(&self, event: Event) {
        self.state.lock().await.events.insert(event.id, event);
    }

    /// Add or replace a user profile.
    pub async fn insert_user(&self, profile: UserProfile) {
        self.state
            .lock()
            .await
            .users
            .insert(profile.id.clone(), profile);
    }

    /// Remove an event, as an organizer deleting it would.
    pub async fn remove_event(&self, event_id: &EventId) {
        self.state.lock().await.events.remove(event_id);
    }

    pub async fn attendance_count(&self, event_id: &EventId) -> usize {
        self.state
            .lock()
            .await
            .attendances
            .keys()
            .filter(|(e, _)| e == event_id)
            .count()
    }

    pub async fn ticket_count(&self) -> usize {
        self.state.lock().await.tickets.len()
    }
}

#[async_trait]
impl EventReader for InMemoryStore {
    async fn find_event(&self, id: &EventId) -> Result<Option<Event>, DomainError> {
        Ok(self.state.lock().await.events.get(id).cloned())
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn find_profile(&self, id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        Ok(self.state.lock().await.users.get(id).cloned())
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryStore {
    async fn admit(
        &self,
        event: &Event,
        attendance: &Attendance,
    ) -> Result<JoinOutcome, DomainError> {
        let mut state = self.state.lock().await;

        let Some(current) = state.events.get(&event.id).cloned() else {
            return Ok(JoinOutcome::EventNotFound);
        };
        let key = (attendance.event_id, attendance.user_id.clone());
        if state.attendances.contains_key(&key) {
            return Ok(JoinOutcome::AlreadyJoined);
        }

        let occupancy = state.occupancy(&current, &attendance.user_id);
        if let Admission::Rejected { occupancy, .. } =
            CapacityLedger::admit(current.capacity, occupancy)
        {
            return Ok(JoinOutcome::Full { occupancy });
        }

        state.attendances.insert(key, attendance.clone());
        Ok(JoinOutcome::Joined(attendance.clone()))
    }

    async fn find(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Attendance>, DomainError> {
        Ok(self
            .state
            .lock()
            .await
            .attendances
            .get(&(*event_id, user_id.clone()))
            .cloned())
    }

    async fn remove(&self, event_id: &EventId, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self
            .state
            .lock()
            .await
            .attendances
            .remove(&(*event_id, user_id.clone()))
            .is_some())
    }

    async fn list_attendees(&self, event_id: &EventId) -> Result<Vec<AttendeeView>, DomainError> {
        let state = self.state.lock().await;
        let mut attendees: Vec<AttendeeView> = state
            .attendances
            .values()
            .filter(|a| &a.event_id == event_id)
            .map(|a| {
                let profile = state.users.get(&a.user_id);
                AttendeeView {
                    user_id: a.user_id.clone(),
                    full_name: profile.map(|p| p.full_name.clone()).unwrap_or_default(),
                    email: profile.map(|p| p.email.clone()).unwrap_or_default(),
                    joined_at: a.joined_at,
                    rsvp: a.rsvp,
                }
            })
            .collect();
        attendees.sort_by_key(|a| a.joined_at);
        Ok(attendees)
    }

    async fn list_joined_events(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<JoinedEventView>, DomainError> {
        let state = self.state.lock().await;
        let mut joined: Vec<JoinedEventView> = state
            .attendances
            .values()
            .filter(|a| &a.user_id == user_id)
            .filter_map(|a| {
                state.events.get(&a.event_id).map(|e| JoinedEventView {
                    event_id: e.id,
                    event_name: e.name.clone(),
                    location: e.location.clone(),
                    starts_at: e.starts_at,
                    joined_at: a.joined_at,
                    rsvp: a.rsvp,
                })
            })
            .collect();
        joined.sort_by(|a, b| b.joined_at.cmp(&a.joined_at));
        Ok(joined)
    }
}

#[async_trait]
impl TicketRepository for InMemoryStore {
    async fn issue(&self, event: &Event, ticket: &Ticket) -> Result<IssueOutcome, DomainError> {
        let mut state = self.state.lock().await;

        let Some(current) = state.events.get(&event.id).cloned() else {
            return Ok(IssueOutcome::EventNotFound);
        };
        if let Some(existing) = state.live_ticket(&ticket.event_id, &ticket.user_id) {
            return Ok(IssueOutcome::ExistingLive(existing.clone()));
        }
        if ticket.consumes_capacity() {
            let occupancy = state.occupancy(&current, &ticket.user_id);
            if let Admission::Rejected { occupancy, .. } =
                CapacityLedger::admit(current.capacity, occupancy)
            {
                return Ok(IssueOutcome::Full { occupancy });
            }
        }
        if state.credentials_taken(ticket) {
            return Ok(IssueOutcome::DuplicateCredentials);
        }

        state.tickets.insert(ticket.id, ticket.clone());
        Ok(IssueOutcome::Issued(ticket.clone()))
    }

    async fn confirm(
        &self,
        event: &Event,
        ticket: &Ticket,
        expected: TicketStatus,
    ) -> Result<TransitionOutcome, DomainError> {
        let mut state = self.state.lock().await;

        match state.tickets.get(&ticket.id) {
            Some(stored) if stored.status == expected => {}
            _ => return Ok(TransitionOutcome::Conflict),
        }
        let current = state.events.get(&event.id).cloned().ok_or_else(|| {
            DomainError::new(ErrorCode::EventNotFound, format!("Event not found: {}", event.id))
        })?;
        let occupancy = state.occupancy(&current, &ticket.user_id);
        if let Admission::Rejected { occupancy, .. } =
            CapacityLedger::admit(current.capacity, occupancy)
        {
            return Ok(TransitionOutcome::Full { occupancy });
        }

        if let Some(stored) = state.tickets.get_mut(&ticket.id) {
            apply_status(stored, ticket);
        }
        Ok(TransitionOutcome::Applied)
    }

    async fn transition(
        &self,
        ticket: &Ticket,
        expected: TicketStatus,
    ) -> Result<TransitionOutcome, DomainError> {
        let mut state = self.state.lock().await;
        match state.tickets.get_mut(&ticket.id) {
            Some(stored) if stored.status == expected => {
                apply_status(stored, ticket);
                Ok(TransitionOutcome::Applied)
            }
            _ => Ok(TransitionOutcome::Conflict),
        }
    }

    async fn attach_artifact(
        &self,
        id: &TicketId,
        artifact: &ArtifactRef,
    ) -> Result<(), DomainError> {
        let mut state = self.state.lock().await;
        let stored = state.tickets.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::TicketNotFound, format!("Ticket not found: {}", id))
        })?;
        stored.attach_artifact(artifact.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DomainError> {
        Ok(self.state.lock().await.tickets.get(id).cloned())
    }

    async fn find_by_number(&self, number: &TicketNumber) -> Result<Option<Ticket>, DomainError> {
        Ok(self
            .state
            .lock()
            .await
            .tickets
            .values()
            .find(|t| &t.ticket_number == number)
            .cloned())
    }

    async fn find_by_token(
        &self,
        token: &VerificationToken,
    ) -> Result<Option<Ticket>, DomainError> {
        Ok(self
            .state
            .lock()
            .await
            .tickets
            .values()
            .find(|t| &t.verification_token == token)
            .cloned())
    }

    async fn find_live(
        &self,
        event_id: &EventId,
        user_id: &UserId,
    ) -> Result<Option<Ticket>, DomainError> {
        Ok(self
            .state
            .lock()
            .await
            .live_ticket(event_id, user_id)
            .cloned())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Ticket>, DomainError> {
        let state = self.state.lock().await;
        Ok(newest_first(
            state.tickets.values().filter(|t| &t.user_id == user_id),
        ))
    }

    async fn list_for_event(&self, event_id: &EventId) -> Result<Vec<Ticket>, DomainError> {
        let state = self.state.lock().await;
        Ok(newest_first(
            state.tickets.values().filter(|t| &t.event_id == event_id),
        ))
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn record(&self, notification: &Notification) -> Result<(), DomainError> {
        self.state
            .lock()
            .await
            .notifications
            .push(notification.clone());
        Ok(())
    }

    async fn list_for_recipient(
        &self,
        recipient: &UserId,
    ) -> Result<Vec<Notification>, DomainError> {
        let state = self.state.lock().await;
        let mut found: Vec<Notification> = state
            .notifications
            .iter()
            .filter(|n| &n.recipient_id == recipient)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn remove_for_recipient(
        &self,
        id: &NotificationId,
        recipient: &UserId,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.lock().await;
        let before = state.notifications.len();
        state
            .notifications
            .retain(|n| !(&n.id == id && &n.recipient_id == recipient));
        Ok(state.notifications.len() < before)
    }
}

fn apply_status(stored: &mut Ticket, updated: &Ticket) {
    stored.status = updated.status;
    stored.used_at = updated.used_at;
    stored.revoked_at = updated.revoked_at;
    stored.revoked_reason = updated.revoked_reason.clone();
    stored.updated_at = updated.updated_at;
}

fn newest_first<'a>(tickets: impl Iterator<Item = &'a Ticket>) -> Vec<Ticket> {
    let mut list: Vec<Ticket> = tickets.cloned().collect();
    list.sort_by(|a, b| b.purchased_at.cmp(&a.purchased_at));
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{Capacity, TicketingPolicy};
    use crate::domain::foundation::Timestamp;
    use crate::domain::ticket::{TicketCredentials, VerificationToken};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn event(capacity: i64, ticketing: TicketingPolicy) -> Event {
        Event::new(
            EventId::new(),
            user("organizer"),
            "Workshop",
            "Room 1",
            Timestamp::now(),
            Capacity::new(capacity).unwrap(),
            ticketing,
        )
        .unwrap()
    }

    fn ticketed() -> TicketingPolicy {
        TicketingPolicy::Enabled {
            requires_approval: false,
            price_cents: None,
        }
    }

    fn ticket(event: &Event, holder: &str, status: TicketStatus) -> Ticket {
        let number = TicketNumber::generate(Timestamp::now());
        let token = VerificationToken::new(format!("{:064x}", uuid::Uuid::new_v4().as_u128()))
            .unwrap();
        Ticket::issue(
            TicketCredentials { number, token },
            event.id,
            user(holder),
            status,
        )
    }

    #[tokio::test]
    async fn admit_rejects_second_join_by_same_user() {
        let store = InMemoryStore::new();
        let event = event(5, TicketingPolicy::Disabled);
        store.insert_event(event.clone()).await;

        let a = Attendance::join(event.id, user("a"));
        assert!(matches!(
            store.admit(&event, &a).await.unwrap(),
            JoinOutcome::Joined(_)
        ));
        assert_eq!(
            store.admit(&event, &a).await.unwrap(),
            JoinOutcome::AlreadyJoined
        );
    }

    #[tokio::test]
    async fn admit_rejects_when_full() {
        let store = InMemoryStore::new();
        let event = event(1, TicketingPolicy::Disabled);
        store.insert_event(event.clone()).await;

        store
            .admit(&event, &Attendance::join(event.id, user("a")))
            .await
            .unwrap();
        let outcome = store
            .admit(&event, &Attendance::join(event.id, user("b")))
            .await
            .unwrap();
        assert_eq!(outcome, JoinOutcome::Full { occupancy: 1 });
    }

    #[tokio::test]
    async fn admit_reports_missing_event() {
        let store = InMemoryStore::new();
        let event = event(1, TicketingPolicy::Disabled);
        let outcome = store
            .admit(&event, &Attendance::join(event.id, user("a")))
            .await
            .unwrap();
        assert_eq!(outcome, JoinOutcome::EventNotFound);
    }

    #[tokio::test]
    async fn seat_holders_count_ticket_holders_who_never_joined() {
        let store = InMemoryStore::new();
        let event = event(1, ticketed());
        store.insert_event(event.clone()).await;

        let purchased = ticket(&event, "buyer", TicketStatus::Confirmed);
        store.issue(&event, &purchased).await.unwrap();

        let outcome = store
            .admit(&event, &Attendance::join(event.id, user("walk-in")))
            .await
            .unwrap();
        assert_eq!(outcome, JoinOutcome::Full { occupancy: 1 });
    }

    #[tokio::test]
    async fn joined_attendee_is_not_counted_twice_for_own_ticket() {
        let store = InMemoryStore::new();
        let event = event(1, ticketed());
        store.insert_event(event.clone()).await;

        store
            .admit(&event, &Attendance::join(event.id, user("a")))
            .await
            .unwrap();
        let outcome = store
            .issue(&event, &ticket(&event, "a", TicketStatus::Confirmed))
            .await
            .unwrap();
        assert!(matches!(outcome, IssueOutcome::Issued(_)));
    }

    #[tokio::test]
    async fn attendee_with_revoked_ticket_frees_the_seat() {
        let store = InMemoryStore::new();
        let event = event(1, ticketed());
        store.insert_event(event.clone()).await;

        store
            .admit(&event, &Attendance::join(event.id, user("a")))
            .await
            .unwrap();
        let issued = ticket(&event, "a", TicketStatus::Confirmed);
        store.issue(&event, &issued).await.unwrap();

        let mut revoked = issued.clone();
        revoked.revoke("Revoked by organizer").unwrap();
        assert_eq!(
            store
                .transition(&revoked, TicketStatus::Confirmed)
                .await
                .unwrap(),
            TransitionOutcome::Applied
        );

        let outcome = store
            .issue(&event, &ticket(&event, "b", TicketStatus::Confirmed))
            .await
            .unwrap();
        assert!(matches!(outcome, IssueOutcome::Issued(_)));
    }

    #[tokio::test]
    async fn attendee_without_ticket_still_holds_a_seat() {
        let store = InMemoryStore::new();
        let event = event(1, ticketed());
        store.insert_event(event.clone()).await;

        store
            .admit(&event, &Attendance::join(event.id, user("a")))
            .await
            .unwrap();

        let outcome = store
            .issue(&event, &ticket(&event, "b", TicketStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(outcome, IssueOutcome::Full { occupancy: 1 });
    }

    #[tokio::test]
    async fn issue_returns_existing_live_ticket() {
        let store = InMemoryStore::new();
        let event = event(5, ticketed());
        store.insert_event(event.clone()).await;

        let first = ticket(&event, "a", TicketStatus::Pending);
        store.issue(&event, &first).await.unwrap();
        let outcome = store
            .issue(&event, &ticket(&event, "a", TicketStatus::Confirmed))
            .await
            .unwrap();
        assert_eq!(outcome, IssueOutcome::ExistingLive(first));
    }

    #[tokio::test]
    async fn issue_detects_credential_collision() {
        let store = InMemoryStore::new();
        let event = event(5, ticketed());
        store.insert_event(event.clone()).await;

        let first = ticket(&event, "a", TicketStatus::Confirmed);
        store.issue(&event, &first).await.unwrap();
        let mut clash = ticket(&event, "b", TicketStatus::Confirmed);
        clash.ticket_number = first.ticket_number.clone();

        assert_eq!(
            store.issue(&event, &clash).await.unwrap(),
            IssueOutcome::DuplicateCredentials
        );
    }

    #[tokio::test]
    async fn transition_conflicts_on_stale_status() {
        let store = InMemoryStore::new();
        let event = event(5, ticketed());
        store.insert_event(event.clone()).await;

        let mut t = ticket(&event, "a", TicketStatus::Confirmed);
        store.issue(&event, &t).await.unwrap();
        t.check_in().unwrap();

        assert_eq!(
            store.transition(&t, TicketStatus::Pending).await.unwrap(),
            TransitionOutcome::Conflict
        );
        assert_eq!(
            store.transition(&t, TicketStatus::Confirmed).await.unwrap(),
            TransitionOutcome::Applied
        );
        let stored = store.find_by_id(&t.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TicketStatus::Used);
    }

    #[tokio::test]
    async fn confirm_refuses_when_event_filled() {
        let store = InMemoryStore::new();
        let event = event(1, ticketed());
        store.insert_event(event.clone()).await;

        let mut pending = ticket(&event, "a", TicketStatus::Pending);
        store.issue(&event, &pending).await.unwrap();
        store
            .admit(&event, &Attendance::join(event.id, user("b")))
            .await
            .unwrap();

        pending.approve().unwrap();
        assert_eq!(
            store
                .confirm(&event, &pending, TicketStatus::Pending)
                .await
                .unwrap(),
            TransitionOutcome::Full { occupancy: 1 }
        );
    }

    #[tokio::test]
    async fn notifications_are_listed_newest_first() {
        let store = InMemoryStore::new();
        let event = event(5, TicketingPolicy::Disabled);
        let first = Notification::new(user("organizer"), event.id, "first");
        let mut second = Notification::new(user("organizer"), event.id, "second");
        second.created_at = first.created_at.add_days(1);

        store.record(&first).await.unwrap();
        store.record(&second).await.unwrap();
        let inbox = store.list_for_recipient(&user("organizer")).await.unwrap();

        assert_eq!(inbox[0].message, "second");
        assert_eq!(inbox[1].message, "first");
    }

    #[tokio::test]
    async fn notification_removal_is_scoped_to_recipient() {
        let store = InMemoryStore::new();
        let note = Notification::new(user("organizer"), EventId::new(), "Alice has joined");
        store.record(&note).await.unwrap();

        let organizer = user("organizer");
        assert!(!store
            .remove_for_recipient(&note.id, &user("intruder"))
            .await
            .unwrap());
        assert!(store.remove_for_recipient(&note.id, &organizer).await.unwrap());
        assert!(!store.remove_for_recipient(&note.id, &organizer).await.unwrap());
        assert!(store
            .list_for_recipient(&user("organizer"))
            .await
            .unwrap()
            .is_empty());
    }
}
