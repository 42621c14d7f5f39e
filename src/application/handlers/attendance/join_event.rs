//! JoinEventHandler - a user takes a seat at an event.
//!
//! The attendance record is the primary state change. The organizer
//! notification and, for ticketed events, the auto-issued ticket follow
//! it as side effects whose failures are reported, never unwound.

use std::sync::Arc;

use crate::application::handlers::ticket::AutoIssueTicketHandler;
use crate::application::NotificationEmitter;
use crate::domain::attendance::{Attendance, AttendanceError};
use crate::domain::foundation::{EventId, UserId};
use crate::domain::notification::Notification;
use crate::domain::ticket::Ticket;
use crate::ports::{AttendanceRepository, EventReader, JoinOutcome, UserDirectory};

#[derive(Debug, Clone)]
pub struct JoinEventCommand {
    pub event_id: EventId,
    pub user_id: UserId,
}

/// What happened to the ticket side of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketOutcome {
    /// Event does not issue tickets.
    NotApplicable,
    Issued(Ticket),
    /// The user already held a live ticket.
    Existing(Ticket),
    /// Attendance stands but no ticket could be issued.
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct JoinEventResult {
    pub attendance: Attendance,
    pub ticket: TicketOutcome,
    pub organizer_notified: bool,
}

pub struct JoinEventHandler {
    events: Arc<dyn EventReader>,
    users: Arc<dyn UserDirectory>,
    attendance: Arc<dyn AttendanceRepository>,
    notifier: Arc<NotificationEmitter>,
    auto_issue: Arc<AutoIssueTicketHandler>,
}

impl JoinEventHandler {
    pub fn new(
        events: Arc<dyn EventReader>,
        users: Arc<dyn UserDirectory>,
        attendance: Arc<dyn AttendanceRepository>,
        notifier: Arc<NotificationEmitter>,
        auto_issue: Arc<AutoIssueTicketHandler>,
    ) -> Self {
        Self {
            events,
            users,
            attendance,
            notifier,
            auto_issue,
        }
    }

    pub async fn handle(&self, cmd: JoinEventCommand) -> Result<JoinEventResult, AttendanceError> {
        // 1. Event must exist
        let event = self
            .events
            .find_event(&cmd.event_id)
            .await?
            .ok_or_else(|| AttendanceError::event_not_found(cmd.event_id))?;

        // 2. Fast path for repeat joins
        if self.attendance.find(&event.id, &cmd.user_id).await?.is_some() {
            return Err(AttendanceError::already_joined(event.id, cmd.user_id));
        }

        // 3. User must be known to the directory
        let profile = self
            .users
            .find_profile(&cmd.user_id)
            .await?
            .ok_or_else(|| AttendanceError::user_not_found(cmd.user_id.clone()))?;

        // 4-5. Count and insert under event-scoped serialization
        let attendance = match self
            .attendance
            .admit(&event, &Attendance::join(event.id, cmd.user_id.clone()))
            .await?
        {
            JoinOutcome::Joined(attendance) => attendance,
            JoinOutcome::AlreadyJoined => {
                return Err(AttendanceError::already_joined(event.id, cmd.user_id))
            }
            JoinOutcome::Full { occupancy } => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %cmd.user_id,
                    occupancy,
                    capacity = %event.capacity,
                    "Join refused, event full"
                );
                return Err(AttendanceError::event_full(event.id, event.capacity));
            }
            JoinOutcome::EventNotFound => return Err(AttendanceError::event_not_found(event.id)),
        };

        tracing::info!(event_id = %event.id, user_id = %cmd.user_id, "User joined event");

        // 6. Tell the organizer
        let organizer_notified = self
            .notifier
            .emit(Notification::attendee_joined(&event, &profile))
            .await;

        // 7. Ticketed events hand out a confirmed ticket
        let ticket = if event.ticketing.is_enabled() {
            match self.auto_issue.handle(&event, &cmd.user_id).await {
                Ok(issued) if issued.created => TicketOutcome::Issued(issued.ticket),
                Ok(issued) => TicketOutcome::Existing(issued.ticket),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        event_id = %event.id,
                        user_id = %cmd.user_id,
                        "Joined without a ticket, auto-issue failed"
                    );
                    TicketOutcome::Failed {
                        reason: e.message(),
                    }
                }
            }
        } else {
            TicketOutcome::NotApplicable
        };

        Ok(JoinEventResult {
            attendance,
            ticket,
            organizer_notified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::test_support::{
        event_with, issuer, member, ticketing, user, ORGANIZER,
    };
    use crate::application::handlers::ticket::{Issuance, TicketIssuer};
    use crate::domain::event::{Event, TicketingPolicy};
    use crate::domain::foundation::{DomainError, NotificationId, TicketId};
    use crate::domain::ticket::{
        ArtifactRef, SignedCredentialGenerator, TicketNumber, TicketStatus, VerificationToken,
    };
    use crate::ports::{IssueOutcome, NotificationRepository, TicketRepository, TransitionOutcome};
    use async_trait::async_trait;
    use secrecy::SecretString;
    use std::time::Duration;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct BrokenInbox;

    #[async_trait]
    impl NotificationRepository for BrokenInbox {
        async fn record(&self, _notification: &Notification) -> Result<(), DomainError> {
            Err(DomainError::database("inbox offline"))
        }

        async fn list_for_recipient(&self, _recipient: &UserId) -> Result<Vec<Notification>, DomainError> {
            Ok(vec![])
        }

        async fn remove_for_recipient(
            &self,
            _id: &NotificationId,
            _recipient: &UserId,
        ) -> Result<bool, DomainError> {
            Err(DomainError::database("inbox offline"))
        }
    }

    /// Ticket store that refuses every write.
    struct BrokenTickets;

    #[async_trait]
    impl TicketRepository for BrokenTickets {
        async fn issue(&self, _event: &Event, _ticket: &Ticket) -> Result<IssueOutcome, DomainError> {
            Err(DomainError::database("tickets table locked"))
        }

        async fn confirm(
            &self,
            _event: &Event,
            _ticket: &Ticket,
            _expected: TicketStatus,
        ) -> Result<TransitionOutcome, DomainError> {
            Err(DomainError::database("tickets table locked"))
        }

        async fn transition(
            &self,
            _ticket: &Ticket,
            _expected: TicketStatus,
        ) -> Result<TransitionOutcome, DomainError> {
            Err(DomainError::database("tickets table locked"))
        }

        async fn attach_artifact(
            &self,
            _id: &TicketId,
            _artifact: &ArtifactRef,
        ) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_by_id(&self, _id: &TicketId) -> Result<Option<Ticket>, DomainError> {
            Ok(None)
        }

        async fn find_by_number(
            &self,
            _number: &TicketNumber,
        ) -> Result<Option<Ticket>, DomainError> {
            Ok(None)
        }

        async fn find_by_token(
            &self,
            _token: &VerificationToken,
        ) -> Result<Option<Ticket>, DomainError> {
            Ok(None)
        }

        async fn find_live(
            &self,
            _event_id: &EventId,
            _user_id: &UserId,
        ) -> Result<Option<Ticket>, DomainError> {
            Ok(None)
        }

        async fn list_for_user(&self, _user_id: &UserId) -> Result<Vec<Ticket>, DomainError> {
            Ok(vec![])
        }

        async fn list_for_event(&self, _event_id: &EventId) -> Result<Vec<Ticket>, DomainError> {
            Ok(vec![])
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn handler(store: &InMemoryStore) -> JoinEventHandler {
        handler_with(store, Arc::new(store.clone()), issuer(store, None))
    }

    fn handler_with(
        store: &InMemoryStore,
        inbox: Arc<dyn NotificationRepository>,
        issuer: TicketIssuer,
    ) -> JoinEventHandler {
        JoinEventHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(NotificationEmitter::new(inbox, Duration::from_millis(500))),
            Arc::new(AutoIssueTicketHandler::new(Arc::new(issuer))),
        )
    }

    fn join(event_id: EventId, user_id: &UserId) -> JoinEventCommand {
        JoinEventCommand {
            event_id,
            user_id: user_id.clone(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn fails_when_event_missing() {
        let store = InMemoryStore::new();
        let alice = member(&store, "alice").await;
        let event_id = EventId::new();

        let result = handler(&store).handle(join(event_id, &alice)).await;
        assert_eq!(result.unwrap_err(), AttendanceError::event_not_found(event_id));
    }

    #[tokio::test]
    async fn fails_when_user_unknown() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, TicketingPolicy::Disabled).await;

        let result = handler(&store).handle(join(event.id, &user("ghost"))).await;
        assert_eq!(result.unwrap_err(), AttendanceError::user_not_found(user("ghost")));
    }

    #[tokio::test]
    async fn fails_on_second_join() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, TicketingPolicy::Disabled).await;
        let alice = member(&store, "alice").await;
        let handler = handler(&store);

        handler.handle(join(event.id, &alice)).await.unwrap();
        let result = handler.handle(join(event.id, &alice)).await;

        assert_eq!(
            result.unwrap_err(),
            AttendanceError::already_joined(event.id, alice)
        );
    }

    #[tokio::test]
    async fn fails_when_capacity_zero() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 0, TicketingPolicy::Disabled).await;
        let alice = member(&store, "alice").await;

        let result = handler(&store).handle(join(event.id, &alice)).await;
        assert_eq!(
            result.unwrap_err(),
            AttendanceError::event_full(event.id, event.capacity)
        );
    }

    #[tokio::test]
    async fn joins_and_notifies_organizer() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, TicketingPolicy::Disabled).await;
        let alice = member(&store, "alice").await;

        let result = handler(&store).handle(join(event.id, &alice)).await.unwrap();

        assert!(result.organizer_notified);
        assert_eq!(result.ticket, TicketOutcome::NotApplicable);
        assert!(result.attendance.rsvp);
        let inbox = store.list_for_recipient(&user(ORGANIZER)).await.unwrap();
        assert_eq!(inbox[0].message, "Alice has joined your event: Rust Meetup");
    }

    #[tokio::test]
    async fn ticketed_join_issues_confirmed_ticket_even_with_approval() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, ticketing(true)).await;
        let alice = member(&store, "alice").await;

        let result = handler(&store).handle(join(event.id, &alice)).await.unwrap();

        match result.ticket {
            TicketOutcome::Issued(ticket) => assert_eq!(ticket.status, TicketStatus::Confirmed),
            other => panic!("expected issued ticket, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn join_reuses_previously_purchased_ticket() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 1, ticketing(false)).await;
        let alice = member(&store, "alice").await;
        let bought = issuer(&store, None)
            .issue(&event, &alice, TicketStatus::Confirmed)
            .await
            .unwrap();

        let result = handler(&store).handle(join(event.id, &alice)).await.unwrap();

        match (bought, result.ticket) {
            (
                Issuance::Issued(original),
                TicketOutcome::Existing(existing),
            ) => assert_eq!(original.id, existing.id),
            (_, other) => panic!("expected existing ticket, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn notification_failure_does_not_fail_join() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, TicketingPolicy::Disabled).await;
        let alice = member(&store, "alice").await;
        let handler = handler_with(&store, Arc::new(BrokenInbox), issuer(&store, None));

        let result = handler.handle(join(event.id, &alice)).await.unwrap();

        assert!(!result.organizer_notified);
        assert_eq!(store.attendance_count(&event.id).await, 1);
    }

    #[tokio::test]
    async fn ticket_failure_keeps_attendance() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 5, ticketing(false)).await;
        let alice = member(&store, "alice").await;
        let broken_issuer = TicketIssuer::new(
            Arc::new(BrokenTickets),
            Arc::new(store.clone()),
            Arc::new(SignedCredentialGenerator::new(SecretString::new(
                "k".to_string(),
            ))),
            None,
            Duration::from_millis(100),
        );
        let handler = handler_with(&store, Arc::new(store.clone()), broken_issuer);

        let result = handler.handle(join(event.id, &alice)).await.unwrap();

        assert!(matches!(result.ticket, TicketOutcome::Failed { .. }));
        assert_eq!(store.attendance_count(&event.id).await, 1);
    }

    #[tokio::test]
    async fn second_user_refused_when_single_seat_taken() {
        let store = InMemoryStore::new();
        let event = event_with(&store, 1, ticketing(false)).await;
        let alice = member(&store, "alice").await;
        let bob = member(&store, "bob").await;
        let handler = handler(&store);

        handler.handle(join(event.id, &alice)).await.unwrap();
        let result = handler.handle(join(event.id, &bob)).await;

        assert_eq!(
            result.unwrap_err(),
            AttendanceError::event_full(event.id, event.capacity)
        );
    }
}
