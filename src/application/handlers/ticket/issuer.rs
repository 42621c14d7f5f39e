//! TicketIssuer - shared issuance path for purchases and auto-issue.
//!
//! Owns the credential retry loop and the best-effort artifact rendering
//! that follows a confirmation.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::event::Event;
use crate::domain::foundation::UserId;
use crate::domain::ticket::{
    Ticket, TicketCredentialGenerator, TicketError, TicketStatus, MAX_CREDENTIAL_ATTEMPTS,
};
use crate::domain::user::UserProfile;
use crate::ports::{IssueOutcome, RenderError, TicketRenderer, TicketRepository, UserDirectory};

/// Outcome of an issuance request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issuance {
    /// A new ticket was stored.
    Issued(Ticket),
    /// The user already held this live ticket; nothing was stored.
    Existing(Ticket),
}

pub struct TicketIssuer {
    tickets: Arc<dyn TicketRepository>,
    users: Arc<dyn UserDirectory>,
    credentials: Arc<dyn TicketCredentialGenerator>,
    renderer: Option<Arc<dyn TicketRenderer>>,
    side_effect_timeout: Duration,
}

impl TicketIssuer {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        users: Arc<dyn UserDirectory>,
        credentials: Arc<dyn TicketCredentialGenerator>,
        renderer: Option<Arc<dyn TicketRenderer>>,
        side_effect_timeout: Duration,
    ) -> Self {
        Self {
            tickets,
            users,
            credentials,
            renderer,
            side_effect_timeout,
        }
    }

    /// Stores a new ticket for (event, user) in `initial` state.
    ///
    /// Regenerates credentials on collision, at most
    /// [`MAX_CREDENTIAL_ATTEMPTS`] times. A confirmed ticket is rendered
    /// before returning; render failures leave the artifact empty.
    pub async fn issue(
        &self,
        event: &Event,
        user_id: &UserId,
        initial: TicketStatus,
    ) -> Result<Issuance, TicketError> {
        for attempt in 1..=MAX_CREDENTIAL_ATTEMPTS {
            let ticket = Ticket::issue(
                self.credentials.generate(),
                event.id,
                user_id.clone(),
                initial,
            );

            match self.tickets.issue(event, &ticket).await? {
                IssueOutcome::Issued(mut ticket) => {
                    tracing::info!(
                        event_id = %event.id,
                        user_id = %user_id,
                        ticket_number = %ticket.ticket_number,
                        status = %ticket.status,
                        "Ticket issued"
                    );
                    if ticket.status == TicketStatus::Confirmed {
                        self.render_artifact(&mut ticket, event).await;
                    }
                    return Ok(Issuance::Issued(ticket));
                }
                IssueOutcome::ExistingLive(existing) => return Ok(Issuance::Existing(existing)),
                IssueOutcome::Full { occupancy } => {
                    tracing::info!(
                        event_id = %event.id,
                        user_id = %user_id,
                        occupancy,
                        capacity = %event.capacity,
                        "Ticket refused, event full"
                    );
                    return Err(TicketError::event_full(event.id, event.capacity));
                }
                IssueOutcome::EventNotFound => return Err(TicketError::event_not_found(event.id)),
                IssueOutcome::DuplicateCredentials => {
                    tracing::warn!(
                        event_id = %event.id,
                        attempt,
                        "Ticket credentials collided, regenerating"
                    );
                }
            }
        }

        tracing::error!(
            event_id = %event.id,
            user_id = %user_id,
            attempts = MAX_CREDENTIAL_ATTEMPTS,
            "Giving up on unique ticket credentials"
        );
        Err(TicketError::DuplicateTicketToken)
    }

    /// Renders and attaches the ticket document. Never fails the caller.
    ///
    /// Returns whether an artifact is now attached.
    pub async fn render_artifact(&self, ticket: &mut Ticket, event: &Event) -> bool {
        let Some(renderer) = &self.renderer else {
            tracing::debug!(
                ticket_number = %ticket.ticket_number,
                "No renderer configured, artifact left pending"
            );
            return false;
        };

        let holder = match self.holder_profile(&ticket.user_id).await {
            Some(profile) => profile,
            None => UserProfile::new(ticket.user_id.clone(), "", ""),
        };

        let rendered = match tokio::time::timeout(
            self.side_effect_timeout,
            renderer.render(ticket, event, &holder),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(RenderError::Timeout(
                self.side_effect_timeout.as_millis() as u64,
            )),
        };

        let artifact = match rendered {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    ticket_number = %ticket.ticket_number,
                    "Ticket render failed, artifact left pending"
                );
                return false;
            }
        };

        if let Err(e) = self.tickets.attach_artifact(&ticket.id, &artifact).await {
            tracing::warn!(
                error = %e,
                ticket_number = %ticket.ticket_number,
                "Failed to store ticket artifact"
            );
            return false;
        }
        ticket.attach_artifact(artifact);
        true
    }

    async fn holder_profile(&self, user_id: &UserId) -> Option<UserProfile> {
        match tokio::time::timeout(self.side_effect_timeout, self.users.find_profile(user_id)).await
        {
            Ok(Ok(profile)) => profile,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, user_id = %user_id, "Holder lookup failed");
                None
            }
            Err(_) => {
                tracing::warn!(user_id = %user_id, "Holder lookup timed out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryStore, RecordingTicketRenderer};
    use crate::domain::event::{Capacity, TicketingPolicy};
    use crate::domain::foundation::{EventId, Timestamp};
    use crate::domain::ticket::{
        SignedCredentialGenerator, TicketCredentials, TicketNumber, VerificationToken,
    };
    use secrecy::SecretString;
    use std::sync::Mutex;

    /// Always hands out the same credentials.
    struct FixedCredentials;

    impl TicketCredentialGenerator for FixedCredentials {
        fn generate(&self) -> TicketCredentials {
            TicketCredentials {
                number: TicketNumber::new("TKT-1-FIXED0000").unwrap(),
                token: VerificationToken::new("cd".repeat(32)).unwrap(),
            }
        }

        fn authenticate(&self, _number: &TicketNumber, _token: &VerificationToken) -> bool {
            true
        }
    }

    /// Counts how many credential pairs were requested.
    struct CountingCredentials {
        inner: FixedCredentials,
        calls: Mutex<usize>,
    }

    impl TicketCredentialGenerator for CountingCredentials {
        fn generate(&self) -> TicketCredentials {
            *self.calls.lock().unwrap() += 1;
            self.inner.generate()
        }

        fn authenticate(&self, number: &TicketNumber, token: &VerificationToken) -> bool {
            self.inner.authenticate(number, token)
        }
    }

    async fn setup(capacity: i64) -> (InMemoryStore, Event) {
        let store = InMemoryStore::new();
        let event = Event::new(
            EventId::new(),
            UserId::new("organizer").unwrap(),
            "Concert",
            "Arena",
            Timestamp::now(),
            Capacity::new(capacity).unwrap(),
            TicketingPolicy::Enabled {
                requires_approval: false,
                price_cents: Some(4000),
            },
        )
        .unwrap();
        store.insert_event(event.clone()).await;
        (store, event)
    }

    fn issuer_with(
        store: &InMemoryStore,
        credentials: Arc<dyn TicketCredentialGenerator>,
        renderer: Option<Arc<dyn TicketRenderer>>,
    ) -> TicketIssuer {
        TicketIssuer::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            credentials,
            renderer,
            Duration::from_millis(200),
        )
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn signed() -> Arc<dyn TicketCredentialGenerator> {
        Arc::new(SignedCredentialGenerator::new(SecretString::new("k".to_string())))
    }

    #[tokio::test]
    async fn gives_up_after_repeated_collisions() {
        let (store, event) = setup(10).await;
        let counting = Arc::new(CountingCredentials {
            inner: FixedCredentials,
            calls: Mutex::new(0),
        });
        let issuer = issuer_with(&store, counting.clone(), None);

        issuer
            .issue(&event, &user("a"), TicketStatus::Confirmed)
            .await
            .unwrap();
        let result = issuer
            .issue(&event, &user("b"), TicketStatus::Confirmed)
            .await;

        assert_eq!(result, Err(TicketError::DuplicateTicketToken));
        assert_eq!(*counting.calls.lock().unwrap(), 1 + MAX_CREDENTIAL_ATTEMPTS);
    }

    #[tokio::test]
    async fn confirmed_ticket_gets_artifact() {
        let (store, event) = setup(10).await;
        let renderer = Arc::new(RecordingTicketRenderer::new());
        let issuer = issuer_with(
            &store,
            signed(),
            Some(renderer.clone() as Arc<dyn TicketRenderer>),
        );

        let Issuance::Issued(ticket) = issuer
            .issue(&event, &user("a"), TicketStatus::Confirmed)
            .await
            .unwrap()
        else {
            panic!("expected a new ticket");
        };

        assert!(ticket.artifact.is_some());
        assert_eq!(renderer.rendered(), vec![ticket.id]);
        let stored = store.find_by_id(&ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.artifact, ticket.artifact);
    }

    #[tokio::test]
    async fn render_failure_keeps_ticket_confirmed() {
        let (store, event) = setup(10).await;
        let renderer = Arc::new(RecordingTicketRenderer::new());
        renderer.set_failing(true);
        let issuer = issuer_with(
            &store,
            signed(),
            Some(renderer as Arc<dyn TicketRenderer>),
        );

        let Issuance::Issued(ticket) = issuer
            .issue(&event, &user("a"), TicketStatus::Confirmed)
            .await
            .unwrap()
        else {
            panic!("expected a new ticket");
        };

        assert_eq!(ticket.status, TicketStatus::Confirmed);
        assert!(ticket.awaiting_artifact());
    }

    #[tokio::test]
    async fn slow_renderer_is_abandoned() {
        let (store, event) = setup(10).await;
        let renderer = Arc::new(RecordingTicketRenderer::with_delay(Duration::from_secs(2)));
        let issuer = issuer_with(
            &store,
            signed(),
            Some(renderer as Arc<dyn TicketRenderer>),
        );

        let Issuance::Issued(ticket) = issuer
            .issue(&event, &user("a"), TicketStatus::Confirmed)
            .await
            .unwrap()
        else {
            panic!("expected a new ticket");
        };
        assert!(ticket.awaiting_artifact());
    }

    #[tokio::test]
    async fn pending_ticket_is_not_rendered() {
        let (store, event) = setup(10).await;
        let renderer = Arc::new(RecordingTicketRenderer::new());
        let issuer = issuer_with(
            &store,
            signed(),
            Some(renderer.clone() as Arc<dyn TicketRenderer>),
        );

        issuer
            .issue(&event, &user("a"), TicketStatus::Pending)
            .await
            .unwrap();
        assert!(renderer.rendered().is_empty());
    }
}
