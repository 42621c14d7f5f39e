//! Ticket aggregate entity.
//!
//! Every lifecycle operation is a guarded transition on [`TicketStatus`];
//! the guard failures are reported as the specific [`TicketError`] the
//! caller needs (already used, not pending, ...) rather than a generic
//! invalid-transition error.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, StateMachine, TicketId, Timestamp, UserId};

use super::{
    ArtifactRef, TicketCredentials, TicketError, TicketNumber, TicketStatus, TicketValidity,
    VerificationToken,
};

/// Longest revocation reason accepted.
pub const MAX_REVOKE_REASON_LEN: usize = 500;

/// Ticket aggregate.
///
/// # Invariants
///
/// - `ticket_number` and `verification_token` are globally unique
/// - at most one live ticket per (event, user)
/// - `used_at` is set iff status is `used`
/// - `revoked_at` is set iff status is `revoked`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub ticket_number: TicketNumber,
    pub verification_token: VerificationToken,
    pub event_id: EventId,
    pub user_id: UserId,
    pub status: TicketStatus,
    pub purchased_at: Timestamp,
    pub used_at: Option<Timestamp>,
    pub revoked_at: Option<Timestamp>,
    pub revoked_reason: Option<String>,
    /// Rendered document; `None` until rendering succeeds.
    pub artifact: Option<ArtifactRef>,
    pub updated_at: Timestamp,
}

impl Ticket {
    /// Issues a new ticket in its initial state.
    pub fn issue(
        credentials: TicketCredentials,
        event_id: EventId,
        user_id: UserId,
        initial: TicketStatus,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: TicketId::new(),
            ticket_number: credentials.number,
            verification_token: credentials.token,
            event_id,
            user_id,
            status: initial,
            purchased_at: now,
            used_at: None,
            revoked_at: None,
            revoked_reason: None,
            artifact: None,
            updated_at: now,
        }
    }

    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    pub fn consumes_capacity(&self) -> bool {
        self.status.consumes_capacity()
    }

    /// Confirmed ticket whose document has not been rendered yet.
    pub fn awaiting_artifact(&self) -> bool {
        self.status == TicketStatus::Confirmed && self.artifact.is_none()
    }

    /// Moves a pending ticket to confirmed.
    pub fn approve(&mut self) -> Result<(), TicketError> {
        self.require_pending()?;
        self.apply(TicketStatus::Confirmed, "approve")
    }

    /// Moves a pending ticket to cancelled.
    pub fn reject(&mut self) -> Result<(), TicketError> {
        self.require_pending()?;
        self.apply(TicketStatus::Cancelled, "reject")
    }

    /// Revokes a pending or confirmed ticket.
    ///
    /// # Errors
    ///
    /// - `AlreadyUsed` for checked-in tickets
    /// - `AlreadyRevoked` for revoked tickets
    /// - `InvalidState` for cancelled tickets
    pub fn revoke(&mut self, reason: impl Into<String>) -> Result<(), TicketError> {
        let reason = reason.into();
        if reason.chars().count() > MAX_REVOKE_REASON_LEN {
            return Err(TicketError::validation(
                "reason",
                format!("must be at most {} characters", MAX_REVOKE_REASON_LEN),
            ));
        }
        match self.status {
            TicketStatus::Used => {
                return Err(TicketError::AlreadyUsed {
                    used_at: self.used_at,
                })
            }
            TicketStatus::Revoked => return Err(TicketError::AlreadyRevoked),
            _ => {}
        }
        self.apply(TicketStatus::Revoked, "revoke")?;
        self.revoked_at = Some(self.updated_at);
        self.revoked_reason = Some(reason);
        Ok(())
    }

    /// Checks the holder in, returning the stamped time.
    pub fn check_in(&mut self) -> Result<Timestamp, TicketError> {
        match self.status {
            TicketStatus::Confirmed => {
                self.apply(TicketStatus::Used, "check in")?;
                self.used_at = Some(self.updated_at);
                Ok(self.updated_at)
            }
            TicketStatus::Used => Err(TicketError::AlreadyCheckedIn {
                used_at: self.used_at,
            }),
            current => Err(TicketError::NotConfirmed { current }),
        }
    }

    /// Validity as reported to door staff. Never mutates.
    pub fn validity(&self) -> TicketValidity {
        match self.status {
            TicketStatus::Confirmed => TicketValidity::Valid,
            TicketStatus::Used => TicketValidity::Used {
                used_at: self.used_at,
            },
            TicketStatus::Revoked => TicketValidity::Revoked {
                reason: self.revoked_reason.clone(),
                revoked_at: self.revoked_at,
            },
            status @ (TicketStatus::Pending | TicketStatus::Cancelled) => {
                TicketValidity::NotConfirmed { status }
            }
        }
    }

    pub fn attach_artifact(&mut self, artifact: ArtifactRef) {
        self.artifact = Some(artifact);
        self.updated_at = Timestamp::now();
    }

    fn require_pending(&self) -> Result<(), TicketError> {
        if self.status != TicketStatus::Pending {
            return Err(TicketError::not_pending(self.status));
        }
        Ok(())
    }

    fn apply(&mut self, target: TicketStatus, attempted: &str) -> Result<(), TicketError> {
        self.status = self
            .status
            .transition_to(target)
            .map_err(|_| TicketError::invalid_state(self.status, attempted))?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
