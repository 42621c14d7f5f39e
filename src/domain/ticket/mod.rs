//! Ticket domain module.
//!
//! # Module Structure
//!
//! - `status` - TicketStatus state machine
//! - `aggregate` - Ticket aggregate and its guarded transitions
//! - `credentials` - Ticket numbers, verification tokens and their generator
//! - `artifact` - Rendered document reference
//! - `verification` - Validity report returned to door staff
//! - `errors` - TicketError

mod aggregate;
mod artifact;
mod credentials;
mod errors;
mod status;
mod verification;

pub use aggregate::{Ticket, MAX_REVOKE_REASON_LEN};
pub use artifact::{ArtifactRef, DEFAULT_ARTIFACT_BASE_PATH};
pub use credentials::{
    SignedCredentialGenerator, TicketCredentialGenerator, TicketCredentials, TicketNumber,
    VerificationToken, MAX_CREDENTIAL_ATTEMPTS,
};
pub use errors::TicketError;
pub use status::TicketStatus;
pub use verification::TicketValidity;
