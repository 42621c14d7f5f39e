//! Ticket credentials: the human-readable number and its verification token.
//!
//! The number is what a holder reads out at the door. The token is the
//! QR payload: an HMAC-SHA256 of the number under the deployment's signing
//! key, so a scanned token can be authenticated before any lookup.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use crate::domain::foundation::{Timestamp, ValidationError};

/// How many times an issuer regenerates credentials after a uniqueness clash.
pub const MAX_CREDENTIAL_ATTEMPTS: usize = 3;

const NUMBER_PREFIX: &str = "TKT";
const RANDOM_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Human-readable ticket number, `TKT-<unix-millis>-<9 base36 chars>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketNumber(String);

impl TicketNumber {
    /// Wraps a stored or user-supplied ticket number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::empty_field("ticket_number"));
        }
        Ok(Self(value.to_string()))
    }

    /// Generates a fresh number stamped with `now`.
    pub fn generate(now: Timestamp) -> Self {
        let mut entropy = Uuid::new_v4().as_u128();
        let mut suffix = String::with_capacity(RANDOM_SUFFIX_LEN);
        for _ in 0..RANDOM_SUFFIX_LEN {
            suffix.push(BASE36[(entropy % 36) as usize] as char);
            entropy /= 36;
        }
        Self(format!("{}-{}-{}", NUMBER_PREFIX, now.as_unix_millis(), suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex-encoded verification token carried in the QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::empty_field("verification_token"));
        }
        if !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::invalid_format(
                "verification_token",
                "must be hexadecimal",
            ));
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A matched number/token pair for a new ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketCredentials {
    pub number: TicketNumber,
    pub token: VerificationToken,
}

/// Produces credentials for new tickets and authenticates presented tokens.
///
/// Generators make no uniqueness promise; the store enforces uniqueness and
/// the issuer retries up to [`MAX_CREDENTIAL_ATTEMPTS`] times.
pub trait TicketCredentialGenerator: Send + Sync {
    /// Generates a fresh credential pair.
    fn generate(&self) -> TicketCredentials;

    /// Returns true if `token` was minted for `number`.
    fn authenticate(&self, number: &TicketNumber, token: &VerificationToken) -> bool;
}

/// Default generator: random numbers, HMAC-SHA256 tokens.
pub struct SignedCredentialGenerator {
    signing_key: SecretString,
}

impl SignedCredentialGenerator {
    pub fn new(signing_key: SecretString) -> Self {
        Self { signing_key }
    }

    fn sign(&self, number: &TicketNumber) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.signing_key.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(number.as_str().as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

impl TicketCredentialGenerator for SignedCredentialGenerator {
    fn generate(&self) -> TicketCredentials {
        let number = TicketNumber::generate(Timestamp::now());
        let token = VerificationToken(hex_encode(&self.sign(&number)));
        TicketCredentials { number, token }
    }

    fn authenticate(&self, number: &TicketNumber, token: &VerificationToken) -> bool {
        let expected = hex_encode(&self.sign(number));
        expected.as_bytes().ct_eq(token.as_str().as_bytes()).into()
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
