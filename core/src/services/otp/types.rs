//! Types for OTP service results

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{Challenge, Channel};

/// Result of issuing a challenge
///
/// Carries the code back to the in-process caller. The HTTP boundary never
/// echoes it to clients.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedChallenge {
    /// Identifier of the stored challenge
    pub challenge_id: Uuid,
    /// Recipient the code was delivered to
    pub recipient: String,
    /// Channel used for delivery
    pub channel: Channel,
    /// The generated code
    pub code: String,
    /// When the challenge stops being valid
    pub expires_at: DateTime<Utc>,
    /// Provider message identifier
    pub message_id: String,
}

impl IssuedChallenge {
    pub(crate) fn new(challenge: &Challenge, message_id: String) -> Self {
        Self {
            challenge_id: challenge.id,
            recipient: challenge.recipient.clone(),
            channel: challenge.channel,
            code: challenge.code.clone(),
            expires_at: challenge.expires_at,
            message_id,
        }
    }
}

impl std::fmt::Debug for IssuedChallenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedChallenge")
            .field("challenge_id", &self.challenge_id)
            .field("recipient", &self.recipient)
            .field("channel", &self.channel)
            .field("code", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .field("message_id", &self.message_id)
            .finish()
    }
}

/// Result of a successful verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified {
    /// Channel the verified code had been sent over
    pub channel: Channel,
    /// When the code was accepted
    pub verified_at: DateTime<Utc>,
}
