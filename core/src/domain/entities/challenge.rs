//! Challenge entity: one outstanding one-time code for one recipient.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::OtpError;

/// Delivery path a challenge was sent over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Text message to a phone number
    Sms,
    /// Email to an address
    Email,
}

impl Channel {
    /// Wire name of the channel
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Channel {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("sms") {
            Ok(Channel::Sms)
        } else if s.eq_ignore_ascii_case("email") {
            Ok(Channel::Email)
        } else {
            Err(OtpError::InvalidRequest {
                message: format!("Unsupported channel: {}", s),
            })
        }
    }
}

/// An outstanding one-time code bound to a recipient
///
/// At most one challenge exists per recipient. It is removed from the store
/// when it is verified, when it is found expired, or when its attempt budget
/// runs out.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    /// Identifier of this issuance
    pub id: Uuid,

    /// Phone number or email address the code was sent to
    pub recipient: String,

    /// The fixed-width decimal code
    pub code: String,

    /// Channel used for delivery
    pub channel: Channel,

    /// Number of verification attempts made so far
    pub attempts_used: u32,

    /// Timestamp when the challenge was issued
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the challenge is void
    pub expires_at: DateTime<Utc>,
}

impl Challenge {
    /// Creates a challenge issued at `now` and valid for `ttl`
    pub fn new(
        recipient: impl Into<String>,
        code: impl Into<String>,
        channel: Channel,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.into(),
            code: code.into(),
            channel,
            attempts_used: 0,
            created_at: now,
            expires_at: now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// A challenge is void once `now` is strictly past `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Counts one verification attempt and returns the new total
    pub fn record_attempt(&mut self) -> u32 {
        self.attempts_used = self.attempts_used.saturating_add(1);
        self.attempts_used
    }

    /// Attempts left before the budget of `max_attempts` is exhausted
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts_used)
    }

    /// Compares a submitted code with the stored one as strings, in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        self.code.len() == submitted.len()
            && constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Time left until expiry, or zero if already expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}

// The code is a secret and never appears in Debug output
impl std::fmt::Debug for Challenge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Challenge")
            .field("id", &self.id)
            .field("recipient", &self.recipient)
            .field("code", &"<redacted>")
            .field("channel", &self.channel)
            .field("attempts_used", &self.attempts_used)
            .field("created_at", &self.created_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
