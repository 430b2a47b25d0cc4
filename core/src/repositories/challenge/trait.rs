//! Challenge store trait: the keyed table of outstanding challenges.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::Challenge;

/// Store holding zero or one challenge per recipient
///
/// The store itself is a plain table. Read-modify-write sequences that must
/// not interleave are serialized by the caller (see `RecipientLocks`), so
/// implementations only need each individual call to be atomic.
///
/// Errors are transport failures of a networked backend, reported as strings.
/// The in-memory implementation never fails.
#[async_trait]
pub trait ChallengeStore: Send + Sync {
    /// Store `challenge` for `recipient`, replacing any existing one
    async fn put(&self, recipient: &str, challenge: Challenge) -> Result<(), String>;

    /// Fetch the challenge for `recipient`
    ///
    /// # Returns
    /// * `Ok(Some(Challenge))` - A challenge is outstanding, expired or not
    /// * `Ok(None)` - Nothing stored for this recipient
    async fn get(&self, recipient: &str) -> Result<Option<Challenge>, String>;

    /// Remove the challenge for `recipient`; removing nothing is not an error
    async fn delete(&self, recipient: &str) -> Result<(), String>;

    /// Remove every challenge whose expiry lies before `now`
    ///
    /// # Returns
    /// The number of challenges removed
    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, String>;

    /// Number of stored challenges
    async fn len(&self) -> Result<usize, String>;
}
