//! Main OTP service implementation

use chrono::Duration;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use og_shared::recipient::mask_recipient;

use crate::domain::entities::{Challenge, Channel};
use crate::errors::{OtpError, OtpResult};
use crate::repositories::ChallengeStore;

use super::clock::SystemClock;
use super::config::OtpServiceConfig;
use super::generator::SecureCodeGenerator;
use super::locks::RecipientLocks;
use super::traits::{Clock, CodeGenerator, DeliveryService};
use super::types::{IssuedChallenge, Verified};

/// Service issuing and verifying one-time codes
///
/// Owns the lifecycle of every challenge: creation on `issue`, attempt
/// counting on `verify`, and removal on success, expiry or exhaustion.
pub struct OtpService<S: ChallengeStore, D: DeliveryService> {
    /// Table of outstanding challenges
    store: Arc<S>,
    /// SMS/email delivery capability
    delivery: Arc<D>,
    /// Time source
    clock: Arc<dyn Clock>,
    /// Code source
    code_generator: Arc<dyn CodeGenerator>,
    /// Serializes store access per recipient
    locks: RecipientLocks,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S: ChallengeStore, D: DeliveryService> OtpService<S, D> {
    /// Create a new OTP service using the system clock and the OS CSPRNG
    ///
    /// # Arguments
    ///
    /// * `store` - Challenge store implementation
    /// * `delivery` - Delivery capability for SMS and email
    /// * `config` - Service configuration, normalized before use
    pub fn new(store: Arc<S>, delivery: Arc<D>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            delivery,
            clock: Arc::new(SystemClock),
            code_generator: Arc::new(SecureCodeGenerator),
            locks: RecipientLocks::new(),
            config: config.normalized(),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the code source
    pub fn with_code_generator(mut self, code_generator: Arc<dyn CodeGenerator>) -> Self {
        self.code_generator = code_generator;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a new challenge and deliver its code
    ///
    /// This method:
    /// 1. Checks that the recipient is not blank
    /// 2. Checks that the channel has a delivery provider
    /// 3. Generates a code and stores the challenge, replacing any previous one
    /// 4. Delivers the code outside the recipient lock
    ///
    /// If delivery fails the new challenge is removed again, so a failed
    /// issuance leaves nothing verifiable behind.
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedChallenge)` - The stored challenge, including its code
    /// * `Err(OtpError::InvalidRequest)` - Empty recipient
    /// * `Err(OtpError::DeliveryUnavailable)` - No provider for the channel
    /// * `Err(OtpError::DeliveryFailed)` - The provider failed to send
    pub async fn issue(&self, recipient: &str, channel: Channel) -> OtpResult<IssuedChallenge> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(OtpError::InvalidRequest {
                message: "Recipient is required".to_string(),
            });
        }
        let masked = mask_recipient(recipient);

        if !self.delivery.is_channel_configured(channel) {
            warn!(
                recipient = %masked,
                channel = %channel,
                event = "otp_channel_unavailable",
                "Delivery channel is not configured"
            );
            return Err(OtpError::DeliveryUnavailable { channel });
        }

        let code = self.code_generator.generate(self.config.code_length);
        let challenge = Challenge::new(recipient, code, channel, self.clock.now(), self.config.ttl);
        let challenge_id = challenge.id;
        let message = render_message(&challenge.code, self.config.ttl);

        {
            let _guard = self.locks.acquire(recipient).await;
            self.store
                .put(recipient, challenge.clone())
                .await
                .map_err(store_error)?;
        }

        info!(
            recipient = %masked,
            channel = %channel,
            challenge_id = %challenge_id,
            expires_at = %challenge.expires_at,
            event = "otp_issued",
            "Issued new verification challenge"
        );

        match self.delivery.send(channel, recipient, &message).await {
            Ok(message_id) => {
                info!(
                    recipient = %masked,
                    channel = %channel,
                    message_id = %message_id,
                    event = "otp_delivered",
                    "Verification code delivered"
                );
                Ok(IssuedChallenge::new(&challenge, message_id))
            }
            Err(err) => {
                warn!(
                    recipient = %masked,
                    channel = %channel,
                    error = %err,
                    event = "otp_delivery_failed",
                    "Verification code delivery failed, discarding challenge"
                );
                self.discard_undelivered(recipient, challenge_id).await;
                Err(err.into())
            }
        }
    }

    /// Verify a submitted code
    ///
    /// The whole read-check-write sequence runs under the recipient lock.
    ///
    /// # Returns
    ///
    /// * `Ok(Verified)` - The code matched; the challenge is consumed
    /// * `Err(OtpError::InvalidRequest)` - Missing recipient or code
    /// * `Err(OtpError::NoActiveChallenge)` - Nothing outstanding for the recipient
    /// * `Err(OtpError::Expired)` - The challenge expired; it is consumed
    /// * `Err(OtpError::TooManyAttempts)` - The attempt budget is spent; it is consumed
    /// * `Err(OtpError::InvalidCode)` - Wrong code, with the attempts still left
    pub async fn verify(&self, recipient: &str, submitted_code: &str) -> OtpResult<Verified> {
        let recipient = recipient.trim();
        let submitted_code = submitted_code.trim();
        if recipient.is_empty() || submitted_code.is_empty() {
            return Err(OtpError::InvalidRequest {
                message: "Recipient and code are required".to_string(),
            });
        }
        let masked = mask_recipient(recipient);

        let _guard = self.locks.acquire(recipient).await;

        let mut challenge = match self.store.get(recipient).await.map_err(store_error)? {
            Some(challenge) => challenge,
            None => {
                debug!(
                    recipient = %masked,
                    event = "otp_not_found",
                    "No active challenge for recipient"
                );
                return Err(OtpError::NoActiveChallenge);
            }
        };

        let now = self.clock.now();
        if challenge.is_expired_at(now) {
            self.store.delete(recipient).await.map_err(store_error)?;
            info!(
                recipient = %masked,
                challenge_id = %challenge.id,
                event = "otp_expired",
                "Challenge expired before verification"
            );
            return Err(OtpError::Expired);
        }

        let attempts_used = challenge.record_attempt();
        if attempts_used > self.config.max_attempts {
            self.store.delete(recipient).await.map_err(store_error)?;
            warn!(
                recipient = %masked,
                challenge_id = %challenge.id,
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded"
            );
            return Err(OtpError::TooManyAttempts);
        }

        if challenge.matches(submitted_code) {
            self.store.delete(recipient).await.map_err(store_error)?;
            info!(
                recipient = %masked,
                challenge_id = %challenge.id,
                attempts_used = attempts_used,
                event = "otp_verified_success",
                "Verification code successfully verified"
            );
            return Ok(Verified {
                channel: challenge.channel,
                verified_at: now,
            });
        }

        let attempts_remaining = challenge.remaining_attempts(self.config.max_attempts);
        if attempts_remaining == 0 {
            // This failure spent the last attempt
            self.store.delete(recipient).await.map_err(store_error)?;
            warn!(
                recipient = %masked,
                challenge_id = %challenge.id,
                event = "max_attempts_exceeded",
                "Maximum verification attempts exceeded"
            );
            return Err(OtpError::TooManyAttempts);
        }

        self.store
            .put(recipient, challenge)
            .await
            .map_err(store_error)?;
        warn!(
            recipient = %masked,
            attempts_remaining = attempts_remaining,
            event = "otp_verification_failed",
            "Verification code did not match"
        );
        Err(OtpError::InvalidCode { attempts_remaining })
    }

    /// Consume any outstanding challenge for `recipient` without verifying it
    pub async fn cancel(&self, recipient: &str) -> OtpResult<()> {
        let recipient = recipient.trim();
        let _guard = self.locks.acquire(recipient).await;
        self.store.delete(recipient).await.map_err(store_error)?;
        info!(
            recipient = %mask_recipient(recipient),
            event = "otp_cancelled",
            "Cancelled outstanding challenge"
        );
        Ok(())
    }

    /// Whether `recipient` has a challenge that has not expired yet
    pub async fn has_active_challenge(&self, recipient: &str) -> OtpResult<bool> {
        let now = self.clock.now();
        Ok(self
            .store
            .get(recipient.trim())
            .await
            .map_err(store_error)?
            .map(|challenge| !challenge.is_expired_at(now))
            .unwrap_or(false))
    }

    /// Number of challenges currently held by the store, expired or not
    pub async fn outstanding_challenges(&self) -> OtpResult<usize> {
        self.store.len().await.map_err(store_error)
    }

    /// Evict every expired challenge from the store
    ///
    /// Expiry is also detected lazily by `verify`; this only bounds memory.
    pub async fn sweep_expired(&self) -> OtpResult<usize> {
        let removed = self
            .store
            .remove_expired(self.clock.now())
            .await
            .map_err(store_error)?;
        if removed > 0 {
            debug!(removed = removed, event = "otp_sweep", "Evicted expired challenges");
        }
        Ok(removed)
    }

    /// Remove a challenge whose delivery failed, unless it was re-issued meanwhile
    async fn discard_undelivered(&self, recipient: &str, challenge_id: Uuid) {
        let _guard = self.locks.acquire(recipient).await;
        let result = match self.store.get(recipient).await {
            Ok(Some(current)) if current.id == challenge_id => self.store.delete(recipient).await,
            Ok(_) => Ok(()),
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            warn!(
                recipient = %mask_recipient(recipient),
                error = %e,
                event = "otp_discard_failed",
                "Failed to discard undelivered challenge"
            );
        }
    }
}

/// Message body sent to the recipient
fn render_message(code: &str, ttl: Duration) -> String {
    let seconds = ttl.num_seconds().max(1);
    let validity = if seconds % 60 == 0 {
        let minutes = seconds / 60;
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    } else {
        format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" })
    };
    format!("Your OTP code: {}\nIt expires in {}.", code, validity)
}

fn store_error(message: String) -> OtpError {
    OtpError::Internal {
        message: format!("Challenge store failure: {}", message),
    }
}
