//! End-to-end lifecycle of a challenge through the public service API

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::{Arc, Mutex};

    use og_core::services::otp::MockClock;
    use og_core::{
        Channel, DeliveryError, DeliveryService, MemoryChallengeStore, OtpError, OtpService,
        OtpServiceConfig,
    };
    use og_shared::OtpConfig;

    /// Inbox that keeps the last message per recipient
    #[derive(Default)]
    struct Inbox {
        messages: Mutex<Vec<(String, String)>>,
    }

    impl Inbox {
        /// Pull the code out of the last message, the way a user would read it
        fn code_for(&self, recipient: &str) -> Option<String> {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(to, _)| to == recipient)
                .and_then(|(_, body)| {
                    body.lines()
                        .next()
                        .and_then(|line| line.strip_prefix("Your OTP code: "))
                        .map(str::to_string)
                })
        }
    }

    #[async_trait]
    impl DeliveryService for Inbox {
        async fn send(
            &self,
            _channel: Channel,
            recipient: &str,
            message: &str,
        ) -> Result<String, DeliveryError> {
            let mut messages = self.messages.lock().unwrap();
            messages.push((recipient.to_string(), message.to_string()));
            Ok(format!("inbox-{}", messages.len()))
        }
    }

    fn service(config: OtpServiceConfig) -> (OtpService<MemoryChallengeStore, Inbox>, Arc<Inbox>, Arc<MockClock>) {
        let inbox = Arc::new(Inbox::default());
        let clock = Arc::new(MockClock::new(Utc::now()));
        let service = OtpService::new(Arc::new(MemoryChallengeStore::new()), inbox.clone(), config)
            .with_clock(clock.clone());
        (service, inbox, clock)
    }

    #[tokio::test]
    async fn test_user_reads_code_and_verifies() {
        let (service, inbox, _clock) = service(OtpServiceConfig::default());

        let issued = service.issue("+447911123456", Channel::Sms).await.unwrap();
        let code = inbox.code_for("+447911123456").unwrap();
        assert_eq!(code, issued.code);
        assert_eq!(code.len(), 5);

        let verified = service.verify("+447911123456", &code).await.unwrap();
        assert_eq!(verified.channel, Channel::Sms);
        assert!(!service.has_active_challenge("+447911123456").await.unwrap());
    }

    #[tokio::test]
    async fn test_configuration_drives_width_ttl_and_attempts() {
        let shared = OtpConfig::default()
            .with_digit_width(8)
            .with_ttl_ms(30_000)
            .with_max_attempts(2);
        let (service, inbox, clock) = service(OtpServiceConfig::from(&shared));

        service.issue("user@example.org", Channel::Email).await.unwrap();
        let code = inbox.code_for("user@example.org").unwrap();
        assert_eq!(code.len(), 8);
        assert!(inbox.messages.lock().unwrap()[0].1.ends_with("It expires in 30 seconds."));

        let wrong = if code == "00000000" { "11111111" } else { "00000000" };
        assert_eq!(
            service.verify("user@example.org", wrong).await.unwrap_err(),
            OtpError::InvalidCode { attempts_remaining: 1 }
        );
        assert_eq!(
            service.verify("user@example.org", wrong).await.unwrap_err(),
            OtpError::TooManyAttempts
        );

        service.issue("user@example.org", Channel::Email).await.unwrap();
        clock.advance(Duration::seconds(31));
        let code = inbox.code_for("user@example.org").unwrap();
        assert_eq!(
            service.verify("user@example.org", &code).await.unwrap_err(),
            OtpError::Expired
        );
    }

    #[tokio::test]
    async fn test_every_error_has_a_stable_code() {
        let (service, _inbox, _clock) = service(OtpServiceConfig::default());

        let err = service.verify("+447911123456", "12345").await.unwrap_err();
        assert_eq!(err.error_code(), "no_active_otp");

        let err = service.issue("   ", Channel::Email).await.unwrap_err();
        assert_eq!(err.error_code(), "invalid_request");
    }
}
