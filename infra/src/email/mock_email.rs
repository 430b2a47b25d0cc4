//! Mock Email Service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

use og_shared::recipient::{is_valid_email, mask_recipient};

use crate::email::email_service::EmailService;
use crate::InfrastructureError;

/// An email accepted by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockEmail {
    pub message_id: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mock email service that records messages and optionally prints them
#[derive(Debug)]
pub struct MockEmailService {
    sent: Mutex<Vec<MockEmail>>,
    simulate_failure: AtomicBool,
    console_output: bool,
}

impl MockEmailService {
    /// Mock that prints every email to stdout
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Mock that only records emails
    pub fn silent() -> Self {
        Self::with_options(false, false)
    }

    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            simulate_failure: AtomicBool::new(simulate_failure),
            console_output,
        }
    }

    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn get_message_count(&self) -> usize {
        self.messages().len()
    }

    /// Last email sent to `address`
    pub fn last_message_to(&self, address: &str) -> Option<MockEmail> {
        self.messages()
            .iter()
            .rev()
            .find(|email| email.to == address)
            .cloned()
    }

    fn messages(&self) -> MutexGuard<'_, Vec<MockEmail>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_email(to) {
            return Err(InfrastructureError::Email(format!(
                "Invalid email address: {}",
                mask_recipient(to)
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Email(
                "Simulated email provider failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", uuid::Uuid::new_v4().simple());

        if self.console_output {
            println!("[mock email] to={} subject={:?}\n{}", to, subject, body);
        }

        info!(
            recipient = %mask_recipient(to),
            message_id = %message_id,
            provider = "Mock",
            "Email accepted by mock provider"
        );

        self.messages().push(MockEmail {
            message_id: message_id.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
