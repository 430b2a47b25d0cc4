//! Mock SMS Service
//!
//! Development stand-in for a real SMS provider. Messages are kept in memory
//! and, unless silenced, printed to the console so a developer can read the
//! code without a Twilio account.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::info;

use og_shared::recipient::{is_valid_phone, mask_recipient};

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

/// A message accepted by the mock provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockSms {
    pub message_id: String,
    pub to: String,
    pub body: String,
}

/// Mock SMS service for development and tests
#[derive(Debug)]
pub struct MockSmsService {
    sent: Mutex<Vec<MockSms>>,
    simulate_failure: AtomicBool,
    console_output: bool,
}

impl MockSmsService {
    /// Mock that prints every message to stdout
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    /// Mock that only records messages
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

    /// Make subsequent sends fail
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    pub fn get_message_count(&self) -> usize {
        self.messages().len()
    }

    /// Every message accepted so far
    pub fn sent_messages(&self) -> Vec<MockSms> {
        self.messages().clone()
    }

    /// Last message sent to `phone_number`
    pub fn last_message_to(&self, phone_number: &str) -> Option<MockSms> {
        self.messages()
            .iter()
            .rev()
            .find(|sms| sms.to == phone_number)
            .cloned()
    }

    fn messages(&self) -> std::sync::MutexGuard<'_, Vec<MockSms>> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockSmsService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsService for MockSmsService {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        if !is_valid_phone(phone_number) {
            return Err(InfrastructureError::Sms(format!(
                "Invalid phone number: {}",
                mask_recipient(phone_number)
            )));
        }

        if self.simulate_failure.load(Ordering::SeqCst) {
            return Err(InfrastructureError::Sms(
                "Simulated SMS provider failure".to_string(),
            ));
        }

        let message_id = format!("mock_{}", uuid::Uuid::new_v4().simple());

        if self.console_output {
            println!("[mock sms] to={} id={}\n{}", phone_number, message_id, message);
        }

        info!(
            recipient = %mask_recipient(phone_number),
            message_id = %message_id,
            provider = "Mock",
            "SMS accepted by mock provider"
        );

        self.messages().push(MockSms {
            message_id: message_id.clone(),
            to: phone_number.to_string(),
            body: message.to_string(),
        });

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
