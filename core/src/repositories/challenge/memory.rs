//! In-memory challenge store, lost on process restart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::Challenge;

use super::r#trait::ChallengeStore;

/// Process-local challenge table
#[derive(Clone, Default)]
pub struct MemoryChallengeStore {
    challenges: Arc<RwLock<HashMap<String, Challenge>>>,
}

impl MemoryChallengeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChallengeStore for MemoryChallengeStore {
    async fn put(&self, recipient: &str, challenge: Challenge) -> Result<(), String> {
        self.challenges
            .write()
            .await
            .insert(recipient.to_string(), challenge);
        Ok(())
    }

    async fn get(&self, recipient: &str) -> Result<Option<Challenge>, String> {
        Ok(self.challenges.read().await.get(recipient).cloned())
    }

    async fn delete(&self, recipient: &str) -> Result<(), String> {
        self.challenges.write().await.remove(recipient);
        Ok(())
    }

    async fn remove_expired(&self, now: DateTime<Utc>) -> Result<usize, String> {
        let mut challenges = self.challenges.write().await;
        let initial_count = challenges.len();

        challenges.retain(|_, challenge| !challenge.is_expired_at(now));

        Ok(initial_count - challenges.len())
    }

    async fn len(&self) -> Result<usize, String> {
        Ok(self.challenges.read().await.len())
    }
}
