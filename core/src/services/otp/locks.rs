//! Per-recipient critical sections
//!
//! `verify` reads a challenge, bumps its attempt counter and writes it back.
//! Two concurrent calls for the same recipient must not interleave inside that
//! sequence, or an attempt is lost. Calls for different recipients never wait
//! on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Lock for one recipient plus the number of callers holding or awaiting it
#[derive(Debug)]
struct Entry {
    lock: Arc<AsyncMutex<()>>,
    users: usize,
}

type LockMap = HashMap<String, Entry>;

/// Registry of async mutexes keyed by recipient
///
/// Entries are created on demand and dropped again once no guard or waiter
/// holds them, so the registry only grows with in-flight recipients. A waiter
/// whose future is dropped before it gets the lock gives up its share too.
#[derive(Debug, Default)]
pub struct RecipientLocks {
    locks: Mutex<LockMap>,
}

impl RecipientLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `recipient`
    pub async fn acquire(&self, recipient: &str) -> RecipientGuard<'_> {
        let lock = {
            let mut locks = self.lock_map();
            let entry = locks.entry(recipient.to_string()).or_insert_with(|| Entry {
                lock: Arc::new(AsyncMutex::new(())),
                users: 0,
            });
            entry.users += 1;
            Arc::clone(&entry.lock)
        };

        // Registered before the first await so a cancelled wait still releases it
        let registration = Registration {
            registry: self,
            recipient: recipient.to_string(),
        };
        let guard = lock.lock_owned().await;

        RecipientGuard {
            _guard: guard,
            _registration: registration,
        }
    }

    /// Number of recipients with a held or awaited lock
    pub fn active(&self) -> usize {
        self.lock_map().len()
    }

    fn lock_map(&self) -> MutexGuard<'_, LockMap> {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One caller's share of a registry entry, given back on drop
struct Registration<'a> {
    registry: &'a RecipientLocks,
    recipient: String,
}

impl Drop for Registration<'_> {
    fn drop(&mut self) {
        let mut locks = self.registry.lock_map();
        let unused = match locks.get_mut(&self.recipient) {
            Some(entry) => {
                entry.users = entry.users.saturating_sub(1);
                entry.users == 0
            }
            None => false,
        };
        if unused {
            locks.remove(&self.recipient);
        }
    }
}

/// Exclusive access to one recipient, released on drop
pub struct RecipientGuard<'a> {
    // Fields drop in order: the async lock is released before the entry
    _guard: OwnedMutexGuard<()>,
    _registration: Registration<'a>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_entry_is_removed_after_release() {
        let locks = RecipientLocks::new();
        {
            let _guard = locks.acquire("+15551234567").await;
            assert_eq!(locks.active(), 1);
        }
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn test_different_recipients_do_not_block() {
        let locks = RecipientLocks::new();
        let _a = locks.acquire("a@example.com").await;
        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire("b@example.com")).await;
        assert!(b.is_ok());
    }

    #[tokio::test]
    async fn test_same_recipient_blocks() {
        let locks = RecipientLocks::new();
        let _held = locks.acquire("a@example.com").await;
        let second =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire("a@example.com")).await;
        assert!(second.is_err());
    }

    #[tokio::test]
    async fn test_cancelled_waiter_releases_entry() {
        let locks = RecipientLocks::new();
        let held = locks.acquire("a@example.com").await;

        let mut waiter = Box::pin(locks.acquire("a@example.com"));
        assert!(tokio::time::timeout(Duration::from_millis(20), &mut waiter)
            .await
            .is_err());
        assert_eq!(locks.active(), 1);

        drop(held);
        drop(waiter);
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn test_entry_survives_while_waiter_remains() {
        let locks = RecipientLocks::new();
        let held = locks.acquire("a@example.com").await;

        let mut waiter = Box::pin(locks.acquire("a@example.com"));
        assert!(tokio::time::timeout(Duration::from_millis(20), &mut waiter)
            .await
            .is_err());

        drop(held);
        assert_eq!(locks.active(), 1);
        let guard = waiter.await;
        assert_eq!(locks.active(), 1);
        drop(guard);
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_critical_section_is_exclusive() {
        let locks = Arc::new(RecipientLocks::new());
        let inside = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..16 {
            let locks = Arc::clone(&locks);
            let inside = Arc::clone(&inside);
            let max_seen = Arc::clone(&max_seen);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire("+15551234567").await;
                let now_inside = inside.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now_inside, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(1)).await;
                inside.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active(), 0);
    }
}
