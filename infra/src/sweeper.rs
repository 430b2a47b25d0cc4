//! Background eviction of expired challenges

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use og_core::{ChallengeStore, DeliveryService, OtpService};

/// Run `OtpService::sweep_expired` every `every` until the handle is aborted
///
/// Expired challenges are rejected by `verify` regardless; sweeping only keeps
/// abandoned ones from accumulating.
pub fn spawn_expiry_sweeper<S, D>(service: Arc<OtpService<S, D>>, every: Duration) -> JoinHandle<()>
where
    S: ChallengeStore + 'static,
    D: DeliveryService + 'static,
{
    tokio::spawn(async move {
        let mut ticker = interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match service.sweep_expired().await {
                Ok(removed) => debug!(removed = removed, "Expiry sweep finished"),
                Err(e) => warn!(error = %e, "Expiry sweep failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, Utc};
    use og_core::services::otp::MockClock;
    use og_core::{Channel, MemoryChallengeStore, OtpServiceConfig};

    use crate::sms::{MockSmsService, SmsService};
    use crate::ChannelDelivery;

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_evicts_expired_challenges() {
        let clock = Arc::new(MockClock::new(Utc::now()));
        let delivery = ChannelDelivery::new(
            Some(Arc::new(MockSmsService::silent()) as Arc<dyn SmsService>),
            None,
        );
        let service = Arc::new(
            OtpService::new(
                Arc::new(MemoryChallengeStore::new()),
                Arc::new(delivery),
                OtpServiceConfig::default(),
            )
            .with_clock(clock.clone()),
        );

        service.issue("+15551234567", Channel::Sms).await.unwrap();
        let handle = spawn_expiry_sweeper(service.clone(), Duration::from_secs(60));

        // Not expired yet: the first sweep keeps it
        tokio::time::sleep(Duration::from_secs(61)).await;
        assert_eq!(service.outstanding_challenges().await.unwrap(), 1);

        clock.advance(ChronoDuration::minutes(10));
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(service.outstanding_challenges().await.unwrap(), 0);

        handle.abort();
    }
}
