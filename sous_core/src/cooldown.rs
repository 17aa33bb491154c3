use std::collections::HashMap;
use std::time::Duration;

use tokio::{sync::Mutex, time::Instant};

/// Keyed rate limiter. Keys are either a fixed sentinel (channel-wide
/// cooldowns) or a username (per-user cooldowns).
///
/// Entries are created on first use and overwritten on each qualifying use;
/// they are never evicted.
pub struct Cooldown {
    duration: Duration,
    used: Mutex<HashMap<Box<str>, Instant>>,
}

impl Cooldown {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            used: Mutex::new(HashMap::new()),
        }
    }

    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Zero for an unseen key.
    pub async fn remaining(&self, key: &str, now: Instant) -> Duration {
        let used = self.used.lock().await;
        used.get(key)
            .map_or(Duration::ZERO, |&last| {
                self.duration.saturating_sub(now.saturating_duration_since(last))
            })
    }

    pub async fn mark_used(&self, key: &str, now: Instant) {
        self.used.lock().await.insert(Box::from(key), now);
    }

    /// Check-and-set under a single lock: two concurrent calls for the same
    /// key cannot both claim it.
    pub async fn try_claim(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut used = self.used.lock().await;
        if let Some(&last) = used.get(key) {
            let left = self.duration.saturating_sub(now.saturating_duration_since(last));
            if !left.is_zero() {
                return Err(left);
            }
        }
        used.insert(Box::from(key), now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THIRTY: Duration = Duration::from_secs(30);

    #[tokio::test(start_paused = true)]
    async fn unseen_key_is_ready() {
        let cooldown = Cooldown::new(THIRTY);
        assert_eq!(
            cooldown.remaining("discord", Instant::now()).await,
            Duration::ZERO
        );
    }

    #[tokio::test(start_paused = true)]
    async fn remaining_counts_down() {
        let cooldown = Cooldown::new(THIRTY);
        let t0 = Instant::now();
        cooldown.mark_used("discord", t0).await;

        for (elapsed, left) in [(0, 30), (10, 20), (30, 0), (45, 0)] {
            let now = t0 + Duration::from_secs(elapsed);
            assert_eq!(
                cooldown.remaining("discord", now).await,
                Duration::from_secs(left),
                "elapsed {elapsed}s"
            );
        }
    }

    #[tokio::test(start_paused = true)]
    async fn keys_are_independent() {
        let cooldown = Cooldown::new(THIRTY);
        let t0 = Instant::now();
        cooldown.mark_used("alice", t0).await;
        assert_eq!(cooldown.remaining("bob", t0).await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn claim_then_deny_then_ready() {
        let cooldown = Cooldown::new(THIRTY);
        let t0 = Instant::now();

        assert_eq!(cooldown.try_claim("alice", t0).await, Ok(()));
        assert_eq!(
            cooldown.try_claim("alice", t0 + Duration::from_secs(10)).await,
            Err(Duration::from_secs(20))
        );
        assert_eq!(
            cooldown.try_claim("alice", t0 + THIRTY).await,
            Ok(())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn mark_used_overwrites() {
        let cooldown = Cooldown::new(THIRTY);
        let t0 = Instant::now();
        cooldown.mark_used("alice", t0).await;
        cooldown.mark_used("alice", t0 + Duration::from_secs(25)).await;
        assert_eq!(
            cooldown
                .remaining("alice", t0 + Duration::from_secs(30))
                .await,
            Duration::from_secs(25)
        );
    }
}
