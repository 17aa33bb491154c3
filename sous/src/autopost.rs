use std::{
    sync::atomic::{AtomicBool, Ordering},
    sync::Arc,
    time::Duration,
};

use sous_twitch::Chat;
use tokio::{sync::Mutex, task::JoinHandle};

/// The recurring socials plug. At most one task is ever live: starting again
/// cancels the previous one first, stopping cancels and clears.
pub struct AutoPoster {
    interval: Duration,
    message: String,
    enabled: AtomicBool,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AutoPoster {
    const INTERVAL: Duration = Duration::from_secs(10 * 60);

    pub fn new(message: String) -> Self {
        Self::with_interval(message, Self::INTERVAL)
    }

    pub fn with_interval(message: String, interval: Duration) -> Self {
        Self {
            interval,
            message,
            enabled: AtomicBool::new(false),
            task: Mutex::new(None),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub async fn start(self: Arc<Self>, chat: Chat, channel: String) {
        self.enabled.store(true, Ordering::SeqCst);

        let mut task = self.task.lock().await;
        if let Some(old) = task.take() {
            old.abort();
        }

        log::info!("auto-posting socials enabled (every {:?})", self.interval);

        let this = Arc::clone(&self);
        *task = Some(tokio::spawn(async move {
            loop {
                // the first post waits a full interval; enabling is not posting
                tokio::time::sleep(this.interval).await;
                if !this.is_enabled() {
                    continue;
                }
                chat.say(&channel, &this.message).await;
                log::debug!("auto-posted socials");
            }
        }));
    }

    pub async fn stop(&self) {
        self.enabled.store(false, Ordering::SeqCst);
        if let Some(old) = self.task.lock().await.take() {
            old.abort();
        }
        log::info!("auto-posting socials disabled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_secs(600);

    fn poster() -> Arc<AutoPoster> {
        Arc::new(AutoPoster::with_interval(String::from("follow us!"), TICK))
    }

    async fn settle() {
        // give the posting task a chance to run after the clock moves
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_post_waits_a_full_interval() {
        let (chat, mut rx) = Chat::new(8);
        let poster = poster();
        Arc::clone(&poster).start(chat, String::from("#kitchen")).await;
        assert!(poster.is_enabled());

        // let the spawned task run once so it arms its interval timer
        settle().await;
        tokio::time::advance(TICK - Duration::from_secs(1)).await;
        settle().await;
        assert!(rx.try_recv().is_err(), "posted too early");

        tokio::time::advance(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(
            rx.try_recv().unwrap(),
            "PRIVMSG #kitchen :follow us!\r\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_leaves_one_task() {
        let (chat, mut rx) = Chat::new(8);
        let poster = poster();
        Arc::clone(&poster).start(chat.clone(), String::from("#kitchen")).await;
        Arc::clone(&poster).start(chat, String::from("#kitchen")).await;

        // let the spawned task run once so it arms its interval timer
        settle().await;
        tokio::time::advance(TICK).await;
        settle().await;

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err(), "two tasks are posting");
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_the_task() {
        let (chat, mut rx) = Chat::new(8);
        let poster = poster();
        Arc::clone(&poster).start(chat, String::from("#kitchen")).await;
        poster.stop().await;
        assert!(!poster.is_enabled());

        tokio::time::advance(TICK * 3).await;
        settle().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn restarting_after_stop_works() {
        let (chat, mut rx) = Chat::new(8);
        let poster = poster();
        Arc::clone(&poster).start(chat.clone(), String::from("#kitchen")).await;
        poster.stop().await;
        Arc::clone(&poster).start(chat, String::from("#kitchen")).await;

        // let the spawned task run once so it arms its interval timer
        settle().await;
        tokio::time::advance(TICK).await;
        settle().await;
        assert!(rx.try_recv().is_ok());
    }
}
