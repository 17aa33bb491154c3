use tokio::sync::mpsc;

/// Clonable outbound-send capability.
///
/// Anything that needs to talk outside the dispatch path (the auto-poster,
/// shutdown farewells) holds one of these; the bot loop drains the channel
/// onto the wire. Failures are logged, never retried.
#[derive(Clone)]
pub struct Chat {
    tx: mpsc::Sender<String>,
}

impl Chat {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub async fn say(&self, channel: &str, data: &str) {
        self.raw(format!("PRIVMSG {channel} :{data}\r\n")).await
    }

    pub(crate) async fn raw(&self, line: String) {
        if self.tx.send(line).await.is_err() {
            log::error!("chat writer is gone, dropping a line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn says_are_framed_privmsgs() {
        let (chat, mut rx) = Chat::new(4);
        chat.say("#kitchen", "hello there").await;

        assert_eq!(rx.recv().await.unwrap(), "PRIVMSG #kitchen :hello there\r\n");
    }

    #[tokio::test]
    async fn closed_receiver_does_not_panic() {
        let (chat, rx) = Chat::new(4);
        drop(rx);
        chat.say("#kitchen", "anyone?").await;
    }
}
