use tokio::sync::mpsc;

/// Two-phase termination: handlers send their farewell first, then signal an
/// exit code here. `main` drains the send queue for a moment before exiting.
#[derive(Clone)]
pub struct Shutdown {
    tx: mpsc::Sender<i32>,
}

impl Shutdown {
    pub const RESTART_CODE: i32 = 1;

    pub fn new() -> (Self, mpsc::Receiver<i32>) {
        let (tx, rx) = mpsc::channel(1);
        (Self { tx }, rx)
    }

    pub async fn signal(&self, code: i32) {
        if self.tx.send(code).await.is_err() {
            log::error!("nobody is listening for shutdown");
        }
    }
}
